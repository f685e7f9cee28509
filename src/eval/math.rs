use super::{EvalError, Evaluator};
use crate::ast::Word;

impl Evaluator {
    // ========================================
    // Integer operators
    // ========================================

    /// Pop `a b`, push `f(a, b)` with both words read as integers
    pub(crate) fn int_binary<F>(&mut self, f: F) -> Result<(), EvalError>
    where
        F: FnOnce(i64, i64) -> Result<i64, EvalError>,
    {
        let (a, b) = self.stack.pop_pair()?;
        let r = f(a.int(), b.int())?;
        self.stack.push(Word::from_int(r))
    }

    pub(crate) fn int_unary<F>(&mut self, f: F) -> Result<(), EvalError>
    where
        F: FnOnce(i64) -> i64,
    {
        let a = self.stack.pop()?;
        self.stack.push(Word::from_int(f(a.int())))
    }

    /// Signed comparison, pushes 1 or 0
    pub(crate) fn int_compare<F>(&mut self, f: F) -> Result<(), EvalError>
    where
        F: FnOnce(i64, i64) -> bool,
    {
        let (a, b) = self.stack.pop_pair()?;
        self.stack.push(Word::from_bool(f(a.int(), b.int())))
    }
}

/// Usage: 20 4 / -> 5
pub(crate) fn div(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::DivideByZero("/"));
    }
    Ok(a.wrapping_div(b))
}

/// Usage: 10 3 % -> 1
pub(crate) fn rem(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::DivideByZero("%"));
    }
    Ok(a.wrapping_rem(b))
}

/// Integer power by squaring. Negative exponents give 0, exponent 0 gives 1.
pub fn int_pow(base: i64, exp: i64) -> i64 {
    if exp < 0 {
        return 0;
    }
    let mut result: i64 = 1;
    let mut base = base;
    let mut exp = exp as u64;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    result
}

/// Euclidean greatest common divisor
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = a.wrapping_rem(b);
        a = b;
        b = t;
    }
    a
}

/// Wrapping factorial. Negative input gives 0.
pub fn factorial(n: i64) -> i64 {
    if n < 0 {
        return 0;
    }
    // 66! holds 64 factors of two, so every wrapped product from there is 0
    if n >= 66 {
        return 0;
    }
    (2..=n).fold(1i64, |acc, k| acc.wrapping_mul(k))
}

/// Logical shift left; the count is taken modulo 64
pub fn shl(a: i64, b: i64) -> i64 {
    ((a as u64) << (b as u64 & 63)) as i64
}

/// Arithmetic shift right; the count is taken modulo 64
pub fn sar(a: i64, b: i64) -> i64 {
    a >> (b as u64 & 63)
}
