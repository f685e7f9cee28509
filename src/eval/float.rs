//! Float operators and the int/float bridges
//!
//! These read words as IEEE-754 doubles with no check that the bits came
//! from a float. `5 2.5 f+` adds the denormal whose bits are `5` to 2.5; the
//! only sanctioned conversion is `flt`.

use super::{EvalError, Evaluator};
use crate::ast::Word;

impl Evaluator {
    pub(crate) fn float_binary<F>(&mut self, f: F) -> Result<(), EvalError>
    where
        F: FnOnce(f64, f64) -> f64,
    {
        let (a, b) = self.stack.pop_pair()?;
        self.stack.push(Word::from_float(f(a.float(), b.float())))
    }

    pub(crate) fn float_unary<F>(&mut self, f: F) -> Result<(), EvalError>
    where
        F: FnOnce(f64) -> f64,
    {
        let a = self.stack.pop()?;
        self.stack.push(Word::from_float(f(a.float())))
    }

    /// flt: integer bits -> the double of equal value
    pub(crate) fn bridge_int_to_float(&mut self) -> Result<(), EvalError> {
        let a = self.stack.pop()?;
        self.stack.push(int_to_float(a))
    }

    /// int: double bits -> integer, truncated toward zero
    pub(crate) fn bridge_float_to_int(&mut self) -> Result<(), EvalError> {
        let a = self.stack.pop()?;
        self.stack.push(float_to_int(a))
    }
}

pub fn int_to_float(w: Word) -> Word {
    Word::from_float(w.int() as f64)
}

/// NaN and values outside the i64 range map to `i64::MIN`, the same
/// "integer indefinite" a hardware truncating conversion produces.
pub fn float_to_int(w: Word) -> Word {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    let v = w.float();
    if v.is_nan() || v >= LIMIT || v < -LIMIT {
        Word::from_int(i64::MIN)
    } else {
        Word::from_int(v as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flt_preserves_value() {
        assert_eq!(int_to_float(Word::from_int(5)).float(), 5.0);
        assert_eq!(int_to_float(Word::from_int(-3)).float(), -3.0);
    }

    #[test]
    fn int_truncates_toward_zero() {
        assert_eq!(float_to_int(Word::from_float(7.9)).int(), 7);
        assert_eq!(float_to_int(Word::from_float(-7.9)).int(), -7);
        assert_eq!(float_to_int(Word::from_float(0.4)).int(), 0);
    }

    #[test]
    fn int_out_of_range_is_indefinite() {
        assert_eq!(float_to_int(Word::from_float(f64::NAN)).int(), i64::MIN);
        assert_eq!(float_to_int(Word::from_float(1e300)).int(), i64::MIN);
        assert_eq!(float_to_int(Word::from_float(-1e300)).int(), i64::MIN);
        assert_eq!(
            float_to_int(Word::from_float(-9_223_372_036_854_775_808.0)).int(),
            i64::MIN
        );
    }
}
