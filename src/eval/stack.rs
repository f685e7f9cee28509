use super::{EvalError, Evaluator};
use crate::ast::Word;

/// Maximum number of words on the operand stack (4096 bytes of 16-byte slots)
pub const STACK_CAPACITY: usize = 256;

/// A bounded operand stack.
///
/// The floor is index 0 and the top is `len`, so depth is always `len` and
/// can never go negative. Capacity is fixed; a push past it fails instead of
/// growing.
#[derive(Debug, Clone)]
pub struct OperandStack {
    slots: [Word; STACK_CAPACITY],
    len: usize,
}

impl Default for OperandStack {
    fn default() -> Self {
        Self::new()
    }
}

impl OperandStack {
    pub fn new() -> Self {
        OperandStack {
            slots: [Word::ZERO; STACK_CAPACITY],
            len: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live contents, floor first
    pub fn as_slice(&self) -> &[Word] {
        &self.slots[..self.len]
    }

    /// Fail unless at least `n` words are present
    pub fn require(&self, op: &'static str, n: usize) -> Result<(), EvalError> {
        if self.len < n {
            return Err(EvalError::StackUnderflow {
                op,
                needed: n,
                depth: self.len,
            });
        }
        Ok(())
    }

    pub fn push(&mut self, w: Word) -> Result<(), EvalError> {
        if self.len == STACK_CAPACITY {
            return Err(EvalError::StackCapacityExceeded(STACK_CAPACITY));
        }
        self.slots[self.len] = w;
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Word, EvalError> {
        self.require("pop", 1)?;
        self.len -= 1;
        Ok(self.slots[self.len])
    }

    /// Pop two words in push order: `a` was pushed first, `b` is the old top
    pub fn pop_pair(&mut self) -> Result<(Word, Word), EvalError> {
        self.require("pop", 2)?;
        let b = self.slots[self.len - 1];
        let a = self.slots[self.len - 2];
        self.len -= 2;
        Ok((a, b))
    }

    pub fn peek(&self) -> Option<Word> {
        self.len.checked_sub(1).map(|i| self.slots[i])
    }

    /// Discard everything down to the floor
    pub fn reset_to_floor(&mut self) {
        self.len = 0;
    }
}

impl Evaluator {
    pub(crate) fn stack_dup(&mut self) -> Result<(), EvalError> {
        let top = self.stack.peek().ok_or(EvalError::StackUnderflow {
            op: "d",
            needed: 1,
            depth: 0,
        })?;
        self.stack.push(top)
    }

    pub(crate) fn stack_swap(&mut self) -> Result<(), EvalError> {
        let (a, b) = self.stack.pop_pair()?;
        self.stack.push(b)?;
        self.stack.push(a)
    }

    pub(crate) fn stack_drop(&mut self) -> Result<(), EvalError> {
        self.stack.pop()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(v: i64) -> Word {
        Word::from_int(v)
    }

    #[test]
    fn push_pop_order() {
        let mut s = OperandStack::new();
        s.push(w(1)).unwrap();
        s.push(w(2)).unwrap();
        assert_eq!(s.depth(), 2);
        assert_eq!(s.pop_pair().unwrap(), (w(1), w(2)));
        assert!(s.is_empty());
    }

    #[test]
    fn underflow_leaves_stack_untouched() {
        let mut s = OperandStack::new();
        s.push(w(9)).unwrap();
        assert!(matches!(
            s.pop_pair(),
            Err(EvalError::StackUnderflow { needed: 2, depth: 1, .. })
        ));
        assert_eq!(s.as_slice(), &[w(9)]);
    }

    #[test]
    fn pop_empty_fails() {
        let mut s = OperandStack::new();
        assert!(matches!(s.pop(), Err(EvalError::StackUnderflow { .. })));
        assert_eq!(s.peek(), None);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut s = OperandStack::new();
        for i in 0..STACK_CAPACITY {
            s.push(w(i as i64)).unwrap();
        }
        assert!(matches!(
            s.push(w(0)),
            Err(EvalError::StackCapacityExceeded(STACK_CAPACITY))
        ));
        assert_eq!(s.depth(), STACK_CAPACITY);
        assert_eq!(s.peek(), Some(w(STACK_CAPACITY as i64 - 1)));
    }

    #[test]
    fn reset_returns_to_floor() {
        let mut s = OperandStack::new();
        s.push(w(1)).unwrap();
        s.push(w(2)).unwrap();
        s.reset_to_floor();
        assert!(s.is_empty());
        s.reset_to_floor();
        assert_eq!(s.depth(), 0);
    }
}
