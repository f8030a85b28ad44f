//! Input sequence model
//!
//! A sequence is a bounded list of codes read left to right: juxtaposed
//! operands are ANDed, `OR` separates clauses and `NOT` negates the next
//! operand. Slots after the last code are implicitly NONE.

use crate::types::InputCode;

/// A fixed-capacity code sequence
///
/// Invariants: at most `capacity` codes, and no NONE among them (NONE only
/// appears as implicit padding).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSeq {
    codes: Vec<InputCode>,
    capacity: usize,
}

impl InputSeq {
    /// The unassigned sequence
    pub fn empty(capacity: usize) -> Self {
        Self {
            codes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a sequence, stopping at the first NONE or at capacity
    pub fn from_codes<I>(codes: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = InputCode>,
    {
        let codes = codes
            .into_iter()
            .take_while(|&code| code != InputCode::NONE)
            .take(capacity)
            .collect();
        Self { codes, capacity }
    }

    /// Maximum number of codes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of codes before the padding
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True for the unassigned sequence
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// True when no more codes fit
    pub fn is_full(&self) -> bool {
        self.codes.len() >= self.capacity
    }

    /// Code at a slot; NONE past the end
    pub fn get(&self, index: usize) -> InputCode {
        self.codes.get(index).copied().unwrap_or(InputCode::NONE)
    }

    /// The codes before the padding
    pub fn codes(&self) -> &[InputCode] {
        &self.codes
    }

    /// Iterate over the codes before the padding
    pub fn iter(&self) -> impl Iterator<Item = InputCode> + '_ {
        self.codes.iter().copied()
    }

    /// Last code before the padding
    pub fn last(&self) -> Option<InputCode> {
        self.codes.last().copied()
    }

    /// Append a code
    ///
    /// Returns false without changing the sequence when it is full or the
    /// code is NONE.
    pub fn push(&mut self, code: InputCode) -> bool {
        if code == InputCode::NONE || self.is_full() {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Remove and return the last code
    pub fn pop(&mut self) -> Option<InputCode> {
        self.codes.pop()
    }

    /// Keep the first `len` codes
    pub fn truncate(&mut self, len: usize) {
        self.codes.truncate(len);
    }

    /// Reset to the unassigned sequence
    pub fn clear(&mut self) {
        self.codes.clear();
    }
}

impl<'a> IntoIterator for &'a InputSeq {
    type Item = InputCode;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, InputCode>>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: InputCode = InputCode::new(0);
    const B: InputCode = InputCode::new(1);
    const C: InputCode = InputCode::new(2);

    #[test]
    fn test_padding() {
        let seq = InputSeq::from_codes([A, InputCode::OR, B], 4);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(2), B);
        assert_eq!(seq.get(3), InputCode::NONE);
        assert_eq!(seq.get(100), InputCode::NONE);
    }

    #[test]
    fn test_truncates_at_none_and_capacity() {
        let seq = InputSeq::from_codes([A, InputCode::NONE, B], 8);
        assert_eq!(seq.codes(), &[A]);

        let seq = InputSeq::from_codes([A, B, C], 2);
        assert_eq!(seq.codes(), &[A, B]);
        assert!(seq.is_full());
    }

    #[test]
    fn test_value_semantics() {
        let original = InputSeq::from_codes([A], 4);
        let mut copy = original.clone();
        copy.clear();
        assert_eq!(original.codes(), &[A]);
        assert!(copy.is_empty());
        assert_ne!(original, copy);
        assert_eq!(copy, InputSeq::empty(4));
    }

    #[test]
    fn test_push_respects_capacity() {
        let mut seq = InputSeq::empty(2);
        assert!(seq.push(A));
        assert!(!seq.push(InputCode::NONE));
        assert!(seq.push(B));
        assert!(!seq.push(C));
        assert_eq!(seq.last(), Some(B));

        seq.truncate(1);
        assert_eq!(seq.pop(), Some(A));
        assert!(seq.is_empty());
    }
}
