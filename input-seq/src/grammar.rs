//! Sequence grammar validation
//!
//! A valid sequence is one or more OR-separated clauses. Each clause ends on
//! an operand, contains at least one operand that is not negated, and holds
//! at most one analog operand, which may not be negated. NOT may not be
//! doubled or dangle before OR or the end of the sequence.
//!
//! Evaluation never re-validates; only the recorder enforces these rules on
//! the sequences it produces.

use crate::codes::CodeRegistry;
use crate::seq::InputSeq;
use crate::types::{InputCode, Result, SeqError};

/// Check a sequence against the grammar
pub fn check(seq: &InputSeq, registry: &CodeRegistry) -> Result<()> {
    if seq.is_empty() {
        return Err(SeqError::EmptySequence);
    }

    let mut pending_not = false;
    let mut positive_count = 0usize;
    let mut analog_count = 0usize;
    let mut last_was_operand = false;

    for (position, code) in seq.iter().enumerate() {
        match code {
            InputCode::OR => {
                if !last_was_operand || positive_count == 0 {
                    return Err(SeqError::EmptyClause { position });
                }
                pending_not = false;
                positive_count = 0;
                analog_count = 0;
                last_was_operand = false;
            }
            InputCode::NOT => {
                if pending_not {
                    return Err(SeqError::DoubleNot { position });
                }
                pending_not = true;
                last_was_operand = false;
            }
            operand => {
                if !pending_not {
                    positive_count += 1;
                }
                if registry.analog_kind(operand).is_analog() {
                    if pending_not {
                        return Err(SeqError::NegatedAnalog { position });
                    }
                    analog_count += 1;
                    if analog_count > 1 {
                        return Err(SeqError::MultipleAnalog { position });
                    }
                }
                pending_not = false;
                last_was_operand = true;
            }
        }
    }

    if positive_count > 0 && last_was_operand {
        Ok(())
    } else {
        Err(SeqError::DanglingOperator)
    }
}

/// True if the sequence satisfies the grammar
pub fn is_valid(seq: &InputSeq, registry: &CodeRegistry) -> bool {
    check(seq, registry).is_ok()
}
