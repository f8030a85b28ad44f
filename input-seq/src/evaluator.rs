//! Sequence evaluation
//!
//! Folds a sequence against live input once per frame. Evaluation is lenient:
//! it never re-validates the grammar and simply walks the codes left to right.
//!
//! Evaluating a sequence consumes edge memory for every digital code it names:
//! a released code clears its memory bit, and a code whose bit is set by an
//! edge query reads as released here.

use crate::host::HostCodeProvider;
use crate::query::CodeSampler;
use crate::seq::InputSeq;
use crate::types::{AnalogKind, AnalogReading, InputCode};

/// Sequence evaluator - folds sequences over a sampling context
pub struct SequenceEvaluator;

impl SequenceEvaluator {
    /// Is the sequence currently pressed?
    ///
    /// True if some clause has every operand satisfied, where a NOT-prefixed
    /// operand is satisfied by its code being released.
    pub fn is_pressed<H>(sampler: &mut CodeSampler<'_, H>, seq: &InputSeq) -> bool
    where
        H: HostCodeProvider + ?Sized,
    {
        let mut result = true;
        let mut invert = false;
        let mut count = 0usize;

        for code in seq.iter() {
            match code {
                InputCode::OR => {
                    if result && count > 0 {
                        return true;
                    }
                    result = true;
                    invert = false;
                    count = 0;
                }
                InputCode::NOT => invert = !invert,
                operand => {
                    // Once a clause has failed, remaining operands are not sampled
                    if result {
                        if sampler.is_down_unmemorized(operand) == invert {
                            result = false;
                        }
                        count += 1;
                    }
                    invert = false;
                }
            }
        }

        result && count > 0
    }

    /// Analog value selected by the sequence
    ///
    /// Digital operands enable or disable their clause; the clause's analog
    /// operand supplies the value. The first enabled clause with a non-zero or
    /// changed value wins; otherwise the reading is neutral.
    pub fn analog_value<H>(sampler: &mut CodeSampler<'_, H>, seq: &InputSeq) -> AnalogReading
    where
        H: HostCodeProvider + ?Sized,
    {
        let mut clause = AnalogClause::new();

        for code in seq.iter() {
            match code {
                InputCode::OR => {
                    if let Some(reading) = clause.winner() {
                        return reading;
                    }
                    clause = AnalogClause::new();
                }
                InputCode::NOT => clause.invert = !clause.invert,
                operand => {
                    if clause.enable {
                        let kind = sampler.analog_kind(operand);
                        if kind.is_analog() {
                            if let Some(value) = sampler.value(operand) {
                                clause.result = value;
                                clause.kind = kind;
                                clause.count += 1;
                                if kind == AnalogKind::Absolute
                                    && sampler.note_absolute_sample(operand, value)
                                {
                                    clause.changed = true;
                                }
                            }
                        } else if sampler.is_down_unmemorized(operand) == clause.invert {
                            clause.enable = false;
                        }
                    }
                    clause.invert = false;
                }
            }
        }

        clause.winner().unwrap_or(AnalogReading::NEUTRAL)
    }
}

/// Fold state for one clause of an analog evaluation
struct AnalogClause {
    result: i32,
    kind: AnalogKind,
    enable: bool,
    invert: bool,
    count: usize,
    changed: bool,
}

impl AnalogClause {
    fn new() -> Self {
        Self {
            result: 0,
            kind: AnalogKind::None,
            enable: true,
            invert: false,
            count: 0,
            changed: false,
        }
    }

    fn winner(&self) -> Option<AnalogReading> {
        (self.enable && self.count > 0 && (self.result != 0 || self.changed)).then_some(AnalogReading {
            value: self.result,
            kind: self.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::CodeRegistry;
    use crate::config::SeqConfig;
    use crate::host::MemoryHost;
    use crate::types::{HostCodeKind, HostHandle, ANALOG_VALUE_INVALID};

    const OR: InputCode = InputCode::OR;
    const NOT: InputCode = InputCode::NOT;

    struct Rig {
        host: MemoryHost,
        registry: CodeRegistry,
        keys: [(HostHandle, InputCode); 3],
        stick: (HostHandle, InputCode),
        wheel: (HostHandle, InputCode),
    }

    impl Rig {
        fn new() -> Self {
            let config = SeqConfig::default();
            let std_codes = crate::codes::StandardCodes::new(&config.layout);
            let mut host = MemoryHost::new();

            let mut keys = [(HostHandle(0), InputCode::NONE); 3];
            for (slot, name) in keys.iter_mut().zip(["A", "B", "C"]) {
                let code = std_codes.code(&format!("KEYCODE_{}", name)).unwrap();
                *slot = (host.add(name, HostCodeKind::Standard(code)), code);
            }
            let stick_code = std_codes.code("JOYCODE_1_ANALOG_X").unwrap();
            let stick = (host.add("Stick X", HostCodeKind::Standard(stick_code)), stick_code);
            let wheel_code = std_codes.code("MOUSECODE_1_ANALOG_X").unwrap();
            let wheel = (host.add("Mouse X", HostCodeKind::Standard(wheel_code)), wheel_code);

            let registry = CodeRegistry::from_host(&host, &config);
            Self {
                host,
                registry,
                keys,
                stick,
                wheel,
            }
        }

        fn key(&self, index: usize) -> InputCode {
            self.keys[index].1
        }

        fn set_keys(&mut self, down: [bool; 3]) {
            for (index, &pressed) in down.iter().enumerate() {
                self.host.set(self.keys[index].0, pressed as i32);
            }
        }

        fn pressed(&mut self, codes: &[InputCode]) -> bool {
            let seq = InputSeq::from_codes(codes.iter().copied(), 16);
            let mut sampler = CodeSampler::new(&mut self.registry, &self.host);
            SequenceEvaluator::is_pressed(&mut sampler, &seq)
        }

        fn analog(&mut self, codes: &[InputCode]) -> AnalogReading {
            let seq = InputSeq::from_codes(codes.iter().copied(), 16);
            let mut sampler = CodeSampler::new(&mut self.registry, &self.host);
            SequenceEvaluator::analog_value(&mut sampler, &seq)
        }
    }

    #[test]
    fn test_and_not() {
        let mut rig = Rig::new();
        let (a, b) = (rig.key(0), rig.key(1));
        let seq = [a, NOT, b];

        rig.set_keys([true, false, false]);
        assert!(rig.pressed(&seq));
        rig.set_keys([true, true, false]);
        assert!(!rig.pressed(&seq));
        rig.set_keys([false, false, false]);
        assert!(!rig.pressed(&seq));
    }

    #[test]
    fn test_matches_clause_semantics_exhaustively() {
        let mut rig = Rig::new();
        let (a, b, c) = (rig.key(0), rig.key(1), rig.key(2));
        let seq = [a, NOT, b, OR, c, OR, NOT, a, b];

        for bits in 0..8u8 {
            let down = [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0];
            rig.set_keys(down);
            let expected = (down[0] && !down[1]) || down[2] || (!down[0] && down[1]);
            assert_eq!(rig.pressed(&seq), expected, "state {:?}", down);
        }
    }

    #[test]
    fn test_empty_and_operator_only_sequences() {
        let mut rig = Rig::new();
        assert!(!rig.pressed(&[]));
        assert!(!rig.pressed(&[OR]));
        assert!(!rig.pressed(&[NOT]));
    }

    #[test]
    fn test_edge_consumer_hides_held_code() {
        let mut rig = Rig::new();
        let a = rig.key(0);
        rig.set_keys([true, false, false]);

        let mut sampler = CodeSampler::new(&mut rig.registry, &rig.host);
        assert!(sampler.is_down_edge(a));
        assert!(!rig.pressed(&[a]));

        // Release clears the memory; the next press counts again
        rig.set_keys([false, false, false]);
        assert!(!rig.pressed(&[a]));
        rig.set_keys([true, false, false]);
        assert!(rig.pressed(&[a]));
    }

    #[test]
    fn test_analog_value_gated_by_digital() {
        let mut rig = Rig::new();
        let a = rig.key(0);
        let wheel = rig.wheel.1;
        rig.host.set(rig.wheel.0, 250);

        assert_eq!(rig.analog(&[a, wheel]), AnalogReading::NEUTRAL);
        rig.set_keys([true, false, false]);
        assert_eq!(
            rig.analog(&[a, wheel]),
            AnalogReading {
                value: 250,
                kind: AnalogKind::Relative
            }
        );
    }

    #[test]
    fn test_analog_first_active_clause_wins() {
        let mut rig = Rig::new();
        let (stick, wheel) = (rig.stick.1, rig.wheel.1);
        rig.host.set(rig.wheel.0, -40);

        // Stick at rest and unchanged: falls through to the wheel
        let reading = rig.analog(&[stick, OR, wheel]);
        assert_eq!(reading.value, -40);
        assert_eq!(reading.kind, AnalogKind::Relative);

        rig.host.set(rig.stick.0, 900);
        let reading = rig.analog(&[stick, OR, wheel]);
        assert_eq!(reading.value, 900);
        assert_eq!(reading.kind, AnalogKind::Absolute);
    }

    #[test]
    fn test_absolute_return_to_zero_is_reported_once() {
        let mut rig = Rig::new();
        let stick = rig.stick.1;

        rig.host.set(rig.stick.0, 500);
        assert_eq!(rig.analog(&[stick]).value, 500);

        // Moving back to centre is a change, so the zero is reported
        rig.host.set(rig.stick.0, 0);
        assert_eq!(
            rig.analog(&[stick]),
            AnalogReading {
                value: 0,
                kind: AnalogKind::Absolute
            }
        );

        // Resting at centre is neutral
        assert_eq!(rig.analog(&[stick]), AnalogReading::NEUTRAL);
    }

    #[test]
    fn test_digital_only_clause_has_no_analog_value() {
        let mut rig = Rig::new();
        let a = rig.key(0);
        rig.set_keys([true, false, false]);
        assert_eq!(rig.analog(&[a]), AnalogReading::NEUTRAL);
    }

    #[test]
    fn test_invalid_sample_is_not_an_operand() {
        let mut rig = Rig::new();
        let a = rig.key(0);
        let (stick, wheel) = (rig.stick.1, rig.wheel.1);
        rig.set_keys([true, false, false]);
        rig.host.set(rig.stick.0, ANALOG_VALUE_INVALID);

        assert_eq!(rig.analog(&[a, stick]), AnalogReading::NEUTRAL);

        rig.host.set(rig.wheel.0, -40);
        assert_eq!(
            rig.analog(&[stick, OR, wheel]),
            AnalogReading {
                value: -40,
                kind: AnalogKind::Relative
            }
        );

        // The unavailable sample did not move the remembered position
        rig.host.set(rig.stick.0, 0);
        assert_eq!(rig.analog(&[stick]), AnalogReading::NEUTRAL);
    }

    #[test]
    fn test_clause_state_resets_at_or() {
        let mut rig = Rig::new();
        let a = rig.key(0);
        let (stick, wheel) = (rig.stick.1, rig.wheel.1);

        // The stick moves inside a clause that A then disables
        rig.host.set(rig.stick.0, 500);
        assert_eq!(rig.analog(&[stick, a, OR, wheel]), AnalogReading::NEUTRAL);
    }
}
