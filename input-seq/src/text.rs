//! Text serialization of codes and sequences
//!
//! Sequences are stored as whitespace-separated tokens: each token is a code's
//! display token or one of the keywords `OR`, `NOT`, `NONE`, `DEFAULT`.
//! Parsing is case-insensitive and fails open; emission is upper-case.
//!
//! # Example
//!
//! ```
//! use input_seq::{text, CodeRegistry, SeqConfig};
//!
//! let config = SeqConfig::default();
//! let registry = CodeRegistry::build(&[], &config);
//! let seq = text::string_to_seq(&registry, "keycode_lcontrol or joycode_1_button1", &config);
//! assert_eq!(text::seq_to_string(&registry, &seq), "KEYCODE_LCONTROL OR JOYCODE_1_BUTTON1");
//! ```

use crate::codes::CodeRegistry;
use crate::config::SeqConfig;
use crate::seq::InputSeq;
use crate::types::{InputClass, InputCode};

/// Friendly name for codes the host did not name
const NOT_AVAILABLE: &str = "n/a";

/// Resolve a token to a code; unknown tokens resolve to NONE
pub fn token_to_code(registry: &CodeRegistry, token: &str) -> InputCode {
    let token = token.to_uppercase();
    match token.as_str() {
        "OR" => InputCode::OR,
        "NOT" => InputCode::NOT,
        "NONE" => InputCode::NONE,
        "DEFAULT" => InputCode::DEFAULT,
        other => registry.find_token(other).unwrap_or(InputCode::NONE),
    }
}

/// Token for a code; empty for codes outside the table
pub fn code_to_token(registry: &CodeRegistry, code: InputCode) -> String {
    match code {
        InputCode::OR => "OR".to_string(),
        InputCode::NOT => "NOT".to_string(),
        InputCode::NONE => "NONE".to_string(),
        InputCode::DEFAULT => "DEFAULT".to_string(),
        code => registry.token(code).unwrap_or_default().to_string(),
    }
}

/// Human-readable name of a code
pub fn code_name(registry: &CodeRegistry, code: InputCode) -> &str {
    if let Some(name) = registry.entry(code).and_then(|entry| entry.host_name()) {
        return name;
    }
    match code {
        InputCode::NONE => "None",
        InputCode::NOT => "not",
        InputCode::OR => "or",
        _ => NOT_AVAILABLE,
    }
}

/// Parse a sequence
///
/// Parsing stops at the first unknown token (or a literal `NONE`) and at the
/// configured capacity. It never fails.
pub fn string_to_seq(registry: &CodeRegistry, text: &str, config: &SeqConfig) -> InputSeq {
    let token_cap = config.max_token_len.saturating_sub(1);
    let codes = text.split_whitespace().map(|token| {
        let token: String = token.chars().take(token_cap).collect();
        token_to_code(registry, &token)
    });
    InputSeq::from_codes(codes, config.seq_capacity)
}

/// Emit a sequence as text
pub fn seq_to_string(registry: &CodeRegistry, seq: &InputSeq) -> String {
    seq_to_string_bounded(registry, seq, usize::MAX)
}

/// Emit a sequence as text into a destination of `max_len` bytes
///
/// One byte of `max_len` is reserved for a terminator; tokens that
/// would not fit are dropped along with everything after them.
pub fn seq_to_string_bounded(registry: &CodeRegistry, seq: &InputSeq, max_len: usize) -> String {
    let mut out = String::new();
    for code in seq.iter() {
        let token = code_to_token(registry, code);
        if token.is_empty() {
            continue;
        }
        let separator = usize::from(!out.is_empty());
        if out.len().saturating_add(separator).saturating_add(token.len()) >= max_len {
            break;
        }
        if separator == 1 {
            out.push(' ');
        }
        out.push_str(&token);
    }
    out
}

/// Human-readable rendering of a sequence
///
/// Uses the host's names, drops `OR` pairs whose right-hand code has no
/// name, and renders the unassigned sequence as "None".
pub fn seq_name(registry: &CodeRegistry, seq: &InputSeq) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut index = 0;
    while index < seq.len() {
        let code = seq.get(index);
        if code == InputCode::OR
            && (index + 1 >= seq.capacity() || code_name(registry, seq.get(index + 1)) == NOT_AVAILABLE)
        {
            index += 2;
            continue;
        }
        parts.push(code_name(registry, code));
        index += 1;
    }

    if parts.is_empty() {
        "None".to_string()
    } else {
        parts.join(" ")
    }
}

/// Human-readable rendering with the control class appended
pub fn seq_label(registry: &CodeRegistry, seq: &InputSeq, class: InputClass) -> String {
    let name = seq_name(registry, seq);
    if name == "None" {
        name
    } else {
        format!("{}{}", name, class.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HostCodeInfo, HostCodeKind, HostHandle};

    fn registry() -> (CodeRegistry, SeqConfig) {
        let config = SeqConfig::default();
        let std_codes = crate::codes::StandardCodes::new(&config.layout);
        let lctrl = std_codes.code("KEYCODE_LCONTROL").unwrap();
        let button = std_codes.code("JOYCODE_1_BUTTON1").unwrap();
        let registry = CodeRegistry::build(
            &[
                HostCodeInfo::new("Left Ctrl", HostHandle(0), HostCodeKind::Standard(lctrl)),
                HostCodeInfo::new("J1 Button 1", HostHandle(1), HostCodeKind::Standard(button)),
                HostCodeInfo::new("Volume Up", HostHandle(2), HostCodeKind::OtherDigital),
            ],
            &config,
        );
        (registry, config)
    }

    #[test]
    fn test_keywords_any_case() {
        let (registry, _) = registry();
        assert_eq!(token_to_code(&registry, "or"), InputCode::OR);
        assert_eq!(token_to_code(&registry, "Not"), InputCode::NOT);
        assert_eq!(token_to_code(&registry, "default"), InputCode::DEFAULT);
        assert_eq!(token_to_code(&registry, "NONE"), InputCode::NONE);
        assert_eq!(token_to_code(&registry, "bogus"), InputCode::NONE);
        assert_eq!(code_to_token(&registry, InputCode::DEFAULT), "DEFAULT");
        assert_eq!(code_to_token(&registry, InputCode::new(999_999)), "");
    }

    #[test]
    fn test_round_trip_normalises_case_and_whitespace() {
        let (registry, config) = registry();
        let text = "  keycode_lcontrol   NOT volume_up\tor JOYCODE_1_BUTTON1 ";
        let seq = string_to_seq(&registry, text, &config);
        assert_eq!(seq.len(), 5);
        assert_eq!(
            seq_to_string(&registry, &seq),
            "KEYCODE_LCONTROL NOT VOLUME_UP OR JOYCODE_1_BUTTON1"
        );
    }

    #[test]
    fn test_unknown_token_terminates() {
        let (registry, config) = registry();
        let seq = string_to_seq(&registry, "KEYCODE_A OR SOMETHING_ELSE KEYCODE_B", &config);
        assert_eq!(seq_to_string(&registry, &seq), "KEYCODE_A OR");

        let seq = string_to_seq(&registry, "KEYCODE_A NONE KEYCODE_B", &config);
        assert_eq!(seq_to_string(&registry, &seq), "KEYCODE_A");
    }

    #[test]
    fn test_parse_stops_at_capacity() {
        let (registry, config) = registry();
        let config = SeqConfig {
            seq_capacity: 3,
            ..config
        };
        let seq = string_to_seq(&registry, "KEYCODE_A OR KEYCODE_B OR KEYCODE_C", &config);
        assert_eq!(seq_to_string(&registry, &seq), "KEYCODE_A OR KEYCODE_B");
    }

    #[test]
    fn test_bounded_emission_truncates() {
        let (registry, config) = registry();
        let seq = string_to_seq(&registry, "KEYCODE_A OR KEYCODE_B", &config);
        // "KEYCODE_A OR" is 12 bytes; the terminator needs the 13th
        assert_eq!(seq_to_string_bounded(&registry, &seq, 13), "KEYCODE_A OR");
        assert_eq!(seq_to_string_bounded(&registry, &seq, 12), "KEYCODE_A");
        assert_eq!(seq_to_string_bounded(&registry, &seq, 1), "");
    }

    #[test]
    fn test_seq_name_uses_host_names() {
        let (registry, config) = registry();
        let seq = string_to_seq(&registry, "KEYCODE_LCONTROL NOT VOLUME_UP OR JOYCODE_1_BUTTON1", &config);
        assert_eq!(seq_name(&registry, &seq), "Left Ctrl not Volume Up or J1 Button 1");
    }

    #[test]
    fn test_seq_name_elides_unnamed_alternative() {
        let (registry, config) = registry();
        // KEYCODE_Z has no host binding, so it has no friendly name
        let seq = string_to_seq(&registry, "KEYCODE_LCONTROL OR KEYCODE_Z", &config);
        assert_eq!(seq_name(&registry, &seq), "Left Ctrl");
    }

    #[test]
    fn test_seq_name_elides_or_in_last_slot() {
        let (registry, config) = registry();
        let lctrl = registry.find_token("KEYCODE_LCONTROL").unwrap();
        let button = registry.find_token("JOYCODE_1_BUTTON1").unwrap();

        let seq = InputSeq::from_codes([lctrl, button, InputCode::OR], 3);
        assert_eq!(seq_name(&registry, &seq), "Left Ctrl J1 Button 1");

        // With a free slot after it, the trailing OR is kept
        let seq = InputSeq::from_codes([lctrl, button, InputCode::OR], config.seq_capacity);
        assert_eq!(seq_name(&registry, &seq), "Left Ctrl J1 Button 1 or");
    }

    #[test]
    fn test_empty_sequence_renders_none() {
        let (registry, _) = registry();
        let seq = InputSeq::empty(16);
        assert_eq!(seq_name(&registry, &seq), "None");
        assert_eq!(seq_label(&registry, &seq, InputClass::Analog), "None");
        assert_eq!(seq_to_string(&registry, &seq), "");
    }

    #[test]
    fn test_label_appends_class() {
        let (registry, config) = registry();
        let seq = string_to_seq(&registry, "JOYCODE_1_BUTTON1", &config);
        assert_eq!(seq_label(&registry, &seq, InputClass::Digital), "J1 Button 1");
        assert_eq!(seq_label(&registry, &seq, InputClass::AnalogIncrement), "J1 Button 1 Analog Inc");
    }
}
