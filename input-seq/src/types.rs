//! Core types for the input sequence library
//!
//! This module defines the logical input code space shared by every layer:
//! codes and their sentinels, analog kinds, the host-facing code descriptions,
//! and the error type used at configuration and validation boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for input sequence operations
pub type Result<T> = std::result::Result<T, SeqError>;

/// Smallest analog magnitude a host may report
pub const ANALOG_VALUE_MIN: i32 = -65536;

/// Largest analog magnitude a host may report
pub const ANALOG_VALUE_MAX: i32 = 65536;

/// Sample reported by a host for an axis that is currently unavailable
pub const ANALOG_VALUE_INVALID: i32 = i32::MIN;

/// A logical input code
///
/// Values below [`InputCode::NONE`] index the code registry. The four sentinels
/// live outside the table and never name a physical signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InputCode(u32);

impl InputCode {
    /// Absence of a code; also terminates a sequence
    pub const NONE: InputCode = InputCode(0x8000_0000);
    /// Clause separator
    pub const OR: InputCode = InputCode(0x8000_0001);
    /// Negates the next operand
    pub const NOT: InputCode = InputCode(0x8000_0002);
    /// "Use the driver default" placeholder
    pub const DEFAULT: InputCode = InputCode(0x8000_0003);

    /// Create a code from a registry index
    pub const fn new(index: u32) -> Self {
        InputCode(index)
    }

    /// Registry index, or `None` for sentinels
    pub fn index(self) -> Option<usize> {
        if self.0 < Self::NONE.0 {
            Some(self.0 as usize)
        } else {
            None
        }
    }

    /// Raw numeric value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InputCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InputCode::NONE => write!(f, "NONE"),
            InputCode::OR => write!(f, "OR"),
            InputCode::NOT => write!(f, "NOT"),
            InputCode::DEFAULT => write!(f, "DEFAULT"),
            InputCode(index) => write!(f, "#{}", index),
        }
    }
}

/// Value semantics of a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalogKind {
    /// Digital signal: zero or non-zero
    #[default]
    None,
    /// Position-like axis (joystick, light-gun)
    Absolute,
    /// Delta-like axis (mouse, trackball)
    Relative,
}

impl AnalogKind {
    /// True for absolute and relative axes
    pub fn is_analog(self) -> bool {
        self != AnalogKind::None
    }
}

impl fmt::Display for AnalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalogKind::None => write!(f, "digital"),
            AnalogKind::Absolute => write!(f, "absolute"),
            AnalogKind::Relative => write!(f, "relative"),
        }
    }
}

/// Opaque back-reference the host uses to identify one of its signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostHandle(pub u32);

/// How the host classifies one of its signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCodeKind {
    /// Maps onto a slot of the standard enumeration
    Standard(InputCode),
    /// Digital signal with no standard meaning
    OtherDigital,
    /// Absolute axis with no standard meaning
    OtherAnalogAbsolute,
    /// Relative axis with no standard meaning
    OtherAnalogRelative,
}

impl HostCodeKind {
    /// Analog kind implied by a generic classification
    pub fn generic_analog(self) -> AnalogKind {
        match self {
            HostCodeKind::OtherAnalogAbsolute => AnalogKind::Absolute,
            HostCodeKind::OtherAnalogRelative => AnalogKind::Relative,
            HostCodeKind::OtherDigital | HostCodeKind::Standard(_) => AnalogKind::None,
        }
    }
}

/// One signal as enumerated by the host input driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCodeInfo {
    /// Human-readable name (e.g. "Left Ctrl", "Wheel")
    pub name: String,
    /// Handle passed back to the host when sampling
    pub handle: HostHandle,
    /// Standard slot or generic classification
    pub kind: HostCodeKind,
    /// Explicit analog kind reported by the host, if any
    pub analog: Option<AnalogKind>,
}

impl HostCodeInfo {
    /// Create a host code description without an explicit analog flag
    pub fn new(name: impl Into<String>, handle: HostHandle, kind: HostCodeKind) -> Self {
        Self {
            name: name.into(),
            handle,
            kind,
            analog: None,
        }
    }

    /// Builder method: attach the host's own analog classification
    pub fn with_analog(mut self, analog: AnalogKind) -> Self {
        self.analog = Some(analog);
        self
    }
}

/// Class of an emulated control, used as a suffix when naming its binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputClass {
    #[default]
    Digital,
    Analog,
    AnalogIncrement,
    AnalogDecrement,
}

impl InputClass {
    /// Suffix appended to a rendered sequence
    pub fn suffix(self) -> &'static str {
        match self {
            InputClass::Digital => "",
            InputClass::Analog => " Analog",
            InputClass::AnalogIncrement => " Analog Inc",
            InputClass::AnalogDecrement => " Analog Dec",
        }
    }

    /// True when bindings of this class are read with `analog_value`
    pub fn is_analog(self) -> bool {
        self == InputClass::Analog
    }
}

/// Result of folding a sequence for its analog value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalogReading {
    /// Selected magnitude (0 when no clause won)
    pub value: i32,
    /// Kind of the axis that supplied `value`
    pub kind: AnalogKind,
}

impl AnalogReading {
    /// The neutral reading returned when no clause is active
    pub const NEUTRAL: AnalogReading = AnalogReading {
        value: 0,
        kind: AnalogKind::None,
    };

    /// True if some clause supplied a value
    pub fn is_active(&self) -> bool {
        self.kind != AnalogKind::None
    }
}

/// Errors raised at configuration and validation boundaries
///
/// Nothing on the per-frame path returns these; polling and evaluation degrade
/// to neutral values instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeqError {
    #[error("Sequence is empty")]
    EmptySequence,

    #[error("OR at position {position} closes a clause without a positive operand")]
    EmptyClause { position: usize },

    #[error("Double NOT at position {position}")]
    DoubleNot { position: usize },

    #[error("NOT applied to analog code at position {position}")]
    NegatedAnalog { position: usize },

    #[error("Second analog code in one clause at position {position}")]
    MultipleAnalog { position: usize },

    #[error("Sequence ends without a positive operand")]
    DanglingOperator,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown standard code: {0}")]
    UnknownStandardCode(String),

    #[error("Unknown host code: {0}")]
    UnknownHostCode(String),
}
