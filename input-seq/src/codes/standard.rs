//! Standard code enumeration
//!
//! The standard enumeration assigns a fixed index and canonical token to every
//! signal an emulated machine may want to bind: keyboard keys, then per-device
//! joystick, mouse and light-gun signals. Device counts come from
//! [`LayoutConfig`]; the order of the sections is fixed so that the analog
//! codes form two contiguous ranges (absolute, then relative).

use crate::config::LayoutConfig;
use crate::types::{AnalogKind, InputCode};
use std::collections::HashMap;
use std::ops::Range;

/// Keyboard keys, without the `KEYCODE_` prefix
const KEY_NAMES: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M",
    "N", "O", "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "F13", "F14", "F15",
    "ESC", "TILDE", "MINUS", "EQUALS", "BACKSPACE", "TAB", "OPENBRACE", "CLOSEBRACE", "ENTER",
    "COLON", "QUOTE", "BACKSLASH", "BACKSLASH2", "COMMA", "STOP", "SLASH", "SPACE", "INSERT",
    "DEL", "HOME", "END", "PGUP", "PGDN", "LEFT", "RIGHT", "UP", "DOWN",
    "0_PAD", "1_PAD", "2_PAD", "3_PAD", "4_PAD", "5_PAD", "6_PAD", "7_PAD", "8_PAD", "9_PAD",
    "SLASH_PAD", "ASTERISK", "MINUS_PAD", "PLUS_PAD", "DEL_PAD", "ENTER_PAD", "PRTSCR", "PAUSE",
    "LSHIFT", "RSHIFT", "LCONTROL", "RCONTROL", "LALT", "RALT", "SCRLOCK", "NUMLOCK", "CAPSLOCK",
    "LWIN", "RWIN", "MENU",
];

const AXES: [&str; 3] = ["X", "Y", "Z"];

/// A joystick axis group: the full axis followed by its two halves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisGroup {
    pub full: InputCode,
    pub negative: InputCode,
    pub positive: InputCode,
}

impl AxisGroup {
    /// True if `code` is one of the two half-axis codes
    pub fn is_half(&self, code: InputCode) -> bool {
        code == self.negative || code == self.positive
    }

    /// True if `code` belongs to this group
    pub fn contains(&self, code: InputCode) -> bool {
        code == self.full || self.is_half(code)
    }
}

/// The standard enumeration for one layout
#[derive(Debug, Clone)]
pub struct StandardCodes {
    names: Vec<String>,
    lookup: HashMap<String, InputCode>,
    joystick_axes: Range<u32>,
    absolute: Range<u32>,
    relative: Range<u32>,
}

impl StandardCodes {
    /// Build the enumeration for a layout
    pub fn new(layout: &LayoutConfig) -> Self {
        let mut names: Vec<String> = KEY_NAMES.iter().map(|k| format!("KEYCODE_{}", k)).collect();

        for joy in 1..=layout.joysticks {
            for dir in ["LEFT", "RIGHT", "UP", "DOWN"] {
                names.push(format!("JOYCODE_{}_{}", joy, dir));
            }
            for button in 1..=layout.joystick_buttons {
                names.push(format!("JOYCODE_{}_BUTTON{}", joy, button));
            }
            names.push(format!("JOYCODE_{}_START", joy));
            names.push(format!("JOYCODE_{}_SELECT", joy));
        }

        for mouse in 1..=layout.mice {
            for button in 1..=layout.mouse_buttons {
                names.push(format!("MOUSECODE_{}_BUTTON{}", mouse, button));
            }
        }

        for mouse in 1..=layout.mice {
            for axis in AXES {
                names.push(format!("MOUSECODE_{}_{}_NEG", mouse, axis));
                names.push(format!("MOUSECODE_{}_{}_POS", mouse, axis));
            }
        }

        let absolute_start = names.len() as u32;
        for joy in 1..=layout.joysticks {
            for axis in AXES {
                names.push(format!("JOYCODE_{}_ANALOG_{}", joy, axis));
                names.push(format!("JOYCODE_{}_ANALOG_{}_NEG", joy, axis));
                names.push(format!("JOYCODE_{}_ANALOG_{}_POS", joy, axis));
            }
        }
        let joystick_axes = absolute_start..names.len() as u32;

        for gun in 1..=layout.guns {
            for axis in ["X", "Y"] {
                names.push(format!("GUNCODE_{}_ANALOG_{}", gun, axis));
            }
        }
        let absolute = absolute_start..names.len() as u32;

        let relative_start = names.len() as u32;
        for mouse in 1..=layout.mice {
            for axis in AXES {
                names.push(format!("MOUSECODE_{}_ANALOG_{}", mouse, axis));
            }
        }
        let relative = relative_start..names.len() as u32;

        let lookup = names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), InputCode::new(index as u32)))
            .collect();

        Self {
            names,
            lookup,
            joystick_axes,
            absolute,
            relative,
        }
    }

    /// Number of standard slots
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// True if `code` indexes a standard slot
    pub fn contains(&self, code: InputCode) -> bool {
        code.index().map_or(false, |index| index < self.names.len())
    }

    /// Canonical token of a standard slot
    pub fn name(&self, code: InputCode) -> Option<&str> {
        code.index()
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }

    /// Look up a standard slot by canonical token (case-insensitive)
    pub fn code(&self, name: &str) -> Option<InputCode> {
        self.lookup.get(&name.to_ascii_uppercase()).copied()
    }

    /// Analog kind implied by the slot's position in the enumeration
    pub fn positional_analog(&self, code: InputCode) -> AnalogKind {
        let raw = code.raw();
        if self.absolute.contains(&raw) {
            AnalogKind::Absolute
        } else if self.relative.contains(&raw) {
            AnalogKind::Relative
        } else {
            AnalogKind::None
        }
    }

    /// Axis group of a joystick analog code
    pub fn axis_group(&self, code: InputCode) -> Option<AxisGroup> {
        let raw = code.raw();
        if !self.joystick_axes.contains(&raw) {
            return None;
        }
        let full = raw - (raw - self.joystick_axes.start) % 3;
        Some(AxisGroup {
            full: InputCode::new(full),
            negative: InputCode::new(full + 1),
            positive: InputCode::new(full + 2),
        })
    }

    /// True for the full-axis code of a joystick axis group
    pub fn is_full_axis(&self, code: InputCode) -> bool {
        self.axis_group(code).map_or(false, |group| group.full == code)
    }

    /// Iterate over all slots and their canonical tokens
    pub fn iter(&self) -> impl Iterator<Item = (InputCode, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (InputCode::new(index as u32), name.as_str()))
    }
}

impl Default for StandardCodes {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
