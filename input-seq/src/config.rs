//! Input sequence configuration types
//!
//! Sequence length, token length and the sizes of the standard code
//! enumeration (joysticks, mice, guns) are configurable. The defaults give
//! the classic layout.

use crate::types::{Result, SeqError};
use serde::{Deserialize, Serialize};

/// Configuration for the registry, sequences and recorder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeqConfig {
    /// Maximum number of codes in one sequence
    #[serde(default = "default_seq_capacity")]
    pub seq_capacity: usize,

    /// Token buffer size; tokens keep at most `max_token_len - 1` characters
    #[serde(default = "default_max_token_len")]
    pub max_token_len: usize,

    /// Recorder inactivity window in milliseconds (default: 667ms)
    #[serde(default = "default_record_timeout")]
    pub record_timeout_ms: u64,

    /// Frames per second used to scale autorepeat delays
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,

    /// Sequence that cancels a recording in progress
    #[serde(default = "default_cancel")]
    pub cancel: String,

    /// Standard code enumeration sizes
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_seq_capacity() -> usize {
    16
}

fn default_max_token_len() -> usize {
    64
}

fn default_record_timeout() -> u64 {
    667
}

fn default_frame_rate() -> f64 {
    60.0
}

fn default_cancel() -> String {
    "KEYCODE_ESC".to_string()
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            seq_capacity: default_seq_capacity(),
            max_token_len: default_max_token_len(),
            record_timeout_ms: default_record_timeout(),
            frame_rate: default_frame_rate(),
            cancel: default_cancel(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Sizes of the standard code enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_devices")]
    pub joysticks: u32,
    #[serde(default = "default_joystick_buttons")]
    pub joystick_buttons: u32,
    #[serde(default = "default_devices")]
    pub mice: u32,
    #[serde(default = "default_mouse_buttons")]
    pub mouse_buttons: u32,
    #[serde(default = "default_devices")]
    pub guns: u32,
}

fn default_devices() -> u32 {
    8
}

fn default_joystick_buttons() -> u32 {
    16
}

fn default_mouse_buttons() -> u32 {
    6
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            joysticks: default_devices(),
            joystick_buttons: default_joystick_buttons(),
            mice: default_devices(),
            mouse_buttons: default_mouse_buttons(),
            guns: default_devices(),
        }
    }
}

impl SeqConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the sequence capacity
    pub fn with_seq_capacity(mut self, capacity: usize) -> Self {
        self.seq_capacity = capacity;
        self
    }

    /// Builder method: set the recorder inactivity window
    pub fn with_record_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.record_timeout_ms = timeout_ms;
        self
    }

    /// Builder method: set the frame rate used for autorepeat
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Builder method: set the recorder cancel sequence
    pub fn with_cancel(mut self, cancel: impl Into<String>) -> Self {
        self.cancel = cancel.into();
        self
    }

    /// Builder method: replace the standard code layout
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Recorder inactivity window as a duration
    pub fn record_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.record_timeout_ms)
    }

    /// Check that the configured sizes are usable
    pub fn validate(&self) -> Result<()> {
        if self.seq_capacity == 0 {
            return Err(SeqError::InvalidConfig("seq_capacity must be at least 1".into()));
        }
        if self.max_token_len < 2 {
            return Err(SeqError::InvalidConfig("max_token_len must be at least 2".into()));
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(SeqError::InvalidConfig(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_config_builder() {
        let config = SeqConfig::new()
            .with_seq_capacity(8)
            .with_record_timeout_ms(250)
            .with_frame_rate(50.0)
            .with_cancel("KEYCODE_Q");

        assert_eq!(config.seq_capacity, 8);
        assert_eq!(config.record_timeout().as_millis(), 250);
        assert_eq!(config.frame_rate, 50.0);
        assert_eq!(config.cancel, "KEYCODE_Q");
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_defaults() {
        let config = SeqConfig::default();
        assert_eq!(config.seq_capacity, 16);
        assert_eq!(config.max_token_len, 64);
        assert_eq!(config.record_timeout_ms, 667);
        assert_eq!(config.layout.joystick_buttons, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = SeqConfig::new().with_seq_capacity(0);
        assert!(matches!(config.validate(), Err(SeqError::InvalidConfig(_))));

        let config = SeqConfig::new().with_frame_rate(0.0);
        assert!(config.validate().is_err());
    }
}
