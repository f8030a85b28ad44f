//! Input Sequence Library
//!
//! A small engine that turns raw host input into logical codes and evaluates
//! user-authored input bindings against them, frame by frame.
//!
//! # Architecture
//!
//! - The host reports its physical signals through [`HostCodeProvider`]
//! - [`CodeRegistry`] maps them onto a stable table of logical codes
//! - [`CodeSampler`] answers per-frame queries (held, edge, autorepeat, analog)
//! - [`InputSeq`] holds a binding: codes joined by implicit AND, `OR` and `NOT`
//! - [`SequenceEvaluator`] folds a binding into a pressed flag or analog value
//! - [`SeqRecorder`] captures live input into a new binding
//! - [`text`] converts codes and bindings to and from their text form
//!
//! The library does NOT:
//! - Talk to input devices (that is the host's job)
//! - Persist bindings anywhere
//! - Run its own frame loop
//!
//! # Example Usage
//!
//! ```
//! use input_seq::{
//!     text, CodeRegistry, CodeSampler, HostCodeKind, MemoryHost, SeqConfig, SequenceEvaluator,
//! };
//!
//! let config = SeqConfig::default();
//! let mut host = MemoryHost::new();
//! let ctrl = host.add("Left Ctrl", HostCodeKind::Standard(
//!     input_seq::StandardCodes::default().code("KEYCODE_LCONTROL").unwrap(),
//! ));
//! let mut registry = CodeRegistry::from_host(&host, &config);
//!
//! let fire = text::string_to_seq(&registry, "KEYCODE_LCONTROL OR JOYCODE_1_BUTTON1", &config);
//! host.press(ctrl);
//!
//! let mut sampler = CodeSampler::new(&mut registry, &host);
//! assert!(SequenceEvaluator::is_pressed(&mut sampler, &fire));
//! ```

// Public modules
pub mod codes;
pub mod config;
pub mod evaluator;
pub mod grammar;
pub mod host;
pub mod query;
pub mod recorder;
pub mod seq;
pub mod text;
pub mod types;

// Re-export main types for convenience
pub use codes::{AxisGroup, CodeEntry, CodeRegistry, RegistryStats, StandardCodes};
pub use config::{LayoutConfig, SeqConfig};
pub use evaluator::SequenceEvaluator;
pub use host::{HostCodeProvider, MemoryHost};
pub use query::{AutoRepeat, CodeSampler};
pub use recorder::{RecordMode, RecorderState, SeqRecorder};
pub use seq::InputSeq;
pub use types::{
    AnalogKind, AnalogReading, HostCodeInfo, HostCodeKind, HostHandle, InputClass, InputCode,
    Result, SeqError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty host still yields the full standard table
        let registry = CodeRegistry::build(&[], &SeqConfig::default());
        let stats = registry.stats();
        assert_eq!(stats.num_bound, 0);
        assert_eq!(stats.num_standard, registry.len());
    }
}
