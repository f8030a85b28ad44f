//! Code query engine
//!
//! [`CodeSampler`] is the per-frame sampling context: it pairs the registry's
//! live per-code state with the host that reports instantaneous values. Every
//! query is O(1) and degrades to "not pressed" / `None` for sentinels,
//! out-of-range codes and codes with no host signal bound.
//!
//! # Edge memory contract
//!
//! Each code owns a single edge-memory bit shared by every caller:
//! - [`CodeSampler::is_down_edge`] and [`CodeSampler::is_down_edge_repeat`] set
//!   it on the first reported press;
//! - any query that observes the signal inactive clears it;
//! - sequence evaluation reads a code as released while the bit is set, so a
//!   code polled elsewhere for one-shot presses stops counting as held for
//!   bindings after the first frame.

use crate::codes::CodeRegistry;
use crate::host::HostCodeProvider;
use crate::types::{AnalogKind, InputCode, ANALOG_VALUE_INVALID};
use std::collections::HashMap;

/// Sampling context for one frame
pub struct CodeSampler<'a, H: HostCodeProvider + ?Sized> {
    registry: &'a mut CodeRegistry,
    host: &'a H,
}

impl<'a, H: HostCodeProvider + ?Sized> CodeSampler<'a, H> {
    /// Create a sampler over a registry and the host that backs it
    pub fn new(registry: &'a mut CodeRegistry, host: &'a H) -> Self {
        Self { registry, host }
    }

    /// The registry being sampled
    pub fn registry(&self) -> &CodeRegistry {
        self.registry
    }

    /// Analog kind of a code
    pub fn analog_kind(&self, code: InputCode) -> AnalogKind {
        self.registry.analog_kind(code)
    }

    /// Live digital state, ignoring edge memory
    fn sample_digital(&self, code: InputCode) -> bool {
        self.registry
            .entry(code)
            .filter(|entry| entry.analog() == AnalogKind::None)
            .and_then(|entry| entry.handle())
            .map_or(false, |handle| self.host.sample(handle) != 0)
    }

    /// Current analog value of a code
    ///
    /// Returns `None` for digital codes, unbound codes and axes the host
    /// reports as invalid.
    pub fn value(&self, code: InputCode) -> Option<i32> {
        let entry = self.registry.entry(code)?;
        if !entry.analog().is_analog() {
            return None;
        }
        let value = self.host.sample(entry.handle()?);
        (value != ANALOG_VALUE_INVALID).then_some(value)
    }

    /// Is a digital code currently held?
    pub fn is_down(&self, code: InputCode) -> bool {
        self.sample_digital(code)
    }

    /// Is a digital code pressed? True only once per continuous press.
    pub fn is_down_edge(&mut self, code: InputCode) -> bool {
        let pressed = self.sample_digital(code);
        let Some(entry) = self.registry.entry_mut(code) else {
            return false;
        };

        if !pressed {
            entry.memory = false;
            return false;
        }
        if entry.memory {
            return false;
        }
        entry.memory = true;
        true
    }

    /// Like [`is_down_edge`](Self::is_down_edge), plus autorepeat while held
    ///
    /// The first repeat fires after three delay units, later ones after one.
    /// A delay unit is `speed` frames at 60 Hz, scaled to the configured frame
    /// rate. Timing state is kept per code in `repeat`.
    pub fn is_down_edge_repeat(&mut self, code: InputCode, speed: u32, repeat: &mut AutoRepeat) -> bool {
        let pressed = self.sample_digital(code);
        let Some(entry) = self.registry.entry_mut(code) else {
            return false;
        };

        if !pressed {
            entry.memory = false;
            repeat.timers.remove(&code);
            return false;
        }

        if !entry.memory {
            entry.memory = true;
            repeat.timers.insert(code, RepeatTimer::initial());
            return true;
        }

        let threshold = repeat.threshold_frames(speed);
        let timer = repeat.timers.entry(code).or_insert_with(RepeatTimer::initial);
        timer.counter += 1;
        if f64::from(timer.counter) > f64::from(timer.delay) * threshold {
            timer.delay = 1;
            timer.counter = 0;
            true
        } else {
            false
        }
    }

    /// Held state as seen by sequence evaluation
    ///
    /// Reads as released while the edge-memory bit is set by an edge query.
    pub(crate) fn is_down_unmemorized(&mut self, code: InputCode) -> bool {
        let pressed = self.sample_digital(code);
        let Some(entry) = self.registry.entry_mut(code) else {
            return false;
        };

        if !pressed {
            entry.memory = false;
            return false;
        }
        !entry.memory
    }

    /// Return the first code (in table order) newly pressed this frame
    pub fn read_pressed(&mut self) -> InputCode {
        let count = self.registry.len() as u32;
        (0..count)
            .map(InputCode::new)
            .find(|&code| self.is_down_edge(code))
            .unwrap_or(InputCode::NONE)
    }

    /// Record an absolute sample; returns true if it differs from the last one
    pub(crate) fn note_absolute_sample(&mut self, code: InputCode, value: i32) -> bool {
        match self.registry.entry_mut(code) {
            Some(entry) if entry.prev_analog != value => {
                entry.prev_analog = value;
                true
            }
            _ => false,
        }
    }

    /// Mark every digital code as already reported
    ///
    /// Codes held at this point will not read as new presses until they are
    /// released once.
    pub(crate) fn arm_edge_memory(&mut self) {
        let count = self.registry.len() as u32;
        for code in (0..count).map(InputCode::new) {
            if let Some(entry) = self.registry.entry_mut(code) {
                if entry.analog() == AnalogKind::None {
                    entry.memory = true;
                }
            }
        }
    }
}

/// Per-code autorepeat timers, owned by the caller
#[derive(Debug, Clone)]
pub struct AutoRepeat {
    frame_rate: f64,
    timers: HashMap<InputCode, RepeatTimer>,
}

#[derive(Debug, Clone, Copy)]
struct RepeatTimer {
    counter: u32,
    delay: u32,
}

impl RepeatTimer {
    fn initial() -> Self {
        Self { counter: 0, delay: 3 }
    }
}

impl AutoRepeat {
    /// Create repeat state for a given frame rate
    pub fn new(frame_rate: f64) -> Self {
        Self {
            frame_rate,
            timers: HashMap::new(),
        }
    }

    /// Frames in one delay unit
    fn threshold_frames(&self, speed: u32) -> f64 {
        f64::from(speed) * self.frame_rate / 60.0
    }
}

impl Default for AutoRepeat {
    fn default() -> Self {
        Self::new(60.0)
    }
}
