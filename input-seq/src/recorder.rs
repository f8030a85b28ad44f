//! Interactive sequence recorder
//!
//! Captures live input into a sequence, one poll per host frame. In digital
//! mode every newly pressed code is appended until the inactivity window
//! elapses; in analog mode the first axis that moves far enough from where it
//! was at start is captured and the recording finishes on the next poll.
//!
//! The recorder owns only its scratch buffer. Edge memory lives in the
//! registry, so starting a recording arms it for every digital code: codes
//! held at start are ignored until released.

use crate::codes::CodeRegistry;
use crate::config::SeqConfig;
use crate::evaluator::SequenceEvaluator;
use crate::grammar;
use crate::host::HostCodeProvider;
use crate::query::CodeSampler;
use crate::seq::InputSeq;
use crate::text;
use crate::types::{AnalogKind, InputCode, ANALOG_VALUE_MAX, ANALOG_VALUE_MIN};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// What kind of input a recording captures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordMode {
    Digital,
    Analog,
}

/// Recorder state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording(RecordMode),
    /// The target holds the composed sequence (or was reset if invalid)
    Finished,
    /// Cancelled; the target was left untouched
    Aborted,
}

/// Sequence recorder
#[derive(Debug, Clone)]
pub struct SeqRecorder {
    state: RecorderState,
    buffer: InputSeq,
    timeout: Duration,
    deadline: Instant,
    /// Absolute axis values snapshotted at start
    baseline: HashMap<InputCode, i32>,
    cancel: InputSeq,
}

impl SeqRecorder {
    /// Create an idle recorder
    ///
    /// The cancel sequence is parsed from `config.cancel` against `registry`.
    pub fn new(config: &SeqConfig, registry: &CodeRegistry) -> Self {
        let cancel = text::string_to_seq(registry, &config.cancel, config);
        if cancel.is_empty() {
            log::warn!("Cancel sequence '{}' resolves to nothing; recordings cannot be aborted", config.cancel);
        }

        Self {
            state: RecorderState::Idle,
            buffer: InputSeq::empty(config.seq_capacity),
            timeout: config.record_timeout(),
            deadline: Instant::now(),
            baseline: HashMap::new(),
            cancel,
        }
    }

    /// Current state
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// True while a recording is in progress
    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording(_))
    }

    /// Codes captured so far in the current recording
    pub fn captured(&self) -> &InputSeq {
        &self.buffer
    }

    /// Begin a recording, discarding any recording in progress
    pub fn start<H>(&mut self, sampler: &mut CodeSampler<'_, H>, mode: RecordMode, now: Instant)
    where
        H: HostCodeProvider + ?Sized,
    {
        if self.is_recording() {
            log::debug!("Discarding recording in progress ({} codes)", self.buffer.len());
        }

        self.buffer.clear();
        self.deadline = now + self.timeout;
        self.baseline.clear();
        sampler.arm_edge_memory();

        if mode == RecordMode::Analog {
            let registry = sampler.registry();
            for code in registry.codes() {
                if registry.analog_kind(code) != AnalogKind::Absolute {
                    continue;
                }
                if let Some(value) = sampler.value(code) {
                    self.baseline.insert(code, value);
                }
            }
        }

        self.state = RecorderState::Recording(mode);
        log::debug!("Recording started ({:?})", mode);
    }

    /// Advance the recording by one frame
    ///
    /// On finish the composed sequence is written to `target`: appended as a
    /// new `OR` clause when `appending` and it fits, otherwise replacing it.
    /// Calling this while not recording does nothing.
    pub fn poll<H>(
        &mut self,
        sampler: &mut CodeSampler<'_, H>,
        target: &mut InputSeq,
        appending: bool,
        now: Instant,
    ) -> RecorderState
    where
        H: HostCodeProvider + ?Sized,
    {
        let RecorderState::Recording(mode) = self.state else {
            return self.state;
        };

        if SequenceEvaluator::is_pressed(sampler, &self.cancel) {
            log::debug!("Recording cancelled");
            self.state = RecorderState::Aborted;
            return self.state;
        }

        if !self.buffer.is_empty() && (self.buffer.is_full() || now >= self.deadline) {
            self.compose(sampler.registry(), target, appending);
            self.state = RecorderState::Finished;
            return self.state;
        }

        match mode {
            RecordMode::Digital => self.capture_digital(sampler, now),
            RecordMode::Analog => self.capture_analog(sampler, now),
        }
        self.state
    }

    fn capture_digital<H>(&mut self, sampler: &mut CodeSampler<'_, H>, now: Instant)
    where
        H: HostCodeProvider + ?Sized,
    {
        let code = sampler.read_pressed();
        if code == InputCode::NONE {
            return;
        }

        // Pressing the same code twice negates it
        if self.buffer.last() == Some(code) {
            self.buffer.pop();
            self.buffer.push(InputCode::NOT);
        }
        self.buffer.push(code);
        self.deadline = now + self.timeout;
        log::trace!("Captured {}", code);
    }

    fn capture_analog<H>(&mut self, sampler: &mut CodeSampler<'_, H>, now: Instant)
    where
        H: HostCodeProvider + ?Sized,
    {
        let range = i64::from(ANALOG_VALUE_MAX) - i64::from(ANALOG_VALUE_MIN);
        let registry = sampler.registry();

        let hit = registry.codes().find(|&code| {
            // Full joystick axes are reached by moving one of their halves
            if registry.standard().is_full_axis(code) {
                return false;
            }
            let Some(value) = sampler.value(code) else {
                return false;
            };
            let (diff, divisor) = match registry.analog_kind(code) {
                AnalogKind::Absolute => match self.baseline.get(&code) {
                    Some(&base) => ((i64::from(base) - i64::from(value)).abs(), 4),
                    None => return false,
                },
                AnalogKind::Relative => (i64::from(value).abs(), 20),
                AnalogKind::None => return false,
            };
            diff > range / divisor
        });

        if let Some(code) = hit {
            self.buffer.push(code);
            self.deadline = now;
            log::trace!("Captured axis {}", code);
        }
    }

    /// Write the captured codes into `target`
    fn compose(&self, registry: &CodeRegistry, target: &mut InputSeq, appending: bool) {
        let capacity = target.capacity();
        let count = self.buffer.len();
        let mut pos = if appending { target.len() } else { 0 };

        if pos + count + usize::from(pos != 0) > capacity {
            pos = 0;
        }
        if count > capacity {
            target.clear();
            return;
        }

        let Some(&first) = self.buffer.codes().first() else {
            return;
        };
        let mut recorded = self.buffer.codes().to_vec();
        if let Some(group) = registry.standard().axis_group(first) {
            let mut full_axis = true;
            let mut toggled = false;

            if pos > 0 {
                let last = target.get(pos - 1);
                if last == group.full {
                    toggled = true;
                    full_axis = false;
                } else if group.is_half(last) {
                    toggled = true;
                }
            }

            if full_axis {
                recorded[0] = group.full;
            }
            // Replace the axis clause just recorded instead of adding another
            if toggled {
                pos = pos.saturating_sub(2);
            }
        }

        target.truncate(pos);
        if pos != 0 {
            target.push(InputCode::OR);
        }
        for code in recorded {
            target.push(code);
        }

        match grammar::check(target, registry) {
            Ok(()) => log::debug!("Recorded {}", text::seq_to_string(registry, target)),
            Err(e) => {
                log::debug!("Recorded sequence rejected: {}", e);
                target.clear();
            }
        }
    }
}
