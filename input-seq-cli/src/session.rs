//! Binding session
//!
//! Wires a profile to the library: builds the simulated host and code
//! registry, and runs the frame script either through the evaluator
//! (`replay`) or the recorder (`record`).

use crate::config::{AppConfig, BindingConfig, FrameConfig};
use anyhow::{Context, Result};
use input_seq::{
    grammar, text, CodeRegistry, CodeSampler, InputSeq, MemoryHost, RecordMode, RecorderState,
    SeqRecorder, SequenceEvaluator,
};
use serde::Serialize;
use std::time::{Duration, Instant};

/// A parsed sequence with its renderings and grammar verdict
#[derive(Debug, Clone, Serialize)]
pub struct SeqSummary {
    pub name: String,
    pub text: String,
    pub label: String,
    /// Grammar error, if any
    pub error: Option<String>,
}

impl SeqSummary {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// A binding active during one replayed frame
#[derive(Debug, Clone, Serialize)]
pub struct ActiveBinding {
    pub name: String,
    /// Analog value for analog bindings
    pub value: Option<i32>,
}

/// Evaluation result for one frame of the script
#[derive(Debug, Clone, Serialize)]
pub struct FrameResult {
    pub frame: usize,
    pub time_ms: u64,
    pub active: Vec<ActiveBinding>,
}

/// Result of a scripted recording
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub state: RecorderState,
    pub sequence: SeqSummary,
    pub frames_polled: usize,
}

pub struct Session {
    config: AppConfig,
    host: MemoryHost,
    registry: CodeRegistry,
}

impl Session {
    /// Build the host and registry described by a profile
    pub fn new(config: AppConfig) -> Result<Self> {
        let host = config.build_host().context("Failed to build simulated host")?;
        let registry = CodeRegistry::from_host(&host, &config.seq);
        Ok(Self {
            config,
            host,
            registry,
        })
    }

    pub fn registry(&self) -> &CodeRegistry {
        &self.registry
    }

    /// Parse a sequence against this session's registry
    pub fn parse(&self, text: &str) -> InputSeq {
        text::string_to_seq(&self.registry, text, &self.config.seq)
    }

    /// Summarise a parsed sequence
    pub fn summarise(&self, binding: &BindingConfig, seq: &InputSeq) -> SeqSummary {
        SeqSummary {
            name: binding.name.clone(),
            text: text::seq_to_string(&self.registry, seq),
            label: text::seq_label(&self.registry, seq, binding.class),
            error: grammar::check(seq, &self.registry).err().map(|e| e.to_string()),
        }
    }

    /// Parse and validate every configured binding
    pub fn check(&self) -> Vec<SeqSummary> {
        self.config
            .bindings
            .iter()
            .map(|binding| {
                let seq = self.parse(&binding.seq);
                if seq.is_empty() && !binding.seq.trim().is_empty() {
                    log::warn!("Binding '{}' starts with an unknown token", binding.name);
                }
                self.summarise(binding, &seq)
            })
            .collect()
    }

    fn apply_frame(&mut self, index: usize, frame: &FrameConfig) -> Result<()> {
        for (name, &value) in &frame.values {
            self.host
                .set_by_name(name, value)
                .with_context(|| format!("Frame {} sets an unknown host code", index))?;
        }
        Ok(())
    }

    /// Evaluate every binding against each frame of the script
    pub fn replay(&mut self) -> Result<Vec<FrameResult>> {
        let bindings: Vec<(BindingConfig, InputSeq)> = self
            .config
            .bindings
            .iter()
            .map(|binding| (binding.clone(), self.parse(&binding.seq)))
            .collect();
        let frames = self.config.frames.clone();

        let mut results = Vec::with_capacity(frames.len());
        let mut time_ms = 0u64;
        for (index, frame) in frames.iter().enumerate() {
            self.apply_frame(index, frame)?;

            let mut sampler = CodeSampler::new(&mut self.registry, &self.host);
            let mut active = Vec::new();
            for (binding, seq) in &bindings {
                if binding.class.is_analog() {
                    let reading = SequenceEvaluator::analog_value(&mut sampler, seq);
                    if reading.is_active() {
                        active.push(ActiveBinding {
                            name: binding.name.clone(),
                            value: Some(reading.value),
                        });
                    }
                } else if SequenceEvaluator::is_pressed(&mut sampler, seq) {
                    active.push(ActiveBinding {
                        name: binding.name.clone(),
                        value: None,
                    });
                }
            }

            results.push(FrameResult {
                frame: index,
                time_ms,
                active,
            });
            time_ms += frame.advance_ms;
        }

        log::debug!("Replayed {} frames", results.len());
        Ok(results)
    }

    /// Run the recorder over the frame script
    ///
    /// The recording starts before the first frame. When `binding` is given,
    /// its sequence is the recording target; otherwise the target starts
    /// unassigned. If the script ends mid-recording, one idle frame is polled
    /// after the recorder's timeout.
    pub fn record(&mut self, mode: RecordMode, binding: Option<&str>, appending: bool) -> Result<RecordOutcome> {
        let binding = match binding {
            Some(name) => self
                .config
                .binding(name)
                .cloned()
                .with_context(|| format!("No binding named '{}'", name))?,
            None => BindingConfig {
                name: "recorded".to_string(),
                seq: String::new(),
                class: Default::default(),
            },
        };
        let mut target = self.parse(&binding.seq);
        let mut recorder = SeqRecorder::new(&self.config.seq, &self.registry);
        let frames = self.config.frames.clone();

        let t0 = Instant::now();
        let mut elapsed = Duration::ZERO;
        {
            let mut sampler = CodeSampler::new(&mut self.registry, &self.host);
            recorder.start(&mut sampler, mode, t0);
        }

        let mut state = recorder.state();
        let mut frames_polled = 0;
        for (index, frame) in frames.iter().enumerate() {
            self.apply_frame(index, frame)?;
            let mut sampler = CodeSampler::new(&mut self.registry, &self.host);
            state = recorder.poll(&mut sampler, &mut target, appending, t0 + elapsed);
            frames_polled += 1;
            elapsed += Duration::from_millis(frame.advance_ms);
            if !recorder.is_recording() {
                break;
            }
        }

        if recorder.is_recording() {
            elapsed += self.config.seq.record_timeout();
            let mut sampler = CodeSampler::new(&mut self.registry, &self.host);
            state = recorder.poll(&mut sampler, &mut target, appending, t0 + elapsed);
            frames_polled += 1;
        }

        log::info!("Recording ended in state {:?} after {} frames", state, frames_polled);
        Ok(RecordOutcome {
            state,
            sequence: self.summarise(&binding, &target),
            frames_polled,
        })
    }
}
