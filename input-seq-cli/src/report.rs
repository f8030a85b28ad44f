//! Report generation
//!
//! Plain-text tables for the terminal and a JSON report for recordings.

use crate::session::{FrameResult, RecordOutcome, SeqSummary};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use input_seq::{CodeRegistry, RecordMode, RecorderState};
use serde::Serialize;

/// Print the code table
pub fn print_codes(registry: &CodeRegistry) {
    println!("{:>6}  {:<32} {:<9} {}", "CODE", "TOKEN", "ANALOG", "HOST NAME");
    for (code, entry) in registry.iter() {
        println!(
            "{:>6}  {:<32} {:<9} {}",
            code.raw(),
            entry.token(),
            entry.analog().to_string(),
            entry.host_name().unwrap_or("-")
        );
    }

    let stats = registry.stats();
    println!(
        "\n{} standard codes ({} bound), {} extra, {} analog",
        stats.num_standard, stats.num_bound, stats.num_extra, stats.num_analog
    );
}

/// Print one parsed sequence
pub fn print_summary(summary: &SeqSummary) {
    let verdict = summary.error.as_deref().unwrap_or("ok");
    println!("{}", summary.name);
    println!("  text:  {}", summary.text);
    println!("  label: {}", summary.label);
    println!("  check: {}", verdict);
}

/// Print replay results, one line per frame
pub fn print_replay(frames: &[FrameResult]) {
    for frame in frames {
        let active: Vec<String> = frame
            .active
            .iter()
            .map(|binding| match binding.value {
                Some(value) => format!("{}={}", binding.name, value),
                None => binding.name.clone(),
            })
            .collect();
        let active = if active.is_empty() { "-".to_string() } else { active.join(" ") };
        println!("[{:>4} {:>6}ms] {}", frame.frame, frame.time_ms, active);
    }
}

/// Print a recording outcome
pub fn print_record(outcome: &RecordOutcome) {
    println!("state:  {}", state_name(outcome.state));
    println!("frames: {}", outcome.frames_polled);
    print_summary(&outcome.sequence);
}

/// JSON report of a scripted recording
#[derive(Debug, Serialize)]
pub struct RecordReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub tool_version: &'static str,
    pub mode: &'static str,
    pub appending: bool,
    pub state: &'static str,
    pub frames_polled: usize,
    pub sequence: &'a SeqSummary,
}

impl<'a> RecordReport<'a> {
    pub fn new(outcome: &'a RecordOutcome, mode: RecordMode, appending: bool) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION"),
            mode: match mode {
                RecordMode::Digital => "digital",
                RecordMode::Analog => "analog",
            },
            appending,
            state: state_name(outcome.state),
            frames_polled: outcome.frames_polled,
            sequence: &outcome.sequence,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize record report")
    }
}

fn state_name(state: RecorderState) -> &'static str {
    match state {
        RecorderState::Idle => "idle",
        RecorderState::Recording(_) => "recording",
        RecorderState::Finished => "finished",
        RecorderState::Aborted => "aborted",
    }
}
