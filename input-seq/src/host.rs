//! Host code provider interface
//!
//! The host input driver is an external collaborator: it enumerates the
//! signals it can report and returns their instantaneous values on demand.
//! [`MemoryHost`] is an in-memory provider whose values are set by the caller,
//! used for scripted input and tests.

use crate::types::{AnalogKind, HostCodeInfo, HostCodeKind, HostHandle, Result, SeqError};
use std::collections::HashMap;

/// Source of host signals
pub trait HostCodeProvider {
    /// Enumerate every signal the host can report
    fn codes(&self) -> Vec<HostCodeInfo>;

    /// Instantaneous value of a signal
    ///
    /// Digital signals report zero or non-zero; analog signals report a
    /// magnitude in `ANALOG_VALUE_MIN..=ANALOG_VALUE_MAX`, or
    /// `ANALOG_VALUE_INVALID` when the axis is unavailable.
    fn sample(&self, handle: HostHandle) -> i32;
}

/// In-memory host whose sample values are set explicitly
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    codes: Vec<HostCodeInfo>,
    values: HashMap<HostHandle, i32>,
    by_name: HashMap<String, HostHandle>,
}

impl MemoryHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signal and return its handle
    pub fn add(&mut self, name: impl Into<String>, kind: HostCodeKind) -> HostHandle {
        self.add_info(name.into(), kind, None)
    }

    /// Register a signal with an explicit analog classification
    pub fn add_analog(
        &mut self,
        name: impl Into<String>,
        kind: HostCodeKind,
        analog: AnalogKind,
    ) -> HostHandle {
        self.add_info(name.into(), kind, Some(analog))
    }

    fn add_info(&mut self, name: String, kind: HostCodeKind, analog: Option<AnalogKind>) -> HostHandle {
        let handle = HostHandle(self.codes.len() as u32);
        self.by_name.entry(name.clone()).or_insert(handle);
        self.codes.push(HostCodeInfo {
            name,
            handle,
            kind,
            analog,
        });
        handle
    }

    /// Handle of the first signal registered under `name`
    pub fn handle_of(&self, name: &str) -> Option<HostHandle> {
        self.by_name.get(name).copied()
    }

    /// Set the current value of a signal
    pub fn set(&mut self, handle: HostHandle, value: i32) {
        self.values.insert(handle, value);
    }

    /// Set the current value of a signal by host name
    pub fn set_by_name(&mut self, name: &str, value: i32) -> Result<()> {
        let handle = self
            .handle_of(name)
            .ok_or_else(|| SeqError::UnknownHostCode(name.to_string()))?;
        self.set(handle, value);
        Ok(())
    }

    /// Report a digital signal as pressed
    pub fn press(&mut self, handle: HostHandle) {
        self.set(handle, 1);
    }

    /// Report a digital signal as released
    pub fn release(&mut self, handle: HostHandle) {
        self.set(handle, 0);
    }

    /// Reset every signal to zero
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl HostCodeProvider for MemoryHost {
    fn codes(&self) -> Vec<HostCodeInfo> {
        self.codes.clone()
    }

    fn sample(&self, handle: HostHandle) -> i32 {
        self.values.get(&handle).copied().unwrap_or(0)
    }
}
