//! Profile loading and parsing
//!
//! A profile describes a simulated host (its signals), the bindings to check
//! or evaluate, and a frame script that drives the host over time.

use anyhow::{bail, Context, Result};
use input_seq::{AnalogKind, HostCodeKind, InputClass, MemoryHost, SeqConfig, SeqError, StandardCodes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from a profile TOML)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub seq: SeqConfig,
    #[serde(default, rename = "host")]
    pub hosts: Vec<HostConfig>,
    #[serde(default, rename = "binding")]
    pub bindings: Vec<BindingConfig>,
    #[serde(default, rename = "frame")]
    pub frames: Vec<FrameConfig>,
}

/// One simulated host signal
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostConfig {
    pub name: String,
    #[serde(default)]
    pub kind: HostKind,
    /// Standard code name, required when `kind = "standard"`
    pub standard: Option<String>,
    /// Overrides the analog kind implied by the standard slot
    pub analog: Option<AnalogKind>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    #[default]
    Standard,
    Digital,
    Absolute,
    Relative,
}

/// A named binding to check or evaluate
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BindingConfig {
    pub name: String,
    pub seq: String,
    #[serde(default)]
    pub class: InputClass,
}

/// One step of the frame script
///
/// Values are sticky: a signal keeps its last scripted value until a later
/// frame changes it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FrameConfig {
    #[serde(default)]
    pub values: BTreeMap<String, i32>,
    #[serde(default = "default_advance")]
    pub advance_ms: u64,
}

fn default_advance() -> u64 {
    16
}

impl AppConfig {
    /// Find a binding by name
    pub fn binding(&self, name: &str) -> Option<&BindingConfig> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// Build the simulated host described by the `[[host]]` entries
    pub fn build_host(&self) -> Result<MemoryHost> {
        let std_codes = StandardCodes::new(&self.seq.layout);
        let mut host = MemoryHost::new();

        for entry in &self.hosts {
            let kind = match entry.kind {
                HostKind::Standard => {
                    let Some(name) = &entry.standard else {
                        bail!("Host code '{}' is standard but names no standard code", entry.name);
                    };
                    let code = std_codes
                        .code(name)
                        .ok_or_else(|| SeqError::UnknownStandardCode(name.clone()))
                        .with_context(|| format!("Invalid host code '{}'", entry.name))?;
                    HostCodeKind::Standard(code)
                }
                HostKind::Digital => HostCodeKind::OtherDigital,
                HostKind::Absolute => HostCodeKind::OtherAnalogAbsolute,
                HostKind::Relative => HostCodeKind::OtherAnalogRelative,
            };

            if entry.name.trim().is_empty() {
                log::warn!("Host code with empty name will have no token");
            }
            match entry.analog {
                Some(analog) => host.add_analog(entry.name.clone(), kind, analog),
                None => host.add(entry.name.clone(), kind),
            };
        }

        Ok(host)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .seq
        .validate()
        .with_context(|| format!("Invalid [seq] section in {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_seq::HostCodeProvider;
    use std::io::Write;

    const PROFILE: &str = r#"
        [seq]
        seq_capacity = 8
        record_timeout_ms = 500

        [[host]]
        name = "Left Ctrl"
        standard = "KEYCODE_LCONTROL"

        [[host]]
        name = "Jog Wheel"
        kind = "relative"

        [[host]]
        name = "Trigger"
        standard = "JOYCODE_1_BUTTON1"
        analog = "absolute"

        [[binding]]
        name = "fire"
        seq = "KEYCODE_LCONTROL OR JOYCODE_1_BUTTON1"

        [[binding]]
        name = "dial"
        seq = "JOG_WHEEL"
        class = "analog"

        [[frame]]
        values = { "Left Ctrl" = 1 }

        [[frame]]
        advance_ms = 100
    "#;

    #[test]
    fn test_config_deserialization() {
        let config: AppConfig = toml::from_str(PROFILE).unwrap();
        assert_eq!(config.seq.seq_capacity, 8);
        assert_eq!(config.seq.record_timeout_ms, 500);
        assert_eq!(config.seq.max_token_len, 64);
        assert_eq!(config.hosts.len(), 3);
        assert_eq!(config.hosts[1].kind, HostKind::Relative);
        assert_eq!(config.binding("dial").unwrap().class, InputClass::Analog);
        assert_eq!(config.binding("fire").unwrap().class, InputClass::Digital);
        assert_eq!(config.frames[0].advance_ms, 16);
        assert_eq!(config.frames[0].values["Left Ctrl"], 1);
        assert_eq!(config.frames[1].advance_ms, 100);
    }

    #[test]
    fn test_empty_profile_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.seq, SeqConfig::default());
        assert!(config.hosts.is_empty());
        assert!(config.frames.is_empty());
    }

    #[test]
    fn test_build_host() {
        let config: AppConfig = toml::from_str(PROFILE).unwrap();
        let host = config.build_host().unwrap();
        let codes = host.codes();
        assert_eq!(codes.len(), 3);
        assert_eq!(codes[1].kind, HostCodeKind::OtherAnalogRelative);
        assert_eq!(codes[2].analog, Some(AnalogKind::Absolute));
    }

    #[test]
    fn test_unknown_standard_code_is_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            [[host]]
            name = "Mystery"
            standard = "KEYCODE_NOPE"
            "#,
        )
        .unwrap();
        let err = config.build_host().unwrap_err();
        assert!(format!("{:#}", err).contains("KEYCODE_NOPE"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PROFILE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.bindings.len(), 2);
    }

    #[test]
    fn test_load_config_rejects_invalid_seq_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[seq]\nseq_capacity = 0\n").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid [seq] section"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/profile.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
