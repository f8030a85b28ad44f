//! Code registry
//!
//! Builds the canonical code table once from the host's code list and owns the
//! per-code live state (edge memory, previous analog sample) that the query
//! engine mutates. Code indices are stable for the lifetime of the registry.

use crate::codes::standard::StandardCodes;
use crate::config::SeqConfig;
use crate::host::HostCodeProvider;
use crate::types::{AnalogKind, HostCodeInfo, HostCodeKind, HostHandle, InputCode};
use std::collections::HashMap;

/// One entry of the code table
#[derive(Debug, Clone)]
pub struct CodeEntry {
    analog: AnalogKind,
    token: String,
    host: Option<HostBinding>,
    /// Edge memory: set once a press has been reported, cleared on release
    pub(crate) memory: bool,
    /// Last absolute sample seen by the analog evaluator
    pub(crate) prev_analog: i32,
}

#[derive(Debug, Clone)]
struct HostBinding {
    handle: HostHandle,
    name: String,
}

impl CodeEntry {
    fn unbound(analog: AnalogKind) -> Self {
        Self {
            analog,
            token: String::new(),
            host: None,
            memory: false,
            prev_analog: 0,
        }
    }

    /// Value semantics of this code
    pub fn analog(&self) -> AnalogKind {
        self.analog
    }

    /// Canonical upper-case token (empty if none could be derived)
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Host handle used for live sampling
    pub fn handle(&self) -> Option<HostHandle> {
        self.host.as_ref().map(|h| h.handle)
    }

    /// Human-readable name reported by the host
    pub fn host_name(&self) -> Option<&str> {
        self.host.as_ref().map(|h| h.name.as_str())
    }

    /// True if a host signal backs this code
    pub fn is_bound(&self) -> bool {
        self.host.is_some()
    }
}

/// Registry statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of standard slots
    pub num_standard: usize,
    /// Standard slots with a host signal bound
    pub num_bound: usize,
    /// Host signals appended after the standard slots
    pub num_extra: usize,
    /// Codes with an analog kind
    pub num_analog: usize,
}

/// The canonical code table
#[derive(Debug, Clone)]
pub struct CodeRegistry {
    entries: Vec<CodeEntry>,
    standard: StandardCodes,
    /// Token lookup; the first code to claim a token keeps it
    tokens: HashMap<String, InputCode>,
}

impl CodeRegistry {
    /// Build the table from the host's code list
    ///
    /// Host entries that name a standard slot are bound to it; every other
    /// entry is appended as an extra code. Standard slots without a host entry
    /// stay in the table but are inert.
    pub fn build(host_codes: &[HostCodeInfo], config: &SeqConfig) -> Self {
        let standard = StandardCodes::new(&config.layout);
        let mut entries: Vec<CodeEntry> = (0..standard.len())
            .map(|index| CodeEntry::unbound(standard.positional_analog(InputCode::new(index as u32))))
            .collect();

        for info in host_codes {
            let binding = HostBinding {
                handle: info.handle,
                name: info.name.clone(),
            };

            match info.kind {
                HostCodeKind::Standard(code) if standard.contains(code) => {
                    let Some(index) = code.index() else { continue };
                    let entry = &mut entries[index];
                    if let Some(previous) = entry.host_name() {
                        log::warn!(
                            "Host code '{}' replaces '{}' on standard slot {}",
                            info.name,
                            previous,
                            standard.name(code).unwrap_or_default()
                        );
                    }
                    entry.analog = info.analog.unwrap_or_else(|| standard.positional_analog(code));
                    entry.host = Some(binding);
                }
                kind => {
                    let analog = match kind {
                        HostCodeKind::Standard(_) => info.analog.unwrap_or_default(),
                        other => other.generic_analog(),
                    };
                    let mut entry = CodeEntry::unbound(analog);
                    entry.host = Some(binding);
                    entries.push(entry);
                }
            }
        }

        // Standard slots take the canonical name; everything else derives
        // its token from the host name.
        let token_cap = config.max_token_len.saturating_sub(1);
        let mut tokens = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter_mut().enumerate() {
            let code = InputCode::new(index as u32);
            entry.token = match standard.name(code) {
                Some(name) => name.chars().take(token_cap).collect(),
                None => entry.host_name().map(|name| make_token(name, token_cap)).unwrap_or_default(),
            };

            if entry.token.is_empty() {
                log::warn!("Code {} has no usable token", code);
                continue;
            }
            tokens.entry(entry.token.clone()).or_insert(code);
        }

        let registry = Self {
            entries,
            standard,
            tokens,
        };

        let stats = registry.stats();
        log::info!(
            "Code registry built: {} standard ({} bound), {} extra, {} analog",
            stats.num_standard,
            stats.num_bound,
            stats.num_extra,
            stats.num_analog
        );
        registry
    }

    /// Build the table from a live host provider
    pub fn from_host<H: HostCodeProvider + ?Sized>(host: &H, config: &SeqConfig) -> Self {
        Self::build(&host.codes(), config)
    }

    /// Number of codes in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The standard enumeration this table was built from
    pub fn standard(&self) -> &StandardCodes {
        &self.standard
    }

    /// Table entry for a code
    pub fn entry(&self, code: InputCode) -> Option<&CodeEntry> {
        code.index().and_then(|index| self.entries.get(index))
    }

    pub(crate) fn entry_mut(&mut self, code: InputCode) -> Option<&mut CodeEntry> {
        code.index().and_then(move |index| self.entries.get_mut(index))
    }

    /// Analog kind of a code (`None` for sentinels and out-of-range codes)
    pub fn analog_kind(&self, code: InputCode) -> AnalogKind {
        self.entry(code).map(CodeEntry::analog).unwrap_or_default()
    }

    /// Display token of a table code
    pub fn token(&self, code: InputCode) -> Option<&str> {
        self.entry(code).map(CodeEntry::token).filter(|t| !t.is_empty())
    }

    /// Find the code owning a token (case-insensitive)
    pub fn find_token(&self, token: &str) -> Option<InputCode> {
        self.tokens.get(&token.to_uppercase()).copied()
    }

    /// Iterate over every code in the table
    pub fn codes(&self) -> impl Iterator<Item = InputCode> {
        (0..self.entries.len() as u32).map(InputCode::new)
    }

    /// Iterate over every code together with its entry
    pub fn iter(&self) -> impl Iterator<Item = (InputCode, &CodeEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (InputCode::new(index as u32), entry))
    }

    /// Get registry statistics
    pub fn stats(&self) -> RegistryStats {
        let num_standard = self.standard.len();
        RegistryStats {
            num_standard,
            num_bound: self.entries[..num_standard].iter().filter(|e| e.is_bound()).count(),
            num_extra: self.entries.len() - num_standard,
            num_analog: self.entries.iter().filter(|e| e.analog.is_analog()).count(),
        }
    }
}

/// Derive a token from a host name: upper-cased, spaces become underscores
fn make_token(name: &str, cap: usize) -> String {
    name.chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .flat_map(char::to_uppercase)
        .take(cap)
        .collect()
}
