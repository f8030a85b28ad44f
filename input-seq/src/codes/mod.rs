//! Code registry and the standard code enumeration
//!
//! This module contains the fixed enumeration of standard codes and the
//! registry that binds host signals onto it.

pub mod registry;
pub mod standard;

// Re-export key types for convenience
pub use registry::{CodeEntry, CodeRegistry, RegistryStats};
pub use standard::{AxisGroup, StandardCodes};
