//! Configuration validation
//!
//! - `config_validators`: Validators for every configuration section
//! - `tests`: Test suite for all validators

mod config_validators;

/// Implemented by every configuration section; the error names the
/// offending field.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
