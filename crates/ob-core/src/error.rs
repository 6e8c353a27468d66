//! Parameter validation errors.
//!
//! Sub-crates define their own error enums and wrap `ParamError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// A rejected configuration value.  The setter that produced it leaves the
/// previous value in place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("parameter `{name}` = {value} is out of range (expected {expected})")]
    OutOfRange {
        name:     &'static str,
        value:    f64,
        expected: &'static str,
    },

    #[error("parameter `{name}` = {value} is not a finite number")]
    NotFinite {
        name:  &'static str,
        value: f64,
    },
}

/// Shorthand result type for parameter checks.
pub type ParamResult<T> = Result<T, ParamError>;
