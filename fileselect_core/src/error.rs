//! Error types for the fileselect core library
//!
//! Errors come in two flavours:
//! - Validation errors: criteria that can never select anything sensibly,
//!   reported once when a [`Selector`](crate::Selector) is built.
//! - Rule errors: per-rule problems met while ordering candidates. These are
//!   collected into [`RuleErrors`] next to a best-effort result instead of
//!   aborting the selection.

use thiserror::Error;

pub mod rule;
pub mod validation;

pub use self::rule::{RuleError, RuleErrors};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fileselect core library
#[derive(Error, Debug)]
pub enum Error {
    /// Criteria validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<RuleError> for Error {
    fn from(err: RuleError) -> Self {
        Self::Validation(ValidationError::SortRule(err))
    }
}
