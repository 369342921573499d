//! Quality checks computing diagnostic facts about a metabolic model
//!
//! All checks read the model without modifying it, and return identifiers so that results
//! can outlive the model they were computed from.
use thiserror::Error;

pub mod basic;
pub mod bounds;
pub mod cache;
pub mod duplicates;
pub mod gpr_helpers;
pub mod helpers;

/// Errors raised by the quality checks
///
/// A check which finds nothing returns an empty result, these errors are reserved for
/// models on which the check is undefined.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SupportError {
    /// The model doesn't satisfy a precondition of the check
    #[error("Invalid model state: {0}")]
    InvalidModelState(String),
    /// A reaction referenced by the model (e.g. in the medium) is missing from it
    #[error("Reaction {0} referenced by the model was not found")]
    UnknownReaction(String),
}
