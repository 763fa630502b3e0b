//! Core error types for kernval-core.
//!
//! These cover defects in the construction of the contract model itself --
//! distinct from validation diagnostics (kernval-check), which describe
//! defects in well-formed contracts and call sites.

use thiserror::Error;

use crate::arg::ArgumentKind;

/// Errors produced while constructing the contract model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A kernel contract was declared with no arguments.
    #[error("kernel '{kernel}' declares no arguments")]
    EmptyArgumentList { kernel: String },

    /// The number of function spaces does not match the argument kind
    /// (0 for scalars, 1 for fields, 2 for operators).
    #[error("a {kind} argument takes {expected} space reference(s), found {actual}")]
    WrongSpaceCount {
        kind: ArgumentKind,
        expected: usize,
        actual: usize,
    },
}
