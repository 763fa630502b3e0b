//! Validation diagnostics with full context fields.
//!
//! A [`Diagnostic`] is data, not a fault of the validator: every variant
//! captures enough context (argument index, expected vs actual, candidate
//! names) for the external reporting layer to render an actionable message
//! without further queries. Contracts and invocations that produced any
//! diagnostic are excluded from code generation.

use std::mem::Discriminant;

use serde::{Deserialize, Serialize};

use kernval_core::arg::{AccessMode, ArgumentKind, DataType};
use kernval_core::space::SpaceRef;

/// Severity of a diagnostic. Every defect currently detected is an error;
/// the variant space leaves room for advisory findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A defect detected in a kernel contract or at an invocation point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Diagnostic {
    /// The kind/access combination is outside the legality table.
    #[error("argument {argument_index}: {kind} argument may not have '{access}' access")]
    IllegalAccessMode {
        argument_index: usize,
        kind: ArgumentKind,
        access: AccessMode,
    },

    /// A built-in must have exactly one writable field argument.
    #[error("built-in must have exactly {expected} writable field argument(s), found {actual}")]
    InvalidWriteCount { expected: usize, actual: usize },

    /// Built-ins have no kernel body, so they cannot take operators.
    #[error("argument {argument_index}: built-ins may not declare operator arguments")]
    OperatorArgumentInBuiltIn { argument_index: usize },

    /// A reduction is mixed with an inconsistent pair of writable fields.
    #[error("reduction cannot be combined with both a readwrite and a write field argument")]
    ConflictingReductionAndWrite,

    /// Field arguments of one built-in must share a function space.
    #[error("argument {argument_index}: field is on space '{actual}', expected '{expected}'")]
    SpaceMismatch {
        expected: SpaceRef,
        actual: SpaceRef,
        argument_index: usize,
    },

    /// The built-in reads scalars and writes nothing.
    #[error("built-in has no field argument and no reduction, so it has no effect")]
    NoEffectiveOutput,

    /// No candidate contract matches the number of actual arguments.
    #[error("kernel '{kernel}' takes {expected} argument(s), call supplies {actual}")]
    ArityMismatch {
        kernel: String,
        expected: usize,
        actual: usize,
    },

    /// An actual argument's resolved kind or type contradicts the contract.
    #[error(
        "argument {argument_index}: expected {expected_kind} of type {expected_type}, found {}",
        describe_actual(.actual_kind, .actual_type)
    )]
    TypeMismatch {
        argument_index: usize,
        expected_kind: ArgumentKind,
        expected_type: DataType,
        actual_kind: Option<ArgumentKind>,
        actual_type: Option<DataType>,
    },

    /// More than one candidate contract matches; the binder never picks one.
    #[error("invocation matches more than one kernel contract: {candidates:?}")]
    AmbiguousInvocation { candidates: Vec<String> },

    /// An invocation names a kernel with no registered contract.
    #[error("no contract registered for kernel '{kernel}'")]
    UnknownKernel { kernel: String },
}

fn describe_actual(kind: &Option<ArgumentKind>, data_type: &Option<DataType>) -> String {
    match (kind, data_type) {
        (Some(k), Some(t)) => format!("{k} of type {t}"),
        (Some(k), None) => format!("{k} of unresolved type"),
        (None, Some(t)) => format!("unresolved kind of type {t}"),
        (None, None) => "unresolved argument".to_owned(),
    }
}

impl Diagnostic {
    /// The argument index this diagnostic points at, when it points at one.
    /// Used for within-rule ordering and for rejection deduplication.
    pub fn argument_index(&self) -> Option<usize> {
        match self {
            Diagnostic::IllegalAccessMode { argument_index, .. }
            | Diagnostic::OperatorArgumentInBuiltIn { argument_index }
            | Diagnostic::SpaceMismatch { argument_index, .. }
            | Diagnostic::TypeMismatch { argument_index, .. } => Some(*argument_index),
            Diagnostic::InvalidWriteCount { .. }
            | Diagnostic::ConflictingReductionAndWrite
            | Diagnostic::NoEffectiveOutput
            | Diagnostic::ArityMismatch { .. }
            | Diagnostic::AmbiguousInvocation { .. }
            | Diagnostic::UnknownKernel { .. } => None,
        }
    }

    /// Severity for the reporting layer. Every detected defect is an error.
    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Deduplication key: variant plus argument index. Two candidate-local
    /// rejections of the same kind at the same position collapse into one.
    pub(crate) fn dedup_key(&self) -> (Discriminant<Diagnostic>, Option<usize>) {
        (std::mem::discriminant(self), self.argument_index())
    }
}
