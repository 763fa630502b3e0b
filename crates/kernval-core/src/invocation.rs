//! Actual arguments supplied at kernel invocation points.
//!
//! The call-site scanner is an external collaborator and cannot always
//! resolve what an actual argument is; an [`InvocationArgument`] therefore
//! carries an opaque handle plus an optionally-known kind and data type.
//! `None` means "unresolved" and the binder treats it as compatible with
//! anything, deferring the check to generation time.

use serde::{Deserialize, Serialize};

use crate::arg::{ArgumentKind, DataType};

/// One actual argument at a call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationArgument {
    /// Opaque handle identifying the actual argument expression
    /// (e.g. the source symbol name). Never interpreted here.
    pub handle: String,
    /// Argument kind, if the scanner resolved it.
    pub kind: Option<ArgumentKind>,
    /// Data type, if the scanner resolved it.
    pub data_type: Option<DataType>,
}

impl InvocationArgument {
    /// An actual argument with fully resolved kind and type.
    pub fn known(handle: impl Into<String>, kind: ArgumentKind, data_type: DataType) -> Self {
        InvocationArgument {
            handle: handle.into(),
            kind: Some(kind),
            data_type: Some(data_type),
        }
    }

    /// An actual argument the scanner could not resolve.
    pub fn unresolved(handle: impl Into<String>) -> Self {
        InvocationArgument {
            handle: handle.into(),
            kind: None,
            data_type: None,
        }
    }
}
