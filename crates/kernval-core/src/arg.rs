//! Argument descriptors for kernel contracts.
//!
//! An [`ArgumentDescriptor`] is the declared contract for one kernel
//! argument: its kind (field, scalar, or operator), intrinsic data type,
//! access mode, and the 0-2 function spaces it is defined over. Descriptors
//! are immutable once constructed; the shape-safe constructors
//! ([`ArgumentDescriptor::field`], [`scalar`](ArgumentDescriptor::scalar),
//! [`operator`](ArgumentDescriptor::operator)) fix the space count per kind,
//! while the checked [`ArgumentDescriptor::new`] serves callers that build
//! descriptors from extracted metadata.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::error::CoreError;
use crate::space::SpaceRef;

/// The kind of a declared kernel argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgumentKind {
    /// A field over a single function space.
    Field,
    /// A scalar value, not defined over any space.
    Scalar,
    /// A linear-operator-like argument coupling two function spaces.
    Operator,
}

impl ArgumentKind {
    /// Number of space references an argument of this kind carries.
    pub fn space_count(self) -> usize {
        match self {
            ArgumentKind::Scalar => 0,
            ArgumentKind::Field => 1,
            ArgumentKind::Operator => 2,
        }
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgumentKind::Field => "field",
            ArgumentKind::Scalar => "scalar",
            ArgumentKind::Operator => "operator",
        };
        write!(f, "{name}")
    }
}

/// How a kernel accesses one of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    /// Read-only.
    Read,
    /// Written without reading the incoming value.
    Write,
    /// Read and written.
    ReadWrite,
    /// Accumulated in place.
    Increment,
    /// Reduced across iteration instances into a single scalar.
    Sum,
}

impl AccessMode {
    /// `true` for the access modes that modify a field argument
    /// (Write, ReadWrite, Increment).
    pub fn writes(self) -> bool {
        matches!(
            self,
            AccessMode::Write | AccessMode::ReadWrite | AccessMode::Increment
        )
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessMode::Read => "read",
            AccessMode::Write => "write",
            AccessMode::ReadWrite => "readwrite",
            AccessMode::Increment => "increment",
            AccessMode::Sum => "sum",
        };
        write!(f, "{name}")
    }
}

/// Intrinsic data type of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Real,
    Integer,
    Logical,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Real => "real",
            DataType::Integer => "integer",
            DataType::Logical => "logical",
        };
        write!(f, "{name}")
    }
}

/// The declared contract for a single kernel argument.
///
/// Immutable once constructed. `spaces` holds 0 entries for scalars, 1 for
/// fields, and 2 (to-space, from-space) for operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDescriptor {
    /// What kind of argument this is.
    pub kind: ArgumentKind,
    /// Intrinsic data type.
    pub data_type: DataType,
    /// How the kernel accesses this argument.
    pub access: AccessMode,
    /// Function spaces the argument is defined over, in declaration order.
    pub spaces: SmallVec<[SpaceRef; 2]>,
}

impl ArgumentDescriptor {
    /// Creates a descriptor from extracted metadata, checking that the
    /// number of supplied spaces matches the kind.
    pub fn new(
        kind: ArgumentKind,
        data_type: DataType,
        access: AccessMode,
        spaces: SmallVec<[SpaceRef; 2]>,
    ) -> Result<Self, CoreError> {
        if spaces.len() != kind.space_count() {
            return Err(CoreError::WrongSpaceCount {
                kind,
                expected: kind.space_count(),
                actual: spaces.len(),
            });
        }
        Ok(ArgumentDescriptor {
            kind,
            data_type,
            access,
            spaces,
        })
    }

    /// A field argument over one function space.
    pub fn field(data_type: DataType, access: AccessMode, space: SpaceRef) -> Self {
        ArgumentDescriptor {
            kind: ArgumentKind::Field,
            data_type,
            access,
            spaces: smallvec![space],
        }
    }

    /// A scalar argument (no function space).
    pub fn scalar(data_type: DataType, access: AccessMode) -> Self {
        ArgumentDescriptor {
            kind: ArgumentKind::Scalar,
            data_type,
            access,
            spaces: SmallVec::new(),
        }
    }

    /// An operator argument coupling a to-space and a from-space.
    pub fn operator(data_type: DataType, access: AccessMode, to: SpaceRef, from: SpaceRef) -> Self {
        ArgumentDescriptor {
            kind: ArgumentKind::Operator,
            data_type,
            access,
            spaces: smallvec![to, from],
        }
    }

    /// The first (for fields: only) declared space, if any.
    pub fn space(&self) -> Option<&SpaceRef> {
        self.spaces.first()
    }

    /// `true` if this is a field argument the kernel modifies.
    pub fn writes_field(&self) -> bool {
        self.kind == ArgumentKind::Field && self.access.writes()
    }

    /// `true` if this argument is a reduction target.
    pub fn is_reduction(&self) -> bool {
        self.access == AccessMode::Sum
    }
}
