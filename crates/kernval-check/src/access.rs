//! Kind/access-mode legality rules.
//!
//! The legality table is fixed:
//!
//! | kind     | legal accesses                      |
//! |----------|-------------------------------------|
//! | Field    | Read, Write, ReadWrite, Increment   |
//! | Scalar   | Read, Sum                           |
//! | Operator | Read                                |
//!
//! [`is_legal_access`] is pure and total -- it answers for every pair and
//! never panics, since it is applied exhaustively over a contract's
//! arguments. [`validate_contract`] sweeps a whole contract and reports ALL
//! illegal combinations at once; it applies uniformly to user kernels and
//! built-ins.

use kernval_core::arg::{AccessMode, ArgumentKind};
use kernval_core::contract::KernelContract;

use crate::diagnostics::Diagnostic;

/// Whether `access` is a legal access mode for an argument of `kind`.
pub fn is_legal_access(kind: ArgumentKind, access: AccessMode) -> bool {
    match kind {
        ArgumentKind::Field => matches!(
            access,
            AccessMode::Read | AccessMode::Write | AccessMode::ReadWrite | AccessMode::Increment
        ),
        ArgumentKind::Scalar => matches!(access, AccessMode::Read | AccessMode::Sum),
        ArgumentKind::Operator => matches!(access, AccessMode::Read),
    }
}

/// Checks every argument of `contract` against the legality table.
///
/// Returns one [`Diagnostic::IllegalAccessMode`] per offending argument, in
/// ascending argument-index order. Empty when the contract is clean.
pub fn validate_contract(contract: &KernelContract) -> Vec<Diagnostic> {
    contract
        .arguments
        .iter()
        .enumerate()
        .filter(|(_, arg)| !is_legal_access(arg.kind, arg.access))
        .map(|(argument_index, arg)| Diagnostic::IllegalAccessMode {
            argument_index,
            kind: arg.kind,
            access: arg.access,
        })
        .collect()
}
