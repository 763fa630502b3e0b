//! Semantic validation for kernel contracts and invocations.
//!
//! Provides three levels of checking:
//! - [`access::validate_contract`]: the kind/access-mode legality table,
//!   applied to every contract (eager per-contract checking).
//! - [`builtin::validate_built_in`]: the structural shape rules built-in
//!   operations are additionally held to.
//! - [`bind::bind`]: matching one invocation's actual arguments against a
//!   candidate overload set.
//!
//! [`validate_unit`] drives all three over a whole compilation unit and
//! accumulates every diagnostic -- the validator never halts on a single
//! defect, and never fails on malformed-but-representable input; it only
//! reports. All functions are pure over immutable inputs: contracts are
//! never mutated, distinct contracts and invocations share no state, and
//! checking the same input twice yields the same diagnostics.

pub mod access;
pub mod bind;
pub mod builtin;
pub mod diagnostics;
pub mod unit;

pub use access::{is_legal_access, validate_contract};
pub use bind::{bind, BindingResult, BoundArgument, BoundCall};
pub use builtin::validate_built_in;
pub use diagnostics::{Diagnostic, Severity};
pub use unit::{validate_unit, CompilationUnit, Invocation, Origin, ReportEntry, UnitReport};

use kernval_core::contract::KernelContract;

/// Runs every applicable rule for one contract: the access-mode table
/// always, the built-in shape rules when the contract is a built-in.
/// Diagnostics come back in rule order, all defects at once.
pub fn validate(contract: &KernelContract) -> Vec<Diagnostic> {
    let mut diagnostics = access::validate_contract(contract);
    if contract.is_built_in {
        diagnostics.extend(builtin::validate_built_in(contract));
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernval_core::arg::{AccessMode, ArgumentDescriptor, DataType};
    use kernval_core::contract::OperatesOn;

    #[test]
    fn validate_runs_access_rules_for_user_kernels_only() {
        let contract = KernelContract::new(
            "user_kern",
            vec![
                ArgumentDescriptor::field(DataType::Real, AccessMode::Write, "w3".into()),
                ArgumentDescriptor::field(DataType::Real, AccessMode::Write, "w0".into()),
            ],
            OperatesOn::CellColumn,
        )
        .unwrap();
        // Two writers on different spaces break built-in rules 1 and 4, but
        // this is a user kernel and the access table is satisfied.
        assert!(validate(&contract).is_empty());
    }

    #[test]
    fn validate_stacks_access_and_shape_diagnostics_for_built_ins() {
        let contract = KernelContract::built_in(
            "bad_builtin",
            vec![
                ArgumentDescriptor::scalar(DataType::Real, AccessMode::Write), // access defect
                ArgumentDescriptor::field(DataType::Real, AccessMode::Read, "w3".into()),
            ],
            OperatesOn::DegreeOfFreedom,
        )
        .unwrap();

        let diagnostics = validate(&contract);
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::IllegalAccessMode {
                argument_index: 0,
                ..
            }
        ));
        // No field writer at all.
        assert_eq!(
            diagnostics[1],
            Diagnostic::InvalidWriteCount {
                expected: 1,
                actual: 0,
            }
        );
    }
}
