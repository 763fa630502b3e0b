//! Structural shape rules for built-in operations.
//!
//! Built-in bodies are generated mechanically, so their contracts carry
//! invariants beyond the access-mode table. [`validate_built_in`] runs the
//! five rules in order and collects EVERY violation in one pass -- a
//! contract can break several rules at once and all of them must surface
//! together, in ascending argument-index order within each rule:
//!
//! 1. Single-writer: exactly one writable field argument, unless the
//!    contract is tagged zero-output (pure reduction into a scalar).
//! 2. No-operator: operator arguments require kernel-body code that
//!    built-ins do not have.
//! 3. Reduction isolation: a reduction may not sit beside both a readwrite
//!    and a separate write field argument.
//! 4. Shared-space: all field arguments live on one function space, unless
//!    the contract is tagged as a cross-space conversion.
//! 5. Non-trivial output: reading scalars and writing nothing is rejected.

use kernval_core::arg::{AccessMode, ArgumentKind};
use kernval_core::contract::KernelContract;

use crate::diagnostics::Diagnostic;

/// Checks the structural shape rules for a built-in contract.
///
/// The access-mode table ([`crate::access::validate_contract`]) applies
/// separately; this function assumes nothing about it and never panics on
/// contracts that break both.
pub fn validate_built_in(contract: &KernelContract) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let field_count = contract.field_arguments().count();
    let writer_count = contract
        .arguments
        .iter()
        .filter(|arg| arg.writes_field())
        .count();
    let has_reduction = contract.arguments.iter().any(|arg| arg.is_reduction());

    // Rule 1: single writer. Zero-output contracts are exempt from the
    // demand for a writer; a surplus of writers is never exempt.
    let zero_output_exempt = contract.is_zero_output && writer_count == 0;
    if field_count > 0 && writer_count != 1 && !zero_output_exempt {
        diagnostics.push(Diagnostic::InvalidWriteCount {
            expected: 1,
            actual: writer_count,
        });
    }

    // Rule 2: no operators.
    for (argument_index, arg) in contract.arguments.iter().enumerate() {
        if arg.kind == ArgumentKind::Operator {
            diagnostics.push(Diagnostic::OperatorArgumentInBuiltIn { argument_index });
        }
    }

    // Rule 3: reduction isolation. A lone readwrite writer beside
    // reductions is a fused accumulate and stays legal.
    if has_reduction {
        let has_readwrite_field = contract
            .field_arguments()
            .any(|(_, arg)| arg.access == AccessMode::ReadWrite);
        let has_write_field = contract
            .field_arguments()
            .any(|(_, arg)| arg.access == AccessMode::Write);
        if has_readwrite_field && has_write_field {
            diagnostics.push(Diagnostic::ConflictingReductionAndWrite);
        }
    }

    // Rule 4: shared space. The first field argument's space is normative.
    if !contract.is_conversion {
        let mut fields = contract.field_arguments();
        if let Some((_, first)) = fields.next() {
            if let Some(expected) = first.space() {
                for (argument_index, arg) in fields {
                    match arg.space() {
                        Some(actual) if actual != expected => {
                            diagnostics.push(Diagnostic::SpaceMismatch {
                                expected: expected.clone(),
                                actual: actual.clone(),
                                argument_index,
                            });
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    // Rule 5: non-trivial output.
    if field_count == 0 && !has_reduction {
        diagnostics.push(Diagnostic::NoEffectiveOutput);
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernval_core::arg::{ArgumentDescriptor, DataType};
    use kernval_core::contract::OperatesOn;
    use kernval_core::library::built_in_library;

    fn field(access: AccessMode, space: &str) -> ArgumentDescriptor {
        ArgumentDescriptor::field(DataType::Real, access, space.into())
    }

    fn scalar(access: AccessMode) -> ArgumentDescriptor {
        ArgumentDescriptor::scalar(DataType::Real, access)
    }

    fn built_in(arguments: Vec<ArgumentDescriptor>) -> KernelContract {
        KernelContract::built_in("test_builtin", arguments, OperatesOn::DegreeOfFreedom).unwrap()
    }

    // -----------------------------------------------------------------------
    // Rule 1: single writer
    // -----------------------------------------------------------------------

    #[test]
    fn two_write_fields_yield_invalid_write_count_two() {
        let contract = built_in(vec![
            field(AccessMode::Write, "w3"),
            field(AccessMode::Write, "w3"),
        ]);
        assert_eq!(
            validate_built_in(&contract),
            vec![Diagnostic::InvalidWriteCount {
                expected: 1,
                actual: 2,
            }]
        );
    }

    #[test]
    fn untagged_lone_reduction_over_read_fields_is_flagged() {
        // A reduction's output is tracked separately from the field-write
        // count, so this contract still has zero field writers.
        let contract = built_in(vec![scalar(AccessMode::Sum), field(AccessMode::Read, "w3")]);
        assert_eq!(
            validate_built_in(&contract),
            vec![Diagnostic::InvalidWriteCount {
                expected: 1,
                actual: 0,
            }]
        );
    }

    #[test]
    fn zero_output_tag_exempts_the_missing_writer() {
        let contract = built_in(vec![
            scalar(AccessMode::Sum),
            field(AccessMode::Read, "w3"),
            field(AccessMode::Read, "w3"),
        ])
        .with_zero_output();
        assert!(validate_built_in(&contract).is_empty());
    }

    #[test]
    fn zero_output_tag_does_not_excuse_extra_writers() {
        let contract = built_in(vec![
            scalar(AccessMode::Sum),
            field(AccessMode::Write, "w3"),
            field(AccessMode::Write, "w3"),
        ])
        .with_zero_output();
        assert_eq!(
            validate_built_in(&contract),
            vec![Diagnostic::InvalidWriteCount {
                expected: 1,
                actual: 2,
            }]
        );
    }

    #[test]
    fn mixed_writers_and_readers_count_only_writers() {
        let contract = built_in(vec![
            field(AccessMode::Write, "w3"),
            scalar(AccessMode::Read),
            field(AccessMode::Read, "w3"),
            field(AccessMode::Write, "w3"),
        ]);
        assert_eq!(
            validate_built_in(&contract),
            vec![Diagnostic::InvalidWriteCount {
                expected: 1,
                actual: 2,
            }]
        );
    }

    #[test]
    fn increment_counts_as_a_writer() {
        let contract = built_in(vec![
            field(AccessMode::Increment, "w3"),
            field(AccessMode::Read, "w3"),
        ]);
        assert!(validate_built_in(&contract).is_empty());
    }

    // -----------------------------------------------------------------------
    // Rule 2: no operators
    // -----------------------------------------------------------------------

    #[test]
    fn operator_argument_is_rejected_regardless_of_other_fields() {
        let contract = built_in(vec![
            field(AccessMode::Write, "w3"),
            ArgumentDescriptor::operator(
                DataType::Real,
                AccessMode::Read,
                "w3".into(),
                "w0".into(),
            ),
        ]);
        assert_eq!(
            validate_built_in(&contract),
            vec![Diagnostic::OperatorArgumentInBuiltIn { argument_index: 1 }]
        );
    }

    #[test]
    fn every_operator_argument_is_reported_in_index_order() {
        let contract = built_in(vec![
            ArgumentDescriptor::operator(
                DataType::Real,
                AccessMode::Read,
                "w3".into(),
                "w0".into(),
            ),
            field(AccessMode::Write, "w3"),
            ArgumentDescriptor::operator(
                DataType::Real,
                AccessMode::Read,
                "w2".into(),
                "w1".into(),
            ),
        ]);
        assert_eq!(
            validate_built_in(&contract),
            vec![
                Diagnostic::OperatorArgumentInBuiltIn { argument_index: 0 },
                Diagnostic::OperatorArgumentInBuiltIn { argument_index: 2 },
            ]
        );
    }

    // -----------------------------------------------------------------------
    // Rule 3: reduction isolation
    // -----------------------------------------------------------------------

    #[test]
    fn fused_accumulate_is_legal() {
        // One Sum scalar beside a single ReadWrite field.
        let contract = built_in(vec![
            scalar(AccessMode::Sum),
            field(AccessMode::ReadWrite, "w3"),
        ]);
        assert!(validate_built_in(&contract).is_empty());
    }

    #[test]
    fn multiple_reductions_beside_one_writer_are_legal() {
        // Two independent reductions plus one field writer: rule 1 is
        // satisfied and rule 3 finds no conflicting pair.
        let contract = built_in(vec![
            scalar(AccessMode::Sum),
            field(AccessMode::ReadWrite, "w3"),
            scalar(AccessMode::Sum),
        ]);
        assert!(validate_built_in(&contract).is_empty());
    }

    #[test]
    fn reduction_with_readwrite_and_separate_write_conflicts() {
        let contract = built_in(vec![
            scalar(AccessMode::Sum),
            field(AccessMode::ReadWrite, "w3"),
            field(AccessMode::Write, "w3"),
        ]);
        let diagnostics = validate_built_in(&contract);
        // Rule 1 (two writers) and rule 3 both fire, in rule order.
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::InvalidWriteCount {
                    expected: 1,
                    actual: 2,
                },
                Diagnostic::ConflictingReductionAndWrite,
            ]
        );
    }

    #[test]
    fn readwrite_beside_write_without_reduction_is_only_a_write_count_defect() {
        let contract = built_in(vec![
            field(AccessMode::ReadWrite, "w3"),
            field(AccessMode::Write, "w3"),
        ]);
        assert_eq!(
            validate_built_in(&contract),
            vec![Diagnostic::InvalidWriteCount {
                expected: 1,
                actual: 2,
            }]
        );
    }

    // -----------------------------------------------------------------------
    // Rule 4: shared space
    // -----------------------------------------------------------------------

    #[test]
    fn fields_on_different_spaces_are_reported_against_the_first() {
        let contract = built_in(vec![
            field(AccessMode::Write, "w3"),
            field(AccessMode::Read, "w0"),
            field(AccessMode::Read, "w3"),
            field(AccessMode::Read, "w2"),
        ]);
        assert_eq!(
            validate_built_in(&contract),
            vec![
                Diagnostic::SpaceMismatch {
                    expected: "w3".into(),
                    actual: "w0".into(),
                    argument_index: 1,
                },
                Diagnostic::SpaceMismatch {
                    expected: "w3".into(),
                    actual: "w2".into(),
                    argument_index: 3,
                },
            ]
        );
    }

    #[test]
    fn any_space_placeholders_do_not_wildcard_match() {
        let contract = built_in(vec![
            field(AccessMode::Write, "any_space_1"),
            field(AccessMode::Read, "any_space_2"),
        ]);
        assert_eq!(
            validate_built_in(&contract),
            vec![Diagnostic::SpaceMismatch {
                expected: "any_space_1".into(),
                actual: "any_space_2".into(),
                argument_index: 1,
            }]
        );
    }

    #[test]
    fn conversion_tag_permits_cross_space_fields() {
        let contract = built_in(vec![
            field(AccessMode::Write, "w3"),
            ArgumentDescriptor::field(DataType::Integer, AccessMode::Read, "w0".into()),
        ])
        .with_conversion();
        assert!(validate_built_in(&contract).is_empty());
    }

    #[test]
    fn scalars_do_not_participate_in_the_space_rule() {
        let contract = built_in(vec![
            field(AccessMode::Write, "w3"),
            scalar(AccessMode::Read),
            field(AccessMode::Read, "w3"),
        ]);
        assert!(validate_built_in(&contract).is_empty());
    }

    // -----------------------------------------------------------------------
    // Rule 5: non-trivial output
    // -----------------------------------------------------------------------

    #[test]
    fn scalar_only_reader_has_no_effective_output() {
        let contract = built_in(vec![scalar(AccessMode::Read), scalar(AccessMode::Read)]);
        assert_eq!(
            validate_built_in(&contract),
            vec![Diagnostic::NoEffectiveOutput]
        );
    }

    #[test]
    fn a_lone_reduction_without_fields_is_an_effective_output() {
        let contract = built_in(vec![scalar(AccessMode::Sum), scalar(AccessMode::Read)]);
        assert!(validate_built_in(&contract).is_empty());
    }

    // -----------------------------------------------------------------------
    // Cross-rule behaviour
    // -----------------------------------------------------------------------

    #[test]
    fn all_violated_rules_are_reported_in_rule_order() {
        // Breaks rule 1 (two writers), rule 2 (operator), rule 3 (reduction
        // beside readwrite+write), and rule 4 (space mismatch) at once.
        let contract = built_in(vec![
            scalar(AccessMode::Sum),
            field(AccessMode::ReadWrite, "w3"),
            field(AccessMode::Write, "w0"),
            ArgumentDescriptor::operator(
                DataType::Real,
                AccessMode::Read,
                "w3".into(),
                "w0".into(),
            ),
        ]);
        assert_eq!(
            validate_built_in(&contract),
            vec![
                Diagnostic::InvalidWriteCount {
                    expected: 1,
                    actual: 2,
                },
                Diagnostic::OperatorArgumentInBuiltIn { argument_index: 3 },
                Diagnostic::ConflictingReductionAndWrite,
                Diagnostic::SpaceMismatch {
                    expected: "w3".into(),
                    actual: "w0".into(),
                    argument_index: 2,
                },
            ]
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let contract = built_in(vec![
            field(AccessMode::Write, "w3"),
            field(AccessMode::Write, "w0"),
        ]);
        assert_eq!(validate_built_in(&contract), validate_built_in(&contract));
    }

    #[test]
    fn shipped_library_passes_every_shape_rule() {
        for contract in built_in_library() {
            assert!(
                validate_built_in(&contract).is_empty(),
                "library built-in '{}' failed shape validation",
                contract.name
            );
            assert!(
                crate::access::validate_contract(&contract).is_empty(),
                "library built-in '{}' failed the access table",
                contract.name
            );
        }
    }
}
