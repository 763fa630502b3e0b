//! Binding of invocation arguments to kernel contracts.
//!
//! [`bind`] matches one call site's actual arguments against the candidate
//! overload set for that kernel name. It binds only when exactly one
//! candidate fits -- an ambiguous invocation is rejected rather than
//! resolved by preference, because selecting the wrong contract would select
//! the wrong generated code path. Binding is a pure function of its inputs;
//! distinct invocations share no state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use kernval_core::arg::ArgumentDescriptor;
use kernval_core::contract::KernelContract;
use kernval_core::invocation::InvocationArgument;

use crate::diagnostics::Diagnostic;

/// One formal/actual pair in a bound call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundArgument {
    /// The contract's declared argument.
    pub formal: ArgumentDescriptor,
    /// The actual argument supplied at the call site.
    pub actual: InvocationArgument,
}

/// A generation-ready resolved invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundCall {
    /// The contract the invocation resolved to.
    pub contract: KernelContract,
    /// Positional pairing of declared to actual arguments.
    pub mapping: Vec<BoundArgument>,
}

/// Outcome of binding one invocation. Transient: produced per call site and
/// consumed immediately by the code generator or the reporting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingResult {
    /// Exactly one candidate matched.
    Bound(BoundCall),
    /// No unique candidate matched; the diagnostics say why.
    Rejected { diagnostics: Vec<Diagnostic> },
}

impl BindingResult {
    /// `true` if the invocation resolved to a contract.
    pub fn is_bound(&self) -> bool {
        matches!(self, BindingResult::Bound(_))
    }

    /// The rejection diagnostics (empty for a bound result).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            BindingResult::Bound(_) => &[],
            BindingResult::Rejected { diagnostics } => diagnostics,
        }
    }
}

/// Matches `arguments` against `candidates` and produces a bound call or a
/// rejection.
///
/// Candidates are first filtered by arity, then by pairwise kind/type
/// compatibility, where an unresolved actual kind or type matches anything
/// (the check is deferred to generation time, not treated as a defect).
/// Exactly one survivor binds; zero survivors reject with the merged,
/// deduplicated candidate-local diagnostics; several survivors reject as
/// ambiguous, listing every candidate name.
pub fn bind(arguments: &[InvocationArgument], candidates: &[KernelContract]) -> BindingResult {
    // Step 1: arity filter.
    let arity_matched: Vec<&KernelContract> = candidates
        .iter()
        .filter(|candidate| candidate.arity() == arguments.len())
        .collect();

    if arity_matched.is_empty() {
        let mut diagnostics = Vec::new();
        for candidate in candidates {
            let diagnostic = Diagnostic::ArityMismatch {
                kernel: candidate.name.clone(),
                expected: candidate.arity(),
                actual: arguments.len(),
            };
            if !diagnostics.contains(&diagnostic) {
                diagnostics.push(diagnostic);
            }
        }
        return BindingResult::Rejected { diagnostics };
    }

    // Step 2: pairwise kind/type comparison per candidate.
    let mut survivors = Vec::new();
    let mut candidate_diagnostics = Vec::new();
    for candidate in arity_matched {
        let local = argument_mismatches(candidate, arguments);
        if local.is_empty() {
            survivors.push(candidate);
        } else {
            candidate_diagnostics.extend(local);
        }
    }

    match survivors.as_slice() {
        // Step 3: unique survivor binds with the full positional mapping.
        [contract] => BindingResult::Bound(BoundCall {
            contract: (*contract).clone(),
            mapping: contract
                .arguments
                .iter()
                .zip(arguments)
                .map(|(formal, actual)| BoundArgument {
                    formal: formal.clone(),
                    actual: actual.clone(),
                })
                .collect(),
        }),
        // Step 4: nothing survived -- merge candidate-local diagnostics,
        // deduplicated by diagnostic kind + argument index.
        [] => BindingResult::Rejected {
            diagnostics: dedup_diagnostics(candidate_diagnostics),
        },
        // Step 5: ambiguity is never resolved silently.
        _ => BindingResult::Rejected {
            diagnostics: vec![Diagnostic::AmbiguousInvocation {
                candidates: survivors
                    .iter()
                    .map(|contract| contract.name.clone())
                    .collect(),
            }],
        },
    }
}

/// Candidate-local mismatches between declared and actual arguments, in
/// ascending argument-index order. Unresolved actual kind/type matches
/// anything.
fn argument_mismatches(
    candidate: &KernelContract,
    arguments: &[InvocationArgument],
) -> Vec<Diagnostic> {
    candidate
        .arguments
        .iter()
        .zip(arguments)
        .enumerate()
        .filter_map(|(argument_index, (formal, actual))| {
            let kind_conflict = actual.kind.is_some_and(|kind| kind != formal.kind);
            let type_conflict = actual
                .data_type
                .is_some_and(|data_type| data_type != formal.data_type);
            (kind_conflict || type_conflict).then(|| Diagnostic::TypeMismatch {
                argument_index,
                expected_kind: formal.kind,
                expected_type: formal.data_type,
                actual_kind: actual.kind,
                actual_type: actual.data_type,
            })
        })
        .collect()
}

fn dedup_diagnostics(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    diagnostics
        .into_iter()
        .filter(|diagnostic| seen.insert(diagnostic.dedup_key()))
        .collect()
}
