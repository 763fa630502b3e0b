//! Whole-compilation-unit validation driver.
//!
//! [`validate_unit`] is the entry point the external collaborators see: the
//! metadata extractor's contracts and the call-site scanner's invocations go
//! in, a [`UnitReport`] comes out. The report carries every diagnostic from
//! every contract and invocation -- validation never halts on the first
//! defect -- plus the bound calls the code generator may proceed with.
//! A contract with any diagnostic is excluded from binding candidacy; there
//! is no best-effort binding against a defective contract.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use kernval_core::contract::{ContractRegistry, KernelContract};
use kernval_core::invocation::InvocationArgument;

use crate::bind::{bind, BindingResult, BoundCall};
use crate::diagnostics::Diagnostic;

/// One kernel invocation discovered by the call-site scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Name of the invoked kernel.
    pub kernel: String,
    /// Actual arguments, in call order.
    pub arguments: Vec<InvocationArgument>,
}

/// Everything the validator consumes for one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Extracted kernel and built-in contracts.
    pub contracts: Vec<KernelContract>,
    /// Discovered invocations, in source order.
    pub invocations: Vec<Invocation>,
}

/// What a diagnostic was reported against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    /// A kernel or built-in contract.
    Contract { name: String },
    /// An invocation, identified by its position in the unit.
    Invocation { index: usize, kernel: String },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Contract { name } => write!(f, "contract '{name}'"),
            Origin::Invocation { index, kernel } => {
                write!(f, "invocation #{index} of '{kernel}'")
            }
        }
    }
}

/// One diagnostic together with what it was reported against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub origin: Origin,
    pub diagnostic: Diagnostic,
}

/// The result of validating one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitReport {
    /// Every diagnostic, in processing order (contracts first, then
    /// invocations, each in declaration/source order).
    pub entries: Vec<ReportEntry>,
    /// Bound calls ready for code generation.
    pub bound: Vec<BoundCall>,
}

impl UnitReport {
    /// `true` if no diagnostic was reported.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// The diagnostics alone, in report order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|entry| &entry.diagnostic)
    }
}

/// Validates every contract and binds every invocation of `unit`.
///
/// The registry of binding candidates is populated once, before any
/// invocation is processed, and consulted read-only afterward. Only
/// contracts that validated cleanly become candidates. An invocation naming
/// a kernel with no registered contract at all reports
/// [`Diagnostic::UnknownKernel`]; one whose overloads all failed validation
/// is skipped (its defects are already on record against the contracts).
pub fn validate_unit(unit: &CompilationUnit) -> UnitReport {
    let mut entries = Vec::new();

    // Contract validation; clean contracts populate the candidate registry.
    let mut registry = ContractRegistry::new();
    let mut declared_names: HashSet<&str> = HashSet::new();
    for contract in &unit.contracts {
        declared_names.insert(contract.name.as_str());
        let diagnostics = crate::validate(contract);
        if diagnostics.is_empty() {
            registry.register(contract.clone());
        } else {
            entries.extend(diagnostics.into_iter().map(|diagnostic| ReportEntry {
                origin: Origin::Contract {
                    name: contract.name.clone(),
                },
                diagnostic,
            }));
        }
    }

    // Invocation binding against the now read-only registry.
    let mut bound = Vec::new();
    for (index, invocation) in unit.invocations.iter().enumerate() {
        let origin = Origin::Invocation {
            index,
            kernel: invocation.kernel.clone(),
        };

        if !declared_names.contains(invocation.kernel.as_str()) {
            entries.push(ReportEntry {
                origin,
                diagnostic: Diagnostic::UnknownKernel {
                    kernel: invocation.kernel.clone(),
                },
            });
            continue;
        }

        let candidates = registry.candidates(&invocation.kernel);
        if candidates.is_empty() {
            // Declared but every overload was defective; already reported.
            continue;
        }

        match bind(&invocation.arguments, candidates) {
            BindingResult::Bound(call) => bound.push(call),
            BindingResult::Rejected { diagnostics } => {
                entries.extend(diagnostics.into_iter().map(|diagnostic| ReportEntry {
                    origin: origin.clone(),
                    diagnostic,
                }));
            }
        }
    }

    UnitReport { entries, bound }
}
