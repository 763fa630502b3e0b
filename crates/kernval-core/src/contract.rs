//! Kernel contracts and the per-compilation-unit contract registry.
//!
//! A [`KernelContract`] is the flat, explicitly-constructed record of a
//! kernel's declared argument list plus the tags the built-in shape rules
//! branch on. There is no inheritance chain and no type-hierarchy marker:
//! built-ins are ordinary contracts with `is_built_in` set.
//!
//! The [`ContractRegistry`] replaces the original ambient global of known
//! kernels: it is an explicitly-owned object, built once per compilation
//! unit, then consulted read-only by the validator and binder.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::arg::ArgumentDescriptor;
use crate::error::CoreError;

/// The iteration domain a kernel operates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatesOn {
    /// One vertical column of cells per invocation instance.
    CellColumn,
    /// One degree of freedom per invocation instance.
    DegreeOfFreedom,
    /// The whole domain in a single instance.
    Domain,
}

/// The declared contract of one kernel or built-in operation.
///
/// Created once when metadata is extracted; never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelContract {
    /// Kernel name as it appears at call sites.
    pub name: String,
    /// Declared arguments, in order. Never empty.
    pub arguments: Vec<ArgumentDescriptor>,
    /// Iteration domain.
    pub operates_on: OperatesOn,
    /// `true` for library-provided operations whose bodies are generated
    /// mechanically. Built-ins are held to the structural shape rules.
    pub is_built_in: bool,
    /// `true` for cross-space conversion operations, which are exempt from
    /// the shared-space rule.
    #[serde(default)]
    pub is_conversion: bool,
    /// `true` for pure reductions into a scalar, which are exempt from the
    /// single-writer rule's demand for a field writer.
    #[serde(default)]
    pub is_zero_output: bool,
}

impl KernelContract {
    /// Creates a user-kernel contract. Rejects an empty argument list.
    pub fn new(
        name: impl Into<String>,
        arguments: Vec<ArgumentDescriptor>,
        operates_on: OperatesOn,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        if arguments.is_empty() {
            return Err(CoreError::EmptyArgumentList { kernel: name });
        }
        Ok(KernelContract {
            name,
            arguments,
            operates_on,
            is_built_in: false,
            is_conversion: false,
            is_zero_output: false,
        })
    }

    /// Creates a built-in operation contract. Rejects an empty argument list.
    pub fn built_in(
        name: impl Into<String>,
        arguments: Vec<ArgumentDescriptor>,
        operates_on: OperatesOn,
    ) -> Result<Self, CoreError> {
        let mut contract = KernelContract::new(name, arguments, operates_on)?;
        contract.is_built_in = true;
        Ok(contract)
    }

    /// Tags this contract as a cross-space conversion operation.
    pub fn with_conversion(mut self) -> Self {
        self.is_conversion = true;
        self
    }

    /// Tags this contract as a zero-output (pure reduction) operation.
    pub fn with_zero_output(mut self) -> Self {
        self.is_zero_output = true;
        self
    }

    /// Number of declared arguments.
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Field-kind arguments with their declaration indices.
    pub fn field_arguments(&self) -> impl Iterator<Item = (usize, &ArgumentDescriptor)> {
        self.arguments
            .iter()
            .enumerate()
            .filter(|(_, arg)| arg.kind == crate::arg::ArgumentKind::Field)
    }
}

/// Registry of every kernel contract in scope for one compilation unit.
///
/// Insertion-ordered so that validation and reporting are deterministic.
/// Contracts sharing a name form an overload set. The registry is populated
/// once, before any validation begins, and is read-only afterward -- every
/// lookup takes `&self`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractRegistry {
    contracts: IndexMap<String, Vec<KernelContract>>,
}

impl ContractRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contract. A repeated name extends that name's overload set.
    pub fn register(&mut self, contract: KernelContract) {
        self.contracts
            .entry(contract.name.clone())
            .or_default()
            .push(contract);
    }

    /// The overload set registered under `name` (empty if none).
    pub fn candidates(&self, name: &str) -> &[KernelContract] {
        self.contracts.get(name).map_or(&[], Vec::as_slice)
    }

    /// `true` if any contract is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    /// All registered contracts, in registration order of their names.
    pub fn iter(&self) -> impl Iterator<Item = &KernelContract> {
        self.contracts.values().flatten()
    }

    /// Number of registered contracts (overloads counted individually).
    pub fn len(&self) -> usize {
        self.contracts.values().map(Vec::len).sum()
    }

    /// `true` if no contract is registered.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
