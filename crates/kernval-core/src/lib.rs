pub mod arg;
pub mod contract;
pub mod error;
pub mod invocation;
pub mod library;
pub mod space;

// Re-export commonly used types
pub use arg::{AccessMode, ArgumentDescriptor, ArgumentKind, DataType};
pub use contract::{ContractRegistry, KernelContract, OperatesOn};
pub use error::CoreError;
pub use invocation::InvocationArgument;
pub use library::built_in_library;
pub use space::SpaceRef;
