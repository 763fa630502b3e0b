//! The library of built-in operation contracts.
//!
//! Built-ins are operations whose bodies the code generator emits
//! mechanically, so only their contracts exist. This module defines the
//! shipped set; a compilation unit registers them up front alongside the
//! user kernels extracted from source.
//!
//! Every contract returned here satisfies the access-mode table and the
//! built-in shape rules (kernval-check asserts this).

use crate::arg::{AccessMode, ArgumentDescriptor, DataType};
use crate::contract::{KernelContract, OperatesOn};
use crate::space::SpaceRef;

// Built-ins operate on whichever space their arguments live on; the
// placeholder identifier is shared by every field argument of one built-in
// so the shared-space rule holds symbolically.
const ANY_SPACE: &str = "any_space_1";
const ANY_SPACE_2: &str = "any_space_2";

fn field(data_type: DataType, access: AccessMode, space: &str) -> ArgumentDescriptor {
    ArgumentDescriptor::field(data_type, access, SpaceRef::new(space))
}

fn scalar(data_type: DataType, access: AccessMode) -> ArgumentDescriptor {
    ArgumentDescriptor::scalar(data_type, access)
}

/// The shipped built-in contracts, in a fixed order.
pub fn built_in_library() -> Vec<KernelContract> {
    vec![
        // setval_c: f = c
        contract(
            "setval_c",
            vec![
                field(DataType::Real, AccessMode::Write, ANY_SPACE),
                scalar(DataType::Real, AccessMode::Read),
            ],
        ),
        // x_plus_y: f = x + y
        contract(
            "x_plus_y",
            vec![
                field(DataType::Real, AccessMode::Write, ANY_SPACE),
                field(DataType::Real, AccessMode::Read, ANY_SPACE),
                field(DataType::Real, AccessMode::Read, ANY_SPACE),
            ],
        ),
        // inc_x_plus_y: x = x + y
        contract(
            "inc_x_plus_y",
            vec![
                field(DataType::Real, AccessMode::Increment, ANY_SPACE),
                field(DataType::Real, AccessMode::Read, ANY_SPACE),
            ],
        ),
        // a_times_x: f = a * x
        contract(
            "a_times_x",
            vec![
                field(DataType::Real, AccessMode::Write, ANY_SPACE),
                scalar(DataType::Real, AccessMode::Read),
                field(DataType::Real, AccessMode::Read, ANY_SPACE),
            ],
        ),
        // inner_product: s = sum(x * y) -- pure reduction, no field writer
        contract(
            "inner_product",
            vec![
                scalar(DataType::Real, AccessMode::Sum),
                field(DataType::Real, AccessMode::Read, ANY_SPACE),
                field(DataType::Real, AccessMode::Read, ANY_SPACE),
            ],
        )
        .with_zero_output(),
        // int_to_real: f = real(g) -- cross-space/datatype conversion
        contract(
            "int_to_real",
            vec![
                field(DataType::Real, AccessMode::Write, ANY_SPACE),
                field(DataType::Integer, AccessMode::Read, ANY_SPACE_2),
            ],
        )
        .with_conversion(),
    ]
}

fn contract(name: &str, arguments: Vec<ArgumentDescriptor>) -> KernelContract {
    // Argument lists above are statically non-empty.
    KernelContract {
        name: name.to_owned(),
        arguments,
        operates_on: OperatesOn::DegreeOfFreedom,
        is_built_in: true,
        is_conversion: false,
        is_zero_output: false,
    }
}
