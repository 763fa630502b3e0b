//! Function/iteration space identifiers.
//!
//! A [`SpaceRef`] names the space of degrees of freedom a field argument is
//! defined over. Equality is identifier equality and nothing else: the
//! "any space" placeholders (`any_space_1`, `any_space_2`, ...) are ordinary,
//! mutually distinct identifiers, never wildcards. Two arguments share a
//! space only if their identifiers compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a function/iteration space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceRef(String);

impl SpaceRef {
    /// Creates a space reference from an identifier.
    pub fn new(name: impl Into<String>) -> Self {
        SpaceRef(name.into())
    }

    /// The underlying identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SpaceRef {
    fn from(name: &str) -> Self {
        SpaceRef(name.to_owned())
    }
}
