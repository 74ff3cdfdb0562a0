//! Numeric identities of interfaces and methods.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::type_hash::TypeHash;

/// The numeric identity of an actor interface.
///
/// Ids are assigned by whoever describes the interface, never by the registry.
/// The `#[actor_interface]` macro defaults to [`InterfaceId::from_name`] so that
/// independently built clients and services agree without a shared table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceId(u32);

impl InterfaceId {
    /// Creates an interface id from a raw value.
    pub const fn new(id: u32) -> Self {
        InterfaceId(id)
    }

    /// Derives an interface id from the interface's full name.
    ///
    /// The id is the lower 32 bits of the FNV-1a hash of `name`.
    pub const fn from_name(name: &str) -> Self {
        InterfaceId(TypeHash::from_name(name).as_u32())
    }

    /// Returns the raw value.
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for InterfaceId {
    fn from(id: u32) -> Self {
        InterfaceId(id)
    }
}

impl fmt::Debug for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InterfaceId({})", self.0)
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The numeric identity of a method, unique within its interface.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(u32);

impl MethodId {
    /// Creates a method id from a raw value.
    pub const fn new(id: u32) -> Self {
        MethodId(id)
    }

    /// Derives a method id from the method's name.
    pub const fn from_name(name: &str) -> Self {
        MethodId(TypeHash::from_name(name).as_u32())
    }

    /// Returns the raw value.
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for MethodId {
    fn from(id: u32) -> Self {
        MethodId(id)
    }
}

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodId({})", self.0)
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_derived_ids_are_stable() {
        const ID: InterfaceId = InterfaceId::from_name("Foo.IBar");
        assert_eq!(ID, InterfaceId::from_name("Foo.IBar"));
        assert_ne!(ID, InterfaceId::from_name("Foo.IBaz"));
        assert_eq!(ID.get(), TypeHash::from_name("Foo.IBar").as_u32());
    }

    #[test]
    fn method_and_interface_ids_share_the_scheme() {
        assert_eq!(
            MethodId::from_name("compute").get(),
            InterfaceId::from_name("compute").get()
        );
    }
}
