//! Error types for interface descriptors.
//!
//! The registry itself never fails: misses are `None` and duplicate
//! registrations are ignored. The only errors in this crate describe malformed
//! descriptors, reported by [`InterfaceDescriptor::validate`] for descriptor
//! sources that want to check themselves before registering.
//!
//! [`InterfaceDescriptor::validate`]: crate::descriptor::InterfaceDescriptor::validate

use std::{error, fmt};

use crate::id::MethodId;

/// A malformed interface descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DescriptorError {
    /// Two methods share a name.
    DuplicateMethodName {
        /// The interface's full name.
        interface: String,
        /// The repeated method name.
        method: String,
    },
    /// Two methods share an id.
    DuplicateMethodId {
        /// The interface's full name.
        interface: String,
        /// The repeated id.
        id: MethodId,
        /// The first method declared with the id.
        first: String,
        /// The later method declared with the id.
        second: String,
    },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorError::DuplicateMethodName { interface, method } => {
                write!(f, "interface '{interface}' declares method '{method}' more than once")
            }
            DescriptorError::DuplicateMethodId {
                interface,
                id,
                first,
                second,
            } => write!(
                f,
                "interface '{interface}' assigns method id {id} to both '{first}' and '{second}'"
            ),
        }
    }
}

impl error::Error for DescriptorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_interface_and_methods() {
        let err = DescriptorError::DuplicateMethodId {
            interface: "Foo.IBar".to_string(),
            id: MethodId::new(2),
            first: "Do".to_string(),
            second: "Compute".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "interface 'Foo.IBar' assigns method id 2 to both 'Do' and 'Compute'"
        );
    }
}
