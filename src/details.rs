//! The per-interface record served to proxies.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    classify::classify,
    descriptor::{InterfaceDescriptor, TypeDescriptor},
    id::{InterfaceId, MethodId},
    method_body::MethodBodyTypes,
};

/// Everything a proxy needs to marshal calls to one actor interface.
///
/// Records are built once per interface by [`InterfaceDetails::build`] and never
/// change afterwards. The registry hands them out behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDetails {
    /// The interface id.
    pub id: InterfaceId,
    /// The interface type.
    pub interface_type: TypeDescriptor,
    /// Method name to method id.
    pub method_names: HashMap<String, MethodId>,
    /// Distinct parameter types across all methods, in first-occurrence order.
    pub request_known_types: Vec<TypeDescriptor>,
    /// Distinct deferred payload types across all methods, in first-occurrence order.
    pub response_known_types: Vec<TypeDescriptor>,
    /// Request body wrapper types, as supplied.
    pub request_wrapped_known_types: Vec<TypeDescriptor>,
    /// Response body wrapper types, as supplied.
    pub response_wrapped_known_types: Vec<TypeDescriptor>,
}

impl InterfaceDetails {
    /// Derives the record for `descriptor`.
    ///
    /// Parameter types become the request known types and deferred payloads the
    /// response known types, each deduplicated by type identity in declaration
    /// order. Method names are assumed unique; if they are not, the last method
    /// with a name wins.
    pub fn build(descriptor: &InterfaceDescriptor, body_types: MethodBodyTypes) -> Self {
        let methods = descriptor.methods();

        let request_known_types = methods
            .iter()
            .flat_map(|method| method.parameters())
            .unique()
            .cloned()
            .collect();
        let response_known_types = methods
            .iter()
            .filter_map(|method| classify(method.return_type()).payload())
            .unique()
            .cloned()
            .collect();
        let method_names = methods
            .iter()
            .map(|method| (method.name().to_string(), method.id()))
            .collect();
        let (request_wrapped_known_types, response_wrapped_known_types) = body_types.into_parts();

        InterfaceDetails {
            id: descriptor.id(),
            interface_type: descriptor.interface_type().clone(),
            method_names,
            request_known_types,
            response_known_types,
            request_wrapped_known_types,
            response_wrapped_known_types,
        }
    }

    /// The interface's full name.
    pub fn name(&self) -> &str {
        self.interface_type.full_name()
    }

    /// Looks up a method id by method name.
    pub fn method_id(&self, method_name: &str) -> Option<MethodId> {
        self.method_names.get(method_name).copied()
    }
}
