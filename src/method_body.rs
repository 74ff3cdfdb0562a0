//! Wrapper types boxing method arguments and responses for the wire.
//!
//! A proxy sends every call as one serializable body: the arguments of a method
//! are packed into a request body type and its payload comes back in a response
//! body type. The registry does not compute these itself; it stores whatever
//! [`MethodBodyTypes`] it is handed. [`MethodBodyTypes::derive`] provides the
//! default naming used by [`InterfaceRegistry::details_for`].
//!
//! [`InterfaceRegistry::details_for`]: crate::registry::InterfaceRegistry::details_for

use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};

use crate::{
    classify::classify,
    descriptor::{InterfaceDescriptor, TypeDescriptor},
};

/// The request and response body wrapper types of one interface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBodyTypes {
    request_body_types: Vec<TypeDescriptor>,
    response_body_types: Vec<TypeDescriptor>,
}

impl MethodBodyTypes {
    /// Wraps wrapper types computed elsewhere.
    pub fn new(
        request_body_types: impl IntoIterator<Item = TypeDescriptor>,
        response_body_types: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        MethodBodyTypes {
            request_body_types: request_body_types.into_iter().collect(),
            response_body_types: response_body_types.into_iter().collect(),
        }
    }

    /// Names one wrapper per method of `descriptor`.
    ///
    /// Methods taking parameters get `<Interface>::<Method>RequestBody`, and
    /// methods returning a deferred payload get `<Interface>::<Method>ResponseBody`.
    /// Methods without either contribute nothing.
    pub fn derive(descriptor: &InterfaceDescriptor) -> Self {
        let interface = descriptor.name();
        let mut body_types = MethodBodyTypes::default();
        for method in descriptor.methods() {
            let method_name = method.name().to_upper_camel_case();
            if !method.parameters().is_empty() {
                body_types.request_body_types.push(TypeDescriptor::named(format!(
                    "{interface}::{method_name}RequestBody"
                )));
            }
            if classify(method.return_type()).payload().is_some() {
                body_types.response_body_types.push(TypeDescriptor::named(format!(
                    "{interface}::{method_name}ResponseBody"
                )));
            }
        }

        body_types
    }

    /// The request body wrapper types.
    pub fn request_body_types(&self) -> &[TypeDescriptor] {
        &self.request_body_types
    }

    /// The response body wrapper types.
    pub fn response_body_types(&self) -> &[TypeDescriptor] {
        &self.response_body_types
    }

    pub(crate) fn into_parts(self) -> (Vec<TypeDescriptor>, Vec<TypeDescriptor>) {
        (self.request_body_types, self.response_body_types)
    }
}
