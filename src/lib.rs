#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![deny(unused_must_use)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod classify;
pub mod descriptor;
pub mod details;
pub mod error;
pub mod id;
pub mod interface;
pub mod method_body;
pub mod registry;
pub mod type_hash;

pub use classify::{classify, ReturnKind};
pub use descriptor::{InterfaceDescriptor, MethodDescriptor, TypeDescriptor};
pub use details::InterfaceDetails;
pub use error::DescriptorError;
pub use id::{InterfaceId, MethodId};
pub use interface::ActorInterface;
pub use method_body::MethodBodyTypes;
pub use registry::{InterfaceRegistry, LookupKey, RegistryBuilder, RegistryDiagnostics};

#[cfg(feature = "macros")]
pub use actor_interfaces_macros::actor_interface;
