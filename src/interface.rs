//! Declared actor interfaces.
//!
//! An [`ActorInterface`] is usually implemented by `#[actor_interface]`, which
//! also records the interface in a link-time list so a registry can preload
//! every interface compiled into the binary with
//! [`InterfaceRegistry::register_linked`].
//!
//! [`InterfaceRegistry::register_linked`]: crate::registry::InterfaceRegistry::register_linked

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::{descriptor::InterfaceDescriptor, id::InterfaceId};

/// A statically declared actor interface.
pub trait ActorInterface {
    /// The interface id.
    const ID: InterfaceId;
    /// The interface's full name, matching the descriptor's interface type.
    const NAME: &'static str;

    /// Describes the interface's methods.
    fn descriptor() -> InterfaceDescriptor;
}

#[doc(hidden)]
pub mod _internal {
    pub use linkme;

    use crate::{descriptor::InterfaceDescriptor, id::InterfaceId};

    #[linkme::distributed_slice]
    pub static ACTOR_INTERFACES: [LinkedInterface];

    /// An interface recorded at link time.
    #[derive(Clone, Copy, Debug)]
    pub struct LinkedInterface {
        pub id: InterfaceId,
        pub name: &'static str,
        pub descriptor: fn() -> InterfaceDescriptor,
    }
}

use _internal::{LinkedInterface, ACTOR_INTERFACES};

static LINKED_INTERFACES: Lazy<BTreeMap<InterfaceId, LinkedInterface>> = Lazy::new(|| {
    let mut linked: BTreeMap<InterfaceId, LinkedInterface> = BTreeMap::new();
    for interface in ACTOR_INTERFACES {
        if let Some(existing) = linked.get(&interface.id) {
            tracing::warn!(
                id = %interface.id,
                kept = existing.name,
                ignored = interface.name,
                "duplicate actor interface id linked into binary"
            );
            continue;
        }
        linked.insert(interface.id, *interface);
    }
    linked
});

/// Interfaces recorded by `#[actor_interface]`, ordered by id.
///
/// When two linked interfaces share an id the first one seen is kept and the
/// other is dropped with a warning.
pub fn linked_interfaces() -> impl Iterator<Item = &'static LinkedInterface> {
    LINKED_INTERFACES.values()
}
