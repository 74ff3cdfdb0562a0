//! Interfaces declared with `#[actor_interface]`.

#![deny(async_fn_in_trait)]

use std::future::Future;

use actor_interfaces::{
    actor_interface, interface::linked_interfaces, ActorInterface, InterfaceId, InterfaceRegistry,
    MethodId, TypeDescriptor,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[actor_interface(id = 7, name = "Foo.IBar")]
pub trait Bar {
    #[method(id = 1)]
    async fn r#do(&self, value: i32);

    #[method(id = 2)]
    fn compute(&self, value: i32, label: String) -> impl Future<Output = f64> + Send;
}

#[actor_interface]
pub trait Inventory {
    async fn add_item(&mut self, sku: String, count: u32) -> u32;
    async fn remove_item(&mut self, sku: String) -> Option<u32>;
    async fn clear(&mut self);
    fn capacity(&self) -> usize;
}

#[test]
fn explicit_ids_and_name() {
    assert_eq!(BarInterface::ID, InterfaceId::new(7));
    assert_eq!(BarInterface::NAME, "Foo.IBar");

    let descriptor = BarInterface::descriptor();
    assert_eq!(descriptor.id(), InterfaceId::new(7));
    assert_eq!(descriptor.name(), "Foo.IBar");
    let methods: Vec<_> = descriptor
        .methods()
        .iter()
        .map(|method| (method.name(), method.id()))
        .collect();
    assert_eq!(methods, [("do", MethodId::new(1)), ("compute", MethodId::new(2))]);
    assert_eq!(
        descriptor.methods()[1].return_type(),
        &TypeDescriptor::deferred(Some(TypeDescriptor::of::<f64>()))
    );
}

#[test]
fn details_match_the_hand_written_scenario() {
    init_tracing();
    let registry = InterfaceRegistry::new();
    let details = registry.details_for::<BarInterface>();

    assert_eq!(
        details.request_known_types,
        [TypeDescriptor::of::<i32>(), TypeDescriptor::of::<String>()]
    );
    assert_eq!(details.response_known_types, [TypeDescriptor::of::<f64>()]);
    assert_eq!(details.method_id("do"), Some(MethodId::new(1)));
    assert_eq!(details.method_id("compute"), Some(MethodId::new(2)));

    let again = registry.details_for::<BarInterface>();
    assert!(std::sync::Arc::ptr_eq(&details, &again));
    assert!(registry.lookup_by_name("Foo.IBar").is_some());
}

#[test]
fn default_ids_derive_from_names() {
    assert_eq!(InventoryInterface::NAME, concat!(module_path!(), "::Inventory"));
    assert_eq!(
        InventoryInterface::ID,
        InterfaceId::from_name(InventoryInterface::NAME)
    );

    let descriptor = InventoryInterface::descriptor();
    assert_eq!(descriptor.validate(), Ok(()));
    for method in descriptor.methods() {
        assert_eq!(method.id(), MethodId::from_name(method.name()));
    }
}

#[test]
fn return_shapes_are_classified() {
    init_tracing();
    let registry = InterfaceRegistry::new();
    let details = registry.details_for::<InventoryInterface>();

    assert_eq!(
        details.request_known_types,
        [TypeDescriptor::of::<String>(), TypeDescriptor::of::<u32>()]
    );
    // `clear` completes without a payload and `capacity` is not deferred.
    assert_eq!(
        details.response_known_types,
        [TypeDescriptor::of::<u32>(), TypeDescriptor::of::<Option<u32>>()]
    );
    assert_eq!(details.request_wrapped_known_types.len(), 2);
    assert_eq!(details.response_wrapped_known_types.len(), 2);
}

#[test]
fn linked_interfaces_are_preloaded() {
    init_tracing();
    let linked: Vec<_> = linked_interfaces().map(|linked| linked.id).collect();
    assert!(linked.contains(&BarInterface::ID));
    assert!(linked.contains(&InventoryInterface::ID));

    let registry = InterfaceRegistry::new();
    assert_eq!(registry.register_linked(), linked.len());
    assert_eq!(registry.register_linked(), 0);

    assert!(registry.lookup_by_id(BarInterface::ID).is_some());
    assert!(registry.lookup_by_name(InventoryInterface::NAME).is_some());
}
