mod actor_interface;

use actor_interface::{ActorInterface, ActorInterfaceAttrs};
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::{parse_macro_input, ItemTrait};

/// Attribute macro declaring a trait as an actor interface.
///
/// The trait is emitted unchanged, alongside a unit struct named
/// `<Trait>Interface` implementing `actor_interfaces::ActorInterface`. The
/// interface is also recorded for `InterfaceRegistry::register_linked`.
///
/// Each trait method becomes a method descriptor, in declaration order:
///  - parameters after the receiver become parameter types,
///  - `async fn` and `-> impl Future<Output = T>` become deferred returns,
///  - any other return type is recorded as-is.
///
/// Attributes:
///  - `#[actor_interface(name = "...")]` overrides the interface name
///    (default `module_path::Trait`).
///  - `#[actor_interface(id = N)]` overrides the interface id
///    (default derived from the name).
///  - `#[method(id = N)]` on a method overrides its id
///    (default derived from the method name).
///
/// Two methods resolving to the same id is a compile error.
///
/// # Example
///
/// ```ignore
/// use actor_interfaces::actor_interface;
///
/// #[actor_interface(id = 7, name = "Foo.IBar")]
/// pub trait Bar {
///     #[method(id = 1)]
///     async fn r#do(&self, value: i32);
///
///     #[method(id = 2)]
///     fn compute(&self, value: i32, label: String) -> impl Future<Output = f64> + Send;
/// }
///
/// let details = registry.details_for::<BarInterface>();
/// ```
#[proc_macro_attribute]
pub fn actor_interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = parse_macro_input!(attr as ActorInterfaceAttrs);
    let item_trait = parse_macro_input!(item as ItemTrait);
    match ActorInterface::new(attrs, item_trait) {
        Ok(actor_interface) => TokenStream::from(actor_interface.into_token_stream()),
        Err(err) => TokenStream::from(err.into_compile_error()),
    }
}
