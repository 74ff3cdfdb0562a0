//! Classification of method return types.
//!
//! A method either returns a deferred result (a future-like wrapper) or a plain
//! value. Only deferred results carry payloads onto the wire as responses, so
//! the registry asks this module which payload, if any, a return type carries.

use crate::descriptor::TypeDescriptor;

/// Base name of the deferred wrapper built by [`TypeDescriptor::deferred`].
pub const DEFERRED: &str = "Deferred";

/// Base names, last path segment only, recognised as deferred result wrappers.
pub const DEFERRED_WRAPPERS: &[&str] = &[
    DEFERRED,
    "Future",
    "BoxFuture",
    "LocalBoxFuture",
    "JoinHandle",
];

/// The shape of a method's return type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnKind<'a> {
    /// A deferred result carrying a payload.
    AsyncWithValue(&'a TypeDescriptor),
    /// A deferred result completing without a payload.
    AsyncVoid,
    /// Anything that is not a deferred result.
    Other,
}

impl<'a> ReturnKind<'a> {
    /// The payload carried by an [`AsyncWithValue`](ReturnKind::AsyncWithValue) return.
    pub fn payload(&self) -> Option<&'a TypeDescriptor> {
        match *self {
            ReturnKind::AsyncWithValue(payload) => Some(payload),
            ReturnKind::AsyncVoid | ReturnKind::Other => None,
        }
    }

    /// Returns `true` for both deferred variants.
    pub fn is_async(&self) -> bool {
        !matches!(self, ReturnKind::Other)
    }
}

/// Returns `true` if `ty` names a deferred result wrapper, whatever its arguments.
pub fn is_deferred_wrapper(ty: &TypeDescriptor) -> bool {
    let base = ty.name().rsplit("::").next().unwrap_or_default();
    DEFERRED_WRAPPERS.contains(&base)
}

/// Classifies a return type.
///
/// A deferred wrapper with no argument, or with `()` as its only argument,
/// completes without a payload. A wrapper with a single other argument carries
/// that argument. Wrappers with more arguments, and every other type, are
/// [`ReturnKind::Other`].
pub fn classify(return_type: &TypeDescriptor) -> ReturnKind<'_> {
    if !is_deferred_wrapper(return_type) {
        return ReturnKind::Other;
    }

    match return_type.args() {
        [] => ReturnKind::AsyncVoid,
        [payload] if payload.is_unit() => ReturnKind::AsyncVoid,
        [payload] => ReturnKind::AsyncWithValue(payload),
        _ => ReturnKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_with_payload() {
        let ret = TypeDescriptor::deferred(Some(TypeDescriptor::of::<f64>()));
        assert_eq!(classify(&ret), ReturnKind::AsyncWithValue(&TypeDescriptor::of::<f64>()));
        assert_eq!(classify(&ret).payload(), Some(&TypeDescriptor::of::<f64>()));
    }

    #[test]
    fn deferred_without_payload() {
        assert_eq!(classify(&TypeDescriptor::deferred(None)), ReturnKind::AsyncVoid);
        assert_eq!(
            classify(&TypeDescriptor::deferred(Some(TypeDescriptor::unit()))),
            ReturnKind::AsyncVoid
        );
    }

    #[test]
    fn plain_values_are_other() {
        assert_eq!(classify(&TypeDescriptor::of::<u32>()), ReturnKind::Other);
        assert_eq!(classify(&TypeDescriptor::unit()), ReturnKind::Other);
        let vec = TypeDescriptor::generic("Vec", [TypeDescriptor::of::<u8>()]);
        assert_eq!(classify(&vec), ReturnKind::Other);
        assert!(!classify(&vec).is_async());
    }

    #[test]
    fn wrappers_match_on_last_path_segment() {
        let boxed = TypeDescriptor::generic(
            "futures::future::BoxFuture",
            [TypeDescriptor::of::<String>()],
        );
        assert_eq!(classify(&boxed), ReturnKind::AsyncWithValue(&TypeDescriptor::of::<String>()));

        let handle = TypeDescriptor::named("tokio::task::JoinHandle");
        assert_eq!(classify(&handle), ReturnKind::AsyncVoid);

        let lookalike = TypeDescriptor::named("my::DeferredQueue");
        assert_eq!(classify(&lookalike), ReturnKind::Other);
    }

    #[test]
    fn wrappers_with_several_arguments_are_other() {
        let odd = TypeDescriptor::generic(
            DEFERRED,
            [TypeDescriptor::of::<u8>(), TypeDescriptor::of::<u16>()],
        );
        assert_eq!(classify(&odd), ReturnKind::Other);
    }
}
