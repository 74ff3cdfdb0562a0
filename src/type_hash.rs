//! Stable hashing of type and interface names.
//!
//! Type descriptors and name-derived ids are keyed by a 64 bit FNV-1a hash of a
//! fully qualified name. The hash is const-friendly so ids can be computed in
//! const contexts, such as the items generated by `#[actor_interface]`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A hash that identifies a type by its fully qualified name.
///
/// Two descriptors with the same rendered name always produce the same hash,
/// across processes and builds. The hash alone is not treated as proof of
/// identity; descriptors compare their names after the hashes match.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Create a new type hash from a raw u64 value.
    pub const fn new(hash: u64) -> Self {
        TypeHash(hash)
    }

    /// Create a type hash from a byte string using FNV-1a.
    pub const fn from_bytes(bytes: &[u8]) -> Self {
        TypeHash(compute_hash_fnv1a(bytes))
    }

    /// Create a type hash from a name.
    pub const fn from_name(name: &str) -> Self {
        TypeHash::from_bytes(name.as_bytes())
    }

    /// Create a type hash from a Rust type's [`std::any::type_name`].
    ///
    /// # Example
    /// ```
    /// use actor_interfaces::type_hash::TypeHash;
    ///
    /// assert_eq!(
    ///     TypeHash::from_type::<String>(),
    ///     TypeHash::from_name(std::any::type_name::<String>()),
    /// );
    /// ```
    pub fn from_type<T: ?Sized + 'static>() -> Self {
        TypeHash::from_name(std::any::type_name::<T>())
    }

    /// The lower 32 bits of the hash, used for compact wire ids.
    pub const fn as_u32(&self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:016x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.as_u32())
    }
}

/// Compute the FNV-1a hash of bytes (const-friendly).
pub const fn compute_hash_fnv1a(bytes: &[u8]) -> u64 {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;

    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_hash_basic() {
        const HASH1: TypeHash = TypeHash::from_name("Foo.IBar");
        const HASH2: TypeHash = TypeHash::from_name("Foo.IBar");
        const HASH3: TypeHash = TypeHash::from_name("Foo.IBaz");

        assert_eq!(HASH1, HASH2);
        assert_ne!(HASH1, HASH3);
    }

    #[test]
    fn test_known_fnv_vectors() {
        assert_eq!(compute_hash_fnv1a(b""), 0xcbf29ce484222325);
        assert_eq!(compute_hash_fnv1a(b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn test_from_type_matches_type_name() {
        assert_eq!(
            TypeHash::from_type::<Vec<u8>>(),
            TypeHash::from_name(std::any::type_name::<Vec<u8>>())
        );
        assert_ne!(TypeHash::from_type::<u32>(), TypeHash::from_type::<i32>());
    }

    #[test]
    fn test_hash_distribution() {
        let hashes = [
            TypeHash::from_bytes(b"Actor1"),
            TypeHash::from_bytes(b"Actor2"),
            TypeHash::from_bytes(b"Actor3"),
            TypeHash::from_bytes(b"1Actor"),
            TypeHash::from_bytes(b"2Actor"),
            TypeHash::from_bytes(b"3Actor"),
        ];

        for i in 0..hashes.len() {
            for j in i + 1..hashes.len() {
                assert_ne!(
                    hashes[i], hashes[j],
                    "Hash collision between index {} and {}",
                    i, j
                );
            }
        }
    }
}
