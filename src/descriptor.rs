//! Static descriptions of types, methods and actor interfaces.
//!
//! Descriptors are the data contract between whoever declares an interface
//! (by hand, or through `#[actor_interface]`) and the [`InterfaceRegistry`].
//! They are declared once at registration time; nothing here inspects types at
//! runtime beyond reading [`std::any::type_name`].
//!
//! [`InterfaceRegistry`]: crate::registry::InterfaceRegistry

use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    classify::DEFERRED,
    error::DescriptorError,
    id::{InterfaceId, MethodId},
    type_hash::TypeHash,
};

/// Describes a type by its fully qualified name and generic arguments.
///
/// Identity is the rendered full name (`Name` or `Name<A, B>`): two descriptors
/// are equal when their full names are equal, regardless of how they were
/// built. The FNV-1a hash of the full name is cached so set membership checks
/// and map lookups rarely touch the string.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "TypeDescriptorParts", into = "TypeDescriptorParts")]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    args: Vec<TypeDescriptor>,
    full_name: Cow<'static, str>,
    hash: TypeHash,
}

impl TypeDescriptor {
    /// Describes a Rust type using [`std::any::type_name`].
    ///
    /// The type is treated as opaque: generic arguments stay part of the name
    /// and are not split out. Use [`TypeDescriptor::generic`] for wrappers the
    /// classifier needs to look into.
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeDescriptor::named(std::any::type_name::<T>())
    }

    /// Describes a non-generic type by name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        let hash = TypeHash::from_name(&name);
        TypeDescriptor {
            full_name: name.clone(),
            name,
            args: Vec::new(),
            hash,
        }
    }

    /// Describes a generic type applied to `args`.
    ///
    /// With no arguments this is the same as [`TypeDescriptor::named`].
    pub fn generic(
        name: impl Into<Cow<'static, str>>,
        args: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        let name = name.into();
        let args: Vec<_> = args.into_iter().collect();
        if args.is_empty() {
            return TypeDescriptor::named(name);
        }

        let full_name = format!(
            "{name}<{}>",
            args.iter().map(TypeDescriptor::full_name).join(", ")
        );
        TypeDescriptor {
            hash: TypeHash::from_name(&full_name),
            full_name: Cow::Owned(full_name),
            name,
            args,
        }
    }

    /// The unit type `()`.
    pub fn unit() -> Self {
        TypeDescriptor::of::<()>()
    }

    /// A deferred result, optionally carrying a payload.
    ///
    /// `deferred(None)` describes a computation that completes without a value.
    pub fn deferred(payload: Option<TypeDescriptor>) -> Self {
        TypeDescriptor::generic(DEFERRED, payload)
    }

    /// The base name, without generic arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The generic arguments, in declaration order.
    pub fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    /// The rendered full name, including generic arguments.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The hash of the full name.
    pub fn hash(&self) -> TypeHash {
        self.hash
    }

    /// Returns `true` if this describes the unit type.
    pub fn is_unit(&self) -> bool {
        self.args.is_empty() && self.name == "()"
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.full_name == other.full_name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.full_name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct TypeDescriptorParts {
    name: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<TypeDescriptor>,
}

impl From<TypeDescriptorParts> for TypeDescriptor {
    fn from(parts: TypeDescriptorParts) -> Self {
        TypeDescriptor::generic(parts.name, parts.args)
    }
}

impl From<TypeDescriptor> for TypeDescriptorParts {
    fn from(ty: TypeDescriptor) -> Self {
        TypeDescriptorParts {
            name: ty.name,
            args: ty.args,
        }
    }
}

/// Describes one method of an actor interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    name: Cow<'static, str>,
    id: MethodId,
    return_type: TypeDescriptor,
    parameters: Vec<TypeDescriptor>,
}

impl MethodDescriptor {
    /// Creates a method taking no parameters and returning `()`.
    pub fn new(name: impl Into<Cow<'static, str>>, id: MethodId) -> Self {
        MethodDescriptor {
            name: name.into(),
            id,
            return_type: TypeDescriptor::unit(),
            parameters: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn param(mut self, ty: TypeDescriptor) -> Self {
        self.parameters.push(ty);
        self
    }

    /// Appends several parameters, in order.
    pub fn params(mut self, tys: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.parameters.extend(tys);
        self
    }

    /// Sets the declared return type.
    pub fn returns(mut self, ty: TypeDescriptor) -> Self {
        self.return_type = ty;
        self
    }

    /// The method name, unique within its interface.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method id, unique within its interface.
    pub fn id(&self) -> MethodId {
        self.id
    }

    /// The declared return type.
    pub fn return_type(&self) -> &TypeDescriptor {
        &self.return_type
    }

    /// The parameter types in declaration order, excluding the receiver.
    pub fn parameters(&self) -> &[TypeDescriptor] {
        &self.parameters
    }
}

/// Describes an actor interface: its identity and its ordered methods.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    id: InterfaceId,
    interface_type: TypeDescriptor,
    methods: Vec<MethodDescriptor>,
}

impl InterfaceDescriptor {
    /// Creates an interface with no methods.
    pub fn new(id: InterfaceId, interface_type: TypeDescriptor) -> Self {
        InterfaceDescriptor {
            id,
            interface_type,
            methods: Vec::new(),
        }
    }

    /// Appends a method.
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// The interface id.
    pub fn id(&self) -> InterfaceId {
        self.id
    }

    /// The interface type.
    pub fn interface_type(&self) -> &TypeDescriptor {
        &self.interface_type
    }

    /// The interface's full name, used as the registry's name key.
    pub fn name(&self) -> &str {
        self.interface_type.full_name()
    }

    /// The methods in declaration order.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Checks that method names and method ids are unique.
    ///
    /// The registry does not call this; it trusts its descriptor source.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if let Some(method) = self.methods.iter().map(MethodDescriptor::name).duplicates().next() {
            return Err(DescriptorError::DuplicateMethodName {
                interface: self.name().to_string(),
                method: method.to_string(),
            });
        }

        if let Some(second) = self.methods.iter().duplicates_by(|method| method.id).next() {
            let first = self
                .methods
                .iter()
                .find(|method| method.id == second.id)
                .map(|method| method.name.to_string())
                .unwrap_or_default();
            return Err(DescriptorError::DuplicateMethodId {
                interface: self.name().to_string(),
                id: second.id,
                first,
                second: second.name.to_string(),
            });
        }

        Ok(())
    }
}
