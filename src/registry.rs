//! Registry of interface details, keyed by interface id and interface name.
//!
//! The registry is the cache a proxy consults before every call. The first
//! caller to need an interface derives its [`InterfaceDetails`] and publishes
//! it; every later caller, on any thread, gets the same record back from a
//! single map lookup.
//!
//! Two sharded maps back the registry: the primary store from id to record, and
//! a name index from the interface's full name to its id. A name is only
//! indexed after its record has been published, so a name lookup never finds an
//! id without a record. Registration is first-writer-wins: a second
//! registration of a known id is ignored, and when several callers race to
//! register the same new interface only one record is published.
//!
//! # Example
//!
//! ```
//! use actor_interfaces::{
//!     InterfaceDescriptor, InterfaceId, InterfaceRegistry, MethodBodyTypes, MethodDescriptor,
//!     MethodId, TypeDescriptor,
//! };
//!
//! let registry = InterfaceRegistry::new();
//! let descriptor = InterfaceDescriptor::new(InterfaceId::new(7), TypeDescriptor::named("Foo.IBar"))
//!     .method(
//!         MethodDescriptor::new("Compute", MethodId::new(2))
//!             .params([TypeDescriptor::of::<i32>(), TypeDescriptor::of::<String>()])
//!             .returns(TypeDescriptor::deferred(Some(TypeDescriptor::of::<f64>()))),
//!     );
//! registry.register(&descriptor, MethodBodyTypes::derive(&descriptor));
//!
//! let details = registry.lookup_by_name("Foo.IBar").unwrap();
//! assert_eq!(details.response_known_types, [TypeDescriptor::of::<f64>()]);
//! ```

use std::{fmt, sync::Arc};

use dashmap::{mapref::entry::Entry, DashMap};
use tracing::{debug, trace};

use crate::{
    descriptor::InterfaceDescriptor,
    details::InterfaceDetails,
    id::InterfaceId,
    interface::{linked_interfaces, ActorInterface},
    method_body::MethodBodyTypes,
};

/// The key of a lookup that found nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupKey<'a> {
    /// A lookup by interface id.
    Id(InterfaceId),
    /// A lookup by interface name.
    Name(&'a str),
}

/// Receives events the registry otherwise swallows.
///
/// Duplicate registrations and lookup misses are normal outcomes and never
/// surface as errors. Install an implementation with
/// [`RegistryBuilder::diagnostics`] to observe them. Every method defaults to
/// doing nothing.
///
/// Hooks are called after the registry has released its map shards, so they
/// may call back into the registry.
pub trait RegistryDiagnostics: Send + Sync + 'static {
    /// An interface id was registered again after its record was published.
    fn duplicate_registration(&self, id: InterfaceId, name: &str) {
        let _ = (id, name);
    }

    /// A newly published interface's name was already indexed for another id.
    ///
    /// The name keeps pointing at `existing`.
    fn name_conflict(&self, name: &str, existing: InterfaceId, attempted: InterfaceId) {
        let _ = (name, existing, attempted);
    }

    /// [`InterfaceRegistry::details_for`] resolved `id` to a record whose name
    /// is not the requested interface's.
    fn interface_mismatch(&self, id: InterfaceId, expected: &str, found: &str) {
        let _ = (id, expected, found);
    }

    /// A lookup found no record.
    fn lookup_miss(&self, key: LookupKey<'_>) {
        let _ = key;
    }
}

/// Builds an [`InterfaceRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    capacity: usize,
    diagnostics: Option<Arc<dyn RegistryDiagnostics>>,
}

impl RegistryBuilder {
    /// Reserves room for at least `capacity` interfaces.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Installs a diagnostics hook.
    pub fn diagnostics(mut self, diagnostics: impl RegistryDiagnostics) -> Self {
        self.diagnostics = Some(Arc::new(diagnostics));
        self
    }

    /// Builds the registry.
    pub fn build(self) -> InterfaceRegistry {
        InterfaceRegistry {
            inner: Arc::new(RegistryInner {
                by_id: DashMap::with_capacity(self.capacity),
                by_name: DashMap::with_capacity(self.capacity),
                diagnostics: self.diagnostics,
            }),
        }
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("capacity", &self.capacity)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

/// A concurrent, append-only store of [`InterfaceDetails`].
///
/// Cloning is cheap and yields a handle to the same store. Create one per
/// process (or per client) at startup and hand clones to every proxy.
#[derive(Clone)]
pub struct InterfaceRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    by_id: DashMap<InterfaceId, Arc<InterfaceDetails>>,
    by_name: DashMap<String, InterfaceId>,
    diagnostics: Option<Arc<dyn RegistryDiagnostics>>,
}

impl InterfaceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        RegistryBuilder::default().build()
    }

    /// Creates an empty registry with room for at least `capacity` interfaces.
    pub fn with_capacity(capacity: usize) -> Self {
        RegistryBuilder::default().with_capacity(capacity).build()
    }

    /// Returns a builder for configuring a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Derives the details of `descriptor` and publishes them.
    ///
    /// Returns `true` if this call published the record. Returns `false`,
    /// without replacing anything, if a record for the interface id already
    /// exists or another caller published one first.
    pub fn register(&self, descriptor: &InterfaceDescriptor, body_types: MethodBodyTypes) -> bool {
        if self.contains_id(descriptor.id()) {
            self.report_duplicate(descriptor.id(), descriptor.name());
            return false;
        }

        let details = InterfaceDetails::build(descriptor, body_types);
        self.publish(details).1
    }

    /// Returns the details of `I`, deriving and publishing them on first use.
    ///
    /// Wrapper types come from [`MethodBodyTypes::derive`]. When several callers
    /// race on first use, all of them get the single published record.
    ///
    /// If `I::ID` already belongs to an interface with another name, that
    /// record is returned and the mismatch is reported to the diagnostics hook.
    pub fn details_for<I>(&self) -> Arc<InterfaceDetails>
    where
        I: ActorInterface + ?Sized,
    {
        let details = match self.get(I::ID) {
            Some(details) => details,
            None => {
                let descriptor = I::descriptor();
                let body_types = MethodBodyTypes::derive(&descriptor);
                self.publish(InterfaceDetails::build(&descriptor, body_types)).0
            }
        };
        self.check_interface::<I>(&details);
        details
    }

    /// Registers every interface declared with `#[actor_interface]` in this binary.
    ///
    /// Returns how many interfaces this call published.
    pub fn register_linked(&self) -> usize {
        linked_interfaces()
            .filter(|linked| !self.contains_id(linked.id))
            .map(|linked| {
                let descriptor = (linked.descriptor)();
                let body_types = MethodBodyTypes::derive(&descriptor);
                self.register(&descriptor, body_types)
            })
            .filter(|published| *published)
            .count()
    }

    /// Looks up the details of an interface by id.
    pub fn lookup_by_id(&self, id: InterfaceId) -> Option<Arc<InterfaceDetails>> {
        let details = self.get(id);
        if details.is_none() {
            self.report_miss(LookupKey::Id(id));
        }
        details
    }

    /// Looks up the details of an interface by its full name.
    ///
    /// Unknown names return `None` straight away; records are never scanned.
    pub fn lookup_by_name(&self, name: &str) -> Option<Arc<InterfaceDetails>> {
        let Some(id) = self.inner.by_name.get(name).map(|entry| *entry.value()) else {
            self.report_miss(LookupKey::Name(name));
            return None;
        };
        self.lookup_by_id(id)
    }

    /// Returns `true` if a record exists for `id`.
    pub fn contains_id(&self, id: InterfaceId) -> bool {
        self.inner.by_id.contains_key(&id)
    }

    /// Returns `true` if `name` is indexed.
    pub fn contains_name(&self, name: &str) -> bool {
        self.inner.by_name.contains_key(name)
    }

    /// The number of published records.
    pub fn len(&self) -> usize {
        self.inner.by_id.len()
    }

    /// Returns `true` if nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.inner.by_id.is_empty()
    }

    /// The ids of all published records, in ascending order.
    pub fn ids(&self) -> Vec<InterfaceId> {
        let mut ids: Vec<_> = self.inner.by_id.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// All published records, ordered by id.
    pub fn snapshot(&self) -> Vec<Arc<InterfaceDetails>> {
        let mut records: Vec<_> = self
            .inner
            .by_id
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        records.sort_unstable_by_key(|details| details.id);
        records
    }

    fn get(&self, id: InterfaceId) -> Option<Arc<InterfaceDetails>> {
        self.inner.by_id.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Publishes a completed record under its id, then indexes its name.
    ///
    /// Returns the record stored for the id and whether it is the one passed in.
    fn publish(&self, details: InterfaceDetails) -> (Arc<InterfaceDetails>, bool) {
        let id = details.id;
        let details = Arc::new(details);

        let conflict = match self.inner.by_id.entry(id) {
            Entry::Occupied(entry) => {
                let existing = Arc::clone(entry.get());
                drop(entry);
                self.report_duplicate(id, details.name());
                return (existing, false);
            }
            Entry::Vacant(entry) => {
                // The id shard stays locked until the name is indexed, so whoever
                // observes the id also observes the name.
                let _published = entry.insert(Arc::clone(&details));
                self.index_name(details.name(), id)
            }
        };
        if let Some(existing) = conflict {
            debug!(
                name = details.name(),
                %existing,
                attempted = %id,
                "interface name already indexed for another id"
            );
            if let Some(diagnostics) = &self.inner.diagnostics {
                diagnostics.name_conflict(details.name(), existing, id);
            }
        }

        trace!(
            %id,
            name = details.name(),
            methods = details.method_names.len(),
            request_types = details.request_known_types.len(),
            response_types = details.response_known_types.len(),
            "published interface details"
        );
        (details, true)
    }

    /// Indexes `name` under `id` unless it already points elsewhere.
    ///
    /// Returns the id already holding the name, if any. Locks `by_name` only,
    /// and is only called with a `by_id` shard held, never the reverse.
    fn index_name(&self, name: &str, id: InterfaceId) -> Option<InterfaceId> {
        match self.inner.by_name.entry(name.to_string()) {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(id);
                None
            }
        }
    }

    fn check_interface<I>(&self, details: &InterfaceDetails)
    where
        I: ActorInterface + ?Sized,
    {
        if details.name() == I::NAME {
            return;
        }

        debug!(
            id = %I::ID,
            expected = I::NAME,
            found = details.name(),
            "interface id is held by another interface"
        );
        if let Some(diagnostics) = &self.inner.diagnostics {
            diagnostics.interface_mismatch(I::ID, I::NAME, details.name());
        }
    }

    fn report_duplicate(&self, id: InterfaceId, name: &str) {
        debug!(%id, name, "ignoring duplicate interface registration");
        if let Some(diagnostics) = &self.inner.diagnostics {
            diagnostics.duplicate_registration(id, name);
        }
    }

    fn report_miss(&self, key: LookupKey<'_>) {
        trace!(?key, "interface lookup miss");
        if let Some(diagnostics) = &self.inner.diagnostics {
            diagnostics.lookup_miss(key);
        }
    }
}

impl Default for InterfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InterfaceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceRegistry")
            .field("interfaces", &self.inner.by_id.len())
            .field("names", &self.inner.by_name.len())
            .field("diagnostics", &self.inner.diagnostics.is_some())
            .finish()
    }
}
