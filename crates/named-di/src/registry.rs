//! Named-service registry
//!
//! One [`NamedRegistry`] exists per service type, owned by the host
//! container's singleton scope and published through
//! [`ServiceCollection::get_or_add_registry`](crate::ports::ServiceCollection::get_or_add_registry).
//! Storage is a `DashMap`, so registration and lookup interleave safely
//! across threads; insertion is a single atomic insert-if-absent and the
//! first registration for a key is authoritative.
//!
//! Registries are append-only for the process lifetime. There is no
//! unregister operation.

use crate::error::{Error, Result};
use crate::key::{RegistrationKey, ServiceTypeId};
use crate::ports::{ServiceInstance, ServiceProvider, unerase};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use downcast_rs::{DowncastSync, impl_downcast};
use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace};

/// Type-erased view of a [`NamedRegistry`].
///
/// The resolver works with a heterogeneous set of registries (one per
/// service type), so it enumerates them through this trait and defers to
/// the typed registry behind it. `DowncastSync` recovers the typed registry
/// where a caller needs it.
pub trait RegistryHandle: DowncastSync {
    /// The service type this registry stores bindings for.
    fn service_type(&self) -> ServiceTypeId;

    /// Idempotent insert of a `name → implementation` binding.
    fn register_erased(&self, name: &str, implementation: ServiceTypeId);

    /// Resolve a name to an instance through the provider.
    ///
    /// The returned instance carries the `Arc<S>` payload of this registry's
    /// service type.
    fn resolve_erased(&self, name: &str, provider: &dyn ServiceProvider)
    -> Result<ServiceInstance>;
}

impl_downcast!(sync RegistryHandle);

/// Keyed storage of `name → implementation type` bindings for one service
/// type `S`.
pub struct NamedRegistry<S: ?Sized + Send + Sync + 'static> {
    bindings: DashMap<RegistrationKey, ServiceTypeId>,
    _service: PhantomData<fn() -> Arc<S>>,
}

impl<S: ?Sized + Send + Sync + 'static> NamedRegistry<S> {
    /// Create an empty registry for `S`.
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
            _service: PhantomData,
        }
    }

    /// Register an implementation type under a name.
    ///
    /// First registration for a `(name, S)` key wins; later calls for the
    /// same key are silently ignored rather than overwriting.
    pub fn register(&self, name: &str, implementation: ServiceTypeId) {
        let key = RegistrationKey::new(name, TypeId::of::<S>());
        match self.bindings.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(implementation);
                debug!(
                    service = %ServiceTypeId::of::<S>(),
                    name,
                    implementation = %implementation,
                    "registered named service"
                );
            }
            Entry::Occupied(existing) => {
                trace!(
                    service = %ServiceTypeId::of::<S>(),
                    name,
                    kept = %existing.get(),
                    ignored = %implementation,
                    "duplicate named registration ignored"
                );
            }
        }
    }

    /// Resolve the implementation registered under `name`.
    ///
    /// Instantiation is delegated to the provider's default resolution for
    /// the implementation type, so the container's lifetime rules apply.
    pub fn resolve(&self, name: &str, provider: &dyn ServiceProvider) -> Result<Arc<S>> {
        let instance = self.resolve_erased(name, provider)?;
        unerase::<S>(&instance).ok_or_else(|| Error::TypeMismatch {
            expected: std::any::type_name::<S>(),
            context: format!("named service '{name}'"),
        })
    }

    /// The implementation type bound to `name`, if any.
    pub fn implementation_of(&self, name: &str) -> Option<ServiceTypeId> {
        let key = RegistrationKey::new(name, TypeId::of::<S>());
        self.bindings.get(&key).map(|binding| *binding.value())
    }

    /// Whether a binding exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.implementation_of(name).is_some()
    }

    /// All registered names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.bindings
            .iter()
            .map(|binding| binding.key().name().to_string())
            .collect()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<S: ?Sized + Send + Sync + 'static> Default for NamedRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized + Send + Sync + 'static> RegistryHandle for NamedRegistry<S> {
    fn service_type(&self) -> ServiceTypeId {
        ServiceTypeId::of::<S>()
    }

    fn register_erased(&self, name: &str, implementation: ServiceTypeId) {
        self.register(name, implementation);
    }

    fn resolve_erased(
        &self,
        name: &str,
        provider: &dyn ServiceProvider,
    ) -> Result<ServiceInstance> {
        let implementation = self
            .implementation_of(name)
            .ok_or_else(|| Error::unregistered_name(ServiceTypeId::of::<S>(), name))?;
        trace!(
            service = %ServiceTypeId::of::<S>(),
            name,
            implementation = %implementation,
            "resolving named service"
        );
        provider.resolve_erased(implementation)
    }
}
