//! Host container capability traits
//!
//! The named-service core never depends on a concrete container. It consults
//! the host through two narrow capabilities:
//!
//! - [`ServiceProvider`] — resolution time: resolve a type id to an instance
//!   and locate named registries.
//! - [`ServiceCollection`] — configuration time: register factories and
//!   publish registry singletons.
//!
//! ## Instance currency
//!
//! ```text
//! Arc<S>  ──erase──▶  ServiceInstance (Arc<dyn Any + Send + Sync>)
//!                          │
//!                          ▼
//!                     unerase::<S>()  ──▶  Arc<S>
//! ```
//!
//! Every registered factory produces a [`ServiceInstance`] whose payload is
//! the `Arc<S>` of the registered service type `S`. The convention holds for
//! sized types and trait objects alike, which is what lets the resolver move
//! arguments around without knowing their types.

use crate::error::Result;
use crate::key::ServiceTypeId;
use crate::registry::RegistryHandle;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Type-erased shared service instance.
pub type ServiceInstance = Arc<dyn Any + Send + Sync>;

/// Factory callback registered with the host container.
pub type ServiceFactory =
    Arc<dyn Fn(&dyn ServiceProvider) -> Result<ServiceInstance> + Send + Sync>;

/// Lifetime the host container should apply to a registration.
///
/// Passed through verbatim; this crate never manages lifetimes itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifetime {
    /// One instance for the container's lifetime
    Singleton,
    /// One instance per container scope
    Scoped,
    /// A fresh instance per resolution
    Transient,
}

/// Erase an `Arc<S>` into the [`ServiceInstance`] currency.
pub fn erase<S: ?Sized + Send + Sync + 'static>(value: Arc<S>) -> ServiceInstance {
    Arc::new(value)
}

/// Recover an `Arc<S>` from a [`ServiceInstance`].
///
/// Returns `None` when the payload was erased from a different service type.
pub fn unerase<S: ?Sized + Send + Sync + 'static>(instance: &ServiceInstance) -> Option<Arc<S>> {
    Arc::clone(instance)
        .downcast::<Arc<S>>()
        .ok()
        .map(|payload| Arc::clone(&*payload))
}

/// Resolution-time capabilities of the host container.
pub trait ServiceProvider: Send + Sync {
    /// Resolve a type id to an instance using the container's default
    /// resolution path, honoring the registered lifetime.
    fn resolve_erased(&self, service: ServiceTypeId) -> Result<ServiceInstance>;

    /// Locate the named registry published for a service type, if any.
    fn registry_for(&self, service: TypeId) -> Option<Arc<dyn RegistryHandle>>;
}

/// Configuration-time capabilities of the host container.
pub trait ServiceCollection: Send + Sync {
    /// Register a factory for a type id with the given lifetime.
    ///
    /// A later registration for the same type id replaces the earlier one for
    /// default resolution (last registration wins), matching the host
    /// container contract this crate layers on.
    fn add_factory(&self, service: ServiceTypeId, lifetime: Lifetime, factory: ServiceFactory);

    /// Return the registry published for a service type, creating and
    /// publishing it through `create` if absent.
    ///
    /// Must be atomic: under concurrent configuration exactly one registry
    /// instance is ever published per service type.
    fn get_or_add_registry(
        &self,
        service: TypeId,
        create: &dyn Fn() -> Arc<dyn RegistryHandle>,
    ) -> Arc<dyn RegistryHandle>;
}
