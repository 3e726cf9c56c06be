//! Minimal host container for integration tests
//!
//! The real container is an external collaborator; this double implements
//! just the two capability traits the crate consumes. Default resolution is
//! last-registration-wins, singletons are cached per container, and scoped
//! registrations behave like transient at the root (the double has no
//! scopes).

use dashmap::DashMap;
use named_di::{
    Error, Lifetime, RegistryHandle, Result, ServiceCollection, ServiceFactory, ServiceInstance,
    ServiceProvider, ServiceTypeId, erase,
};
use std::any::TypeId;
use std::sync::Arc;

struct Registration {
    lifetime: Lifetime,
    factory: ServiceFactory,
}

/// A host container reduced to the capabilities the crate consumes.
#[derive(Default)]
pub struct MinimalContainer {
    factories: DashMap<TypeId, Registration>,
    singletons: DashMap<TypeId, ServiceInstance>,
    registries: DashMap<TypeId, Arc<dyn RegistryHandle>>,
}

impl MinimalContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed default registration; the payload follows the `Arc<S>`
    /// instance-currency convention.
    pub fn add_default<S, F>(&self, lifetime: Lifetime, factory: F)
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ServiceProvider) -> Result<Arc<S>> + Send + Sync + 'static,
    {
        self.add_factory(
            ServiceTypeId::of::<S>(),
            lifetime,
            Arc::new(move |provider| factory(provider).map(erase::<S>)),
        );
    }
}

impl ServiceCollection for MinimalContainer {
    fn add_factory(&self, service: ServiceTypeId, lifetime: Lifetime, factory: ServiceFactory) {
        // Last registration wins for default resolution.
        self.factories
            .insert(service.id(), Registration { lifetime, factory });
    }

    fn get_or_add_registry(
        &self,
        service: TypeId,
        create: &dyn Fn() -> Arc<dyn RegistryHandle>,
    ) -> Arc<dyn RegistryHandle> {
        let entry = self.registries.entry(service).or_insert_with(create);
        Arc::clone(entry.value())
    }
}

impl ServiceProvider for MinimalContainer {
    fn resolve_erased(&self, service: ServiceTypeId) -> Result<ServiceInstance> {
        // Clone the factory out before invoking it; factories re-enter the
        // container to resolve their own dependencies.
        let (lifetime, factory) = {
            let registration = self
                .factories
                .get(&service.id())
                .ok_or(Error::UnregisteredType { service })?;
            (registration.lifetime, Arc::clone(&registration.factory))
        };
        match lifetime {
            Lifetime::Singleton => {
                if let Some(cached) = self.singletons.get(&service.id()) {
                    return Ok(Arc::clone(cached.value()));
                }
                let built = factory(self)?;
                let entry = self.singletons.entry(service.id()).or_insert(built);
                Ok(Arc::clone(entry.value()))
            }
            Lifetime::Scoped | Lifetime::Transient => factory(self),
        }
    }

    fn registry_for(&self, service: TypeId) -> Option<Arc<dyn RegistryHandle>> {
        self.registries
            .get(&service)
            .map(|handle| Arc::clone(handle.value()))
    }
}
