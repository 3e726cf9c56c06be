//! Registration and resolution extension traits
//!
//! The public surface of the crate, layered over the host container's
//! capability traits the way the rest of the system layers extension traits
//! over core types:
//!
//! - [`ServiceCollectionExt`] — the three registration paths (name-keyed,
//!   target-paired, named-dependencies).
//! - [`ServiceProviderExt`] — explicit named resolution.
//!
//! All three registration paths deliberately avoid binding the concrete
//! implementation to the abstract service type in the container: the
//! implementation is registered under its own type id, so the service type's
//! default resolution never accumulates ambiguous registrations.

use crate::constructor::Constructors;
use crate::dependency::NamedDependency;
use crate::error::{Error, Result};
use crate::key::ServiceTypeId;
use crate::ports::{Lifetime, ServiceCollection, ServiceProvider, erase};
use crate::registry::{NamedRegistry, RegistryHandle};
use crate::resolver::{self, OverrideStrategy};
use std::any::TypeId;
use std::sync::Arc;
use tracing::debug;

/// Registration extensions over a [`ServiceCollection`].
pub trait ServiceCollectionExt: ServiceCollection {
    /// Register implementation `I` of service type `S` under `name`.
    ///
    /// Publishes the `NamedRegistry<S>` singleton on first use (race-safe),
    /// binds `(S, name)` to `I` in it, and registers `factory` with the
    /// container under `I`'s own type id with the given lifetime. The first
    /// registration for a `(S, name)` pair wins; duplicates are ignored.
    ///
    /// The factory's return type is where the implementation-to-service
    /// coercion happens, e.g. `Ok(Arc::new(English) as Arc<dyn Greeter>)`.
    fn add_named_service<S, I, F>(&self, name: &str, lifetime: Lifetime, factory: F) -> &Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: Send + Sync + 'static,
        F: Fn(&dyn ServiceProvider) -> Result<Arc<S>> + Send + Sync + 'static,
    {
        let registry = self.get_or_add_registry(TypeId::of::<S>(), &|| {
            Arc::new(NamedRegistry::<S>::new()) as Arc<dyn RegistryHandle>
        });
        registry.register_erased(name, ServiceTypeId::of::<I>());
        self.add_factory(
            ServiceTypeId::of::<I>(),
            lifetime,
            Arc::new(move |provider| factory(provider).map(erase::<S>)),
        );
        self
    }

    /// Register implementation `I` of service type `S` paired to the target
    /// type `T`: whenever `T` is resolved, its parameters of type `S`
    /// receive `I`, while everything else takes the container default.
    ///
    /// The binding uses a generated synthetic name
    /// (`"<implementation>:<target>"`), so it never collides with
    /// caller-chosen names. Constructor selection (last declared constructor
    /// taking an `S` parameter) happens here, once; failures surface at
    /// registration time.
    ///
    /// Matching is by type only, not parameter name, so there is a single
    /// binding slot per service type per target: every `S` parameter of the
    /// selected constructor receives the same implementation, and two `S`
    /// parameters can never receive two different ones.
    fn add_service_for<S, I, T, F>(
        &self,
        service_lifetime: Lifetime,
        target_lifetime: Lifetime,
        factory: F,
        constructors: &Constructors<T>,
    ) -> Result<&Self>
    where
        S: ?Sized + Send + Sync + 'static,
        I: Send + Sync + 'static,
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ServiceProvider) -> Result<Arc<S>> + Send + Sync + 'static,
    {
        let name = format!(
            "{}:{}",
            std::any::type_name::<I>(),
            std::any::type_name::<T>()
        );
        self.add_named_service::<S, I, _>(&name, service_lifetime, factory);

        let constructor = constructors.select_targeting(ServiceTypeId::of::<S>())?;
        let service = ServiceTypeId::of::<S>();
        debug!(
            target_type = std::any::type_name::<T>(),
            service = %service,
            name = %name,
            "registered target-paired service"
        );
        self.add_factory(
            ServiceTypeId::of::<T>(),
            target_lifetime,
            Arc::new(move |provider| {
                resolver::instantiate(
                    &constructor,
                    OverrideStrategy::Target {
                        service,
                        name: &name,
                    },
                    provider,
                )
                .map(erase::<T>)
            }),
        );
        Ok(self)
    }

    /// Register target type `T` with explicit named dependencies tied to
    /// parameter names.
    ///
    /// Constructor selection (fewest parameters, declaration-order
    /// tie-break) happens here, once. At each resolution, parameters whose
    /// type and name match a supplied [`NamedDependency`] resolve through
    /// the corresponding registry; everything else takes the container
    /// default.
    fn add_service_with_named_dependencies<T>(
        &self,
        lifetime: Lifetime,
        constructors: &Constructors<T>,
        dependencies: Vec<NamedDependency>,
    ) -> Result<&Self>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let constructor = constructors.select_minimal()?;
        debug!(
            target_type = std::any::type_name::<T>(),
            dependencies = dependencies.len(),
            "registered service with named dependencies"
        );
        self.add_factory(
            ServiceTypeId::of::<T>(),
            lifetime,
            Arc::new(move |provider| {
                resolver::instantiate(
                    &constructor,
                    OverrideStrategy::Named(&dependencies),
                    provider,
                )
                .map(erase::<T>)
            }),
        );
        Ok(self)
    }
}

impl<C: ServiceCollection + ?Sized> ServiceCollectionExt for C {}

/// Resolution extensions over a [`ServiceProvider`].
pub trait ServiceProviderExt {
    /// Resolve the implementation of `S` registered under `name`.
    ///
    /// Fails with [`Error::UnregisteredName`] when no registry exists for
    /// `S` or the name has no binding; never silently substitutes another
    /// implementation.
    fn resolve_named<S: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<S>>;

    /// Resolve `S` through the container's default resolution path, viewed
    /// as `Arc<S>` per the instance-currency convention.
    fn resolve_default<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<S>>;
}

fn resolve_named_from<S: ?Sized + Send + Sync + 'static>(
    provider: &dyn ServiceProvider,
    name: &str,
) -> Result<Arc<S>> {
    let handle = provider
        .registry_for(TypeId::of::<S>())
        .ok_or_else(|| Error::unregistered_name(ServiceTypeId::of::<S>(), name))?;
    let registry = handle
        .downcast_arc::<NamedRegistry<S>>()
        .map_err(|_| Error::TypeMismatch {
            expected: std::any::type_name::<NamedRegistry<S>>(),
            context: format!("registry published for {}", ServiceTypeId::of::<S>()),
        })?;
    registry.resolve(name, provider)
}

fn resolve_default_from<S: ?Sized + Send + Sync + 'static>(
    provider: &dyn ServiceProvider,
) -> Result<Arc<S>> {
    let service = ServiceTypeId::of::<S>();
    let instance = provider.resolve_erased(service)?;
    crate::ports::unerase::<S>(&instance).ok_or_else(|| Error::TypeMismatch {
        expected: std::any::type_name::<S>(),
        context: format!("default registration for {service}"),
    })
}

impl<P: ServiceProvider + 'static> ServiceProviderExt for P {
    fn resolve_named<S: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<S>> {
        resolve_named_from::<S>(self, name)
    }

    fn resolve_default<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<S>> {
        resolve_default_from::<S>(self)
    }
}

impl<'a> ServiceProviderExt for dyn ServiceProvider + 'a {
    fn resolve_named<S: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<S>> {
        resolve_named_from::<S>(self, name)
    }

    fn resolve_default<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<S>> {
        resolve_default_from::<S>(self)
    }
}
