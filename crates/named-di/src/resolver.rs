//! Per-parameter dependency resolution
//!
//! Produces the full positional argument list for a selected constructor and
//! runs its build closure. Each parameter is resolved by the first applicable
//! strategy, in order:
//!
//! 1. **Targeted override** — the parameter's type equals the targeted
//!    service type; resolve through that type's registry under the generated
//!    registration name. Matching is by type alone, so every parameter of the
//!    targeted type receives the same paired implementation.
//! 2. **Named-dependency override** — a supplied [`NamedDependency`] matches
//!    both the parameter's type and its name. No partial matches. When
//!    several entries match, the first in supplied order wins.
//! 3. **Fallback** — the container's default resolution for the parameter
//!    type. Also taken when a matched dependency references a service type
//!    with no published registry.
//!
//! A named-registry failure aborts the whole instantiation; no partial object
//! is returned.

use crate::constructor::{Arguments, ConstructorDescriptor, ParameterDescriptor};
use crate::dependency::NamedDependency;
use crate::error::{Error, Result};
use crate::key::ServiceTypeId;
use crate::ports::{ServiceInstance, ServiceProvider};
use std::sync::Arc;
use tracing::trace;

/// The override strategy a registration path applies during resolution.
#[derive(Clone, Copy, Debug)]
pub enum OverrideStrategy<'a> {
    /// No overrides; every parameter uses container default resolution.
    Default,
    /// Exact-type targeting: parameters of `service` resolve through the
    /// registry under `name` (the target-paired registration path).
    Target {
        /// The targeted service type
        service: ServiceTypeId,
        /// The generated registration name
        name: &'a str,
    },
    /// Type-and-parameter-name matching against explicit dependency entries
    /// (the named-dependencies registration path).
    Named(&'a [NamedDependency]),
}

/// Resolve all arguments for `constructor` and build the instance.
pub fn instantiate<T: ?Sized + Send + Sync + 'static>(
    constructor: &ConstructorDescriptor<T>,
    strategy: OverrideStrategy<'_>,
    provider: &dyn ServiceProvider,
) -> Result<Arc<T>> {
    let arguments = resolve_arguments(constructor, strategy, provider)?;
    constructor.build(&arguments)
}

/// Resolve the positional argument list for `constructor` without building.
pub fn resolve_arguments<T: ?Sized + Send + Sync + 'static>(
    constructor: &ConstructorDescriptor<T>,
    strategy: OverrideStrategy<'_>,
    provider: &dyn ServiceProvider,
) -> Result<Arguments> {
    let target = std::any::type_name::<T>();
    let mut values = Vec::with_capacity(constructor.parameters().len());
    for parameter in constructor.parameters() {
        let value = resolve_parameter(target, parameter, strategy, provider)?;
        values.push((*parameter, value));
    }
    Ok(Arguments::new(target, values))
}

fn resolve_parameter(
    target: &'static str,
    parameter: &ParameterDescriptor,
    strategy: OverrideStrategy<'_>,
    provider: &dyn ServiceProvider,
) -> Result<ServiceInstance> {
    match strategy {
        OverrideStrategy::Target { service, name } if parameter.service() == service => {
            trace!(
                target_type = target,
                parameter = parameter.name(),
                name,
                "resolving parameter through targeted registration"
            );
            let registry = provider
                .registry_for(service.id())
                .ok_or_else(|| Error::unregistered_name(service, name))?;
            registry.resolve_erased(name, provider)
        }
        OverrideStrategy::Named(dependencies) => {
            // First match in supplied order wins; duplicates are not detected.
            let matched = dependencies.iter().find(|dependency| {
                dependency.service() == parameter.service()
                    && dependency.parameter_name() == parameter.name()
            });
            match matched {
                Some(dependency) => match provider.registry_for(dependency.service().id()) {
                    Some(registry) => {
                        trace!(
                            target_type = target,
                            parameter = parameter.name(),
                            name = dependency.service_name(),
                            "resolving parameter through named dependency"
                        );
                        registry.resolve_erased(dependency.service_name(), provider)
                    }
                    // No registry published for the type; the entry cannot
                    // apply, so the parameter takes the default path.
                    None => fallback(target, parameter, provider),
                },
                None => fallback(target, parameter, provider),
            }
        }
        _ => fallback(target, parameter, provider),
    }
}

fn fallback(
    target: &'static str,
    parameter: &ParameterDescriptor,
    provider: &dyn ServiceProvider,
) -> Result<ServiceInstance> {
    trace!(
        target_type = target,
        parameter = parameter.name(),
        "resolving parameter through container default"
    );
    provider.resolve_erased(parameter.service())
}
