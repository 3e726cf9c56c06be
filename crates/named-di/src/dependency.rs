//! Named dependency declarations

use crate::key::ServiceTypeId;

/// Directs the resolver to a specific named registration for one
/// constructor parameter.
///
/// Matching at resolution time is by **both** the service type and the
/// parameter name; an entry whose type matches but whose name differs is
/// skipped, and vice versa. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedDependency {
    service: ServiceTypeId,
    service_name: String,
    parameter_name: String,
}

impl NamedDependency {
    /// Declare that the parameter named `parameter_name` expecting service
    /// type `S` should receive the implementation registered under
    /// `service_name`.
    pub fn of<S: ?Sized + Send + Sync + 'static>(
        service_name: impl Into<String>,
        parameter_name: impl Into<String>,
    ) -> Self {
        Self {
            service: ServiceTypeId::of::<S>(),
            service_name: service_name.into(),
            parameter_name: parameter_name.into(),
        }
    }

    /// The service type this entry applies to.
    pub fn service(&self) -> ServiceTypeId {
        self.service
    }

    /// The registered service name to resolve.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// The constructor parameter name to match.
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }
}
