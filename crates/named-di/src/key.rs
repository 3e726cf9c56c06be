//! Type tags and registry keys
//!
//! `ServiceTypeId` is the stable runtime identity of a service type: a
//! `TypeId` for equality plus the type name for diagnostics. Equality and
//! hashing use the `TypeId` only, so two tags for the same type always
//! compare equal regardless of how the name was rendered.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a service type.
///
/// Works for sized types and trait objects alike (`ServiceTypeId::of::<dyn
/// Greeter>()` is valid). The carried name is for error messages and log
/// events only and never participates in comparisons.
#[derive(Clone, Copy, Debug)]
pub struct ServiceTypeId {
    id: TypeId,
    name: &'static str,
}

impl ServiceTypeId {
    /// Create the tag for a service type.
    pub fn of<S: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<S>(),
            name: std::any::type_name::<S>(),
        }
    }

    /// The underlying `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ServiceTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceTypeId {}

impl Hash for ServiceTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ServiceTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Composite `(name, service type)` key for named-registry storage.
///
/// Structural equality and hashing over both fields. Registry-internal;
/// never handed to callers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct RegistrationKey {
    name: String,
    service: TypeId,
}

impl RegistrationKey {
    pub(crate) fn new(name: impl Into<String>, service: TypeId) -> Self {
        Self {
            name: name.into(),
            service,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}
