//! Error handling types

use crate::key::ServiceTypeId;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for named service resolution
#[derive(Error, Debug)]
pub enum Error {
    /// No implementation has been registered for a `(service type, name)` pair.
    ///
    /// Never silently substituted with a different implementation; a named
    /// binding either resolves to exactly what was registered or fails.
    #[error("no service for type {service} named '{name}' has been registered")]
    UnregisteredName {
        /// The service type the name was looked up under
        service: ServiceTypeId,
        /// The requested registration name
        name: String,
    },

    /// The host container has no default registration for a type.
    ///
    /// Raised by host containers during fallback resolution; carried here so
    /// it propagates through the resolver unmodified.
    #[error("no service of type {service} has been registered")]
    UnregisteredType {
        /// The type that could not be resolved
        service: ServiceTypeId,
    },

    /// A target type has no usable declared constructor.
    ///
    /// A configuration bug, surfaced at registration time rather than on
    /// first resolution.
    #[error("no usable public constructor declared for {target}: {detail}")]
    NoPublicConstructor {
        /// The target type whose constructors were inspected
        target: &'static str,
        /// Why no constructor was eligible
        detail: String,
    },

    /// A resolved instance could not be viewed as the requested type.
    ///
    /// The argument currency is type-erased, so a build closure asking for
    /// the wrong type is a checkable runtime condition instead of an
    /// unchecked cast.
    #[error("resolved instance is not available as {expected} ({context})")]
    TypeMismatch {
        /// The type the caller asked for
        expected: &'static str,
        /// Where the mismatch occurred
        context: String,
    },

    /// An error raised by the host container itself.
    #[error("container error: {message}")]
    Container {
        /// Description of the container failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Shorthand for an [`Error::UnregisteredName`] value.
    pub fn unregistered_name(service: ServiceTypeId, name: impl Into<String>) -> Self {
        Self::UnregisteredName {
            service,
            name: name.into(),
        }
    }

    /// Shorthand for an [`Error::Container`] value without a source.
    pub fn container(message: impl Into<String>) -> Self {
        Self::Container {
            message: message.into(),
            source: None,
        }
    }
}
