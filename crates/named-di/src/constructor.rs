//! Constructor declaration and selection
//!
//! Rust has no runtime constructor reflection, so eligible constructors are
//! declared explicitly at registration time: an ordered parameter list plus a
//! build closure that consumes the resolved arguments. Declaration order
//! stands in for source declaration order, which is what the selection rules
//! key off:
//!
//! - **Targeting rule** — the *last* declared constructor containing at least
//!   one parameter of the targeted service type. Supports types with several
//!   constructors where only one is injection-friendly, with the same
//!   last-wins tie semantics the rest of the system uses.
//! - **Minimal rule** — the constructor with the *fewest* parameters, ties
//!   broken by declaration order (first encountered). Prefers the most
//!   specific constructor over one with convenience parameters.
//!
//! Declared sets are immutable, and selection results are shared via `Arc`,
//! so a selection made once at registration time is reused by every
//! subsequent resolution without synchronization.

use crate::error::{Error, Result};
use crate::key::ServiceTypeId;
use crate::ports::{ServiceInstance, unerase};
use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// One declared constructor parameter: type, name, position.
#[derive(Clone, Copy, Debug)]
pub struct ParameterDescriptor {
    service: ServiceTypeId,
    name: &'static str,
    position: usize,
}

impl ParameterDescriptor {
    /// The parameter's declared service type.
    pub fn service(&self) -> ServiceTypeId {
        self.service
    }

    /// The parameter name, as matched against named dependencies.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Zero-based position in the parameter list.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Positional resolved arguments handed to a build closure.
pub struct Arguments {
    target: &'static str,
    values: Vec<(ParameterDescriptor, ServiceInstance)>,
}

impl Arguments {
    pub(crate) fn new(target: &'static str, values: Vec<(ParameterDescriptor, ServiceInstance)>) -> Self {
        Self { target, values }
    }

    /// The resolved argument at `position`, viewed as `Arc<S>`.
    ///
    /// Fails with [`Error::TypeMismatch`] when `S` is not the type the
    /// parameter was declared with.
    pub fn get<S: ?Sized + Send + Sync + 'static>(&self, position: usize) -> Result<Arc<S>> {
        let (parameter, instance) =
            self.values.get(position).ok_or_else(|| Error::TypeMismatch {
                expected: std::any::type_name::<S>(),
                context: format!("argument {position} of {} (out of range)", self.target),
            })?;
        unerase::<S>(instance).ok_or_else(|| Error::TypeMismatch {
            expected: std::any::type_name::<S>(),
            context: format!(
                "argument {position} '{}' of {}",
                parameter.name(),
                self.target
            ),
        })
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the argument list is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

type BuildFn<T> = Box<dyn Fn(&Arguments) -> Result<Arc<T>> + Send + Sync>;

/// A declared constructor of a target type `T`: ordered parameters plus the
/// closure that builds the instance from resolved arguments.
pub struct ConstructorDescriptor<T: ?Sized + Send + Sync + 'static> {
    parameters: Vec<ParameterDescriptor>,
    build: BuildFn<T>,
}

impl<T: ?Sized + Send + Sync + 'static> ConstructorDescriptor<T> {
    /// The ordered parameter list.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Whether any parameter is declared with the given service type.
    pub fn takes(&self, service: TypeId) -> bool {
        self.parameters
            .iter()
            .any(|parameter| parameter.service().id() == service)
    }

    /// Run the build closure over resolved arguments.
    pub fn build(&self, arguments: &Arguments) -> Result<Arc<T>> {
        (self.build)(arguments)
    }
}

impl<T: ?Sized + Send + Sync + 'static> fmt::Debug for ConstructorDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("target", &std::any::type_name::<T>())
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Builder for one [`ConstructorDescriptor`].
pub struct ConstructorBuilder<T: ?Sized + Send + Sync + 'static> {
    parameters: Vec<ParameterDescriptor>,
    _target: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> ConstructorBuilder<T> {
    fn new() -> Self {
        Self {
            parameters: Vec::new(),
            _target: PhantomData,
        }
    }

    /// Append a parameter of service type `P` named `name`.
    pub fn param<P: ?Sized + Send + Sync + 'static>(mut self, name: &'static str) -> Self {
        let position = self.parameters.len();
        self.parameters.push(ParameterDescriptor {
            service: ServiceTypeId::of::<P>(),
            name,
            position,
        });
        self
    }

    /// Finish the declaration with the build closure.
    pub fn build<F>(self, build: F) -> ConstructorDescriptor<T>
    where
        F: Fn(&Arguments) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        ConstructorDescriptor {
            parameters: self.parameters,
            build: Box::new(build),
        }
    }
}

/// The declared constructor set of a target type, in declaration order.
pub struct Constructors<T: ?Sized + Send + Sync + 'static> {
    declared: Vec<Arc<ConstructorDescriptor<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> Constructors<T> {
    /// An empty constructor set.
    pub fn new() -> Self {
        Self {
            declared: Vec::new(),
        }
    }

    /// Declare one constructor.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let constructors = Constructors::<Consumer>::new().declare(|ctor| {
    ///     ctor.param::<dyn Greeter>("greeter")
    ///         .build(|args| Ok(Arc::new(Consumer::new(args.get::<dyn Greeter>(0)?))))
    /// });
    /// ```
    pub fn declare<F>(mut self, declare: F) -> Self
    where
        F: FnOnce(ConstructorBuilder<T>) -> ConstructorDescriptor<T>,
    {
        self.declared.push(Arc::new(declare(ConstructorBuilder::new())));
        self
    }

    /// Targeting rule: the last declared constructor with at least one
    /// parameter of `service`.
    pub fn select_targeting(&self, service: ServiceTypeId) -> Result<Arc<ConstructorDescriptor<T>>> {
        if self.declared.is_empty() {
            return Err(self.none_declared());
        }
        self.declared
            .iter()
            .rev()
            .find(|constructor| constructor.takes(service.id()))
            .cloned()
            .ok_or_else(|| Error::NoPublicConstructor {
                target: std::any::type_name::<T>(),
                detail: format!("no declared constructor takes a parameter of type {service}"),
            })
    }

    /// Minimal rule: the constructor with the fewest parameters, ties broken
    /// by declaration order.
    pub fn select_minimal(&self) -> Result<Arc<ConstructorDescriptor<T>>> {
        // Iterator::min_by_key returns the first of equal minima, which is
        // exactly the declaration-order tie-break.
        self.declared
            .iter()
            .min_by_key(|constructor| constructor.parameters().len())
            .cloned()
            .ok_or_else(|| self.none_declared())
    }

    /// Number of declared constructors.
    pub fn len(&self) -> usize {
        self.declared.len()
    }

    /// Whether no constructors are declared.
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    fn none_declared(&self) -> Error {
        Error::NoPublicConstructor {
            target: std::any::type_name::<T>(),
            detail: "no constructors declared".to_string(),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> Default for Constructors<T> {
    fn default() -> Self {
        Self::new()
    }
}
