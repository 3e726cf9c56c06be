//! Named and targeted service resolution for dependency-injection containers
//!
//! A host DI container resolves a type to whatever was registered last for
//! it. This crate layers two finer-grained mechanisms on top of any container
//! that exposes a pair of narrow capabilities (resolve a type id, register a
//! factory):
//!
//! - **Named registration** — several implementations of one service type
//!   registered under distinct string names, resolved explicitly by name.
//! - **Targeted injection** — a specific consumer type receives a particular
//!   named implementation for a specific constructor parameter, while every
//!   other consumer keeps seeing the container default.
//!
//! ## Architecture
//!
//! ```text
//! configuration                         resolution
//! ─────────────                         ──────────
//! ServiceCollectionExt                  container invokes factory
//!   add_named_service ─────┐                    │
//!   add_service_for        │                    ▼
//!   add_service_with_named │            Constructors (selected once)
//!     _dependencies        │                    │
//!          │               ▼                    ▼
//!          │        NamedRegistry<S>  ◀─ resolver: per-parameter
//!          │        (DashMap, one per    targeted / named / default
//!          │         service type)              │
//!          ▼                                    ▼
//!   host ServiceCollection              build closure → instance
//! ```
//!
//! Constructors are declared explicitly at registration time (an ordered
//! parameter list plus a build closure); there is no runtime reflection.
//!
//! ## Example
//!
//! ```rust,ignore
//! use named_di::{Constructors, Lifetime, NamedDependency};
//! use named_di::{ServiceCollectionExt, ServiceProviderExt};
//!
//! services.add_named_service::<dyn Greeter, English, _>(
//!     "english",
//!     Lifetime::Transient,
//!     |_| Ok(Arc::new(English) as Arc<dyn Greeter>),
//! );
//!
//! let constructors = Constructors::<Consumer>::new().declare(|ctor| {
//!     ctor.param::<dyn Greeter>("greeter")
//!         .build(|args| Ok(Arc::new(Consumer::new(args.get::<dyn Greeter>(0)?))))
//! });
//! services.add_service_with_named_dependencies(
//!     Lifetime::Transient,
//!     &constructors,
//!     vec![NamedDependency::of::<dyn Greeter>("english", "greeter")],
//! )?;
//!
//! let greeter: Arc<dyn Greeter> = provider.resolve_named("english")?;
//! ```
//!
//! The crate never constructs object graphs on its own and never manages
//! lifetimes, scopes, or disposal; it only decides *which* implementation
//! satisfies a dependency slot and hands everything else back to the host.

pub mod constructor;
pub mod dependency;
pub mod error;
pub mod extensions;
pub mod key;
pub mod ports;
pub mod registry;
pub mod resolver;

// Re-export main types for convenience
pub use constructor::{
    Arguments, ConstructorBuilder, ConstructorDescriptor, Constructors, ParameterDescriptor,
};
pub use dependency::NamedDependency;
pub use error::{Error, Result};
pub use extensions::{ServiceCollectionExt, ServiceProviderExt};
pub use key::ServiceTypeId;
pub use ports::{
    Lifetime, ServiceCollection, ServiceFactory, ServiceInstance, ServiceProvider, erase, unerase,
};
pub use registry::{NamedRegistry, RegistryHandle};
pub use resolver::{OverrideStrategy, instantiate, resolve_arguments};
