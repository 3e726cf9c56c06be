//! Named registration and explicit resolution

use crate::integration::fixtures::{Service, ServiceA, ServiceB, container};
use crate::integration::support::MinimalContainer;
use named_di::{
    Error, Lifetime, NamedRegistry, ServiceCollectionExt, ServiceProvider, ServiceProviderExt,
};
use std::any::TypeId;

#[test]
fn named_services_resolve_explicitly() {
    let container = container();
    container.add_named_service::<dyn Service, ServiceA, _>(
        "a name",
        Lifetime::Transient,
        ServiceA::factory,
    );

    let resolved = container.resolve_named::<dyn Service>("a name").unwrap();
    assert_eq!(resolved.label(), "service-a");
}

#[test]
fn names_isolate_implementations() {
    let container = container();
    container
        .add_named_service::<dyn Service, ServiceA, _>("A", Lifetime::Transient, ServiceA::factory)
        .add_named_service::<dyn Service, ServiceB, _>("B", Lifetime::Transient, ServiceB::factory);

    assert_eq!(
        container.resolve_named::<dyn Service>("A").unwrap().label(),
        "service-a"
    );
    assert_eq!(
        container.resolve_named::<dyn Service>("B").unwrap().label(),
        "service-b"
    );

    let err = container.resolve_named::<dyn Service>("C").err().unwrap();
    assert!(matches!(err, Error::UnregisteredName { ref name, .. } if name == "C"));
}

#[test]
fn duplicate_registration_keeps_the_first_implementation() {
    let container = container();
    container
        .add_named_service::<dyn Service, ServiceA, _>(
            "main",
            Lifetime::Transient,
            ServiceA::factory,
        )
        .add_named_service::<dyn Service, ServiceB, _>(
            "main",
            Lifetime::Transient,
            ServiceB::factory,
        );

    let resolved = container.resolve_named::<dyn Service>("main").unwrap();
    assert_eq!(resolved.label(), "service-a");
}

#[test]
fn resolution_without_any_registry_fails_typed() {
    let container = MinimalContainer::new();
    let err = container
        .resolve_named::<dyn Service>("anything")
        .err().unwrap();
    assert!(matches!(err, Error::UnregisteredName { .. }));
}

#[test]
fn named_resolution_honors_the_implementation_lifetime() {
    let container = container();
    container.add_named_service::<dyn Service, ServiceA, _>(
        "pinned",
        Lifetime::Singleton,
        ServiceA::factory,
    );

    let first = container.resolve_named::<dyn Service>("pinned").unwrap();
    let second = container.resolve_named::<dyn Service>("pinned").unwrap();
    assert_eq!(first.stamp(), second.stamp());

    container.add_named_service::<dyn Service, ServiceB, _>(
        "fresh",
        Lifetime::Transient,
        ServiceB::factory,
    );
    let first = container.resolve_named::<dyn Service>("fresh").unwrap();
    let second = container.resolve_named::<dyn Service>("fresh").unwrap();
    assert_ne!(first.stamp(), second.stamp());
}

#[test]
fn published_registry_is_inspectable() {
    let container = container();
    container
        .add_named_service::<dyn Service, ServiceA, _>("A", Lifetime::Transient, ServiceA::factory)
        .add_named_service::<dyn Service, ServiceB, _>("B", Lifetime::Transient, ServiceB::factory);

    let handle = container
        .registry_for(TypeId::of::<dyn Service>())
        .expect("registry published on first registration");
    let registry = handle
        .downcast_arc::<NamedRegistry<dyn Service>>()
        .ok()
        .expect("handle is the typed registry");

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("A"));
    assert!(registry.contains("B"));
    assert!(!registry.contains("C"));
    let mut names = registry.names();
    names.sort();
    assert_eq!(names, ["A", "B"]);
}
