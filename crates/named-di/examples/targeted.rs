//! Named and targeted services, end to end
//!
//! Runs the three registration paths against a small host container:
//! two named registrations resolved explicitly, a target-paired
//! registration, and a named-dependencies registration over a constructor
//! mixing two service parameters with a plain value parameter.
//!
//! ```sh
//! cargo run --example targeted
//! ```

use dashmap::DashMap;
use named_di::{
    Constructors, Error, Lifetime, NamedDependency, RegistryHandle, Result, ServiceCollection,
    ServiceCollectionExt, ServiceFactory, ServiceInstance, ServiceProvider, ServiceProviderExt,
    ServiceTypeId, erase,
};
use std::any::TypeId;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// ============================================================================
// Host container
// ============================================================================

/// The smallest container that satisfies the two capability traits. A real
/// host would adapt its own container the same way.
#[derive(Default)]
struct Host {
    factories: DashMap<TypeId, (Lifetime, ServiceFactory)>,
    singletons: DashMap<TypeId, ServiceInstance>,
    registries: DashMap<TypeId, Arc<dyn RegistryHandle>>,
}

impl ServiceCollection for Host {
    fn add_factory(&self, service: ServiceTypeId, lifetime: Lifetime, factory: ServiceFactory) {
        self.factories.insert(service.id(), (lifetime, factory));
    }

    fn get_or_add_registry(
        &self,
        service: TypeId,
        create: &dyn Fn() -> Arc<dyn RegistryHandle>,
    ) -> Arc<dyn RegistryHandle> {
        Arc::clone(self.registries.entry(service).or_insert_with(create).value())
    }
}

impl ServiceProvider for Host {
    fn resolve_erased(&self, service: ServiceTypeId) -> Result<ServiceInstance> {
        let (lifetime, factory) = {
            let entry = self
                .factories
                .get(&service.id())
                .ok_or(Error::UnregisteredType { service })?;
            (entry.0, Arc::clone(&entry.1))
        };
        if lifetime == Lifetime::Singleton {
            if let Some(cached) = self.singletons.get(&service.id()) {
                return Ok(Arc::clone(cached.value()));
            }
            let built = factory(self)?;
            return Ok(Arc::clone(
                self.singletons.entry(service.id()).or_insert(built).value(),
            ));
        }
        factory(self)
    }

    fn registry_for(&self, service: TypeId) -> Option<Arc<dyn RegistryHandle>> {
        self.registries
            .get(&service)
            .map(|handle| Arc::clone(handle.value()))
    }
}

// ============================================================================
// Demo services and consumers
// ============================================================================

trait Clockwork: Send + Sync {
    fn name(&self) -> &'static str;
    fn ticks(&self) -> u128;
}

macro_rules! clockwork {
    ($ty:ident, $name:literal) => {
        struct $ty {
            ticks: u128,
        }

        impl $ty {
            fn factory(provider: &dyn ServiceProvider) -> Result<Arc<dyn Clockwork>> {
                let now = provider.resolve_default::<SystemTime>()?;
                let ticks = now
                    .duration_since(UNIX_EPOCH)
                    .map_err(|err| Error::Container {
                        message: "clock before epoch".to_string(),
                        source: Some(Box::new(err)),
                    })?
                    .as_nanos();
                Ok(Arc::new(Self { ticks }))
            }
        }

        impl Clockwork for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn ticks(&self) -> u128 {
                self.ticks
            }
        }
    };
}

clockwork!(ServiceA, "service-a");
clockwork!(ServiceB, "service-b");
clockwork!(ServiceC, "service-c");
clockwork!(ServiceD, "service-d");
clockwork!(ServiceE, "service-e");

struct ConsumerC {
    service: Arc<dyn Clockwork>,
}

struct ConsumerD {
    service_x: Arc<dyn Clockwork>,
    wait: Duration,
    service_y: Arc<dyn Clockwork>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "named_di=debug".into()),
        )
        .init();

    let host = Host::default();

    // Plain value defaults.
    host.add_factory(
        ServiceTypeId::of::<SystemTime>(),
        Lifetime::Transient,
        Arc::new(|_| Ok(erase::<SystemTime>(Arc::new(SystemTime::now())))),
    );
    host.add_factory(
        ServiceTypeId::of::<Duration>(),
        Lifetime::Transient,
        Arc::new(|_| Ok(erase::<Duration>(Arc::new(Duration::from_millis(250))))),
    );

    // Named registrations, resolved explicitly below.
    host.add_named_service::<dyn Clockwork, ServiceA, _>(
        "service-a",
        Lifetime::Transient,
        ServiceA::factory,
    )
    .add_named_service::<dyn Clockwork, ServiceB, _>(
        "service-b",
        Lifetime::Transient,
        ServiceB::factory,
    );

    // A service paired to a specific target type.
    let consumer_c = Constructors::<ConsumerC>::new().declare(|ctor| {
        ctor.param::<dyn Clockwork>("service").build(|args| {
            Ok(Arc::new(ConsumerC {
                service: args.get::<dyn Clockwork>(0)?,
            }))
        })
    });
    host.add_service_for::<dyn Clockwork, ServiceC, ConsumerC, _>(
        Lifetime::Transient,
        Lifetime::Transient,
        ServiceC::factory,
        &consumer_c,
    )?;

    // A target with named dependencies tied to parameter names.
    host.add_named_service::<dyn Clockwork, ServiceD, _>(
        "service-d",
        Lifetime::Transient,
        ServiceD::factory,
    )
    .add_named_service::<dyn Clockwork, ServiceE, _>(
        "service-e",
        Lifetime::Transient,
        ServiceE::factory,
    );
    let consumer_d = Constructors::<ConsumerD>::new().declare(|ctor| {
        ctor.param::<dyn Clockwork>("service_x")
            .param::<Duration>("wait")
            .param::<dyn Clockwork>("service_y")
            .build(|args| {
                Ok(Arc::new(ConsumerD {
                    service_x: args.get::<dyn Clockwork>(0)?,
                    wait: *args.get::<Duration>(1)?,
                    service_y: args.get::<dyn Clockwork>(2)?,
                }))
            })
    });
    host.add_service_with_named_dependencies(
        Lifetime::Transient,
        &consumer_d,
        vec![
            NamedDependency::of::<dyn Clockwork>("service-d", "service_x"),
            NamedDependency::of::<dyn Clockwork>("service-e", "service_y"),
        ],
    )?;

    // Resolve and report.
    let a = host.resolve_named::<dyn Clockwork>("service-a")?;
    let b = host.resolve_named::<dyn Clockwork>("service-b")?;
    println!("explicit: {} ({} ticks)", a.name(), a.ticks());
    println!("explicit: {} ({} ticks)", b.name(), b.ticks());

    let c = host.resolve_default::<ConsumerC>()?;
    println!("paired:   ConsumerC got {}", c.service.name());

    let d = host.resolve_default::<ConsumerD>()?;
    println!(
        "named:    ConsumerD got x={} y={} wait={:?}",
        d.service_x.name(),
        d.service_y.name(),
        d.wait
    );

    Ok(())
}
