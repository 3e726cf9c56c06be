//! Concurrent registration and lookup
//!
//! Registration may interleave with other registrations and with resolution
//! across threads; no entry may be lost and exactly one registry instance
//! may ever be published per service type.

use crate::integration::fixtures::{Service, container};
use named_di::{Lifetime, NamedRegistry, ServiceCollectionExt, ServiceProvider, ServiceProviderExt};
use std::any::TypeId;
use std::sync::{Arc, Barrier};
use std::thread;

macro_rules! worker_service {
    ($ty:ident, $label:literal) => {
        #[derive(Default)]
        struct $ty;

        impl Service for $ty {
            fn label(&self) -> String {
                $label.to_string()
            }

            fn stamp(&self) -> u64 {
                0
            }
        }
    };
}

worker_service!(Worker0, "worker-0");
worker_service!(Worker1, "worker-1");
worker_service!(Worker2, "worker-2");
worker_service!(Worker3, "worker-3");
worker_service!(Worker4, "worker-4");
worker_service!(Worker5, "worker-5");
worker_service!(Worker6, "worker-6");
worker_service!(Worker7, "worker-7");

const NAMES_PER_THREAD: usize = 32;

fn register_worker<W>(container: &Arc<crate::integration::support::MinimalContainer>, index: usize)
where
    W: Service + Default + Send + Sync + 'static,
{
    for k in 0..NAMES_PER_THREAD {
        container.add_named_service::<dyn Service, W, _>(
            &format!("worker-{index}-{k}"),
            Lifetime::Transient,
            |_| {
                let service: Arc<dyn Service> = Arc::new(W::default());
                Ok(service)
            },
        );
    }
}

#[test]
fn concurrent_registration_loses_no_entries() {
    let container = Arc::new(container());
    let barrier = Arc::new(Barrier::new(8));

    macro_rules! spawn_worker {
        ($ty:ident, $index:expr) => {{
            let container = Arc::clone(&container);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                register_worker::<$ty>(&container, $index);
            })
        }};
    }

    let handles = vec![
        spawn_worker!(Worker0, 0),
        spawn_worker!(Worker1, 1),
        spawn_worker!(Worker2, 2),
        spawn_worker!(Worker3, 3),
        spawn_worker!(Worker4, 4),
        spawn_worker!(Worker5, 5),
        spawn_worker!(Worker6, 6),
        spawn_worker!(Worker7, 7),
    ];
    for handle in handles {
        handle.join().unwrap();
    }

    // Every registration survived and resolves to its own implementation.
    for index in 0..8 {
        for k in 0..NAMES_PER_THREAD {
            let resolved = container
                .resolve_named::<dyn Service>(&format!("worker-{index}-{k}"))
                .unwrap();
            assert_eq!(resolved.label(), format!("worker-{index}"));
        }
    }

    // Exactly one registry was published for the service type and it holds
    // the complete binding set.
    let registry = container
        .registry_for(TypeId::of::<dyn Service>())
        .unwrap()
        .downcast_arc::<NamedRegistry<dyn Service>>()
        .ok()
        .unwrap();
    assert_eq!(registry.len(), 8 * NAMES_PER_THREAD);
}

#[test]
fn registration_and_resolution_interleave_safely() {
    let container = Arc::new(container());
    container.add_named_service::<dyn Service, Worker0, _>("steady", Lifetime::Transient, |_| {
        let service: Arc<dyn Service> = Arc::new(Worker0);
        Ok(service)
    });

    let barrier = Arc::new(Barrier::new(4));
    let mut handles = Vec::new();

    for index in 0..2 {
        let container = Arc::clone(&container);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for k in 0..NAMES_PER_THREAD {
                container.add_named_service::<dyn Service, Worker1, _>(
                    &format!("late-{index}-{k}"),
                    Lifetime::Transient,
                    |_| {
                        let service: Arc<dyn Service> = Arc::new(Worker1);
                        Ok(service)
                    },
                );
            }
        }));
    }

    for _ in 0..2 {
        let container = Arc::clone(&container);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..NAMES_PER_THREAD {
                let resolved = container.resolve_named::<dyn Service>("steady").unwrap();
                assert_eq!(resolved.label(), "worker-0");
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
