//! Type-keyed service cache
//!
//! Lookups of an already created service take a shard read lock only. On a
//! miss the caller builds a candidate without holding any lock and offers it
//! with insert-if-absent; when several threads race, the first insert wins
//! and everyone adopts that instance. Losing candidates are dropped, so at
//! most one instance per type is ever retained. Construction is pure
//! (descriptor validation plus `Arc` clones), which makes discarding a
//! duplicate harmless.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;
use twitkit_domain::{Result, TwitterError};

use crate::factory::{RemoteCallFactory, Service};

type Entry = Arc<dyn Any + Send + Sync>;

pub struct ServiceRegistry {
    factory: RemoteCallFactory,
    services: DashMap<TypeId, Entry>,
}

impl ServiceRegistry {
    pub fn new(factory: RemoteCallFactory) -> Self {
        Self { factory, services: DashMap::new() }
    }

    /// Return the shared instance of `S`, creating it on first use.
    ///
    /// Every successful call for the same `S` returns the same `Arc`.
    ///
    /// # Errors
    /// Returns `TwitterError::Configuration` if `S` cannot be created. A
    /// failed creation caches nothing.
    pub fn get<S: Service>(&self) -> Result<Arc<S>> {
        let key = TypeId::of::<S>();

        if let Some(existing) = self.services.get(&key).map(|entry| entry.value().clone()) {
            return downcast::<S>(existing);
        }

        let candidate: Entry = Arc::new(self.factory.create::<S>()?);
        let stored = self.services.entry(key).or_insert_with(|| candidate.clone()).value().clone();
        if !Arc::ptr_eq(&stored, &candidate) {
            trace!(
                service = type_name::<S>(),
                "concurrent creation lost; adopting cached instance"
            );
        }
        downcast::<S>(stored)
    }

    pub fn contains<S: Service>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<S>())
    }

    /// Number of cached services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn factory(&self) -> &RemoteCallFactory {
        &self.factory
    }
}

fn downcast<S: Service>(entry: Entry) -> Result<Arc<S>> {
    entry.downcast::<S>().map_err(|_| {
        TwitterError::Configuration(format!(
            "cached service does not match requested type {}",
            type_name::<S>()
        ))
    })
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("factory", &self.factory)
            .field("cached", &self.services.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    use super::*;
    use crate::binding::ServiceBinding;
    use crate::descriptor::{EndpointSpec, ServiceDescriptor};
    use crate::factory::test_support::factory;

    static PING: ServiceDescriptor = ServiceDescriptor {
        name: "ping",
        endpoints: &[EndpointSpec::get("ping", "/1.1/ping.json", &[])],
    };

    struct Ping;

    impl Service for Ping {
        fn descriptor() -> &'static ServiceDescriptor {
            &PING
        }

        fn from_binding(_binding: ServiceBinding) -> Self {
            Self
        }
    }

    struct Pong;

    impl Service for Pong {
        fn descriptor() -> &'static ServiceDescriptor {
            &PING
        }

        fn from_binding(_binding: ServiceBinding) -> Self {
            Self
        }
    }

    static RACED_CREATIONS: AtomicUsize = AtomicUsize::new(0);

    struct Raced;

    impl Service for Raced {
        fn descriptor() -> &'static ServiceDescriptor {
            &PING
        }

        fn from_binding(_binding: ServiceBinding) -> Self {
            RACED_CREATIONS.fetch_add(1, Ordering::SeqCst);
            Self
        }
    }

    struct Broken;

    impl Service for Broken {
        fn descriptor() -> &'static ServiceDescriptor {
            static BROKEN: ServiceDescriptor = ServiceDescriptor { name: "broken", endpoints: &[] };
            &BROKEN
        }

        fn from_binding(_binding: ServiceBinding) -> Self {
            Self
        }
    }

    #[test]
    fn test_same_instance_returned() {
        let registry = ServiceRegistry::new(factory());
        assert!(registry.is_empty());

        let first = registry.get::<Ping>().unwrap();
        let second = registry.get::<Ping>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains::<Ping>());
    }

    #[test]
    fn test_types_are_cached_separately() {
        let registry = ServiceRegistry::new(factory());
        registry.get::<Ping>().unwrap();
        registry.get::<Pong>().unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_creation_is_not_cached() {
        let registry = ServiceRegistry::new(factory());
        assert!(matches!(registry.get::<Broken>(), Err(TwitterError::Configuration(_))));
        assert!(!registry.contains::<Broken>());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_first_access_converges() {
        const THREADS: usize = 50;
        let registry = ServiceRegistry::new(factory());
        let barrier = Barrier::new(THREADS);

        let results: Vec<Arc<Raced>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        registry.get::<Raced>().unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let first = &results[0];
        assert!(results.iter().all(|s| Arc::ptr_eq(s, first)));
        assert_eq!(registry.len(), 1);

        let created = RACED_CREATIONS.load(Ordering::SeqCst);
        assert!((1..=THREADS).contains(&created), "created {} instances", created);

        // Losers were dropped; only the cache and our handles hold the winner
        assert_eq!(Arc::strong_count(first), THREADS + 1);
    }
}
