use std::hash::Hash;
use std::sync::Arc;

use tokio::task;
use tokio::time::{sleep, Duration};

const CAPACITY: usize = 64;

pub struct Config {
    pub enabled: bool,
    pub ttl: Duration,
}

pub struct Cache<K, V> {
    enabled: bool,
    inner: quick_cache::sync::Cache<K, Arc<V>>,
    ttl: Duration,
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            enabled: config.enabled,
            ttl: config.ttl,
            inner: quick_cache::sync::Cache::new(CAPACITY),
        })
    }

    /// Stores `value` and schedules its removal once the TTL passed.
    /// Must be called from within a tokio runtime.
    pub fn insert(self: Arc<Self>, key: K, value: V) -> Arc<V> {
        let arcd = Arc::new(value);
        if !self.enabled {
            return arcd;
        }

        self.inner.insert(key.clone(), Arc::clone(&arcd));

        let self_clone = Arc::clone(&self);
        task::spawn(async move {
            sleep(self_clone.ttl).await;
            self_clone.inner.remove(&key);
        });

        arcd
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        if !self.enabled {
            return None;
        }

        self.inner.get(key)
    }
}
