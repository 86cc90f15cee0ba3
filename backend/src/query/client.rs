//! The query client: a keyed cache of fetched results with a staleness window.

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    future::Future,
    sync::Arc,
    time::Duration,
};

use tokio::{sync::RwLock, time::Instant};

pub const DEFAULT_STALE_TIME: Duration = Duration::from_millis(60_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefaults {
    pub stale_time: Duration,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
        }
    }
}

/// Ordered key segments, e.g. `["shopping-list", "abc"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    updated_at: Instant,
}

pub struct QueryClient {
    defaults: QueryDefaults,
    entries: RwLock<HashMap<QueryKey, CacheEntry>>,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryClient")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::with_defaults(QueryDefaults::default())
    }

    pub fn with_defaults(defaults: QueryDefaults) -> Self {
        Self {
            defaults,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn defaults(&self) -> QueryDefaults {
        self.defaults
    }

    /// Cached data for `key` regardless of age. A value stored under a
    /// different type reads as absent.
    pub async fn get_query_data<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.entries
            .read()
            .await
            .get(key)
            .and_then(|entry| entry.data.downcast_ref::<T>().cloned())
    }

    pub async fn set_query_data<T>(&self, key: QueryKey, data: T)
    where
        T: Send + Sync + 'static,
    {
        self.entries.write().await.insert(
            key,
            CacheEntry {
                data: Arc::new(data),
                updated_at: Instant::now(),
            },
        );
    }

    /// Missing entries are stale; present ones once `stale_time` has elapsed.
    pub async fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries
            .read()
            .await
            .get(key)
            .map_or(true, |entry| self.entry_is_stale(entry))
    }

    /// Returns fresh cached data for `key`, or runs `fetcher` and caches its
    /// result. A failed fetch leaves the cache as it was.
    pub async fn fetch_query<T, E, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(data) = self.fresh::<T>(&key).await {
            tracing::trace!(%key, "query cache hit");
            return Ok(data);
        }

        let data = fetcher().await?;
        self.set_query_data(key, data.clone()).await;

        Ok(data)
    }

    /// Drops every entry whose key starts with `prefix`.
    pub async fn invalidate_queries(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));

        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn fresh<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if self.entry_is_stale(entry) {
            return None;
        }

        entry.data.downcast_ref::<T>().cloned()
    }

    fn entry_is_stale(&self, entry: &CacheEntry) -> bool {
        entry.updated_at.elapsed() >= self.defaults.stale_time
    }
}
