//! Process-local symbol registry with de-duplicated, atomically swapped loads

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use arc_swap::ArcSwap;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::catalog::AssetCatalogSource;
use super::snapshot::{AssetClass, Direction, SymbolSnapshot};
use crate::error::{Error, Result};

type LoadOutcome = std::result::Result<Arc<SymbolSnapshot>, Arc<Error>>;
type LoadFuture = Shared<BoxFuture<'static, LoadOutcome>>;

/// Holds the current [`SymbolSnapshot`] and rebuilds it from an
/// [`AssetCatalogSource`].
///
/// # Thread Safety
///
/// Readers grab the current snapshot with a single atomic load and keep that
/// `Arc` for the duration of a conversion, so a concurrent refresh never
/// produces a half-updated view. At most one catalog fetch is in flight at a
/// time; callers arriving while it runs await the same shared future and get
/// the same snapshot or the same error.
pub struct SymbolRegistry {
    source: Arc<dyn AssetCatalogSource>,
    current: ArcSwap<SymbolSnapshot>,
    loaded: AtomicBool,
    in_flight: Mutex<Option<LoadFuture>>,
    next_version: AtomicU64,
}

impl SymbolRegistry {
    /// Create an empty registry. Nothing is fetched until first use.
    pub fn new(source: Arc<dyn AssetCatalogSource>) -> Self {
        Self {
            source,
            current: ArcSwap::from_pointee(SymbolSnapshot::empty()),
            loaded: AtomicBool::new(false),
            in_flight: Mutex::new(None),
            next_version: AtomicU64::new(1),
        }
    }

    /// Whether a snapshot has been loaded successfully at least once
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// The current snapshot. Empty until the first successful load.
    pub fn snapshot(&self) -> Arc<SymbolSnapshot> {
        self.current.load_full()
    }

    /// Return the current snapshot, loading it first if nothing has been loaded yet
    pub async fn ensure_loaded(&self) -> Result<Arc<SymbolSnapshot>> {
        if self.is_loaded() {
            return Ok(self.snapshot());
        }
        self.load(false).await
    }

    /// Fetch the catalog again and swap in the new snapshot.
    ///
    /// Joins a load that is already running instead of starting a second one.
    /// On failure the previous snapshot stays active.
    pub async fn refresh(&self) -> Result<Arc<SymbolSnapshot>> {
        self.load(true).await
    }

    /// Fail-open lookup against the current snapshot. Does not trigger a load.
    pub fn lookup(&self, id: &str, direction: Direction) -> String {
        let snapshot = self.current.load();
        match snapshot.find(id, direction) {
            Some(converted) => converted.to_owned(),
            None => {
                tracing::trace!(symbol = %id, ?direction, "no mapping for symbol");
                id.to_owned()
            }
        }
    }

    /// Refresh the registry every `interval` on a background task.
    ///
    /// The first refresh happens after one full interval. Failures are logged
    /// and the previous snapshot is kept. The task ends once the registry is
    /// dropped.
    pub fn spawn_refresh(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let registry: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(registry) = registry.upgrade() else {
                    break;
                };
                if let Err(e) = registry.refresh().await {
                    tracing::warn!(error = %e, "periodic symbol refresh failed");
                }
            }
        })
    }

    async fn load(&self, force: bool) -> Result<Arc<SymbolSnapshot>> {
        let load = {
            let mut slot = self.in_flight.lock().await;
            if !force && self.is_loaded() {
                return Ok(self.snapshot());
            }
            match slot.as_ref() {
                Some(load) => load.clone(),
                None => {
                    let load = self.start_load();
                    *slot = Some(load.clone());
                    load
                }
            }
        };

        let outcome = load.clone().await;

        {
            let mut slot = self.in_flight.lock().await;
            if slot.as_ref().is_some_and(|current| current.ptr_eq(&load)) {
                *slot = None;
                if let Ok(snapshot) = &outcome {
                    self.install(snapshot.clone());
                }
            }
        }

        outcome.map_err(Error::MetadataFetch)
    }

    fn start_load(&self) -> LoadFuture {
        let source = Arc::clone(&self.source);
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        async move {
            tracing::debug!(version, "loading symbol catalog");
            match source.fetch_asset_catalog().await {
                Ok(entries) => Ok(Arc::new(SymbolSnapshot::build(entries, version))),
                Err(e) => {
                    tracing::warn!(version, error = %e, "symbol catalog fetch failed");
                    Err(Arc::new(e))
                }
            }
        }
        .boxed()
        .shared()
    }

    fn install(&self, snapshot: Arc<SymbolSnapshot>) {
        tracing::debug!(
            version = snapshot.version(),
            perps = snapshot.len(AssetClass::Perp),
            spots = snapshot.len(AssetClass::Spot),
            "installed symbol snapshot"
        );
        self.current.store(snapshot);
        self.loaded.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolRegistry")
            .field("loaded", &self.is_loaded())
            .field("version", &self.current.load().version())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::AssetSymbolEntry;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Catalog source that counts fetches and can be told to fail or wait
    struct CountingSource {
        calls: AtomicUsize,
        fail_first: usize,
        gate: Option<Arc<Notify>>,
        entries: std::sync::Mutex<Vec<AssetSymbolEntry>>,
    }

    impl CountingSource {
        fn new(entries: Vec<AssetSymbolEntry>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first: 0,
                gate: None,
                entries: std::sync::Mutex::new(entries),
            }
        }

        fn failing_first(mut self, n: usize) -> Self {
            self.fail_first = n;
            self
        }

        fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_entries(&self, entries: Vec<AssetSymbolEntry>) {
            *self.entries.lock().unwrap() = entries;
        }
    }

    #[async_trait]
    impl AssetCatalogSource for CountingSource {
        async fn fetch_asset_catalog(&self) -> Result<Vec<AssetSymbolEntry>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if call < self.fail_first {
                return Err(Error::Api("HTTP 503 - Service Unavailable".to_string()));
            }
            Ok(self.entries.lock().unwrap().clone())
        }
    }

    fn btc_eth() -> Vec<AssetSymbolEntry> {
        vec![
            AssetSymbolEntry::perp("0", "BTC"),
            AssetSymbolEntry::perp("1", "ETH"),
        ]
    }

    #[tokio::test]
    async fn test_starts_empty_and_unloaded() {
        let source = Arc::new(CountingSource::new(btc_eth()));
        let registry = SymbolRegistry::new(source.clone());

        assert!(!registry.is_loaded());
        assert!(registry.snapshot().is_empty());
        assert_eq!(registry.lookup("0", Direction::ToDisplay), "0");
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_ensure_loaded_fetches_once() {
        let source = Arc::new(CountingSource::new(btc_eth()));
        let registry = SymbolRegistry::new(source.clone());

        let first = registry.ensure_loaded().await.unwrap();
        let second = registry.ensure_loaded().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls(), 1);
        assert_eq!(registry.lookup("0", Direction::ToDisplay), "BTC");
        assert_eq!(registry.lookup("ETH", Direction::ToInternal), "1");
    }

    #[tokio::test]
    async fn test_concurrent_first_loads_are_deduplicated() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(CountingSource::new(btc_eth()).gated(gate.clone()));
        let registry = Arc::new(SymbolRegistry::new(source.clone()));

        let waiters: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.ensure_loaded().await })
            })
            .collect();

        while source.calls() == 0 {
            tokio::task::yield_now().await;
        }
        // let every waiter reach the shared future before the fetch completes
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
        gate.notify_one();

        let mut snapshots = Vec::new();
        for waiter in waiters {
            snapshots.push(waiter.await.unwrap().unwrap());
        }

        assert_eq!(source.calls(), 1);
        assert!(snapshots.iter().all(|s| Arc::ptr_eq(s, &snapshots[0])));
        assert_eq!(snapshots[0].lookup("1", Direction::ToDisplay), "ETH");
    }

    #[tokio::test]
    async fn test_concurrent_failure_is_shared_then_retry_succeeds() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(
            CountingSource::new(btc_eth())
                .failing_first(1)
                .gated(gate.clone()),
        );
        let registry = Arc::new(SymbolRegistry::new(source.clone()));

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.ensure_loaded().await })
            })
            .collect();

        while source.calls() == 0 {
            tokio::task::yield_now().await;
        }
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
        gate.notify_one();

        let mut errors = Vec::new();
        for waiter in waiters {
            match waiter.await.unwrap() {
                Err(Error::MetadataFetch(inner)) => errors.push(inner),
                other => panic!("expected metadata fetch error, got {other:?}"),
            }
        }
        assert_eq!(source.calls(), 1);
        assert!(errors.iter().all(|e| Arc::ptr_eq(e, &errors[0])));
        assert!(matches!(errors[0].as_ref(), Error::Api(_)));
        assert!(!registry.is_loaded());
        assert!(registry.snapshot().is_empty());

        // not poisoned: the next call fetches again and succeeds
        gate.notify_one();
        let snapshot = registry.ensure_loaded().await.unwrap();
        assert_eq!(source.calls(), 2);
        assert!(registry.is_loaded());
        assert_eq!(snapshot.lookup("0", Direction::ToDisplay), "BTC");
    }

    #[tokio::test]
    async fn test_refresh_swaps_snapshot_and_keeps_old_references_intact() {
        let source = Arc::new(CountingSource::new(btc_eth()));
        let registry = SymbolRegistry::new(source.clone());

        let old = registry.ensure_loaded().await.unwrap();
        source.set_entries(vec![AssetSymbolEntry::perp("0", "XBT")]);
        let new = registry.refresh().await.unwrap();

        assert_eq!(source.calls(), 2);
        assert!(new.version() > old.version());
        assert_eq!(old.lookup("0", Direction::ToDisplay), "BTC");
        assert_eq!(new.lookup("0", Direction::ToDisplay), "XBT");
        assert_eq!(registry.lookup("0", Direction::ToDisplay), "XBT");
        assert_eq!(registry.lookup("1", Direction::ToDisplay), "1");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let source = Arc::new(CountingSource::new(btc_eth()));
        let registry = SymbolRegistry::new(source.clone());
        let loaded = registry.ensure_loaded().await.unwrap();

        let failing = Arc::new(CountingSource::new(Vec::new()).failing_first(usize::MAX));
        let registry = SymbolRegistry {
            source: failing,
            current: ArcSwap::new(loaded.clone()),
            loaded: AtomicBool::new(true),
            in_flight: Mutex::new(None),
            next_version: AtomicU64::new(loaded.version() + 1),
        };

        let err = registry.refresh().await.unwrap_err();
        assert!(matches!(err, Error::MetadataFetch(_)));
        assert!(Arc::ptr_eq(&registry.snapshot(), &loaded));
        assert_eq!(registry.lookup("1", Direction::ToDisplay), "ETH");
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_refresh_reloads_on_interval() {
        let source = Arc::new(CountingSource::new(btc_eth()));
        let registry = Arc::new(SymbolRegistry::new(source.clone()));
        registry.ensure_loaded().await.unwrap();

        let handle = registry.spawn_refresh(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(61)).await;
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
        assert_eq!(source.calls(), 2);

        drop(registry);
        tokio::time::sleep(Duration::from_secs(61)).await;
        handle.await.unwrap();
        assert_eq!(source.calls(), 2);
    }
}
