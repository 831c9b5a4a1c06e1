use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use common::ProductId;
use domain::{Product, ProductDraft, ProductPatch};
use tokio::sync::{RwLock, broadcast};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::event::{Operation, StoreEvent};
use crate::failure::{FailureInjector, NoFailure};
use crate::seed::{SeedSource, starter_catalog};
use crate::snapshot::StoreSnapshot;

#[derive(Debug, Default)]
struct StoreState {
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
    revision: u64,
}

struct StoreInner {
    state: RwLock<StoreState>,
    notices: broadcast::Sender<StoreEvent>,
    seed: Box<dyn SeedSource>,
    failure: Box<dyn FailureInjector>,
    delay: Duration,
}

/// Single source of truth for the product collection.
///
/// The store owns the insertion-ordered collection plus the shared
/// `loading` and `error` flags. Every mutating operation walks the same
/// lifecycle: commit the pending phase (`loading` true, `error` cleared),
/// sleep the configured simulated delay, consult the failure injector,
/// then commit the outcome. Each commit happens under one write guard, so
/// readers see either the pre-call or the post-call collection, never a
/// partial merge.
///
/// Overlapping operations are neither queued nor rejected. Each sleeps
/// and commits on its own, so the flags follow whichever operation
/// completes last.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct ProductStore {
    inner: Arc<StoreInner>,
}

impl ProductStore {
    /// Creates a store with the default configuration: the starter
    /// catalog as seed, no failure injection, one second of simulated
    /// latency.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for a customized store.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Subscribes to change notices.
    ///
    /// The channel is lossy for lagging subscribers; treat a notice as a
    /// hint to pull [`ProductStore::snapshot`] again.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.notices.subscribe()
    }

    /// Returns the latest committed snapshot.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.inner.state.read().await;
        StoreSnapshot {
            products: state.products.clone(),
            loading: state.loading,
            error: state.error.clone(),
            revision: state.revision,
        }
    }

    /// Returns the product with the given id, if present.
    ///
    /// Pure read against the latest committed snapshot; does not touch
    /// the loading flag.
    pub async fn get(&self, id: ProductId) -> Option<Product> {
        let state = self.inner.state.read().await;
        state.products.iter().find(|p| p.id == id).cloned()
    }

    /// Returns every product strictly below its reorder threshold.
    ///
    /// Recomputed from the live collection on each call, never cached.
    pub async fn low_stock(&self) -> Vec<Product> {
        let state = self.inner.state.read().await;
        state
            .products
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect()
    }

    /// Replaces the entire collection with the catalog fetched from the
    /// seed source.
    ///
    /// Idempotent: calling again re-fetches and replaces, never appends.
    /// Each draft must pass the same validation as a `create` payload;
    /// one invalid draft fails the whole load. Valid drafts materialize
    /// with fresh ids and both timestamps set to now. On failure the
    /// collection stays as it was. Returns the number of products loaded.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<usize> {
        let started = Instant::now();
        self.begin(Operation::Load).await;
        tokio::time::sleep(self.inner.delay).await;

        if self.inner.failure.should_fail() {
            let message = Operation::Load.failure_message().to_string();
            return Err(self.fail(Operation::Load, StoreError::Backend(message), started).await);
        }

        let drafts = match self.inner.seed.fetch().await {
            Ok(drafts) => drafts,
            Err(e) => return Err(self.fail(Operation::Load, e.into(), started).await),
        };
        for draft in &drafts {
            if let Err(e) = draft.validate() {
                return Err(self.fail(Operation::Load, e.into(), started).await);
            }
        }

        let now = Utc::now();
        let products: Vec<Product> = drafts
            .into_iter()
            .map(|draft| Product::from_draft(ProductId::new(), draft, now))
            .collect();
        let count = products.len();

        {
            let mut state = self.inner.state.write().await;
            state.products = products;
            state.loading = false;
            state.error = None;
            state.revision += 1;
        }
        self.notify(StoreEvent::Loaded { count });
        self.complete(started);
        tracing::info!(count, "catalog loaded");
        Ok(count)
    }

    /// Creates a product from the draft and appends it to the collection.
    ///
    /// Assigns a fresh id and stamps both timestamps to now, so
    /// `updated_at` equals `created_at` on the new record. Returns the
    /// created product.
    #[tracing::instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: ProductDraft) -> Result<Product> {
        let started = Instant::now();
        self.begin(Operation::Create).await;
        tokio::time::sleep(self.inner.delay).await;

        if self.inner.failure.should_fail() {
            let message = Operation::Create.failure_message().to_string();
            return Err(self.fail(Operation::Create, StoreError::Backend(message), started).await);
        }
        if let Err(e) = draft.validate() {
            return Err(self.fail(Operation::Create, e.into(), started).await);
        }

        let product = Product::from_draft(ProductId::new(), draft, Utc::now());
        {
            let mut state = self.inner.state.write().await;
            state.products.push(product.clone());
            state.loading = false;
            state.error = None;
            state.revision += 1;
        }
        self.notify(StoreEvent::Created { id: product.id });
        self.complete(started);
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    /// Merges the patch onto the product with the given id and stamps
    /// `updated_at` to now.
    ///
    /// The id and `created_at` of the record cannot change; a patch has
    /// no such fields. A missing id is a reported failure. Returns the
    /// updated product.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        let started = Instant::now();
        self.begin(Operation::Update).await;
        tokio::time::sleep(self.inner.delay).await;

        if self.inner.failure.should_fail() {
            let message = Operation::Update.failure_message().to_string();
            return Err(self.fail(Operation::Update, StoreError::Backend(message), started).await);
        }
        if let Err(e) = patch.validate() {
            return Err(self.fail(Operation::Update, e.into(), started).await);
        }

        let updated = {
            let mut state = self.inner.state.write().await;
            match state.products.iter_mut().find(|p| p.id == id) {
                Some(product) => {
                    product.apply(patch);
                    product.updated_at = Utc::now();
                    let updated = product.clone();
                    state.loading = false;
                    state.error = None;
                    state.revision += 1;
                    Some(updated)
                }
                None => None,
            }
        };

        match updated {
            Some(product) => {
                self.notify(StoreEvent::Updated { id });
                self.complete(started);
                tracing::info!(product_id = %id, "product updated");
                Ok(product)
            }
            None => Err(self.fail(Operation::Update, StoreError::NotFound(id), started).await),
        }
    }

    /// Removes the product with the given id.
    ///
    /// Absence is not an error: removing an id that is not in the
    /// collection succeeds and changes nothing.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: ProductId) -> Result<()> {
        let started = Instant::now();
        self.begin(Operation::Remove).await;
        tokio::time::sleep(self.inner.delay).await;

        if self.inner.failure.should_fail() {
            let message = Operation::Remove.failure_message().to_string();
            return Err(self.fail(Operation::Remove, StoreError::Backend(message), started).await);
        }

        let removed = {
            let mut state = self.inner.state.write().await;
            let before = state.products.len();
            state.products.retain(|p| p.id != id);
            let removed = state.products.len() < before;
            state.loading = false;
            state.error = None;
            state.revision += 1;
            removed
        };
        self.notify(StoreEvent::Removed { id });
        self.complete(started);
        tracing::info!(product_id = %id, removed, "product removed");
        Ok(())
    }

    /// Commits the pending phase: `loading` on, previous error cleared.
    async fn begin(&self, op: Operation) {
        metrics::counter!("store_operations_total").increment(1);
        {
            let mut state = self.inner.state.write().await;
            state.loading = true;
            state.error = None;
            state.revision += 1;
        }
        self.notify(StoreEvent::OperationStarted { op });
    }

    /// Commits a failed outcome and hands the error back to the caller.
    async fn fail(&self, op: Operation, error: StoreError, started: Instant) -> StoreError {
        let message = error.to_string();
        {
            let mut state = self.inner.state.write().await;
            state.loading = false;
            state.error = Some(message.clone());
            state.revision += 1;
        }
        self.notify(StoreEvent::Failed { op, message });
        metrics::counter!("store_operations_failed").increment(1);
        metrics::histogram!("store_operation_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::warn!(op = %op, error = %error, "store operation failed");
        error
    }

    fn complete(&self, started: Instant) {
        metrics::counter!("store_operations_completed").increment(1);
        metrics::histogram!("store_operation_duration_seconds")
            .record(started.elapsed().as_secs_f64());
    }

    /// Sends a change notice. Lossy: nobody listening is fine.
    fn notify(&self, event: StoreEvent) {
        let _ = self.inner.notices.send(event);
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`ProductStore`].
#[derive(Default)]
pub struct StoreBuilder {
    config: Option<StoreConfig>,
    seed: Option<Box<dyn SeedSource>>,
    failure: Option<Box<dyn FailureInjector>>,
}

impl StoreBuilder {
    /// Sets the store configuration. Defaults to [`StoreConfig::default`].
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the seed source consumed by `load()`. Defaults to the starter
    /// catalog.
    pub fn seed(mut self, seed: impl SeedSource + 'static) -> Self {
        self.seed = Some(Box::new(seed));
        self
    }

    /// Sets the failure injector consulted by every operation. Defaults
    /// to never failing.
    pub fn failure_injector(mut self, injector: impl FailureInjector + 'static) -> Self {
        self.failure = Some(Box::new(injector));
        self
    }

    /// Builds the store.
    pub fn build(self) -> ProductStore {
        let config = self.config.unwrap_or_default();
        let (notices, _) = broadcast::channel(256);
        ProductStore {
            inner: Arc::new(StoreInner {
                state: RwLock::new(StoreState::default()),
                notices,
                seed: self.seed.unwrap_or_else(|| Box::new(starter_catalog())),
                failure: self.failure.unwrap_or_else(|| Box::new(NoFailure)),
                delay: config.simulated_delay,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::FailureSwitch;
    use crate::seed::{FixtureSeed, SeedError};
    use async_trait::async_trait;
    use domain::{Category, Gender};

    fn body_draft() -> ProductDraft {
        ProductDraft::new("Body", Category::Clothes0To3, Gender::Unisex, 15, 10)
    }

    fn diapers_draft() -> ProductDraft {
        ProductDraft::new("Fraldas", Category::Hygiene, Gender::Unisex, 5, 20)
    }

    /// Store with zero delay and the given fixture drafts.
    fn fast_store(drafts: Vec<ProductDraft>) -> ProductStore {
        ProductStore::builder()
            .config(StoreConfig::immediate())
            .seed(FixtureSeed::new(drafts))
            .build()
    }

    struct UnreachableSeed;

    #[async_trait]
    impl SeedSource for UnreachableSeed {
        async fn fetch(&self) -> std::result::Result<Vec<ProductDraft>, SeedError> {
            Err(SeedError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn new_store_is_empty_and_idle() {
        let store = fast_store(vec![]);
        let snapshot = store.snapshot().await;
        assert!(snapshot.products.is_empty());
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn load_replaces_instead_of_appending() {
        let store = fast_store(vec![body_draft(), diapers_draft()]);
        assert_eq!(store.load().await.unwrap(), 2);
        assert_eq!(store.load().await.unwrap(), 2);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.products.len(), 2);
        assert_eq!(snapshot.products[0].name, "Body");
        assert_eq!(snapshot.error, None);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn load_failure_keeps_collection_and_sets_error() {
        let switch = FailureSwitch::new();
        let store = ProductStore::builder()
            .config(StoreConfig::immediate())
            .seed(FixtureSeed::new(vec![body_draft()]))
            .failure_injector(switch.clone())
            .build();

        store.load().await.unwrap();
        switch.set_failing(true);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Falha ao carregar produtos.")
        );
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn unreachable_seed_surfaces_as_load_failure() {
        let store = ProductStore::builder()
            .config(StoreConfig::immediate())
            .seed(UnreachableSeed)
            .build();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Seed(_)));
        let snapshot = store.snapshot().await;
        assert!(snapshot.products.is_empty());
        assert_eq!(
            snapshot.error.as_deref(),
            Some("seed source error: connection refused")
        );
    }

    #[tokio::test]
    async fn load_rejects_blank_names_in_the_catalog() {
        let mut blank = diapers_draft();
        blank.name = "   ".to_string();
        let store = fast_store(vec![body_draft(), blank]);
        let kept = store.create(body_draft()).await.unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));

        // Neither the blank draft nor its valid neighbor lands.
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.products[0].id, kept.id);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("invalid product: product name must not be empty")
        );
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn create_assigns_unique_ids_and_equal_timestamps() {
        let store = fast_store(vec![]);
        let first = store.create(body_draft()).await.unwrap();
        let second = store.create(diapers_draft()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, first.updated_at);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.products.len(), 2);
        // Insertion order is preserved.
        assert_eq!(snapshot.products[0].id, first.id);
        assert_eq!(snapshot.products[1].id, second.id);
    }

    #[tokio::test]
    async fn create_rejects_blank_names() {
        let store = fast_store(vec![]);
        let mut draft = body_draft();
        draft.name = "  ".to_string();

        let err = store.create(draft).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));

        let snapshot = store.snapshot().await;
        assert!(snapshot.products.is_empty());
        assert_eq!(
            snapshot.error.as_deref(),
            Some("invalid product: product name must not be empty")
        );
    }

    #[tokio::test]
    async fn update_merges_and_preserves_identity() {
        let store = fast_store(vec![]);
        let created = store.create(body_draft()).await.unwrap();

        let updated = store
            .update(created.id, ProductPatch::quantity(100))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.quantity, 100);
        assert_eq!(updated.name, "Body");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let stored = store.get(created.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_missing_id_reports_not_found() {
        let store = fast_store(vec![]);
        store.create(body_draft()).await.unwrap();
        let before = store.snapshot().await;

        let ghost = ProductId::new();
        let err = store.update(ghost, ProductPatch::quantity(1)).await;
        assert!(matches!(err, Err(StoreError::NotFound(id)) if id == ghost));

        let after = store.snapshot().await;
        assert_eq!(after.products, before.products);
        assert_eq!(
            after.error.as_deref(),
            Some(format!("product not found: {ghost}").as_str())
        );
    }

    #[tokio::test]
    async fn remove_succeeds_even_when_absent() {
        let store = fast_store(vec![]);
        let created = store.create(body_draft()).await.unwrap();

        store.remove(created.id).await.unwrap();
        assert_eq!(store.get(created.id).await, None);

        // Second removal of the same id is still a success.
        store.remove(created.id).await.unwrap();
        let snapshot = store.snapshot().await;
        assert!(snapshot.products.is_empty());
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn injected_failure_leaves_collection_unchanged() {
        let switch = FailureSwitch::new();
        let store = ProductStore::builder()
            .config(StoreConfig::immediate())
            .seed(FixtureSeed::empty())
            .failure_injector(switch.clone())
            .build();
        let kept = store.create(body_draft()).await.unwrap();
        let before = store.snapshot().await;

        switch.set_failing(true);
        assert!(store.create(diapers_draft()).await.is_err());
        assert!(store.update(kept.id, ProductPatch::quantity(1)).await.is_err());
        assert!(store.remove(kept.id).await.is_err());

        let after = store.snapshot().await;
        assert_eq!(after.products, before.products);
        assert!(after.error.is_some());

        // The next successful operation clears the error.
        switch.set_failing(false);
        store.create(diapers_draft()).await.unwrap();
        assert_eq!(store.snapshot().await.error, None);
    }

    #[tokio::test]
    async fn loading_is_visible_while_an_operation_is_pending() {
        let store = ProductStore::builder()
            .config(StoreConfig {
                simulated_delay: Duration::from_millis(50),
            })
            .seed(FixtureSeed::new(vec![body_draft()]))
            .build();
        let mut notices = store.subscribe();

        let loader = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });

        assert_eq!(
            notices.recv().await.unwrap(),
            StoreEvent::OperationStarted {
                op: Operation::Load
            }
        );
        let pending = store.snapshot().await;
        assert!(pending.loading);
        assert_eq!(pending.error, None);

        loader.await.unwrap().unwrap();
        let done = store.snapshot().await;
        assert!(!done.loading);
        assert_eq!(done.products.len(), 1);
    }

    #[tokio::test]
    async fn new_attempt_clears_previous_error() {
        let switch = FailureSwitch::new();
        let store = ProductStore::builder()
            .config(StoreConfig {
                simulated_delay: Duration::from_millis(50),
            })
            .seed(FixtureSeed::new(vec![body_draft()]))
            .failure_injector(switch.clone())
            .build();

        switch.set_failing(true);
        assert!(store.load().await.is_err());
        assert!(store.snapshot().await.error.is_some());
        switch.set_failing(false);

        let mut notices = store.subscribe();
        let loader = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });

        notices.recv().await.unwrap();
        // Mid-flight: the old failure is already gone.
        let pending = store.snapshot().await;
        assert!(pending.loading);
        assert_eq!(pending.error, None);

        loader.await.unwrap().unwrap();
        assert_eq!(store.snapshot().await.error, None);
    }

    #[tokio::test]
    async fn low_stock_is_recomputed_each_call() {
        let store = fast_store(vec![]);
        let diapers = store.create(diapers_draft()).await.unwrap();
        store.create(body_draft()).await.unwrap();

        let low = store.low_stock().await;
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, diapers.id);

        store
            .update(diapers.id, ProductPatch::quantity(25))
            .await
            .unwrap();
        assert!(store.low_stock().await.is_empty());
    }

    #[tokio::test]
    async fn notices_follow_operations() {
        let store = fast_store(vec![body_draft(), diapers_draft()]);
        let mut notices = store.subscribe();

        store.load().await.unwrap();
        let created = store.create(body_draft()).await.unwrap();

        assert_eq!(
            notices.recv().await.unwrap(),
            StoreEvent::OperationStarted {
                op: Operation::Load
            }
        );
        assert_eq!(
            notices.recv().await.unwrap(),
            StoreEvent::Loaded { count: 2 }
        );
        assert_eq!(
            notices.recv().await.unwrap(),
            StoreEvent::OperationStarted {
                op: Operation::Create
            }
        );
        assert_eq!(
            notices.recv().await.unwrap(),
            StoreEvent::Created { id: created.id }
        );
    }

    #[tokio::test]
    async fn revision_advances_on_every_commit() {
        let store = fast_store(vec![body_draft()]);
        let initial = store.snapshot().await.revision;

        store.load().await.unwrap();
        let after_load = store.snapshot().await.revision;
        // Pending phase and outcome are both commits.
        assert_eq!(after_load, initial + 2);
    }
}
