//! Demo entry point: drives the data layer through a day-one flow.

use dashboard::StockOverview;
use domain::{Category, Gender, ProductDraft, ProductPatch};
use session::{InMemoryCredentials, Session};
use store::{ProductStore, StoreConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Open a session against the stubbed backend
    let session = Session::new(InMemoryCredentials::new());
    let profile = session
        .login("demo@example.com", "demo")
        .await
        .expect("login failed");
    tracing::info!(user = %profile.name, "signed in");

    // 3. Build the store from the environment and watch its notices
    let store = ProductStore::builder()
        .config(StoreConfig::from_env())
        .build();
    let mut notices = store.subscribe();
    let notice_task = tokio::spawn(async move {
        while let Ok(event) = notices.recv().await {
            tracing::debug!(?event, "store notice");
        }
    });

    // 4. Load the starter catalog
    let count = store.load().await.expect("initial load failed");
    tracing::info!(count, "catalog ready");

    // 5. Register a delivery, then correct its counted quantity
    let wipes = store
        .create(ProductDraft::new(
            "Lenços umedecidos",
            Category::Hygiene,
            Gender::Unisex,
            3,
            6,
        ))
        .await
        .expect("create failed");
    store
        .update(wipes.id, ProductPatch::quantity(12))
        .await
        .expect("update failed");

    // 6. Render the dashboard numbers
    let snapshot = store.snapshot().await;
    let overview = StockOverview::from_products(&snapshot.products);
    for row in &overview.by_category {
        tracing::info!(label = %row.label, units = row.units, "category row");
    }
    for row in &overview.by_gender {
        tracing::info!(label = %row.label, units = row.units, "gender row");
    }
    tracing::info!(
        total_types = overview.totals.total_types,
        total_units = overview.totals.total_units,
        low_stock = overview.totals.low_stock_count,
        "stock totals"
    );
    for product in store.low_stock().await {
        tracing::warn!(
            name = %product.name,
            quantity = product.quantity,
            minimum = product.minimum_stock,
            "below reorder threshold"
        );
    }

    // 7. Sign out
    session.logout().await.expect("logout failed");
    notice_task.abort();
    tracing::info!("walkthrough finished");
}
