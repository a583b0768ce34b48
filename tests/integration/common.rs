//! Common test harness for shopdesk integration tests.

use std::sync::{Arc, Once};

use anyhow::{Context, Result};
use shopdesk::resources::card_brand::{self, CardBrand};
use shopdesk::testing::InMemoryTransport;
use shopdesk::{Client, RecordStatus};

static TRACING: Once = Once::new();

/// Installs a `tracing` subscriber honouring `RUST_LOG`, once per binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Twelve brands, ids 1..=12, "Visa" first, ids 10..=12 inactive.
pub fn twelve_brands() -> Vec<CardBrand> {
    card_brand::sample(12)
        .into_iter()
        .map(|mut brand| {
            brand.status = RecordStatus::from_active(brand.id < 10);
            brand
        })
        .collect()
}

/// An in-memory client seeded with `records`.
pub fn client_with(records: Vec<CardBrand>) -> Result<Client> {
    init_tracing();
    let client = Client::builder()
        .in_memory()
        .build()
        .context("in-memory client should build")?;
    client.seed(records).context("seeding should succeed")?;
    Ok(client)
}

/// The in-memory transport behind `client`'s card brands.
pub fn brand_transport(client: &Client) -> Result<Arc<InMemoryTransport<CardBrand>>> {
    client
        .in_memory::<CardBrand>()
        .context("client should be in-memory")
}
