use anyhow::{Context, Result};
use rental::config::RentalConfig;
use rental::server::ServerBuilder;
use rental::storage::{InMemoryStore, load_seed};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RentalConfig::load().context("loading configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .context("parsing log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = InMemoryStore::new();
    load_seed(&store, &config.seed)
        .await
        .context("loading seed data")?;

    if config.seed.employees.is_empty() {
        tracing::warn!("no employees seeded; reservations cannot be created");
    }

    tracing::info!(
        actor_policy = ?config.actor.policy,
        default_sort = %config.listing.default_sort,
        "starting rental server"
    );

    ServerBuilder::new()
        .with_store(store)
        .with_config(&config)?
        .serve(&config.server.bind)
        .await
}
