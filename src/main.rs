use std::sync::Arc;

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use seedle::config::SeedleConfig;
use seedle::ingest::{HttpSource, load_snapshot};
use seedle::{cache, web};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedleConfig::load()?;

    if config.cache.enabled {
        if let Err(e) = cache::init(expand_home(&config.cache.location)) {
            // Startup continues; fetches just skip the cache.
            warn!("Failed to initialize cache: {:#}", e);
        }
    }

    let resources = HttpSource::new(&config.datasets.resources_url, &config.fetch)?;
    let institutions = HttpSource::new(&config.datasets.institutions_url, &config.fetch)?;
    let snapshot = load_snapshot(&resources, &institutions, config.datasets.clean).await;

    web::run(&config, Arc::new(snapshot)).await
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}
