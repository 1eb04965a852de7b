use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};
use twin_core::export::write_csv;
use twin_core::{ForecastSession, ServiceRegistry, SharedSnapshot};
use twin_engine::LocalServiceFactory;
use twin_http::HttpServiceFactory;

use crate::config::AppConfig;

/// Registry with every backend this binary ships.
pub fn build_registry() -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry.register(Box::new(LocalServiceFactory));
    registry.register(Box::new(HttpServiceFactory));
    registry
}

/// Runs one forecast cycle for `config` and returns the published snapshot.
pub async fn run_forecast(
    registry: &ServiceRegistry,
    config: &AppConfig,
) -> Result<SharedSnapshot> {
    debug!(backend = %config.service.backend, "creating forecasting service");
    let service = registry
        .create(&config.service)
        .await
        .with_context(|| format!("failed to set up '{}' backend", config.service.backend))?;

    let session = ForecastSession::new(service);
    let snapshot = session
        .refresh(&config.salary, config.expense_pairs())
        .await
        .context("forecast failed")?;
    Ok(snapshot)
}

/// Writes the snapshot's projection to `path` as CSV.
pub fn write_csv_file(
    snapshot: &SharedSnapshot,
    path: &Path,
) -> Result<()> {
    let rows = snapshot
        .csv_rows()
        .context("failed to build CSV rows")?;
    let file =
        File::create(path).with_context(|| format!("failed to create: {}", path.display()))?;
    write_csv(&rows, file).with_context(|| format!("failed to write: {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len().saturating_sub(1), "projection exported");
    Ok(())
}
