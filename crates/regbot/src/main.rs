use std::sync::Arc;

use regbot_core::{config::Config, registry::UserRegistry};

#[tokio::main]
async fn main() -> Result<(), regbot_core::Error> {
    regbot_core::logging::init("regbot")?;

    let cfg = Arc::new(Config::load()?);

    tracing::info!("bot initializing...");
    let registry = UserRegistry::new(cfg.database_path.clone());
    registry.initialize().await?;
    tracing::info!(
        path = %registry.path().display(),
        users = registry.count().await?,
        "user registry ready"
    );

    regbot_telegram::router::run_polling(cfg, registry)
        .await
        .map_err(|e| regbot_core::Error::External(format!("telegram bot failed: {e:#}")))?;

    Ok(())
}
