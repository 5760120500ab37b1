use pizzeria_service::config::Config;
use tracing::info;

pub fn main(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = config.store()?;
    store.run_migrations()?;
    info!(database_url = %config.database_url, "database is up to date");
    Ok(())
}
