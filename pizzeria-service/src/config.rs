use clap::Args;

use crate::store::{Store, StoreError};

/// Settings shared by every subcommand. Each value may also come from the
/// environment (or a `.env` file loaded at start-up).
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = "app.db", global = true)]
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 8, global = true)]
    pub pool_size: u32,
}

impl Config {
    pub fn store(&self) -> Result<Store, StoreError> {
        Store::connect(&self.database_url, self.pool_size)
    }
}
