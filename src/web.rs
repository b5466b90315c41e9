#![cfg(not(tarpaulin_include))]

use anyhow::Context;
use campus_portal::app::{self, AppState};
use campus_portal::config::{Cli, Command};
use campus_portal::login::hash_password;
use campus_portal::store::RecordStore;
use clap::Parser;
use std::sync::Arc;

/// Main entry point for the campus portal
///
/// Loads `.env` (if present), parses the command line and either serves the
/// portal or prints a password hash for the `login_users` sheet.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::HashPassword { password } => {
            let hash = hash_password(&password).map_err(anyhow::Error::msg)?;
            println!("{}", hash);
            Ok(())
        }
        Command::Serve(config) => {
            let key = config.cookie_key()?;
            let store = RecordStore::new(&config.workbook);

            // Fail fast on a missing or incomplete workbook.
            store
                .load_all()
                .with_context(|| format!("cannot use workbook {}", config.workbook.display()))?;

            let state = Arc::new(AppState::new(store, key).context("failed to compile templates")?);
            log::info!("Serving {}", config.workbook.display());
            app::run(state, config.bind, &config.static_dir).await?;
            Ok(())
        }
    }
}
