use axum_extra::extract::cookie::Key;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Shortest accepted session secret, in bytes
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Parser)]
#[command(name = "campus", version, about = "Campus portal backed by an xlsx workbook")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web server
    Serve(Config),

    /// Print an Argon2 hash for the password column of `login_users`
    HashPassword {
        /// Password to hash
        password: String,
    },
}

/// Server settings, read from flags or the environment (including `.env`).
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Path to the campus workbook
    #[arg(long, env = "CAMPUS_WORKBOOK")]
    pub workbook: PathBuf,

    /// Secret used to sign session cookies
    #[arg(long, env = "CAMPUS_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Address to listen on
    #[arg(long, env = "CAMPUS_BIND", default_value = "127.0.0.1:10000")]
    pub bind: SocketAddr,

    /// Directory served under /static
    #[arg(long, env = "CAMPUS_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}

impl Config {
    /// Cookie signing key derived from the session secret.
    pub fn cookie_key(&self) -> Result<Key, ConfigError> {
        let secret = self.secret.as_bytes();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret {
                min: MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }
        Ok(Key::derive_from(secret))
    }
}
