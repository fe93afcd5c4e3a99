//! Command handlers, one module per console area.
//!
//! Every handler drives the same headless [`Engine`] the UI embeds:
//! commands inject messages, pump the engine, and read the resulting
//! state. Nothing here talks to the API directly.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use kinodeck_client::{ApiClient, Engine, Services, SessionStore, State};

use crate::config::Config;

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod subscribe;
pub mod upload;

/// Build an engine wired to the configured backend with the stored
/// session attached.
pub fn engine(config: &Config) -> Result<Engine> {
    let session = SessionStore::load();
    let client = ApiClient::from_str(&config.api_url, session)
        .with_context(|| format!("invalid API base URL: {}", config.api_url))?;
    let services = Services::over_api(Arc::new(client));
    Ok(Engine::new(State::new(services)))
}

/// Read one line from stdin under a label. Used for reasons the flags
/// did not supply.
pub fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask a yes/no question, defaulting to no.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
