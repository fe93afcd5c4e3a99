//! Session token management.
//!
//! Tokens are issued out of band (the web login flow); the console only
//! stores and clears them. No engine involved, the session store is
//! enough.

use anyhow::Result;
use clap::Subcommand;
use kinodeck_client::SessionStore;

use crate::config::Config;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store a session token for subsequent commands
    SetToken { token: String },
    /// Forget the stored token
    Clear,
    /// Show whether a token is stored
    Status,
}

pub fn run(action: AuthAction, config: &Config) -> Result<()> {
    let session = SessionStore::load();
    match action {
        AuthAction::SetToken { token } => {
            session.set_token(token);
            println!("Token stored.");
        }
        AuthAction::Clear => {
            session.clear();
            println!("Session cleared.");
        }
        AuthAction::Status => {
            if session.is_authenticated() {
                println!("Authenticated against {}.", config.api_url);
            } else {
                println!("No session token stored.");
            }
        }
    }
    Ok(())
}
