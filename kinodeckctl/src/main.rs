use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;

mod commands;
mod config;
mod render;

use commands::{admin, auth, catalog, subscribe, upload};
use config::Config;

#[derive(Parser)]
#[command(name = "kinodeckctl", about = "Kinodeck operator console", version)]
struct Cli {
    /// Override the API base URL for this invocation
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store or inspect the session token
    Auth {
        #[command(subcommand)]
        action: auth::AuthAction,
    },
    /// Browse, search, and purchase titles
    Catalog {
        #[command(subcommand)]
        action: catalog::CatalogAction,
    },
    /// Review and rate titles
    Review {
        #[command(subcommand)]
        action: catalog::ReviewAction,
    },
    /// Join the newsletter
    Subscribe {
        #[command(subcommand)]
        action: subscribe::SubscribeAction,
    },
    /// Manage newsletter subscribers
    Subscribers {
        #[command(subcommand)]
        action: subscribe::SubscribersAction,
    },
    /// Submit a movie with its media files
    Upload(upload::UploadArgs),
    /// Back-office moderation and reporting
    Admin {
        #[command(subcommand)]
        action: admin::AdminAction,
    },
    /// Show or change the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Persist a new API base URL
    SetUrl { url: String },
}

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("kinodeck_client", LevelFilter::Info)
        .filter_module("kinodeckctl", LevelFilter::Info)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let config = Config::load().with_override(cli.api_url.clone());

    match cli.command {
        Command::Auth { action } => auth::run(action, &config),
        Command::Catalog { action } => catalog::run(action, &config).await,
        Command::Review { action } => catalog::run_review(action, &config).await,
        Command::Subscribe { action } => subscribe::run(action, &config).await,
        Command::Subscribers { action } => {
            subscribe::run_subscribers(action, &config, cli.yes).await
        }
        Command::Upload(args) => upload::run(args, &config).await,
        Command::Admin { action } => admin::run(action, &config, cli.yes).await,
        Command::Config { action } => match action {
            ConfigAction::Show => {
                println!("api_url = {}", config.api_url);
                Ok(())
            }
            ConfigAction::SetUrl { url } => {
                Config { api_url: url }.save()?;
                println!("Configuration saved.");
                Ok(())
            }
        },
    }
}
