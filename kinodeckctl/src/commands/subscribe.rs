//! Newsletter commands: public signup plus the admin subscriber list.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Subcommand, ValueEnum};
use kinodeck_client::domains::subscribe;
use kinodeck_model::{NotifyRequest, SubscriberStatus};

use crate::config::Config;
use crate::render;

#[derive(Subcommand)]
pub enum SubscribeAction {
    /// Sign an email address up for the newsletter
    Add { email: String },
}

#[derive(Subcommand)]
pub enum SubscribersAction {
    /// List one page of subscribers
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Activate or deactivate one subscriber
    SetStatus {
        email: String,
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Send a newsletter blast to every active subscriber
    Notify {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
        /// Attach an image to the blast
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for SubscriberStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => SubscriberStatus::Active,
            StatusArg::Inactive => SubscriberStatus::Inactive,
        }
    }
}

pub async fn run(action: SubscribeAction, config: &Config) -> Result<()> {
    let mut engine = super::engine(config)?;
    match action {
        SubscribeAction::Add { email } => {
            engine.handle(subscribe::Message::EmailChanged(email)).await;
            engine.handle(subscribe::Message::Submit).await;
            let state = &engine.state().subscribe.state;
            if let Some(error) = &state.field_error {
                bail!("{error}");
            }
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            if let Some(notice) = &state.notice {
                println!("{notice}");
            }
        }
    }
    Ok(())
}

pub async fn run_subscribers(
    action: SubscribersAction,
    config: &Config,
    assume_yes: bool,
) -> Result<()> {
    let mut engine = super::engine(config)?;
    match action {
        SubscribersAction::List { page } => {
            engine.handle(subscribe::Message::LoadPage(page)).await;
            let state = &engine.state().subscribe.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            match &state.page {
                Some(page) if page.subscribers.is_empty() => {
                    println!("No subscribers on page {}.", page.page);
                }
                Some(page) => {
                    for subscriber in &page.subscribers {
                        println!("{}", render::subscriber_row(subscriber));
                    }
                    println!("page {} of {} total", page.page, page.total);
                }
                None => bail!("subscriber list unavailable"),
            }
        }
        SubscribersAction::SetStatus { email, status } => {
            engine
                .handle(subscribe::Message::SetStatus { email, status: status.into() })
                .await;
            let state = &engine.state().subscribe.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            if let Some(notice) = &state.notice {
                println!("{notice}");
            }
        }
        SubscribersAction::Notify { subject, body, image } => {
            if !assume_yes && !super::confirm("Send this blast to every active subscriber?")? {
                println!("Cancelled.");
                return Ok(());
            }
            let request = NotifyRequest { subject, body };
            engine.handle(subscribe::Message::Notify { request, image }).await;
            let state = &engine.state().subscribe.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            if let Some(notice) = &state.notice {
                println!("{notice}");
            }
        }
    }
    Ok(())
}
