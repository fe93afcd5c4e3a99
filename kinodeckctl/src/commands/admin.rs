//! Back-office commands.
//!
//! Destructive actions run through the same confirmation dialog the UI
//! uses: the command loads the relevant queue, opens the dialog, fills
//! its input from flags (or a prompt), confirms, and reports how the
//! dialog settled. `--yes` answers the confirmation non-interactively;
//! required input still has to come from a flag then.

use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Subcommand, ValueEnum};
use kinodeck_client::Engine;
use kinodeck_client::domains::admin::{self, AdminState};
use kinodeck_client::domains::health;
use kinodeck_model::{
    ActionRequest, AdminActionKind, EntityKind, EntityRef, FilmmakerId, FlagId, MovieId,
    PaymentStatus, UserId,
};
use uuid::Uuid;

use crate::config::Config;
use crate::render;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Show the dashboard numbers
    Dashboard,
    /// Probe system health
    Health {
        /// Keep polling and print every probe
        #[arg(long)]
        watch: bool,
        /// Seconds between probes
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// Filmmaker applications
    Filmmakers {
        #[command(subcommand)]
        action: FilmmakerAction,
    },
    /// Movie submissions
    Movies {
        #[command(subcommand)]
        action: MovieAction,
    },
    /// Flagged content reports
    Flagged {
        #[command(subcommand)]
        action: FlaggedAction,
    },
    /// Platform user accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Payment reconciliation report
    Payments {
        /// Only payouts in this state
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
    },
}

#[derive(Subcommand)]
pub enum FilmmakerAction {
    /// List pending applications
    List,
    /// Approve an application
    Approve {
        id: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Reject an application; the applicant sees the reason
    Reject {
        id: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Mark bank details as verified, authorizing payouts
    VerifyBank {
        id: Uuid,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum MovieAction {
    /// List pending submissions
    List,
    /// Approve a submission
    Approve {
        id: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Reject a submission; the filmmaker sees the reason
    Reject {
        id: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum FlaggedAction {
    /// List open reports
    List,
    /// Uphold a report
    Uphold {
        id: Uuid,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Dismiss a report; the reason is recorded on the resolution
    Dismiss {
        id: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List user accounts
    List,
    /// Block a user; a reason is required
    Block {
        id: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Restore a blocked user
    Unblock { id: Uuid },
    /// Delete a user account permanently
    Delete { id: Uuid },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Pending,
    Settled,
    Flagged,
}

impl From<StatusFilter> for PaymentStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Pending => PaymentStatus::Pending,
            StatusFilter::Settled => PaymentStatus::Settled,
            StatusFilter::Flagged => PaymentStatus::Flagged,
        }
    }
}

pub async fn run(action: AdminAction, config: &Config, assume_yes: bool) -> Result<()> {
    let mut engine = super::engine(config)?;
    match action {
        AdminAction::Dashboard => {
            engine.handle(admin::Message::LoadDashboard).await;
            let state = &engine.state().admin.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            match &state.dashboard {
                Some(stats) => println!("{}", render::dashboard(stats)),
                None => bail!("dashboard unavailable"),
            }
        }

        AdminAction::Health { watch, interval } => {
            health_command(&mut engine, watch, interval).await?;
        }

        AdminAction::Filmmakers { action } => match action {
            FilmmakerAction::List => {
                engine.handle(admin::Message::LoadFilmmakers).await;
                let state = &engine.state().admin.state;
                if let Some(error) = &state.error {
                    bail!("{error}");
                }
                if state.pending_filmmakers.is_empty() {
                    println!("No pending filmmaker applications.");
                }
                for filmmaker in &state.pending_filmmakers {
                    println!("{}", render::filmmaker_row(filmmaker));
                }
            }
            FilmmakerAction::Approve { id, reason } => {
                let target = EntityRef::filmmaker(FilmmakerId(id));
                moderate(&mut engine, target, AdminActionKind::Approve, reason, assume_yes)
                    .await?;
            }
            FilmmakerAction::Reject { id, reason } => {
                let target = EntityRef::filmmaker(FilmmakerId(id));
                moderate(&mut engine, target, AdminActionKind::Reject, reason, assume_yes)
                    .await?;
            }
            FilmmakerAction::VerifyBank { id, notes } => {
                let target = EntityRef::filmmaker(FilmmakerId(id));
                moderate(&mut engine, target, AdminActionKind::VerifyBank, notes, assume_yes)
                    .await?;
            }
        },

        AdminAction::Movies { action } => match action {
            MovieAction::List => {
                engine.handle(admin::Message::LoadMovies).await;
                let state = &engine.state().admin.state;
                if let Some(error) = &state.error {
                    bail!("{error}");
                }
                if state.pending_movies.is_empty() {
                    println!("No pending movie submissions.");
                }
                for movie in &state.pending_movies {
                    println!("{}", render::pending_movie_row(movie));
                }
            }
            MovieAction::Approve { id, reason } => {
                let target = EntityRef::movie(MovieId(id));
                moderate(&mut engine, target, AdminActionKind::Approve, reason, assume_yes)
                    .await?;
            }
            MovieAction::Reject { id, reason } => {
                let target = EntityRef::movie(MovieId(id));
                moderate(&mut engine, target, AdminActionKind::Reject, reason, assume_yes)
                    .await?;
            }
        },

        AdminAction::Flagged { action } => match action {
            FlaggedAction::List => {
                engine.handle(admin::Message::LoadFlagged).await;
                let state = &engine.state().admin.state;
                if let Some(error) = &state.error {
                    bail!("{error}");
                }
                if state.flagged.is_empty() {
                    println!("No open reports.");
                }
                for item in &state.flagged {
                    println!("{}", render::flagged_row(item));
                }
            }
            FlaggedAction::Uphold { id, notes } => {
                let target = EntityRef::flagged(FlagId(id));
                moderate(&mut engine, target, AdminActionKind::Approve, notes, assume_yes)
                    .await?;
            }
            FlaggedAction::Dismiss { id, reason } => {
                let target = EntityRef::flagged(FlagId(id));
                moderate(&mut engine, target, AdminActionKind::Reject, reason, assume_yes)
                    .await?;
            }
        },

        AdminAction::Users { action } => match action {
            UserAction::List => {
                engine.handle(admin::Message::LoadUsers).await;
                let state = &engine.state().admin.state;
                if let Some(error) = &state.error {
                    bail!("{error}");
                }
                if state.users.is_empty() {
                    println!("No users.");
                }
                for user in &state.users {
                    println!("{}", render::user_row(user));
                }
            }
            UserAction::Block { id, reason } => {
                let target = EntityRef::user(UserId(id));
                moderate(&mut engine, target, AdminActionKind::Block, reason, assume_yes)
                    .await?;
            }
            UserAction::Unblock { id } => {
                let target = EntityRef::user(UserId(id));
                moderate(&mut engine, target, AdminActionKind::Unblock, None, assume_yes)
                    .await?;
            }
            UserAction::Delete { id } => {
                let target = EntityRef::user(UserId(id));
                moderate(&mut engine, target, AdminActionKind::Delete, None, assume_yes)
                    .await?;
            }
        },

        AdminAction::Payments { status } => {
            engine
                .handle(admin::Message::LoadPayments(status.map(Into::into)))
                .await;
            let state = &engine.state().admin.state;
            if let Some(error) = &state.error {
                bail!("{error}");
            }
            match &state.payments {
                Some(report) if report.records.is_empty() => println!("No payouts."),
                Some(report) => println!("{}", render::payments(report)),
                None => bail!("payment report unavailable"),
            }
        }
    }
    Ok(())
}

/// Drive one action through the confirmation dialog.
///
/// The queue is loaded first so the target can be checked against live
/// data; acting on an id the backend no longer lists fails here instead
/// of at dispatch.
async fn moderate(
    engine: &mut Engine,
    target: EntityRef,
    kind: AdminActionKind,
    input: Option<String>,
    assume_yes: bool,
) -> Result<()> {
    engine.handle(queue_load(target.kind)).await;
    if let Some(error) = &engine.state().admin.state.error {
        bail!("{error}");
    }
    if !in_queue(&engine.state().admin.state, &target) {
        bail!("no {} {} in the current queue", target.kind.as_str(), target.id);
    }

    engine
        .handle(admin::Message::OpenModal(ActionRequest::new(target, kind)))
        .await;
    let Some(dialog) = engine.state().admin.state.modal.config().cloned() else {
        bail!("another action is already in flight");
    };

    let input = match (input, dialog.input) {
        (Some(text), _) => Some(text),
        (None, Some(spec)) if spec.required => {
            if assume_yes {
                bail!("{} is required; pass --{}", spec.label, spec.label.to_lowercase());
            }
            Some(super::prompt(spec.label)?)
        }
        _ => None,
    };
    if let Some(text) = input {
        engine.handle(admin::Message::ModalInputChanged(text)).await;
    }

    if !assume_yes {
        println!("{}", dialog.message);
        if !super::confirm(&format!("{}?", dialog.confirm_text))? {
            engine.handle(admin::Message::ModalCancelled).await;
            println!("Cancelled.");
            return Ok(());
        }
    }

    engine.handle(admin::Message::ModalConfirmed).await;

    let state = &engine.state().admin.state;
    if let Some(error) = state.modal.error() {
        bail!("{error}");
    }
    if let Some(error) = &state.error {
        bail!("{error}");
    }
    if let Some(success) = &state.success {
        println!("{success}");
    }
    Ok(())
}

fn queue_load(kind: EntityKind) -> admin::Message {
    match kind {
        EntityKind::User => admin::Message::LoadUsers,
        EntityKind::Filmmaker => admin::Message::LoadFilmmakers,
        EntityKind::Movie => admin::Message::LoadMovies,
        EntityKind::FlaggedItem => admin::Message::LoadFlagged,
    }
}

fn in_queue(admin: &AdminState, target: &EntityRef) -> bool {
    match target.kind {
        EntityKind::User => admin.users.iter().any(|u| u.id.to_uuid() == target.id),
        EntityKind::Filmmaker => admin
            .pending_filmmakers
            .iter()
            .any(|f| f.id.to_uuid() == target.id),
        EntityKind::Movie => admin.pending_movies.iter().any(|m| m.id.to_uuid() == target.id),
        EntityKind::FlaggedItem => admin.flagged.iter().any(|f| f.id.to_uuid() == target.id),
    }
}

async fn health_command(engine: &mut Engine, watch: bool, interval: u64) -> Result<()> {
    let interval = Duration::from_secs(interval.max(1));
    engine.handle(health::Message::Start { interval }).await;

    let state = &engine.state().health.state;
    if let Some(error) = &state.error {
        if !watch {
            bail!("{error}");
        }
        println!("probe failed: {error}");
    } else if let Some(latest) = &state.latest {
        println!("{}", render::health(latest));
    }
    if !watch {
        engine.handle(health::Message::Stop).await;
        return Ok(());
    }

    // Each step consumes one poll tick and drains its probe.
    while engine.step().await {
        let state = &engine.state().health.state;
        match (&state.error, &state.latest) {
            (Some(error), _) => println!("probe failed: {error}"),
            (None, Some(latest)) => println!("{}", render::health(latest)),
            _ => {}
        }
    }
    Ok(())
}
