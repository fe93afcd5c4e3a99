//! Plain-text rendering for console output.

use kinodeck_model::{
    DashboardStats, FlaggedItem, ManagedUser, Movie, PaymentReport, PendingFilmmaker,
    PendingMovie, PurchaseConfirmation, SubscriberRecord, SystemHealth, UserStatus,
};

/// Clip to `max` characters, ellipsized. Titles and reasons come from
/// user input and can be arbitrarily long.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{clipped}...")
}

pub fn movie_row(movie: &Movie) -> String {
    let mut tags = Vec::new();
    if let Some(price) = movie.view_price {
        let currency = movie.currency.as_deref().unwrap_or("");
        tags.push(format!("stream {price:.2} {currency}").trim_end().to_string());
    }
    if movie.allow_download {
        tags.push("downloadable".to_string());
    }
    if let Some(rating) = movie.avg_rating {
        tags.push(format!("rated {rating:.1}"));
    }

    if tags.is_empty() {
        format!("{:<28} {}", truncate(&movie.title, 28), movie.id)
    } else {
        format!("{:<28} {}  [{}]", truncate(&movie.title, 28), movie.id, tags.join(", "))
    }
}

pub fn movie_details(movie: &Movie) -> String {
    let mut lines = vec![format!("{} ({})", movie.title, movie.id)];
    if let Some(date) = &movie.release_date {
        lines.push(format!("  released:  {date}"));
    }
    if !movie.genres.is_empty() {
        let names: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        lines.push(format!("  genres:    {}", names.join(", ")));
    }
    if let Some(rating) = movie.avg_rating {
        lines.push(format!("  rating:    {rating:.1}"));
    }
    if let Some(price) = movie.view_price {
        let currency = movie.currency.as_deref().unwrap_or("");
        lines.push(format!("  stream:    {price:.2} {currency}").trim_end().to_string());
    }
    if let Some(price) = movie.download_price {
        let currency = movie.currency.as_deref().unwrap_or("");
        lines.push(format!("  download:  {price:.2} {currency}").trim_end().to_string());
    }
    if let Some(credit) = &movie.filmmaker {
        lines.push(format!("  filmmaker: {}", credit.name));
    }
    if let Some(overview) = &movie.overview {
        lines.push(format!("  {}", truncate(overview, 200)));
    }
    lines.join("\n")
}

pub fn filmmaker_row(filmmaker: &PendingFilmmaker) -> String {
    let bank = if filmmaker.bank_verified { "bank ok" } else { "bank unverified" };
    format!(
        "{:<24} {:<30} {}  submitted {}  [{}]",
        truncate(&filmmaker.name, 24),
        truncate(&filmmaker.email, 30),
        filmmaker.id,
        filmmaker.submitted_at.format("%Y-%m-%d"),
        bank,
    )
}

pub fn pending_movie_row(movie: &PendingMovie) -> String {
    format!(
        "{:<28} by {:<20} {}  submitted {}",
        truncate(&movie.title, 28),
        truncate(&movie.filmmaker_name, 20),
        movie.id,
        movie.submitted_at.format("%Y-%m-%d"),
    )
}

pub fn flagged_row(item: &FlaggedItem) -> String {
    format!(
        "{}  on {}  \"{}\"  reported {}",
        item.id,
        item.target,
        truncate(&item.reason, 40),
        item.submitted_at.format("%Y-%m-%d"),
    )
}

pub fn user_row(user: &ManagedUser) -> String {
    let status = match user.status {
        UserStatus::Active => "active".to_string(),
        UserStatus::Blocked => match &user.block_reason {
            Some(reason) => format!("blocked: {}", truncate(reason, 30)),
            None => "blocked".to_string(),
        },
    };
    format!(
        "{:<24} {:<30} {}  [{status}]",
        truncate(&user.name, 24),
        truncate(&user.email, 30),
        user.id,
    )
}

pub fn subscriber_row(subscriber: &SubscriberRecord) -> String {
    format!(
        "{:<36} {:?}  updated {}",
        truncate(&subscriber.email, 36),
        subscriber.status,
        subscriber.updated_at.format("%Y-%m-%d"),
    )
}

pub fn dashboard(stats: &DashboardStats) -> String {
    [
        format!("users:               {}", stats.total_users),
        format!("filmmakers:          {}", stats.total_filmmakers),
        format!("movies:              {}", stats.total_movies),
        format!("pending filmmakers:  {}", stats.pending_filmmakers),
        format!("pending movies:      {}", stats.pending_movies),
        format!("open flags:          {}", stats.open_flags),
        format!("active subscribers:  {}", stats.active_subscribers),
    ]
    .join("\n")
}

pub fn health(health: &SystemHealth) -> String {
    let latency = health
        .api_latency_ms
        .map(|ms| format!("{ms} ms"))
        .unwrap_or_else(|| "n/a".to_string());
    let transcoder = if health.transcoder_online { "online" } else { "OFFLINE" };
    format!(
        "status {}  latency {latency}  queue {}  transcoder {transcoder}  at {}",
        health.status,
        health.queue_depth,
        health.checked_at.format("%H:%M:%S"),
    )
}

pub fn payments(report: &PaymentReport) -> String {
    let mut lines: Vec<String> = report
        .records
        .iter()
        .map(|record| {
            format!(
                "{}  filmmaker {}  {:>10}  {}  period {}  [{}]",
                record.id,
                record.filmmaker_id,
                format_cents(record.amount_cents),
                record.currency,
                record.period,
                record.status.as_str(),
            )
        })
        .collect();
    lines.push(format!(
        "pending {}  settled {}",
        format_cents(report.total_pending_cents),
        format_cents(report.total_settled_cents),
    ));
    lines.join("\n")
}

/// One line summarizing a settled purchase. Every receipt field is
/// best-effort on the wire, so missing ones are just left out.
pub fn receipt(receipt: &PurchaseConfirmation) -> String {
    let mut line = receipt.kind.as_str().to_string();
    if let Some(amount) = receipt.amount {
        line.push_str(&format!(" {amount:.2}"));
        if let Some(currency) = &receipt.currency {
            line.push_str(&format!(" {currency}"));
        }
    }
    if let Some(reference) = &receipt.reference {
        line.push_str(&format!(" (ref {reference})"));
    }
    line
}

fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}
