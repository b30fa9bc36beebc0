use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommand,
}

#[derive(Subcommand)]
pub enum EventCommand {
    List(EventListArgs),
    Get(EventGetArgs),
    Create(EventCreateArgs),
    Update(EventUpdateArgs),
    Cancel(EventCancelArgs),
}

#[derive(Args)]
pub struct EventListArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub page: Option<i64>,
    #[arg(long)]
    pub limit: Option<i64>,
    #[arg(long, help = "Print the raw JSON instead of a table")]
    pub json: bool,
}

#[derive(Args)]
pub struct EventGetArgs {
    pub event_id: String,
}

#[derive(Args)]
pub struct EventCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub venue: String,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, help = "RFC 3339 timestamp, e.g. 2026-09-01T18:00:00Z")]
    pub starts_at: DateTime<Utc>,
    #[arg(long)]
    pub ends_at: Option<DateTime<Utc>>,
    #[arg(long)]
    pub price: f64,
    #[arg(long)]
    pub capacity: i64,
}

#[derive(Args)]
pub struct EventUpdateArgs {
    pub event_id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub venue: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub starts_at: Option<DateTime<Utc>>,
    #[arg(long)]
    pub ends_at: Option<DateTime<Utc>>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub capacity: Option<i64>,
    #[arg(long, help = "draft, published, cancelled or completed")]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct EventCancelArgs {
    pub event_id: String,
}
