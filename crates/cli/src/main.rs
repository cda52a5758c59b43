//! Vantrack CLI - fleet complaint tracking from the command line
//!
//! Usage:
//! ```bash
//! vantrack init
//! vantrack register pat --secret pw123 --role reporter
//! vantrack submit --user pat --secret pw123 12 --category delay --description "15 min late"
//! vantrack list --status open --vehicle 12
//! vantrack set-status --user ann --secret pw456 1 resolved --response "Driver rerouted"
//! vantrack react --user kim --secret pw789 1 positive
//! vantrack dashboard --from 2024-03-01 --to 2024-03-31
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod db;

use commands::{auth, complaint, dashboard};

/// Vantrack - incident tracking for a vehicle fleet, SQLite-backed
#[derive(Parser)]
#[command(name = "vantrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/vantrack.db", global = true)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database schema
    Init {
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,

    /// Register a new identity
    Register {
        /// Username (unique)
        username: String,
        /// Secret (digested before storage, never persisted raw)
        #[arg(long)]
        secret: String,
        /// Role for the new identity
        #[arg(long)]
        role: RoleArg,
    },

    /// Verify a credential and show the assigned role
    Login {
        username: String,
        #[arg(long)]
        secret: String,
    },

    /// File a new complaint (Reporter role)
    Submit {
        /// Acting username
        #[arg(long)]
        user: String,
        #[arg(long)]
        secret: String,
        /// Reporting vehicle number
        vehicle: i64,
        /// Problem category
        #[arg(long)]
        category: CategoryArg,
        /// What happened
        #[arg(long)]
        description: String,
        /// Incident time as "YYYY-MM-DD HH:MM" (defaults to now)
        #[arg(long)]
        occurred_at: Option<String>,
        /// Attachment references (comma-separated)
        #[arg(long, value_delimiter = ',')]
        attach: Vec<String>,
    },

    /// List complaints matching a filter
    List {
        /// Exact vehicle match
        #[arg(long)]
        vehicle: Option<i64>,
        /// Case-sensitive category substring
        #[arg(long)]
        category_contains: Option<String>,
        /// Exact status match
        #[arg(long)]
        status: Option<StatusArg>,
        /// Inclusive incident-date lower bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Inclusive incident-date upper bound (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Update complaint status / response (Operator role)
    SetStatus {
        #[arg(long)]
        user: String,
        #[arg(long)]
        secret: String,
        /// Complaint id
        id: i64,
        /// New workflow status
        status: StatusArg,
        /// Response text (replaces the stored response)
        #[arg(long)]
        response: Option<String>,
    },

    /// Record a reviewer reaction (Reviewer role)
    React {
        #[arg(long)]
        user: String,
        #[arg(long)]
        secret: String,
        /// Complaint id
        id: i64,
        /// Reaction to record
        reaction: ReactionArg,
    },

    /// Metrics snapshot and status breakdown over a filtered subset
    Dashboard {
        #[arg(long)]
        vehicle: Option<i64>,
        #[arg(long)]
        status: Option<StatusArg>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Emit the metrics snapshot as JSON instead of the table view
        #[arg(long)]
        json: bool,
    },

    /// Export complaints matching a filter as CSV or JSON
    Export {
        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: commands::export::FormatArg,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        vehicle: Option<i64>,
        #[arg(long)]
        category_contains: Option<String>,
        #[arg(long)]
        status: Option<StatusArg>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Reporter,
    Operator,
    Reviewer,
}

impl RoleArg {
    pub fn to_core_type(&self) -> vantrack_core::Role {
        match self {
            RoleArg::Reporter => vantrack_core::Role::Reporter,
            RoleArg::Operator => vantrack_core::Role::Operator,
            RoleArg::Reviewer => vantrack_core::Role::Reviewer,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Fight,
    DriverMisconduct,
    Delay,
    Breakdown,
    Other,
}

impl CategoryArg {
    pub fn to_core_type(&self) -> vantrack_core::Category {
        match self {
            CategoryArg::Fight => vantrack_core::Category::Fight,
            CategoryArg::DriverMisconduct => vantrack_core::Category::DriverMisconduct,
            CategoryArg::Delay => vantrack_core::Category::Delay,
            CategoryArg::Breakdown => vantrack_core::Category::Breakdown,
            CategoryArg::Other => vantrack_core::Category::Other,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Open,
    InProgress,
    Resolved,
}

impl StatusArg {
    pub fn to_core_type(&self) -> vantrack_core::ComplaintStatus {
        match self {
            StatusArg::Open => vantrack_core::ComplaintStatus::Open,
            StatusArg::InProgress => vantrack_core::ComplaintStatus::InProgress,
            StatusArg::Resolved => vantrack_core::ComplaintStatus::Resolved,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReactionArg {
    Positive,
    NeedsFollowup,
    Exemplary,
}

impl ReactionArg {
    pub fn to_core_type(&self) -> vantrack_core::Reaction {
        match self {
            ReactionArg::Positive => vantrack_core::Reaction::Positive,
            ReactionArg::NeedsFollowup => vantrack_core::Reaction::NeedsFollowup,
            ReactionArg::Exemplary => vantrack_core::Reaction::Exemplary,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Ensure the data directory exists
    if let Some(parent) = cli.db.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    match cli.command {
        Commands::Init { force } => {
            db::init_database(&cli.db, force).await?;
            println!("✅ Database initialized at {:?}", cli.db);
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }

        Commands::Register {
            username,
            secret,
            role,
        } => {
            auth::register(&cli.db, &username, &secret, role).await?;
        }

        Commands::Login { username, secret } => {
            auth::login(&cli.db, &username, &secret).await?;
        }

        Commands::Submit {
            user,
            secret,
            vehicle,
            category,
            description,
            occurred_at,
            attach,
        } => {
            complaint::submit(
                &cli.db,
                &user,
                &secret,
                vehicle,
                category,
                &description,
                occurred_at.as_deref(),
                attach,
            )
            .await?;
        }

        Commands::List {
            vehicle,
            category_contains,
            status,
            from,
            to,
        } => {
            complaint::list(&cli.db, vehicle, category_contains, status, from, to).await?;
        }

        Commands::SetStatus {
            user,
            secret,
            id,
            status,
            response,
        } => {
            complaint::set_status(&cli.db, &user, &secret, id, status, response).await?;
        }

        Commands::React {
            user,
            secret,
            id,
            reaction,
        } => {
            complaint::react(&cli.db, &user, &secret, id, reaction).await?;
        }

        Commands::Dashboard {
            vehicle,
            status,
            from,
            to,
            json,
        } => {
            dashboard::run(&cli.db, vehicle, status, from, to, json).await?;
        }

        Commands::Export {
            format,
            out,
            vehicle,
            category_contains,
            status,
            from,
            to,
        } => {
            commands::export::run(
                &cli.db,
                format,
                out,
                vehicle,
                category_contains,
                status,
                from,
                to,
            )
            .await?;
        }
    }

    Ok(())
}
