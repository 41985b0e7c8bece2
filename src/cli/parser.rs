use crate::export::ExportFormat;
use crate::models::RecordId;
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for infratrack
#[derive(Parser)]
#[command(
    name = "infratrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Field infrastructure tracker: work scope, daily work, routers, chambers, uploads and Excel export",
    long_about = None
)]
pub struct Cli {
    /// Use a local SQLite database instead of the remote backend
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Debug logging on stderr
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration (and the local database with --db)
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Work scope per block
    Scope {
        #[command(subcommand)]
        action: ScopeAction,
    },

    /// Daily work logs
    Work {
        #[command(subcommand)]
        action: WorkAction,
    },

    /// Infrastructure records (GP buildings, routers)
    Infra {
        #[command(subcommand)]
        action: InfraAction,
    },

    /// List infrastructure info rows
    InfraInfo {
        #[arg(long, help = "Filter by block ('all' for every block)")]
        block: Option<String>,
    },

    /// List chambers
    Chambers {
        #[arg(long, help = "Filter by block ('all' for every block)")]
        block: Option<String>,
    },

    /// Summary of the last 7, 30 or 90 days
    Analytics {
        #[arg(long, short, default_value = "30d", help = "7d, 30d or 90d")]
        period: String,
    },

    /// Export a dataset to a spreadsheet file
    Export {
        /// daily-work, infrastructure or chambers
        data_type: String,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long, value_name = "DIR", help = "Output directory (default: export_dir)")]
        dir: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Upload a file to object storage
    Upload {
        file: String,

        #[arg(long, help = "Target bucket (default: default_bucket)")]
        bucket: Option<String>,
    },

    /// Check backend connectivity and list tables
    Status,
}

#[derive(Subcommand)]
pub enum ScopeAction {
    /// List the scope of every block
    List,
    /// Set the total scope of a block (insert or replace)
    Set { block: String, total: f64 },
}

#[derive(Subcommand)]
pub enum WorkAction {
    /// List daily work, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Record a day of work
    Add {
        #[command(flatten)]
        fields: WorkFields,
    },
    /// Replace a work log by id
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: WorkFields,
    },
    /// Delete a work log by id
    Del { id: RecordId },
}

#[derive(Subcommand)]
pub enum InfraAction {
    /// List infrastructure records, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Register an infrastructure record
    Add {
        #[command(flatten)]
        fields: InfraFields,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "Filter by block ('all' for every block)")]
    pub block: Option<String>,

    #[arg(long = "live-status", help = "Filter infrastructure by live status")]
    pub live_status: Option<String>,

    #[arg(long, value_parser = parse_date, requires = "to", help = "Start date (YYYY-MM-DD)")]
    pub from: Option<NaiveDate>,

    #[arg(long, value_parser = parse_date, requires = "from", help = "End date (YYYY-MM-DD)")]
    pub to: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct WorkFields {
    #[arg(long)]
    pub district: String,
    #[arg(long)]
    pub block: String,
    #[arg(long = "machine")]
    pub machine_number: String,
    #[arg(long = "ring")]
    pub ring_name: String,
    #[arg(long = "route")]
    pub route_name: String,
    #[arg(long, value_parser = parse_date, help = "Work date (YYYY-MM-DD)")]
    pub date: NaiveDate,
    #[arg(long = "done", help = "Work done (e.g. metres of fibre)")]
    pub work_done: f64,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct InfraFields {
    #[arg(long)]
    pub block: String,
    #[arg(long = "gp")]
    pub gp_name: String,
    #[arg(long = "ring")]
    pub ring_name: Option<String>,
    #[arg(long)]
    pub building: Option<String>,
    #[arg(long = "router-category")]
    pub router_category: Option<String>,
    #[arg(long = "router-status")]
    pub router_status: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long = "meter")]
    pub electricity_meter: Option<String>,
    #[arg(long = "live-status")]
    pub live_status: Option<String>,
    #[arg(long = "live-date", value_parser = parse_date)]
    pub live_date: Option<NaiveDate>,
    #[arg(long = "not-live-reason")]
    pub not_live_reason: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}
