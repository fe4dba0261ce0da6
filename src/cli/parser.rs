use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rtimesheet
/// CLI application to track a personal timesheet with SQLite
#[derive(Parser)]
#[command(
    name = "rtimesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal timesheet: track worked hours, adjustments and ticket allocations using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Record or update the hours of a day
    Day {
        /// Date of the entry (YYYY-MM-DD)
        date: String,

        /// Clock-in time (HH:MM)
        #[arg(long = "in", help = "Clock-in time (HH:MM)")]
        start: Option<String>,

        /// Lunch break in minutes
        #[arg(long = "lunch", help = "Lunch break duration in minutes")]
        lunch: Option<i64>,

        /// Clock-out time (HH:MM)
        #[arg(long = "out", help = "Clock-out time (HH:MM)")]
        end: Option<String>,

        /// Adjustment as KIND:HOURS, e.g. L:7.5 (repeatable, ordered)
        #[arg(
            long = "adjust",
            help = "Adjustment KIND:HOURS with KIND one of P, L, S, T (repeatable)"
        )]
        adjust: Vec<String>,

        /// Free-text comment for the day
        #[arg(long = "comment")]
        comment: Option<String>,

        /// Reset every field before applying the given options
        #[arg(long = "clear")]
        clear: bool,
    },

    /// Fill a day with one standard-day adjustment (leave/sick/training)
    Quick {
        /// Date of the entry (YYYY-MM-DD)
        date: String,

        /// leave | sick | training
        kind: String,

        /// Overwrite a non-blank entry
        #[arg(long = "force", short = 'f')]
        force: bool,
    },

    /// Manage billing tickets
    Ticket {
        #[command(subcommand)]
        action: TicketCmd,
    },

    /// Manage per-day ticket allocations
    Alloc {
        #[command(subcommand)]
        action: AllocCmd,
    },

    /// Show a year / month / day summary
    List {
        #[arg(
            long,
            short,
            help = "Period to show: YYYY, YYYY-MM or YYYY-MM-DD (default: current month)"
        )]
        period: Option<String>,
    },

    /// Interactive timesheet browser (reads commands from stdin)
    Browse,

    /// Populate bank holidays for a month from the public feed
    Holidays {
        /// Month to populate (YYYY-MM)
        month: String,

        #[arg(long, help = "Override the holiday feed URL")]
        url: Option<String>,
    },

    /// Export the invoicing report
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum TicketCmd {
    /// Create a new ticket
    Add {
        /// Short code, max 8 chars (e.g. PROJ-123)
        id: String,
        description: String,
    },

    /// List tickets
    List {
        #[arg(long, help = "Include archived tickets")]
        all: bool,
    },

    /// Search tickets by id or description
    Search {
        query: String,

        #[arg(long, help = "Include archived tickets")]
        all: bool,
    },

    /// Archive a ticket (kept for history, hidden from selection)
    Archive { id: String },

    /// Bring an archived ticket back
    Unarchive { id: String },

    /// Delete a ticket without allocations
    Del { id: String },
}

#[derive(Subcommand)]
pub enum AllocCmd {
    /// Set the hours allocated to a ticket for a date
    Set {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Ticket id
        ticket: String,
        /// Decimal hours (e.g. 7.5)
        hours: String,

        #[arg(long, help = "Mark as entered in the client billing system")]
        client: bool,
    },

    /// Remove the allocation of a ticket for a date
    Del {
        date: String,
        ticket: String,
    },

    /// Show allocations and coverage for a date
    Show { date: String },
}
