use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rHeadcount
/// CLI application to track people counts per location with SQLite
#[derive(Parser)]
#[command(
    name = "rheadcount",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track in/out people counts per location and keep a timesheet of occupancy intervals",
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

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register or list locations
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },

    /// Show current counts of a location
    Show {
        /// Location id
        id: String,
    },

    /// Show the full interval history of a location
    Timesheet {
        /// Location id
        id: String,
    },

    /// Apply an in/out count delta to a location
    Count {
        /// Location id
        id: String,

        #[arg(long = "in", help = "People that entered since the last report")]
        in_count: Option<String>,

        #[arg(long = "out", help = "People that left since the last report")]
        out_count: Option<String>,
    },

    /// Run one request through the HTTP-shaped interface and print the JSON response
    Request {
        /// GET or PATCH
        method: String,

        /// e.g. /5, /timesheet/5, /updateCount
        path: String,

        #[arg(long, value_name = "JSON", help = "Request body, e.g. '{\"id\":5,\"inCount\":3}'")]
        body: Option<String>,
    },

    /// Export the timesheet of a location
    Export {
        /// Location id
        id: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

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
}

#[derive(Subcommand)]
pub enum LocationAction {
    /// Register a new location
    Add {
        /// Display name
        name: String,
    },
    /// List all locations with their current totals
    List,
}
