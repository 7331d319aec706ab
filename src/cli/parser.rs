use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// CLI application to track attendance sessions and daily pay with SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track employee check-in/check-out sessions and compute daily pay using SQLite",
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
        #[arg(long = "print", help = "Print the current configuration file")]
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

    /// Print the internal audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Check in: open a work session for today (or --date)
    Start {
        #[arg(long, short, help = "User id (default from config)")]
        user: Option<String>,

        #[arg(long, help = "Override date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,

        #[arg(long, help = "Override check-in time (HH:MM), defaults to now")]
        at: Option<String>,
    },

    /// Check out: close the open session and compute worked hours
    Stop {
        #[arg(long, short, help = "User id (default from config)")]
        user: Option<String>,

        #[arg(long, help = "Override date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,

        #[arg(long, help = "Override check-out time (HH:MM), defaults to now")]
        at: Option<String>,
    },

    /// Admin override: close dangling open sessions, stamping provenance
    ForceStop {
        #[arg(long, short, help = "Target user id (today's record)")]
        user: Option<String>,

        #[arg(long, help = "Target a specific day record by id (any day)")]
        record: Option<i64>,

        #[arg(long, help = "Acting admin id")]
        admin: String,

        #[arg(long, help = "Override date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,

        #[arg(long, help = "Override stop time (HH:MM), defaults to now")]
        at: Option<String>,
    },

    /// Show whether a session is open and its hours so far
    Status {
        #[arg(long, short, help = "User id (default from config)")]
        user: Option<String>,

        #[arg(long, help = "Override date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,

        #[arg(long, help = "Override current time (HH:MM), defaults to now")]
        at: Option<String>,

        #[arg(long, help = "Emit JSON instead of text")]
        json: bool,
    },

    /// List day records
    List {
        #[arg(long, short, help = "User id (default from config)")]
        user: Option<String>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, help = "Emit JSON instead of text")]
        json: bool,
    },

    /// Admin edit of a day record (status and/or session times)
    Edit {
        #[arg(long, short, help = "Target user id")]
        user: String,

        /// Date of the record (YYYY-MM-DD)
        date: String,

        #[arg(long, help = "New status: present, absent, leave, late")]
        status: Option<String>,

        #[arg(long, help = "Session number to rewrite (1-based, see list)")]
        session: Option<usize>,

        #[arg(long = "in", help = "New check-in time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "New check-out time (HH:MM)")]
        end: Option<String>,

        #[arg(long, help = "Acting admin id")]
        by: String,
    },

    /// Get or set a user's hourly rate
    Rate {
        #[arg(long, short, help = "User id (default from config)")]
        user: Option<String>,

        #[arg(long, help = "Set the hourly rate instead of printing it")]
        set: Option<f64>,
    },

    /// Delete a day record (admin, irreversible)
    Del {
        #[arg(long, short, help = "Target user id")]
        user: String,

        /// Date of the record (YYYY-MM-DD)
        date: String,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}
