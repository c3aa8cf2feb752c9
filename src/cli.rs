//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `devdesk`.
#[derive(Debug, Parser)]
#[command(name = "devdesk", version, about = "Developer desk utilities")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log level selected by `-v`/`-q`.
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 if self.quiet => tracing::Level::ERROR,
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up vcpkg ports in the GitHub registry.
    Vcpkg {
        /// The vcpkg action.
        #[command(subcommand)]
        action: VcpkgCommand,
    },
    /// Print the dependency tree of an SPDX JSON document.
    Graph {
        /// Path to the SPDX JSON file.
        file: PathBuf,
        /// Deepest level to print; the root is level 0.
        #[arg(long, default_value_t = 3)]
        depth: usize,
    },
    /// Ask the lunch buddy what to eat.
    Chat {
        /// What you feel like.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        /// Offer this dish instead of the default menu (repeatable).
        #[arg(long = "dish")]
        dishes: Vec<String>,
    },
    /// Keep a daily log of tasks.
    Worklog {
        /// The work-log action.
        #[command(subcommand)]
        action: WorklogCommand,
    },
}

/// `devdesk vcpkg` actions.
#[derive(Debug, Subcommand)]
pub enum VcpkgCommand {
    /// Resolve `pkg:vcpkg/<port>@<version>` to its metadata.
    Resolve {
        /// Package URL.
        purl: String,
        /// Print the full resolution as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the published versions of a port.
    Versions {
        /// Port name.
        port: String,
        /// Print the version entries as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// `devdesk worklog` actions.
#[derive(Debug, Subcommand)]
pub enum WorklogCommand {
    /// Record a task.
    Add(AddArgs),
    /// List entries, optionally for one day.
    List {
        /// Only this day (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print per-day totals instead of entries.
        #[arg(long)]
        summary: bool,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },
    /// Change an entry.
    Update(UpdateArgs),
    /// Remove an entry.
    Delete {
        /// Entry id or a unique prefix of it.
        id: String,
    },
}

/// Arguments for `devdesk worklog add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// What was done.
    pub task: String,
    /// Day of the work (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Minutes spent.
    #[arg(long)]
    pub minutes: Option<u32>,
    /// Notes.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for `devdesk worklog update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Entry id or a unique prefix of it.
    pub id: String,
    /// New task text.
    #[arg(long)]
    pub task: Option<String>,
    /// New day (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// New minutes.
    #[arg(long)]
    pub minutes: Option<u32>,
    /// New notes; an empty string clears them.
    #[arg(long)]
    pub notes: Option<String>,
}
