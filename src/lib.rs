//! Core library entry for the `devdesk` CLI.
//!
//! Each utility (vcpkg lookups, SBOM graphs, the lunch chat, the work log)
//! talks to the outside world only through the traits in [`ports`], so a
//! [`context::ServiceContext`] can run it live, record it, or replay it.

pub mod adapters;
pub mod cassette;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod ports;
pub mod storage;
pub mod vcpkg;
pub mod worklog;

pub use error::{Error, Result};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub async fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command, &config::Config::from_env()).await
}

#[cfg(test)]
mod tests {
    use super::run;

    #[tokio::test]
    async fn run_errors_on_unknown_subcommand() {
        let err = run(["devdesk", "unknown"]).await.unwrap_err();
        assert!(err.contains("unrecognized subcommand"));
    }

    #[tokio::test]
    async fn run_reports_invalid_purl_without_network() {
        let err = run(["devdesk", "vcpkg", "resolve", "pkg:npm/left-pad@1.0.0"]).await.unwrap_err();
        assert_eq!(err, "Invalid purl type: npm. Expected 'vcpkg'");
    }
}
