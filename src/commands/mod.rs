//! Command dispatch and handlers.

pub mod chat;
pub mod graph;
pub mod vcpkg;
pub mod worklog;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `DEVDESK_RECORD` is set to a directory path, all port interactions are
/// recorded to per-port cassette files in that directory. When
/// `DEVDESK_REPLAY` names a cassette, every port is served from it instead.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch(command: &Command, config: &Config) -> Result<(), String> {
    let (ctx, session) = if let Some(dir) = &config.record_dir {
        let (ctx, session) = ServiceContext::recording_at(config, dir)?;
        (ctx, Some(session))
    } else if let Some(cassette) = &config.replay_cassette {
        tracing::debug!(cassette = %cassette.display(), "replaying port interactions");
        (ServiceContext::replaying(cassette)?, None)
    } else {
        (ServiceContext::live(config), None)
    };

    let result = dispatch_with_context(command, &ctx, config).await;

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<(), String> {
    match command {
        Command::Vcpkg { action } => vcpkg::run(ctx, config, action).await,
        Command::Graph { file, depth } => graph::run(ctx, file, *depth),
        Command::Chat { message, dishes } => {
            chat::run(ctx, config, &message.join(" "), dishes).await
        }
        Command::Worklog { action } => worklog::run(ctx, config, action),
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
