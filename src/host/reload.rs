//! Asking the host to reload the blocking directory.
//!
//! The host answers asynchronously; the request is an `async fn` resolving to
//! a [`ReloadOutcome`], or a spawned task that hands the outcome to a callback.

use super::shell;
use std::fmt;

/// Result of a reload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    Success,
    Failure(String),
}

impl ReloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ReloadOutcome::Success)
    }
}

impl fmt::Display for ReloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadOutcome::Success => write!(f, "reload succeeded"),
            ReloadOutcome::Failure(reason) => write!(f, "reload failed: {reason}"),
        }
    }
}

/// Run the host reload command and wait for its answer.
///
/// With no command configured the request fails without running anything.
pub async fn request_reload(command: Option<String>) -> ReloadOutcome {
    let Some(command) = command else {
        log::warn!("No reload command configured, skipping reload");
        return ReloadOutcome::Failure("no reload command configured".to_string());
    };

    log::info!("Requesting directory reload: {command}");
    let joined = tokio::task::spawn_blocking(move || shell::run(&command)).await;
    let outcome = match joined {
        Ok(Ok(_stdout)) => ReloadOutcome::Success,
        Ok(Err(e)) => ReloadOutcome::Failure(e.to_string()),
        Err(e) => ReloadOutcome::Failure(format!("reload task aborted: {e}")),
    };
    match &outcome {
        ReloadOutcome::Success => log::info!("Directory reload succeeded"),
        ReloadOutcome::Failure(reason) => log::error!("Directory reload failed: {reason}"),
    }
    outcome
}

/// Fire-and-forget reload; `on_complete` receives the outcome.
///
/// Must be called from inside a tokio runtime.
pub fn spawn_reload<F>(command: Option<String>, on_complete: F) -> tokio::task::JoinHandle<()>
where
    F: FnOnce(ReloadOutcome) + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = request_reload(command).await;
        on_complete(outcome);
    })
}
