//! Messages exchanged between the UI thread and the backend.

use luachat_core::{Action, Command};

/// Events sent from the backend to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// A command finished; feed the action back into the session.
    Completed(Action),
}

/// Commands sent from the UI thread to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Run a session command against the API.
    Run(Command),

    /// Quit the application.
    Quit,
}
