//! Background task that talks to the chat API.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use luachat_client::{execute, ChatApi};

use crate::event::{BackendCommand, UiEvent};

/// Run the backend loop.
///
/// Runs in a separate thread with its own tokio runtime. Each command gets
/// its own task, so a slow send never holds up a list refresh.
pub async fn run_backend(
    api: Arc<dyn ChatApi>,
    ui_tx: mpsc::Sender<UiEvent>,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
) {
    info!("Backend started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::Quit => {
                info!("Received quit command, shutting down backend");
                break;
            }
            BackendCommand::Run(command) => {
                debug!(command = ?command, "Dispatching command");
                let api = Arc::clone(&api);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let action = execute(api.as_ref(), command).await;
                    if ui_tx.send(UiEvent::Completed(action)).await.is_err() {
                        error!("UI channel closed, dropping completion");
                    }
                });
            }
        }
    }

    info!("Backend shutdown complete");
}
