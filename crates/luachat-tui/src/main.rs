//! Terminal chat client for the Lua & Perception AI assistant.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;

use luachat_client::{HttpClient, DEFAULT_API_URL};

mod app;
mod backend;
mod config;
mod event;
mod state;
mod ui;

use app::App;
use config::{Config, DEFAULT_LOG_FILE, DEFAULT_LOG_FILTER};
use event::{BackendCommand, UiEvent};

#[derive(Parser)]
#[command(name = "luachat")]
#[command(about = "Chat with the Lua 5.4 and Perception API assistant")]
#[command(version)]
struct Cli {
    /// Base URL of the chat API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File that receives log output
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log filter directives (RUST_LOG syntax)
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            api_url: cli.api_url,
            log_file: cli.log_file,
            log_filter: cli.log_filter,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from(Cli::parse());

    // Log to a file so output never lands on the terminal
    if let Ok(file) = std::fs::File::create(&config.log_file) {
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_env_filter(config.log_filter.as_str())
            .with_ansi(false)
            .init();
    }

    run(config)
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let api = Arc::new(HttpClient::new(&config.api_url));
    info!(api_url = %api.base_url(), "Starting luachat");

    // Create channels for UI <-> backend communication
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(100);
    let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCommand>(100);

    // Background thread with its own tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    let bg_handle = std::thread::spawn(move || {
        rt.block_on(backend::run_backend(api, ui_tx, cmd_rx));
    });

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    let mut app = App::new(ui_rx, cmd_tx);
    let result = app.run(terminal);

    // Restore terminal (exits alternate screen, disables raw mode)
    ratatui::restore();

    let _ = bg_handle.join();

    info!("Shutdown complete");

    result.map_err(|e| e.into())
}
