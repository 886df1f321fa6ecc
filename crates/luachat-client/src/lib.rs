//! Client library for the luachat assistant API.
//!
//! Provides the HTTP client for the remote chat service, the `ChatApi` seam
//! the UI backend depends on, and the executor that runs session commands.

pub mod api;
pub mod error;
pub mod executor;
pub mod http;
pub mod wire;

pub use api::ChatApi;
pub use error::ClientError;
pub use executor::execute;
pub use http::{HttpClient, DEFAULT_API_URL};
