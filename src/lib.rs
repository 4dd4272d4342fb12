//! GitHub Wrapped page server.
//!
//! Fetches a user's pre-aggregated year-in-review stats from the stats backend
//! and renders them as a single HTML page.

pub mod backend;
pub mod config;
pub mod render;
pub mod server;
pub mod stats;

pub use backend::BackendClient;
pub use config::Config;
pub use server::{AppState, build_router};
