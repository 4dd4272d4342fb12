//! Runtime configuration, read from flags with environment fallbacks.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "github-wrapped")]
#[command(author, version, about = "Serves GitHub Wrapped year-in-review pages", long_about = None)]
pub struct Config {
    /// Base URL of the stats backend
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: String,

    /// Value sent verbatim in the Authorization header to the backend
    #[arg(long, env = "BACKEND_AUTH_TOKEN", hide_env_values = true)]
    pub backend_auth_token: String,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Year shown in the page title and used when a calendar has no dates
    #[arg(long, env = "WRAPPED_YEAR", default_value_t = 2024)]
    pub year: i32,

    /// Timeout for the backend stats request, in seconds
    #[arg(long, env = "BACKEND_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Timeout for serving a whole page, in seconds
    #[arg(long, env = "PAGE_TIMEOUT_SECS", default_value_t = 30)]
    pub page_timeout_secs: u64,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}
