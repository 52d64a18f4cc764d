use serde::Deserialize;

/// Configuration options for the catalog service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// SQLite database path or URL.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
}
