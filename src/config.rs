//! Configuration types.

/// Server configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// MongoDB connection string. When absent the server runs on the
    /// in-memory store (development mode).
    pub mongo_uri: Option<String>,
    /// Database name.
    pub database: String,
    /// Collection holding the todo documents.
    pub collection: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("TODO_API_PORT")
            .unwrap_or_else(|_| "4567".to_string())
            .parse()
            .unwrap_or(4567);
        let mongo_uri = std::env::var("MONGO_URI").ok();
        let database =
            std::env::var("MONGO_DATABASE").unwrap_or_else(|_| "dev".to_string());

        Self {
            port,
            mongo_uri,
            database,
            collection: "todos".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4567,
            mongo_uri: None,
            database: "dev".to_string(),
            collection: "todos".to_string(),
        }
    }
}
