use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use todo_api::config::ServerConfig;
use todo_api::store::{MemoryStore, MongoStore, TodoStore};
use todo_api::todos::routes::{TodoRouteState, todo_routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env();

    eprintln!("📝 Todo API v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Listing: http://0.0.0.0:{}/api/todos", config.port);

    // ── Store ────────────────────────────────────────────────────────────
    let store: Arc<dyn TodoStore> = match &config.mongo_uri {
        Some(uri) => {
            let store = MongoStore::connect(uri, &config).await.unwrap_or_else(|e| {
                eprintln!("Error: Failed to connect to MongoDB: {}", e);
                std::process::exit(1);
            });
            eprintln!("   Store: MongoDB ({}/{})", config.database, config.collection);
            Arc::new(store)
        }
        None => {
            eprintln!("   Store: in-memory (set MONGO_URI for persistence)");
            Arc::new(MemoryStore::new())
        }
    };

    // ── HTTP server ──────────────────────────────────────────────────────
    let app = todo_routes(TodoRouteState { store })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Todo API server started");
    axum::serve(listener, app).await?;

    Ok(())
}
