use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    http::Method,
    response::{IntoResponse, Response},
    routing::any,
    Extension, Router,
};
use calc_core::{Config, HistoryHandler, HistoryStore, MemoryStore};
use clap::Parser;
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Serves the calculation history handler over plain HTTP for local use.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
    /// Keep history in memory instead of Postgres
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), GenericError> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let app = if args.memory {
        tracing::info!("using in-memory history");
        router(HistoryHandler::new(Some(MemoryStore::new())))
    } else {
        let config = Config::from_env();
        if config.database_url.is_none() {
            tracing::warn!("DATABASE_URL not set, GET and POST will fail");
        }
        router(HistoryHandler::from_config(&config))
    };

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn router<S: HistoryStore + 'static>(handler: HistoryHandler<S>) -> Router {
    Router::new()
        .route("/calculations", any(calculations::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(handler)))
}

// CORS headers are already set by the core handler.
async fn calculations<S: HistoryStore + 'static>(
    Extension(handler): Extension<Arc<HistoryHandler<S>>>,
    method: Method,
    body: Bytes,
) -> Response {
    handler.handle(&method, &body).await.into_response()
}
