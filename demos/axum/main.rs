mod cors;
mod routes;

use std::net::SocketAddr;

use axum::{Router, routing::get};
use clap::Parser;
use cors::middleware::cors_middleware;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Grocery list API guarded by an origin gate")]
struct Args {
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("axum=info,bunner_cors_gate=debug,info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let app_state = cors::build_state()?;

    let app = Router::new()
        .route("/groceries", get(routes::groceries))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            cors_middleware,
        ))
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    tracing::info!(%addr, "axum example listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
