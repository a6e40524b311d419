//! Tudobem · Portuguese Trainer Backend
//!
//! - Axum HTTP API
//! - Optional Claude integration (via environment variables)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   ANTHROPIC_API_KEY     : enables Claude integration if present
//!   ANTHROPIC_BASE_URL    : default "https://api.anthropic.com"
//!   ANTHROPIC_FAST_MODEL  : default "claude-3-5-haiku-latest"
//!   ANTHROPIC_STRONG_MODEL : default "claude-3-5-sonnet-latest"
//!   APP_CONFIG_PATH   : path to TOML config (prompts + exercise bank + vocab)
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod similarity;
mod answers;
mod distractors;
mod domain;
mod config;
mod seeds;
mod state;
mod protocol;
mod logic;
mod claude;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (in-memory stores, Claude client, prompts).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "tudobem_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
