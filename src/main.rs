//! 多少錢 · Taiwan Travel Phrasebook Backend
//!
//! - Axum HTTP + WebSocket API
//! - Number-listening quiz generator (多少錢？ drill)
//! - Optional Google Cloud TTS relay (via environment variables)
//! - Optional Mailgun summary relay
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   GOOGLE_TTS_API_KEY : enables speech synthesis if present
//!   GOOGLE_TTS_BASE_URL: default "https://texttospeech.googleapis.com/v1"
//!   MAILGUN_API_KEY    : enables the summary mail relay if present
//!   MAILGUN_DOMAIN     : Mailgun sending domain
//!   SUMMARY_TO         : summary recipient (config file may set it too)
//!   APP_CONFIG_PATH    : path to TOML config (voice, report, extra phrases)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod seeds;
mod state;
mod protocol;
mod numerals;
mod quiz;
mod logic;
mod tts;
mod mailer;
mod routes;
mod pinyin;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (phrase bank, TTS client, mail relay).
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
  info!(target: "duoshao_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
