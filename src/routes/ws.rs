//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::quiz::DEFAULT_QUIZ_LEN;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "duoshao_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "duoshao_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target = "duoshao_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "duoshao_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "duoshao_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::NewQuizSet { level, count } => {
      let tier = tier_or_default(&level);
      let quiz = build_quiz_set(tier, count.unwrap_or(DEFAULT_QUIZ_LEN));
      tracing::info!(target: "quiz", %level, id = %quiz.id, "WS quiz set served");
      ServerWsMessage::QuizSet { quiz }
    }

    ClientWsMessage::FormatNumber { n } => match format_number(n) {
      Ok(zh) => ServerWsMessage::Number { n, zh },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::Speak { text } => match synthesize_speech(state, &text).await {
      Ok(audio) => ServerWsMessage::Speech {
        audio_base64: BASE64.encode(&audio),
        mime: "audio/mpeg".into(),
      },
      Err(e) => ServerWsMessage::SpeechError { message: e },
    },

    ClientWsMessage::PinyinInput { text } => {
      let pinyin = do_pinyin(state, &text);
      ServerWsMessage::Pinyin { text, pinyin }
    }

    ClientWsMessage::SubmitSummary { level, answers } => {
      let (delivered, message) = deliver_summary(state, &level, &answers).await;
      ServerWsMessage::SummaryResult { delivered, message }
    }
  }
}
