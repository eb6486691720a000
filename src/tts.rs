//! Minimal Google Cloud Text-to-Speech client.
//!
//! We only call `text:synthesize` and always request MP3. Calls are
//! instrumented and log voice, latencies, and payload sizes (not contents
//! beyond a short preview).
//!
//! NOTE: We never log the API key.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::TtsSettings;
use crate::util::trunc_for_log;

#[derive(Clone)]
pub struct GoogleTts {
  pub client: reqwest::Client,
  api_key: String,
  pub base_url: String,
  pub settings: TtsSettings,
}

impl GoogleTts {
  /// Construct the client if we find GOOGLE_TTS_API_KEY; otherwise return None.
  pub fn from_env(settings: TtsSettings) -> Option<Self> {
    let api_key = std::env::var("GOOGLE_TTS_API_KEY").ok()?;
    let base_url = std::env::var("GOOGLE_TTS_BASE_URL")
      .unwrap_or_else(|_| "https://texttospeech.googleapis.com/v1".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, settings })
  }

  /// Synthesize `text` into MP3 bytes.
  #[instrument(level = "info", skip(self, text), fields(voice = %self.settings.voice, text_len = text.len()))]
  pub async fn synthesize_mp3(&self, text: &str) -> Result<Vec<u8>, String> {
    let url = format!("{}/text:synthesize", self.base_url);
    let req = SynthesizeRequest {
      input: SynthesisInput { text: text.to_string() },
      voice: VoiceSelection {
        language_code: self.settings.language_code.clone(),
        name: self.settings.voice.clone(),
        ssml_gender: self.settings.ssml_gender.clone(),
      },
      audio_config: AudioConfig {
        audio_encoding: "MP3".into(),
        speaking_rate: self.settings.speaking_rate,
        pitch: 0.0,
      },
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .query(&[("key", self.api_key.as_str())])
      .header(USER_AGENT, "duoshao-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_google_error(&body).unwrap_or_else(|| body);
      return Err(format!("Google TTS HTTP {}: {}", status, msg));
    }

    let body: SynthesizeResponse = res.json().await.map_err(|e| e.to_string())?;
    let audio = BASE64
      .decode(body.audio_content.as_bytes())
      .map_err(|e| format!("audioContent decode error: {}", e))?;

    info!(
      elapsed = ?start.elapsed(),
      audio_bytes = audio.len(),
      preview = %trunc_for_log(text, 12),
      "Speech synthesized"
    );
    Ok(audio)
  }
}

// --- Synthesis DTOs ---

#[derive(Serialize)]
struct SynthesizeRequest {
  input: SynthesisInput,
  voice: VoiceSelection,
  #[serde(rename = "audioConfig")]
  audio_config: AudioConfig,
}
#[derive(Serialize)]
struct SynthesisInput { text: String }
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
  language_code: String,
  name: String,
  ssml_gender: String,
}
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
  audio_encoding: String,
  speaking_rate: f32,
  pitch: f32,
}

#[derive(Deserialize)]
struct SynthesizeResponse {
  #[serde(rename = "audioContent")]
  audio_content: String,
}

/// Try to extract a clean error message from a Google API error body.
fn extract_google_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
