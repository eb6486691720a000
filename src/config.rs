//! Loading app configuration (voice, summary mail, extra phrases) from TOML.
//!
//! See `AppConfig` for the expected schema. Everything has a default so the
//! server runs with no config file at all.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub tts: TtsSettings,
  #[serde(default)]
  pub report: ReportSettings,
  #[serde(default)]
  pub phrases: Vec<PhraseCfg>,
}

/// Extra phrase card accepted in TOML configuration.
/// `py` and `ja` are optional; missing pinyin is derived at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct PhraseCfg {
  #[serde(default)] pub id: Option<u32>,
  pub category: String,
  pub zh: String,
  #[serde(default)] pub py: Option<String>,
  #[serde(default)] pub ja: Option<String>,
}

/// Voice parameters forwarded to the speech provider.
/// Defaults target Taiwan Mandarin; as of 2025-07 there is no Neural2 voice
/// for cmn-TW, so Wavenet it is.
#[derive(Clone, Debug, Deserialize)]
pub struct TtsSettings {
  pub language_code: String,
  pub voice: String,
  pub ssml_gender: String,
  pub speaking_rate: f32,
}

impl Default for TtsSettings {
  fn default() -> Self {
    Self {
      language_code: "cmn-TW".into(),
      voice: "cmn-TW-Wavenet-A".into(),
      ssml_gender: "FEMALE".into(),
      speaking_rate: 0.9,
    }
  }
}

/// Where and how to mail finished quiz summaries.
/// An empty `to` disables the relay (the SUMMARY_TO env var can fill it).
#[derive(Clone, Debug, Deserialize)]
pub struct ReportSettings {
  pub to: String,
  pub subject: String,
  pub body_template: String,
}

impl Default for ReportSettings {
  fn default() -> Self {
    Self {
      to: String::new(),
      subject: "クイズ結果サマリー".into(),
      body_template: "レベル: {level}\n正解数: {score}/{total}\n回答:\n{answers}".into(),
    }
  }
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error,
/// returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "duoshao_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "duoshao_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "duoshao_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
