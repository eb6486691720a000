//! Application state: the phrase bank, voice/report settings, and the
//! optional external clients.
//!
//! This module owns:
//!   - the phrase store (built-in seeds + config extras), indexed by id
//!     and by category
//!   - the speech-synthesis client (present only when credentials are)
//!   - the mail relay and report settings for summary delivery
//!
//! Built once in `main` and shared behind an Arc. The phrase bank is fixed
//! after startup, so the stores are plain maps with no interior locking.

use std::collections::HashMap;

use tracing::{info, instrument, warn};

use crate::config::{load_app_config_from_env, ReportSettings};
use crate::domain::Phrase;
use crate::mailer::Mailer;
use crate::pinyin::phrase_pinyin;
use crate::seeds::seed_phrases;
use crate::tts::GoogleTts;
use crate::util::is_cjk;

pub struct AppState {
    pub phrases: Vec<Phrase>,
    pub by_id: HashMap<u32, usize>,
    pub categories: Vec<String>,
    pub by_category: HashMap<String, Vec<usize>>,
    pub tts: Option<GoogleTts>,
    pub mailer: Option<Mailer>,
    pub report: ReportSettings,
}

impl AppState {
    /// Build state from env: load config, merge phrase banks, build indices,
    /// init the TTS and mail clients.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env().unwrap_or_default();

        let mut phrases = seed_phrases();
        let mut next_id = phrases.iter().map(|p| p.id).max().unwrap_or(0) + 1;

        for pc in &cfg.phrases {
            if !pc.zh.chars().any(is_cjk) {
                warn!(target: "duoshao_backend", zh = %pc.zh, "Skipping config phrase without Chinese text");
                continue;
            }
            let id = match pc.id {
                Some(id) => id,
                None => {
                    let id = next_id;
                    next_id += 1;
                    id
                }
            };
            let py = match &pc.py {
                Some(p) if !p.is_empty() => p.clone(),
                _ => phrase_pinyin(&pc.zh),
            };
            phrases.push(Phrase {
                id,
                category: pc.category.clone(),
                zh: pc.zh.clone(),
                py,
                ja: pc.ja.clone().unwrap_or_default(),
            });
        }

        let mut by_id = HashMap::new();
        let mut categories: Vec<String> = Vec::new();
        let mut by_category: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, p) in phrases.iter().enumerate() {
            if by_id.insert(p.id, idx).is_some() {
                warn!(target: "duoshao_backend", id = p.id, "Duplicate phrase id; later entry wins");
            }
            if !by_category.contains_key(&p.category) {
                categories.push(p.category.clone());
            }
            by_category.entry(p.category.clone()).or_default().push(idx);
        }

        // Inventory summary per category.
        for cat in &categories {
            let cards = by_category.get(cat).map(|v| v.len()).unwrap_or(0);
            info!(target: "duoshao_backend", category = %cat, cards, "Startup phrase inventory");
        }

        let mut report = cfg.report;
        if report.to.is_empty() {
            if let Ok(to) = std::env::var("SUMMARY_TO") {
                report.to = to;
            }
        }

        let tts = GoogleTts::from_env(cfg.tts);
        if let Some(t) = &tts {
            info!(target: "duoshao_backend", base_url = %t.base_url, voice = %t.settings.voice, "Speech synthesis enabled.");
        } else {
            info!(target: "duoshao_backend", "Speech synthesis disabled (no GOOGLE_TTS_API_KEY).");
        }

        let mailer = Mailer::from_env();
        if let Some(m) = &mailer {
            info!(target: "duoshao_backend", domain = %m.domain, to = %report.to, "Summary mail relay enabled.");
        } else {
            info!(target: "duoshao_backend", "Summary mail relay disabled (no MAILGUN_API_KEY/MAILGUN_DOMAIN).");
        }

        Self {
            phrases,
            by_id,
            categories,
            by_category,
            tts,
            mailer,
            report,
        }
    }

    /// Read-only access to a phrase by id.
    #[allow(dead_code)]
    pub fn phrase(&self, id: u32) -> Option<&Phrase> {
        self.by_id.get(&id).map(|&idx| &self.phrases[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_indices_cover_every_phrase() {
        let state = AppState::new();
        assert_eq!(state.by_id.len(), state.phrases.len());
        let indexed: usize = state.categories.iter()
            .map(|c| state.by_category.get(c).map(|v| v.len()).unwrap_or(0))
            .sum();
        assert_eq!(indexed, state.phrases.len());
        assert!(state.phrase(9).is_some());
        assert!(state.phrase(9999).is_none());
    }
}
