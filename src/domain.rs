//! Domain models used by the backend: phrase cards and quiz answer records.

use serde::{Deserialize, Serialize};

/// One phrasebook card. `zh` is Traditional Chinese as spoken in Taiwan,
/// `py` is tone-diacritic pinyin, `ja` the Japanese gloss shown to the
/// traveler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Phrase {
  pub id: u32,
  pub category: String,
  pub zh: String,
  #[serde(default)] pub py: String,
  #[serde(default)] pub ja: String,
}

/// One answered quiz question, as reported back by the client.
/// `selected` is None when the question was skipped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnswerRecord {
  pub selected: Option<u16>,
  pub correct: u16,
}

impl AnswerRecord {
  pub fn is_correct(&self) -> bool {
    self.selected == Some(self.correct)
  }
}
