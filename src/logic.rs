//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Building quiz sets (tier sampling + spoken text per question)
//!   - Speech synthesis with a defined failure when no provider is configured
//!   - Summary delivery with a logged fallback
//!   - Pinyin/numeral helpers and the phrase catalog

use rand::thread_rng;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::AnswerRecord;
use crate::numerals::{number_to_zh, NumeralOutOfRange};
use crate::pinyin::phrase_pinyin;
use crate::protocol::{CategoryOut, QuizItemOut, QuizSetOut};
use crate::quiz::{generate_quiz_set, Tier};
use crate::state::AppState;
use crate::util::fill_template;

/// Parse the client-supplied level, defaulting to the gentlest drill.
pub fn tier_or_default(level: &str) -> Tier {
  match Tier::from_param(level) {
    Some(t) => t,
    None => {
      if !level.trim().is_empty() {
        warn!(target: "quiz", %level, "Unknown level; falling back to easy");
      }
      Tier::Easy
    }
  }
}

/// Generate one quiz set and attach the spoken numeral text per question.
#[instrument(level = "info", fields(tier = %tier.as_str(), count))]
pub fn build_quiz_set(tier: Tier, count: usize) -> QuizSetOut {
  let mut rng = thread_rng();
  let questions: Vec<QuizItemOut> = generate_quiz_set(&mut rng, tier, count)
    .into_iter()
    .map(|q| QuizItemOut {
      // pool values sit in [100,999], always formattable
      zh: number_to_zh(q.answer).unwrap_or_default(),
      answer: q.answer,
      choices: q.choices,
    })
    .collect();

  let set = QuizSetOut {
    id: Uuid::new_v4().to_string(),
    level: tier,
    questions,
  };
  info!(target: "quiz", id = %set.id, questions = set.questions.len(), "Quiz set generated");
  set
}

#[instrument(level = "debug")]
pub fn format_number(n: u16) -> Result<String, NumeralOutOfRange> {
  let zh = number_to_zh(n)?;
  debug!(target: "quiz", n, %zh, "Formatted numeral");
  Ok(zh)
}

#[instrument(level = "info", skip(_state, text), fields(text_len = text.len()))]
pub fn do_pinyin(_state: &AppState, text: &str) -> String {
  let p = phrase_pinyin(text);
  debug!(target: "duoshao_backend", text, p, "pinyin conversion.");
  p
}

/// Synthesize speech via the configured provider; a missing provider is a
/// defined failure the caller reports back, not a panic.
#[instrument(level = "info", skip(state, text), fields(text_len = text.len()))]
pub async fn synthesize_speech(state: &AppState, text: &str) -> Result<Vec<u8>, String> {
  if let Some(tts) = &state.tts {
    tts.synthesize_mp3(text).await
  } else {
    Err("speech synthesis disabled (GOOGLE_TTS_API_KEY not set)".into())
  }
}

/// Mail the finished answer set to the configured recipient. Returns the
/// delivery flag plus a client-facing message; failures are logged here.
#[instrument(level = "info", skip(state, answers), fields(%level, answers = answers.len()))]
pub async fn deliver_summary(state: &AppState, level: &str, answers: &[AnswerRecord]) -> (bool, String) {
  let score = answers.iter().filter(|a| a.is_correct()).count();
  let lines: Vec<String> = answers
    .iter()
    .enumerate()
    .map(|(i, a)| {
      let picked = match a.selected {
        Some(n) => n.to_string(),
        None => "未選択".into(),
      };
      let mark = if a.is_correct() { "◯" } else { "×" };
      format!("{}. 正答 {} / 回答 {} {}", i + 1, a.correct, picked, mark)
    })
    .collect();
  let body = fill_template(
    &state.report.body_template,
    &[
      ("level", level),
      ("score", &score.to_string()),
      ("total", &answers.len().to_string()),
      ("answers", &lines.join("\n")),
    ],
  );

  let recipient = state.report.to.as_str();
  if let (Some(mailer), false) = (&state.mailer, recipient.is_empty()) {
    match mailer.send_text(recipient, &state.report.subject, &body).await {
      Ok(()) => {
        info!(target: "duoshao_backend", %level, score, total = answers.len(), "Summary delivered");
        (true, "メール送信成功".into())
      }
      Err(e) => {
        error!(target: "duoshao_backend", error = %e, "Summary mail failed");
        (false, "メール送信失敗".into())
      }
    }
  } else {
    warn!(target: "duoshao_backend", %level, score, total = answers.len(), "Mail relay not configured; summary logged only");
    (false, "メール未設定（サマリーはログのみ）".into())
  }
}

/// Phrase cards grouped by category, in catalog order.
pub fn phrase_catalog(state: &AppState) -> Vec<CategoryOut> {
  state
    .categories
    .iter()
    .map(|cat| CategoryOut {
      category: cat.clone(),
      phrases: state
        .by_category
        .get(cat)
        .map(|idxs| idxs.iter().map(|&i| state.phrases[i].clone()).collect())
        .unwrap_or_default(),
    })
    .collect()
}
