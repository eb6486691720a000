//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{AnswerRecord, Phrase};
use crate::quiz::Tier;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewQuizSet {
        level: String,
        count: Option<usize>,
    },
    FormatNumber {
        n: u16,
    },
    Speak {
        text: String,
    },
    PinyinInput {
        text: String,
    },
    SubmitSummary {
        level: String,
        answers: Vec<AnswerRecord>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    QuizSet {
        quiz: QuizSetOut,
    },
    Number {
        n: u16,
        zh: String,
    },
    Speech {
        #[serde(rename = "audioBase64")]
        audio_base64: String,
        mime: String,
    },
    SpeechError {
        message: String,
    },
    Pinyin {
        text: String,
        pinyin: String,
    },
    SummaryResult {
        delivered: bool,
        message: String,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for quiz delivery. `zh` per question lets the
/// client feed the speech provider without knowing the numeral rules.
#[derive(Debug, Serialize)]
pub struct QuizSetOut {
    pub id: String,
    pub level: Tier,
    pub questions: Vec<QuizItemOut>,
}

#[derive(Debug, Serialize)]
pub struct QuizItemOut {
    pub answer: u16,
    pub zh: String,
    pub choices: Vec<u16>,
}

/// One phrasebook section, in catalog order.
#[derive(Debug, Serialize)]
pub struct CategoryOut {
    pub category: String,
    pub phrases: Vec<Phrase>,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct QuizQuery {
    pub level: Option<String>,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct NumberQuery {
    pub n: u16,
}
#[derive(Serialize)]
pub struct NumberOut {
    pub n: u16,
    pub zh: String,
}

#[derive(Deserialize)]
pub struct TtsIn {
    pub text: String,
}
#[derive(Serialize)]
pub struct TtsErrorOut {
    pub error: String,
    pub details: String,
}

#[derive(Deserialize)]
pub struct SummaryIn {
    pub level: String,
    pub answers: Vec<AnswerRecord>,
}
#[derive(Serialize)]
pub struct SummaryOut {
    pub delivered: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
