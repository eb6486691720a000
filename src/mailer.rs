//! Mailgun relay for finished-quiz summaries.
//!
//! One endpoint (`/{domain}/messages`, multipart form, basic auth). The
//! backend treats mail as best-effort: a missing client or a failed send is
//! logged and reported back as undelivered, never an error that kills the
//! request.

use std::time::Duration;

use serde::Deserialize;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct Mailer {
  pub client: reqwest::Client,
  api_key: String,
  pub domain: String,
  pub base_url: String,
}

impl Mailer {
  /// Construct the client if MAILGUN_API_KEY and MAILGUN_DOMAIN are set;
  /// otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("MAILGUN_API_KEY").ok()?;
    let domain = std::env::var("MAILGUN_DOMAIN").ok()?;
    let base_url = std::env::var("MAILGUN_BASE_URL")
      .unwrap_or_else(|_| "https://api.mailgun.net/v3".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, domain, base_url })
  }

  /// Sender address shown on summary mails.
  pub fn sender(&self) -> String {
    format!("Quiz App <quiz@{}>", self.domain)
  }

  /// Send one plain-text mail.
  #[instrument(level = "info", skip(self, body), fields(%to, subject, body_len = body.len()))]
  pub async fn send_text(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
    let url = format!("{}/{}/messages", self.base_url, self.domain);
    let form = reqwest::multipart::Form::new()
      .text("from", self.sender())
      .text("to", to.to_string())
      .text("subject", subject.to_string())
      .text("text", body.to_string());

    let res = self.client.post(&url)
      .basic_auth("api", Some(&self.api_key))
      .multipart(form)
      .send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_mailgun_error(&body).unwrap_or_else(|| body);
      return Err(format!("Mailgun HTTP {}: {}", status, msg));
    }

    info!(target: "duoshao_backend", "Summary mail accepted by relay");
    Ok(())
  }
}

fn extract_mailgun_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EBody { message: String }
  match serde_json::from_str::<EBody>(body) {
    Ok(e) => Some(e.message),
    Err(_) => None,
  }
}
