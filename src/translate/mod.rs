//! Free-text translation over the public `translate_a/single` endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

/// Outcome of translating one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// English text handed to the symbol resolver.
    pub text: String,
    /// Detected source language code. `"auto"` when the payload carries no
    /// tag, `"unknown"` when the translation call failed outright.
    pub detected: String,
}

impl Translation {
    /// Downgrade used when the translation call fails: the original text
    /// passes through untranslated.
    pub fn fallback(original: &str) -> Self {
        Self {
            text: original.to_string(),
            detected: "unknown".to_string(),
        }
    }
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<Translation>;
}

/// Client for the keyless Google Translate endpoint. One GET per question,
/// no retry; callers downgrade failures with [`Translation::fallback`].
pub struct GoogleTranslateClient {
    client: Client,
    base: Url,
    target_lang: String,
}

impl GoogleTranslateClient {
    pub fn new(base: &str, target_lang: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base: Url::parse(base).context("translate: invalid endpoint URL")?,
            target_lang: target_lang.to_string(),
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str) -> Result<Translation> {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", "auto")
            .append_pair("tl", &self.target_lang)
            .append_pair("dt", "t")
            .append_pair("q", text);

        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .context("translate: request failed")?
            .error_for_status()
            .context("translate: non-success status")?;

        let payload: Value = resp.json().await.context("translate: parse JSON failed")?;

        Ok(parse_payload(&payload, text))
    }
}

/// Extract translated text and detected language from the nested-array
/// payload: `payload[0][0][0]` is the translated text, `payload[2]` (else
/// `payload[0][0][2]`) the detected language. Missing or empty fields
/// degrade to the original text and `"auto"` rather than erroring.
pub(crate) fn parse_payload(payload: &Value, original: &str) -> Translation {
    let first_segment = payload.get(0).and_then(|v| v.get(0));

    let text = first_segment
        .and_then(|v| v.get(0))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(original)
        .to_string();

    let detected = payload
        .get(2)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            first_segment
                .and_then(|v| v.get(2))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("auto")
        .to_string();

    Translation { text, detected }
}
