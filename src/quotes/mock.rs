use async_trait::async_trait;

use crate::error::Result;
use crate::llm::{ChatModel, Message};

/// Offline stand-in for the model. Answers every request with a fixed
/// synopsis and three quotes, so a run can be rehearsed without an API key.
pub struct CannedModel;

const SYNOPSIS: &str = "This episode covers interesting topics and conversations. The hosts dive deep into personal experiences and share valuable insights. A must-listen for fans of the show.";

const QUOTES: [&str; 3] = [
    "Sometimes the best decisions are the ones that scare you the most.",
    "You can't wait for everything to be perfect before you start.",
    "The only failure is not trying at all.",
];

#[async_trait]
impl ChatModel for CannedModel {
    async fn complete_json(&self, _messages: &[Message]) -> Result<Option<String>> {
        let body = serde_json::json!({
            "synopsis": SYNOPSIS,
            "quotes": QUOTES,
        });
        Ok(Some(body.to_string()))
    }
}
