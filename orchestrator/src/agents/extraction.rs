// Extraction Agent: pulls key facts, metrics and entities out of the summary

use std::sync::Arc;

use tracing::info;

use crate::chat_client::{ChatCompletion, DEFAULT_TEMPERATURE};
use crate::error::ApiError;
use crate::models::{Extraction, StructuredExtraction};

const SYSTEM_PROMPT: &str = "You extract key facts, metrics, entities, and important \
bullet points from text. Return them as a JSON object with keys: 'key_facts', \
'metrics', 'entities'.";

pub struct ExtractionAgent {
    chat: Arc<dyn ChatCompletion>,
}

impl ExtractionAgent {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    pub async fn run(&self, question: &str, summary: &str) -> Result<Extraction, ApiError> {
        info!("Extraction: structuring facts from the summary");
        let user_prompt = format!(
            "User question: {}\n\nSummary:\n{}\n\nExtract structured data.",
            question, summary
        );
        let raw = self
            .chat
            .complete(SYSTEM_PROMPT, &user_prompt, DEFAULT_TEMPERATURE)
            .await?;
        Ok(parse_extraction(raw))
    }
}

/// Best effort: a reply that is not the requested JSON shape is kept as raw
/// text rather than failing the pipeline.
fn parse_extraction(raw: String) -> Extraction {
    match serde_json::from_str::<StructuredExtraction>(&raw) {
        Ok(structured) => Extraction::Structured(structured),
        Err(_) => Extraction::Raw { raw_extraction: raw },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn well_formed_reply_passes_through() {
        let raw = r#"{"key_facts": ["f1"], "metrics": {"m": 1}, "entities": ["E"]}"#;
        let extraction = parse_extraction(raw.to_string());
        assert_eq!(
            extraction,
            Extraction::Structured(StructuredExtraction {
                key_facts: json!(["f1"]),
                metrics: json!({"m": 1}),
                entities: json!(["E"]),
            })
        );
    }

    #[test]
    fn prose_reply_falls_back_to_raw_text() {
        let extraction = parse_extraction("Here are the facts: ...".to_string());
        assert_eq!(
            extraction,
            Extraction::Raw {
                raw_extraction: "Here are the facts: ...".to_string()
            }
        );
    }

    #[test]
    fn json_missing_a_key_falls_back_to_raw_text() {
        let raw = r#"{"key_facts": [], "metrics": {}}"#;
        let extraction = parse_extraction(raw.to_string());
        assert_eq!(
            extraction,
            Extraction::Raw {
                raw_extraction: raw.to_string()
            }
        );
    }

    #[test]
    fn json_array_falls_back_to_raw_text() {
        let extraction = parse_extraction("[1, 2, 3]".to_string());
        assert_eq!(
            extraction,
            Extraction::Raw {
                raw_extraction: "[1, 2, 3]".to_string()
            }
        );
    }
}
