use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One web search hit. Position in the result list is the 1-based citation
/// index used by the summarization and citation prompts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub url: String,
}

/// Which pipeline steps run for a request. Produced once by the planner and
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    pub call_search: bool,
    pub call_summarization: bool,
    pub call_extraction: bool,
    pub call_citation: bool,
    pub call_document_builder: bool,
}

impl Plan {
    pub fn all_enabled() -> Self {
        Plan {
            call_search: true,
            call_summarization: true,
            call_extraction: true,
            call_citation: true,
            call_document_builder: true,
        }
    }
}

/// The shape the extraction prompt asks the model for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructuredExtraction {
    pub key_facts: Value,
    pub metrics: Value,
    pub entities: Value,
}

/// Extraction output. A reply that does not parse as [`StructuredExtraction`]
/// is carried verbatim in the `Raw` variant instead of failing the pipeline.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Extraction {
    Structured(StructuredExtraction),
    Raw { raw_extraction: String },
}

// API request/response models

#[derive(Debug, Default, Deserialize)]
pub struct ResearchRequest {
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub question: String,
    pub document_url: String,
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
    pub summary_preview: String,
    pub plan: Plan,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn default_plan_enables_every_step() {
        let plan = Plan::all_enabled();
        assert!(plan.call_search);
        assert!(plan.call_summarization);
        assert!(plan.call_extraction);
        assert!(plan.call_citation);
        assert!(plan.call_document_builder);
    }

    #[test]
    fn structured_extraction_serializes_flat() {
        let extraction = Extraction::Structured(StructuredExtraction {
            key_facts: json!(["fact"]),
            metrics: json!({"count": 3}),
            entities: json!(["ACME"]),
        });
        assert_eq!(
            serde_json::to_value(&extraction).unwrap(),
            json!({"key_facts": ["fact"], "metrics": {"count": 3}, "entities": ["ACME"]})
        );
    }

    #[test]
    fn raw_extraction_serializes_under_its_own_key() {
        let extraction = Extraction::Raw {
            raw_extraction: "not json".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&extraction).unwrap(),
            json!({"raw_extraction": "not json"})
        );
    }

    #[test]
    fn search_result_fields_default_when_absent() {
        let result: SearchResult = serde_json::from_value(json!({"title": "A"})).unwrap();
        assert_eq!(result.title, "A");
        assert_eq!(result.snippet, "");
        assert_eq!(result.url, "");
    }
}
