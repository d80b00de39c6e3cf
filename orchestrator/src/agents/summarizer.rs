// Summarizer Agent: condenses web results into a narrative summary

use std::sync::Arc;

use tracing::info;

use crate::chat_client::{ChatCompletion, DEFAULT_TEMPERATURE};
use crate::error::ApiError;
use crate::models::SearchResult;

const SYSTEM_PROMPT: &str = "You are a research summarization assistant. \
Given a user question and web search snippets, produce a structured summary.";

pub struct SummarizerAgent {
    chat: Arc<dyn ChatCompletion>,
}

impl SummarizerAgent {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    pub async fn run(
        &self,
        question: &str,
        results: &[SearchResult],
    ) -> Result<String, ApiError> {
        info!("Summarizer: condensing {} web results", results.len());
        let user_prompt = format!(
            "User question: {}\n\nWeb results:\n{}\n\nWrite a structured summary.",
            question,
            reference_block(results)
        );
        self.chat
            .complete(SYSTEM_PROMPT, &user_prompt, DEFAULT_TEMPERATURE)
            .await
    }
}

/// One line per result; the 1-based index doubles as the citation marker.
fn reference_block(results: &[SearchResult]) -> String {
    let mut block = String::new();
    for (idx, result) in results.iter().enumerate() {
        block.push_str(&format!(
            "[{}] {} - {} (URL: {})\n",
            idx + 1,
            result.title,
            result.snippet,
            result.url
        ));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(title: &str, snippet: &str, url: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            snippet: snippet.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn reference_block_is_one_based_and_ordered() {
        let results = vec![
            result("A", "first snippet", "u1"),
            result("B", "second snippet", "u2"),
        ];
        assert_eq!(
            reference_block(&results),
            "[1] A - first snippet (URL: u1)\n[2] B - second snippet (URL: u2)\n"
        );
    }

    #[test]
    fn no_results_means_no_reference_markers() {
        assert_eq!(reference_block(&[]), "");
    }
}
