// Citation Agent: turns the source list into a formatted citations section

use std::sync::Arc;

use tracing::info;

use crate::chat_client::{ChatCompletion, DEFAULT_TEMPERATURE};
use crate::error::ApiError;
use crate::models::SearchResult;

const SYSTEM_PROMPT: &str = "You create a citations section for a research report \
using a list of sources with URLs. Return a formatted citations section in markdown.";

pub struct CitationAgent {
    chat: Arc<dyn ChatCompletion>,
}

impl CitationAgent {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    pub async fn run(
        &self,
        results: &[SearchResult],
        summary: &str,
    ) -> Result<String, ApiError> {
        info!("Citation: formatting {} sources", results.len());
        let user_prompt = format!(
            "Summary:\n{}\n\nSources:\n{}\n\nGenerate citations section.",
            summary,
            source_block(results)
        );
        self.chat
            .complete(SYSTEM_PROMPT, &user_prompt, DEFAULT_TEMPERATURE)
            .await
    }
}

/// Numbering matches the reference block the summarizer saw.
fn source_block(results: &[SearchResult]) -> String {
    let mut block = String::new();
    for (idx, result) in results.iter().enumerate() {
        block.push_str(&format!("[{}] {} ({})\n", idx + 1, result.title, result.url));
    }
    block
}
