use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, IntCounter};
use tracing::info;
use uuid::Uuid;

use crate::agents::citation::CitationAgent;
use crate::agents::document::DocumentBuilder;
use crate::agents::extraction::ExtractionAgent;
use crate::agents::planner::Planner;
use crate::agents::search::SearchAgent;
use crate::agents::summarizer::SummarizerAgent;
use crate::blob_client::BlobStore;
use crate::chat_client::ChatCompletion;
use crate::error::ApiError;
use crate::models::{Extraction, ResearchResponse};
use crate::search_client::WebSearch;

const SUMMARY_PREVIEW_CHARS: usize = 500;

static REPORTS_GENERATED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("reports_generated_total", "Research reports generated").unwrap()
});
static PIPELINE_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("pipeline_failures_total", "Research pipeline runs that failed").unwrap()
});

/// Runs the agents in a fixed order, each step feeding the next:
/// plan, search, summarize, extract, cite, build, upload.
pub struct Orchestrator {
    planner: Planner,
    search: SearchAgent,
    summarizer: SummarizerAgent,
    extraction: ExtractionAgent,
    citation: CitationAgent,
    document: DocumentBuilder,
    blob: Arc<dyn BlobStore>,
}

impl Orchestrator {
    pub fn new(
        chat: Arc<dyn ChatCompletion>,
        search: Arc<dyn WebSearch>,
        blob: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            planner: Planner::new(),
            search: SearchAgent::new(search),
            summarizer: SummarizerAgent::new(chat.clone()),
            extraction: ExtractionAgent::new(chat.clone()),
            citation: CitationAgent::new(chat),
            document: DocumentBuilder::new(),
            blob,
        }
    }

    /// Runs the full pipeline for one question. Strictly sequential; the
    /// first failing step aborts the rest and nothing is uploaded.
    pub async fn run(&self, question: &str) -> Result<ResearchResponse, ApiError> {
        let result = self.run_pipeline(question).await;
        match &result {
            Ok(_) => REPORTS_GENERATED.inc(),
            Err(_) => PIPELINE_FAILURES.inc(),
        }
        result
    }

    async fn run_pipeline(&self, question: &str) -> Result<ResearchResponse, ApiError> {
        let plan = self.planner.plan(question);

        let search_results = if plan.call_search {
            self.search.run(question).await?
        } else {
            Vec::new()
        };

        let summary = if plan.call_summarization {
            self.summarizer.run(question, &search_results).await?
        } else {
            String::new()
        };

        let extraction = if plan.call_extraction {
            self.extraction.run(question, &summary).await?
        } else {
            Extraction::Raw {
                raw_extraction: String::new(),
            }
        };

        let citations = if plan.call_citation {
            self.citation.run(&search_results, &summary).await?
        } else {
            String::new()
        };

        let html = if plan.call_document_builder {
            self.document
                .build(question, &summary, &extraction, &citations)
        } else {
            String::new()
        };

        let file_name = format!("report-{}.html", Uuid::new_v4());
        let document_url = self.blob.put(html.into_bytes(), &file_name).await?;
        info!("Report uploaded: {}", document_url);

        Ok(ResearchResponse {
            question: question.to_string(),
            document_url,
            file_name,
            generated_at: Utc::now(),
            summary_preview: summary.chars().take(SUMMARY_PREVIEW_CHARS).collect(),
            plan,
        })
    }
}
