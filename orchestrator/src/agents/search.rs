// Search Agent: fetches raw web results for the question

use std::sync::Arc;

use tracing::info;

use crate::error::ApiError;
use crate::models::SearchResult;
use crate::search_client::WebSearch;

const RESULT_CAP: usize = 5;

pub struct SearchAgent {
    search: Arc<dyn WebSearch>,
}

impl SearchAgent {
    pub fn new(search: Arc<dyn WebSearch>) -> Self {
        Self { search }
    }

    pub async fn run(&self, question: &str) -> Result<Vec<SearchResult>, ApiError> {
        info!("Search: querying web for: {}", question);
        self.search.search(question, RESULT_CAP).await
    }
}
