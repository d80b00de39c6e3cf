use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use warp::{Filter, Rejection, Reply};

use crate::orchestrator::Orchestrator;

mod research;

pub fn routes(
    orchestrator: Arc<Orchestrator>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let api = warp::path("api").and(warp::path("v1"));

    let research_post = api
        .and(warp::path("research"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::bytes())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_orchestrator(orchestrator.clone()))
        .and_then(research::handle_research);

    // The question may also arrive as a query parameter, with no body at all.
    let research_get = api
        .and(warp::path("research"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::any().map(Bytes::new))
        .and(warp::query::<HashMap<String, String>>())
        .and(with_orchestrator(orchestrator))
        .and_then(research::handle_research);

    research_post.or(research_get)
}

fn with_orchestrator(
    orchestrator: Arc<Orchestrator>,
) -> impl Filter<Extract = (Arc<Orchestrator>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || orchestrator.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob_client::BlobStore;
    use crate::chat_client::ChatCompletion;
    use crate::error::ApiError;
    use crate::models::SearchResult;
    use crate::search_client::WebSearch;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    const SUMMARY: &str = "Quantum computing uses qubits.";
    const EXTRACTION_JSON: &str =
        r#"{"key_facts": ["qubits"], "metrics": {}, "entities": ["IBM"]}"#;

    struct ScriptedChat;

    #[async_trait]
    impl ChatCompletion for ScriptedChat {
        async fn complete(
            &self,
            system_prompt: &str,
            _user_prompt: &str,
            _temperature: f64,
        ) -> Result<String, ApiError> {
            if system_prompt.contains("summarization") {
                Ok(SUMMARY.to_string())
            } else if system_prompt.contains("extract") {
                Ok(EXTRACTION_JSON.to_string())
            } else {
                Ok("[1] A (u1)".to_string())
            }
        }
    }

    struct TwoResults;

    #[async_trait]
    impl WebSearch for TwoResults {
        async fn search(&self, _query: &str, _top: usize) -> Result<Vec<SearchResult>, ApiError> {
            Ok(vec![
                SearchResult {
                    title: "A".to_string(),
                    snippet: "first".to_string(),
                    url: "u1".to_string(),
                },
                SearchResult {
                    title: "B".to_string(),
                    snippet: "second".to_string(),
                    url: "u2".to_string(),
                },
            ])
        }
    }

    struct OkBlob;

    #[async_trait]
    impl BlobStore for OkBlob {
        async fn put(&self, _bytes: Vec<u8>, name: &str) -> Result<String, ApiError> {
            Ok(format!("https://blobs.example/research-reports/{}", name))
        }
    }

    struct FailingBlob;

    #[async_trait]
    impl BlobStore for FailingBlob {
        async fn put(&self, _bytes: Vec<u8>, _name: &str) -> Result<String, ApiError> {
            Err(ApiError::Upstream {
                status: 403,
                body: "storage denied".to_string(),
            })
        }
    }

    fn mock_routes(
        blob: Arc<dyn BlobStore>,
    ) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        routes(Arc::new(Orchestrator::new(
            Arc::new(ScriptedChat),
            Arc::new(TwoResults),
            blob,
        )))
    }

    #[tokio::test]
    async fn research_question_returns_an_envelope() {
        let routes = mock_routes(Arc::new(OkBlob));
        let response = warp::test::request()
            .method("POST")
            .path("/api/v1/research")
            .json(&serde_json::json!({"question": "What is quantum computing?"}))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 200);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["question"], "What is quantum computing?");
        assert!(!body["document_url"].as_str().unwrap().is_empty());
        assert_eq!(body["summary_preview"], SUMMARY);
        assert_eq!(body["plan"]["call_search"], true);
        assert_eq!(body["plan"]["call_document_builder"], true);
        assert!(body["generated_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn question_can_come_from_the_query_string() {
        let routes = mock_routes(Arc::new(OkBlob));
        let response = warp::test::request()
            .method("GET")
            .path("/api/v1/research?question=What%20is%20quantum%20computing%3F")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 200);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["question"], "What is quantum computing?");
    }

    #[tokio::test]
    async fn body_question_wins_over_query_parameter() {
        let routes = mock_routes(Arc::new(OkBlob));
        let response = warp::test::request()
            .method("POST")
            .path("/api/v1/research?question=ignored")
            .json(&serde_json::json!({"question": "from body"}))
            .reply(&routes)
            .await;

        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["question"], "from body");
    }

    #[tokio::test]
    async fn missing_question_is_rejected_with_the_fixed_message() {
        let routes = mock_routes(Arc::new(OkBlob));
        let response = warp::test::request()
            .method("POST")
            .path("/api/v1/research")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 400);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["error"], "Missing 'question' in body or query string.");
    }

    #[tokio::test]
    async fn empty_question_counts_as_missing() {
        let routes = mock_routes(Arc::new(OkBlob));
        let response = warp::test::request()
            .method("POST")
            .path("/api/v1/research")
            .json(&serde_json::json!({"question": ""}))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn upload_failure_surfaces_as_a_server_error() {
        let routes = mock_routes(Arc::new(FailingBlob));
        let response = warp::test::request()
            .method("POST")
            .path("/api/v1/research")
            .json(&serde_json::json!({"question": "doomed"}))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 500);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert!(body["error"].as_str().unwrap().contains("storage denied"));
        assert!(body.get("document_url").is_none());
    }
}
