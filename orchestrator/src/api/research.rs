use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::error::ApiError;
use crate::models::ResearchRequest;
use crate::orchestrator::Orchestrator;

pub async fn handle_research(
    body: Bytes,
    params: HashMap<String, String>,
    orchestrator: Arc<Orchestrator>,
) -> Result<impl Reply, Rejection> {
    // An absent or non-JSON body is treated the same as an empty one.
    let request: ResearchRequest = serde_json::from_slice(&body).unwrap_or_default();

    let question = request
        .question
        .filter(|q| !q.is_empty())
        .or_else(|| params.get("question").cloned().filter(|q| !q.is_empty()));

    let Some(question) = question else {
        return Ok(error_reply(&ApiError::MissingQuestion));
    };

    info!("Processing research question: {}", question);

    match orchestrator.run(&question).await {
        Ok(response) => Ok(warp::reply::with_status(
            warp::reply::json(&response),
            StatusCode::OK,
        )),
        Err(err) => {
            error!("Research pipeline failed: {}", err);
            Ok(error_reply(&err))
        }
    }
}

fn error_reply(err: &ApiError) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": err.to_string() })),
        err.status_code(),
    )
}
