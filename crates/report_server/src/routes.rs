//! Report route
//!
//! The whole request body is the payload; no headers or fields are required.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use bytes::Bytes;
use contracts::{ContractError, ReportSink};
use observability::metrics::{
    record_report_appended, record_report_latency_ms, record_report_outcome, ReportOutcome,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::server::AppState;

/// Body of the 500 response when every slot is full
pub const CAPACITY_EXHAUSTED_MESSAGE: &str = "Server cannot log anymore errors.";

/// Body of the 500 response when the append failed
pub const WRITE_FAILURE_MESSAGE: &str = "Server could not write the error to disc.";

pub fn report_routes<S>(path: &str) -> Router<Arc<AppState<S>>>
where
    S: ReportSink + Sync + 'static,
{
    Router::new().route(path, any(submit_report::<S>))
}

async fn submit_report<S>(State(state): State<Arc<AppState<S>>>, body: Bytes) -> Response
where
    S: ReportSink + Sync + 'static,
{
    let started = Instant::now();
    let payload_len = body.len();

    let result = state.sink.append(body).await;
    record_report_latency_ms(started.elapsed().as_secs_f64() * 1000.0);

    match result {
        Ok(receipt) => {
            record_report_appended(&receipt);
            info!(
                sink = state.sink.name(),
                slot = receipt.slot,
                payload_len,
                "Error report stored"
            );
            StatusCode::OK.into_response()
        }
        Err(e) => {
            let (outcome, message) = classify(&e);
            record_report_outcome(outcome);
            match outcome {
                ReportOutcome::CapacityExhausted => {
                    warn!(sink = state.sink.name(), error = %e, "Error report refused")
                }
                _ => error!(sink = state.sink.name(), error = %e, "Error report lost"),
            }
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}

/// Only capacity exhaustion has its own message; every other failure is a write failure
fn classify(err: &ContractError) -> (ReportOutcome, &'static str) {
    if err.is_capacity_exhausted() {
        (ReportOutcome::CapacityExhausted, CAPACITY_EXHAUSTED_MESSAGE)
    } else {
        (ReportOutcome::WriteFailure, WRITE_FAILURE_MESSAGE)
    }
}
