//! Repository gateway handlers.
//!
//! Both handlers answer 200 even when the upstream call fails; the failure is
//! carried in an `Error: ` body.

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tokio::sync::mpsc;

use hubgate_core::protocol::upstream::{error_text, got_text, repo_line, UpstreamOutcome, DONE_LINE};

use crate::app_state::RepoGatewayState;
use crate::router::paths;

use super::{text_response, TEXT_PLAIN};

// Chunks buffered between the writer task and the response body.
const STREAM_BUFFER: usize = 16;

pub async fn root(State(state): State<RepoGatewayState>) -> Response {
    state.metrics().inc_hit(paths::ROOT);

    let upstream = state.upstream();
    let body = match upstream.call(&upstream.root()).await {
        UpstreamOutcome::Success(b) => got_text(&b),
        UpstreamOutcome::Failure(e) => error_text(&e),
    };
    text_response(body)
}

/// Streams one `Repo: <id>` line per element, then `Done.`.
///
/// The outcome is inspected once, before the first line. After that the
/// writer only stops early if the caller goes away.
pub async fn my_repos(State(state): State<RepoGatewayState>) -> Response {
    state.metrics().inc_hit(paths::MY_REPOS);

    let upstream = state.upstream();
    let ids = match upstream
        .call(&upstream.repos())
        .await
        .into_result()
        .and_then(|b| b.identifiers(upstream.identifier_field()))
    {
        Ok(ids) => ids,
        Err(e) => return text_response(error_text(&e)),
    };

    let (tx, rx) = mpsc::channel::<Bytes>(STREAM_BUFFER);
    tokio::spawn(async move {
        for id in ids {
            if tx.send(Bytes::from(repo_line(&id))).await.is_err() {
                tracing::debug!("caller disconnected mid-stream");
                return;
            }
        }
        let _ = tx.send(Bytes::from_static(DONE_LINE.as_bytes())).await;
    });

    let chunks = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (Ok::<_, Infallible>(chunk), rx))
    });

    ([(CONTENT_TYPE, TEXT_PLAIN)], Body::from_stream(chunks)).into_response()
}
