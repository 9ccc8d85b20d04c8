use axum::{
    body::{Body, Bytes},
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{info, warn};

use crate::cache::token::AccessToken;
use crate::helpers::time::get_instant;
use crate::lead::LeadRecord;
use crate::observability::metrics::get_metrics;
use crate::relay::error::RelayError;

/// Successful answer of the CRM, handed back to the caller unchanged.
#[derive(Debug)]
pub struct LeadResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for LeadResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Body::from(self.body)).into_response();
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        response
    }
}

/// POST the lead record to the CRM with the bearer token attached.
pub async fn forward_lead(
    client: &Client,
    lead_url: &str,
    token: &AccessToken,
    record: &LeadRecord,
) -> Result<LeadResponse, RelayError> {
    let metrics = get_metrics().await;
    let start = get_instant();

    let response = client
        .post(lead_url)
        .header(AUTHORIZATION, token.bearer())
        .json(record)
        .send()
        .await;
    metrics.lead_forward_duration.observe(start.elapsed().as_secs_f64());
    let response = response?;

    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let body = response.bytes().await?;

    if !status.is_success() {
        warn!(%status, "lead endpoint rejected submission");
        return Err(RelayError::Downstream {
            status,
            content_type,
            body: body.to_vec(),
        });
    }

    info!(%status, "lead forwarded");
    Ok(LeadResponse { status, content_type, body })
}
