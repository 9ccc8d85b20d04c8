use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use crate::cache::token::AccessToken;
use crate::lead::{FormSubmission, LeadRecord};
use crate::observability::metrics::{
    get_metrics, OUTCOME_FAILED, OUTCOME_FORWARDED, OUTCOME_REJECTED,
};
use crate::relay::downstream::{forward_lead, LeadResponse};
use crate::relay::error::RelayError;
use crate::server::server::AppState;

/// `POST /submit`: authenticate, reshape the submission and forward it.
pub async fn submit(State(state): State<AppState>, body: Bytes) -> Response {
    let metrics = get_metrics().await;

    match relay_submission(&state, &body).await {
        Ok(lead_response) => {
            metrics.submissions.with_label_values(&[OUTCOME_FORWARDED]).inc();
            lead_response.into_response()
        }
        Err(err) => {
            let outcome = if err.is_passthrough() { OUTCOME_REJECTED } else { OUTCOME_FAILED };
            metrics.submissions.with_label_values(&[outcome]).inc();
            err.into_response()
        }
    }
}

async fn relay_submission(state: &AppState, body: &[u8]) -> Result<LeadResponse, RelayError> {
    let submission = FormSubmission::from_body(body)?;
    info!(
        has_name = submission.full_name.is_some(),
        has_phone = submission.phone.is_some(),
        "submission received"
    );

    let token = obtain_token(state).await?;
    let record = LeadRecord::from(&submission);

    let result = forward_lead(
        &state.client,
        &state.config.crm.lead_url(),
        &token,
        &record,
    )
    .await;

    if let (Err(RelayError::Downstream { status, .. }), Some(cache)) = (&result, &state.token_cache) {
        if *status == StatusCode::UNAUTHORIZED {
            cache.invalidate(&token).await;
        }
    }
    result
}

/// Cached token when the cache holds a live one, a fresh password grant otherwise.
async fn obtain_token(state: &AppState) -> Result<AccessToken, RelayError> {
    if let Some(cache) = &state.token_cache {
        if let Some(token) = cache.get().await {
            get_metrics().await.token_cache_hits.inc();
            debug!("using cached access token");
            return Ok(token);
        }
    }

    let token = state
        .token_source
        .fetch_token(&state.config.auth)
        .await?;

    if let Some(cache) = &state.token_cache {
        cache.set(token.clone()).await;
    }
    Ok(token)
}
