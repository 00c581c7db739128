use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Payment provider callback. Only `user.upgraded` events change state; others are acknowledged.
///
/// The API key is checked before the body is decoded, so unauthenticated
/// callers always get 401 regardless of what they send.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<PolkaWebhookRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let api_key = auth::extract_api_key(&headers)?;
    if state.polka_api_key.is_empty()
        || !auth::constant_time_eq(api_key.as_bytes(), state.polka_api_key.as_bytes())
    {
        tracing::warn!("Webhook rejected: API key mismatch");
        return Err(ApiError::Unauthorized("Invalid API key".to_string()));
    }

    let Json(body) = body?;
    if body.event != USER_UPGRADED_EVENT {
        tracing::debug!(event = %body.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = UserId::from_string(&body.data.user_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid user ID: {}", e)))?;

    let user = state.user_service.get_user(&user_id).await?;
    if user.is_chirpy_red {
        tracing::debug!(user_id = %user_id, "User already Chirpy Red");
        return Ok(StatusCode::NO_CONTENT);
    }

    state.user_service.upgrade_to_chirpy_red(&user_id).await?;
    tracing::info!(user_id = %user_id, "User upgraded to Chirpy Red");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolkaWebhookRequest {
    event: String,
    data: PolkaWebhookData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolkaWebhookData {
    user_id: String,
}
