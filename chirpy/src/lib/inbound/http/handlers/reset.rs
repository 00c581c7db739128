use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::config::Platform;
use crate::inbound::http::router::AppState;

/// Zero the hit counter and wipe all chirps and users. Only available on the dev platform.
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if state.platform != Platform::Dev {
        tracing::warn!(platform = ?state.platform, "Reset refused outside dev platform");
        return Err(ApiError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    state.metrics.reset();
    let chirps = state.chirp_service.delete_all_chirps().await?;
    let users = state.user_service.delete_all_users().await?;

    tracing::info!(
        deleted_chirps = chirps,
        deleted_users = users,
        "Application state reset"
    );

    Ok(StatusCode::OK)
}
