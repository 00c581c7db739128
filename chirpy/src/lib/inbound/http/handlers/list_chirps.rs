use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpResponseData;
use crate::chirp::errors::ChirpError;
use crate::domain::chirp::models::ListChirpsQuery;
use crate::domain::chirp::models::SortOrder;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ListChirpsParams>,
) -> Result<ApiSuccess<Vec<ChirpResponseData>>, ApiError> {
    let query = params.try_into_query()?;

    state
        .chirp_service
        .list_chirps(query)
        .await
        .map_err(ApiError::from)
        .map(|chirps| {
            ApiSuccess::new(
                StatusCode::OK,
                chirps.iter().map(ChirpResponseData::from).collect(),
            )
        })
}

/// Query string for chirp listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListChirpsParams {
    author_id: Option<String>,
    sort: Option<String>,
}

impl ListChirpsParams {
    fn try_into_query(self) -> Result<ListChirpsQuery, ChirpError> {
        let author = match self.author_id.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(UserId::from_string(raw)?),
        };
        let sort = match self.sort.as_deref() {
            None => SortOrder::default(),
            Some(raw) => raw.parse::<SortOrder>()?,
        };

        Ok(ListChirpsQuery { author, sort })
    }
}
