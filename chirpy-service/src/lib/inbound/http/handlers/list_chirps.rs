use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use crate::domain::chirp::models::ListChirpsQuery;
use crate::domain::chirp::models::SortOrder;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ListChirpsParams>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError> {
    let query = params.try_into_query()?;

    let chirps = state.chirp_service.list_chirps(query).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        chirps.iter().map(ChirpData::from).collect(),
    ))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListChirpsParams {
    author_id: Option<String>,
    sort: Option<String>,
}

impl ListChirpsParams {
    /// Unknown sort values fall back to oldest first.
    fn try_into_query(self) -> Result<ListChirpsQuery, ApiError> {
        let author_id = self
            .author_id
            .filter(|id| !id.is_empty())
            .map(|id| UserId::from_string(&id))
            .transpose()
            .map_err(|e| ApiError::BadRequest(format!("Invalid author ID: {}", e)))?;

        let sort = self
            .sort
            .and_then(|s| s.parse::<SortOrder>().ok())
            .unwrap_or_default();

        Ok(ListChirpsQuery { author_id, sort })
    }
}
