//! Tune-in API handlers

use super::handlers::{ApiState, AppError};
use super::query::PaginationParams;
use crate::neo4j::models::{Connection, TuneInCounts, TuneInEdgeDetails};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct IsFollowingResponse {
    pub following: bool,
}

/// Tune in (idempotent)
pub async fn create_tune_in(
    State(state): State<ApiState>,
    Path((follower_id, followee_id)): Path<(String, String)>,
) -> Result<Json<TuneInEdgeDetails>, AppError> {
    let details = state.tune_in.create_edge(&follower_id, &followee_id).await?;
    Ok(Json(details))
}

/// Tune out. 404 when there was no edge.
pub async fn remove_tune_in(
    State(state): State<ApiState>,
    Path((follower_id, followee_id)): Path<(String, String)>,
) -> Result<Json<OkResponse>, AppError> {
    state.tune_in.remove_edge(&follower_id, &followee_id).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// Crew and following counts
pub async fn get_counts(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<TuneInCounts>, AppError> {
    Ok(Json(state.tune_in.counts(&user_id).await?))
}

pub async fn list_followers(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<Connection>>, AppError> {
    params.validate().map_err(AppError::BadRequest)?;
    let page = params.to_page(state.max_page_size);
    Ok(Json(state.tune_in.list_followers(&user_id, page).await?))
}

pub async fn list_following(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<Connection>>, AppError> {
    params.validate().map_err(AppError::BadRequest)?;
    let page = params.to_page(state.max_page_size);
    Ok(Json(state.tune_in.list_following(&user_id, page).await?))
}

/// Existence check, always 200
pub async fn is_following(
    State(state): State<ApiState>,
    Path((follower_id, followee_id)): Path<(String, String)>,
) -> Result<Json<IsFollowingResponse>, AppError> {
    let following = state.tune_in.is_following(&follower_id, &followee_id).await?;
    Ok(Json(IsFollowingResponse { following }))
}
