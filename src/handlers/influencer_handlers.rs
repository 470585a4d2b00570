use crate::error::Result;
use crate::models::influencer::{InfluencerProfile, LeaderboardStats};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

pub async fn list_influencers_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<InfluencerProfile>>> {
    let influencers = app_state.influencer_service.list_influencers().await?;
    tracing::debug!(count = influencers.len(), "fetched influencers");
    Ok(Json(influencers))
}

#[instrument(skip(app_state))]
pub async fn get_influencer_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InfluencerProfile>> {
    let influencer = app_state.influencer_service.get_influencer(&id).await?;
    Ok(Json(influencer))
}

pub async fn leaderboard_stats_handler(
    State(app_state): State<AppState>,
) -> Result<Json<LeaderboardStats>> {
    let stats = app_state.influencer_service.leaderboard_stats().await?;
    Ok(Json(stats))
}
