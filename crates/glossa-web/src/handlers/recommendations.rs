//! Profession recommendations.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use glossa_common::ApiError;
use glossa_db::{ProfessionRecommendation, RecommendationRepository, Term, TermRepository};
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct RecommendationEntry {
    #[serde(flatten)]
    pub recommendation: ProfessionRecommendation,
    pub term: Term,
}

#[derive(Debug, Serialize)]
pub struct RecommendationListContext {
    pub recommendations: Vec<RecommendationEntry>,
}

/// GET /recommendations_list
pub async fn recommendations_list(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, ApiError> {
    let recommendations = RecommendationRepository::new(state.db.clone())
        .list_with_terms()
        .await?
        .into_iter()
        .map(|(recommendation, term)| RecommendationEntry { recommendation, term })
        .collect();
    Ok(Json(RecommendationListContext { recommendations }))
}

#[derive(Debug, Serialize)]
pub struct RecommendationDetailContext {
    pub recommendation: ProfessionRecommendation,
    pub term: Option<Term>,
}

/// GET /recommendation_detail/{id}
pub async fn recommendation_detail(
    State(state): State<SharedState>,
    Path(rec_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let recommendation = RecommendationRepository::new(state.db.clone())
        .find_by_id(rec_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No recommendation with id {rec_id}")))?;
    let term = TermRepository::new(state.db.clone())
        .find_by_id(recommendation.term_id)
        .await?;
    Ok(Json(RecommendationDetailContext { recommendation, term }))
}
