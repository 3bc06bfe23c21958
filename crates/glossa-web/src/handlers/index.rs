//! Landing page and per-category listing.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use glossa_common::ApiError;
use glossa_db::{Category, CategoryRepository, Term, TermRepository};
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct IndexContext {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct CategoryTermsContext {
    pub category: Category,
    pub subcategories: Vec<Category>,
    pub terms: Vec<Term>,
}

/// GET / - categories by name
pub async fn index(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let categories = CategoryRepository::new(state.db.clone()).list_by_name().await?;
    Ok(Json(IndexContext { categories }))
}

/// GET /category/{id}/terms
pub async fn category_terms(
    State(state): State<SharedState>,
    Path(category_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = CategoryRepository::new(state.db.clone());
    let category = categories
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No category with id {category_id}")))?;

    let subcategories = categories.subcategories(category_id).await?;
    let terms = TermRepository::new(state.db.clone())
        .list_by_category(category_id)
        .await?;

    Ok(Json(CategoryTermsContext { category, subcategories, terms }))
}
