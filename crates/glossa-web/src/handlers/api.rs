//! Read-only JSON API for terms and categories. Mounted behind the admin guard.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use glossa_common::ApiError;
use glossa_db::{
    Category, CategoryRepository, RelatedTermRepository, Term, TermDetailRepository,
    TermRepository,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::state::SharedState;

#[derive(Debug, Clone, Serialize)]
pub struct ApiCategory {
    pub id: i64,
    pub name: String,
}

impl From<Category> for ApiCategory {
    fn from(c: Category) -> Self {
        Self { id: c.id, name: c.name }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiTermDetail {
    pub section_title: String,
    pub content: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiRelatedTerm {
    pub relationship_description: Option<String>,
    pub related_term_titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiTerm {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub category: Option<ApiCategory>,
    pub details: Vec<ApiTermDetail>,
    pub related_terms: Vec<ApiRelatedTerm>,
}

/// Assemble the nested representation of one term.
async fn build_api_term(
    state: &SharedState,
    term: Term,
    categories: &HashMap<i64, ApiCategory>,
) -> Result<ApiTerm, ApiError> {
    let details = TermDetailRepository::new(state.db.clone())
        .list_for_term(term.id)
        .await?
        .into_iter()
        .map(|d| ApiTermDetail {
            section_title: d.section_title,
            content: d.content,
            image: d.image,
        })
        .collect();

    let related = RelatedTermRepository::new(state.db.clone());
    let mut related_terms = Vec::new();
    for record in related.list_for_term(term.id).await? {
        let related_term_titles = related
            .members(record.id)
            .await?
            .into_iter()
            .map(|t| t.title)
            .collect();
        related_terms.push(ApiRelatedTerm {
            relationship_description: record.relationship_description,
            related_term_titles,
        });
    }

    Ok(ApiTerm {
        id: term.id,
        title: term.title,
        description: term.description,
        image: term.image,
        category: categories.get(&term.category_id).cloned(),
        details,
        related_terms,
    })
}

async fn category_index(state: &SharedState) -> Result<HashMap<i64, ApiCategory>, ApiError> {
    Ok(CategoryRepository::new(state.db.clone())
        .list()
        .await?
        .into_iter()
        .map(|c| (c.id, ApiCategory::from(c)))
        .collect())
}

/// GET /api/terms
pub async fn api_terms(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let categories = category_index(&state).await?;
    let terms = TermRepository::new(state.db.clone()).list_all().await?;

    let mut out = Vec::with_capacity(terms.len());
    for term in terms {
        out.push(build_api_term(&state, term, &categories).await?);
    }
    Ok(Json(out))
}

/// GET /api/terms/{id}
pub async fn api_term_detail(
    State(state): State<SharedState>,
    Path(term_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let term = TermRepository::new(state.db.clone())
        .find_by_id(term_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No term with id {term_id}")))?;
    let categories = category_index(&state).await?;
    Ok(Json(build_api_term(&state, term, &categories).await?))
}

/// GET /api/categories
pub async fn api_categories(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories: Vec<ApiCategory> = CategoryRepository::new(state.db.clone())
        .list()
        .await?
        .into_iter()
        .map(ApiCategory::from)
        .collect();
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn api_category_detail(
    State(state): State<SharedState>,
    Path(category_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let category = CategoryRepository::new(state.db.clone())
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No category with id {category_id}")))?;
    Ok(Json(ApiCategory::from(category)))
}
