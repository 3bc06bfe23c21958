//! Term listing, term detail and related-term attachment.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Form, Json,
};
use glossa_catalog::{parse_page_number, Page, RelatedGroup, SortOrder, TermQuery};
use glossa_common::ApiError;
use glossa_db::{Category, CategoryRepository, Term, TermDetail, TermDetailRepository, TermRepository};
use serde::{Deserialize, Serialize};

use crate::state::SharedState;

/// Query string of the all-terms listing.
#[derive(Debug, Deserialize, Default)]
pub struct TermListParams {
    pub sort: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub letter: Option<String>,
    pub page: Option<String>,
}

impl TermListParams {
    fn selected_category(&self) -> Result<Option<i64>, ApiError> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ApiError::BadRequest(format!("Invalid category id: {raw}"))),
        }
    }

    pub fn to_query(&self) -> Result<TermQuery, ApiError> {
        Ok(TermQuery {
            sort_order: SortOrder::from_param(self.sort.as_deref()),
            search_query: self.q.clone(),
            category_id: self.selected_category()?,
            selected_letter: self.letter.as_deref().map(str::trim).map(str::to_string),
            page_number: parse_page_number(self.page.as_deref()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TermListContext {
    pub page_obj: Page<Term>,
    pub categories: Vec<Category>,
    pub selected_category: Option<i64>,
    pub sort_order: SortOrder,
    pub search_query: String,
    pub selected_letter: String,
    pub available_letters: Vec<String>,
}

/// GET /terms?sort=&q=&category=&letter=&page=
pub async fn all_terms(
    State(state): State<SharedState>,
    Query(params): Query<TermListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query()?;
    let browse = state.catalog.browse(&query).await?;
    let categories = CategoryRepository::new(state.db.clone()).list().await?;

    Ok(Json(TermListContext {
        page_obj: browse.page,
        categories,
        selected_category: query.category_id,
        sort_order: query.sort_order,
        search_query: query.search_query.unwrap_or_default(),
        selected_letter: query.selected_letter.unwrap_or_default(),
        available_letters: browse.available_letters,
    }))
}

/// Navigation context echoed back to the term page.
#[derive(Debug, Deserialize, Default)]
pub struct TermDetailParams {
    pub from: Option<String>,
    pub category_id: Option<String>,
    pub rec_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TermDetailContext {
    pub term: Term,
    pub category: Option<Category>,
    pub term_details: Vec<TermDetail>,
    pub related_terms_grouped: Vec<RelatedGroup>,
    pub return_from: Option<String>,
    pub category_id: Option<String>,
    pub rec_id: Option<String>,
}

/// GET /terms/{id}
pub async fn term_detail(
    State(state): State<SharedState>,
    Path(term_id): Path<i64>,
    Query(params): Query<TermDetailParams>,
) -> Result<impl IntoResponse, ApiError> {
    let term = TermRepository::new(state.db.clone())
        .find_by_id(term_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No term with id {term_id}")))?;

    let category = CategoryRepository::new(state.db.clone())
        .find_by_id(term.category_id)
        .await?;
    let term_details = TermDetailRepository::new(state.db.clone())
        .list_for_term(term_id)
        .await?;
    let related_terms_grouped = state.catalog.related_groups(term_id).await?;

    Ok(Json(TermDetailContext {
        term,
        category,
        term_details,
        related_terms_grouped,
        return_from: params.from,
        category_id: params.category_id,
        rec_id: params.rec_id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AttachForm {
    #[serde(default)]
    pub related_titles: String,
    #[serde(default)]
    pub relationship_description: String,
}

/// POST /terms/{id}/related - admin only
pub async fn add_related_terms(
    State(state): State<SharedState>,
    Path(term_id): Path<i64>,
    Form(form): Form<AttachForm>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .catalog
        .attach_related(term_id, &form.related_titles, &form.relationship_description)
        .await?;
    Ok(Json(report))
}
