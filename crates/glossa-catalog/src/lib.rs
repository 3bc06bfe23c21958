//! glossa-catalog: Term browsing and relationship resolution.
//!
//! - [`query`]: filter / sort / paginate the term collection
//! - [`letters`]: first-letter facet derived from current titles
//! - [`relations`]: related terms grouped by relationship description
//! - [`attach`]: bulk linking of related terms by title

pub mod query;
pub mod letters;
pub mod relations;
pub mod attach;

pub use attach::{attach_related, parse_titles, AttachReport, SkipReason, SkippedTitle};
pub use letters::{facet_letter, letter_facet, starts_with_letter};
pub use query::{parse_page_number, Page, SortOrder, TermQuery, PAGE_SIZE};
pub use relations::{group_related, resolve_related, RelatedGroup};

use glossa_common::Result;
use glossa_db::{Database, RelatedTermRepository, Term, TermRepository};
use serde::Serialize;
use std::sync::Arc;

/// Result of a listing request: the page plus the letter facet computed over
/// the unfiltered collection.
#[derive(Debug, Clone, Serialize)]
pub struct Browse {
    pub page: Page<Term>,
    pub available_letters: Vec<String>,
}

/// Read-side entry point shared by the web handlers.
#[derive(Clone)]
pub struct Catalog {
    terms: TermRepository,
    related: RelatedTermRepository,
}

impl Catalog {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            terms: TermRepository::new(db.clone()),
            related: RelatedTermRepository::new(db),
        }
    }

    /// Run a listing query against the whole store.
    pub async fn browse(&self, query: &TermQuery) -> Result<Browse> {
        let all = self.terms.list_all().await?;
        let available_letters = letter_facet(&all);
        let page = query.run(&all);
        Ok(Browse { page, available_letters })
    }

    /// Related terms of `term_id` grouped by description.
    pub async fn related_groups(&self, term_id: i64) -> Result<Vec<RelatedGroup>> {
        resolve_related(&self.terms, &self.related, term_id).await
    }

    /// Link `term_id` to the terms named in `raw_titles`.
    pub async fn attach_related(
        &self,
        term_id: i64,
        raw_titles: &str,
        description: &str,
    ) -> Result<AttachReport> {
        attach::attach_related(&self.terms, &self.related, term_id, raw_titles, description).await
    }
}
