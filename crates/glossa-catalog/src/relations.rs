//! Relationship resolver: related terms of a term, grouped by description.

use glossa_common::{GlossaError, Result};
use glossa_db::{RelatedTerm, RelatedTermRepository, Term, TermRepository};
use serde::Serialize;

/// Related terms that share one relationship description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedGroup {
    pub description: String,
    pub terms: Vec<Term>,
}

/// Group members by the description of the record they came from.
///
/// A missing description counts as the empty string. Groups appear in the
/// order their description is first met; inside a group, terms keep record
/// order then member order, and repeats across records are kept.
pub fn group_related<I>(records: I) -> Vec<RelatedGroup>
where
    I: IntoIterator<Item = (RelatedTerm, Vec<Term>)>,
{
    let mut groups: Vec<RelatedGroup> = Vec::new();

    for (record, members) in records {
        let description = record.relationship_description.unwrap_or_default();
        let slot = match groups.iter().position(|g| g.description == description) {
            Some(idx) => idx,
            None => {
                groups.push(RelatedGroup { description, terms: Vec::new() });
                groups.len() - 1
            }
        };
        groups[slot].terms.extend(members);
    }

    groups
}

/// Load and group the related terms of `term_id`.
pub async fn resolve_related(
    terms: &TermRepository,
    related: &RelatedTermRepository,
    term_id: i64,
) -> Result<Vec<RelatedGroup>> {
    if terms.find_by_id(term_id).await?.is_none() {
        return Err(GlossaError::NotFound(format!("term {term_id}")));
    }

    let records = related.list_for_term(term_id).await?;
    let mut loaded = Vec::with_capacity(records.len());
    for record in records {
        let members = related.members(record.id).await?;
        loaded.push((record, members));
    }

    let groups = group_related(loaded);
    tracing::debug!(term_id, groups = groups.len(), "resolved related terms");
    Ok(groups)
}
