//! Bulk attachment of related terms by title.
//!
//! Administrators paste a comma-separated list of titles. Each title that
//! resolves to exactly one other term gets its own relationship record,
//! unless the pair is already linked. Unresolvable titles are reported and
//! skipped; they never fail the whole request.

use glossa_common::{GlossaError, Result};
use glossa_db::{NewRelatedTerm, RelatedTermRepository, Term, TermRepository};
use serde::Serialize;
use tracing::{info, warn};

/// Why a resolved title did not produce a new link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    SelfLink,
    AlreadyLinked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTitle {
    pub title: String,
    pub reason: SkipReason,
}

/// Outcome of one attachment request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttachReport {
    /// Terms that were newly linked, in input order.
    pub created: Vec<Term>,
    pub skipped: Vec<SkippedTitle>,
    /// Human-readable notes for titles that could not be resolved.
    pub warnings: Vec<String>,
}

/// Split on commas, trim, drop empties.
pub fn parse_titles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect()
}

/// Link `term_id` to every term named in `raw_titles`.
pub async fn attach_related(
    terms: &TermRepository,
    related: &RelatedTermRepository,
    term_id: i64,
    raw_titles: &str,
    description: &str,
) -> Result<AttachReport> {
    let target = terms
        .find_by_id(term_id)
        .await?
        .ok_or_else(|| GlossaError::NotFound(format!("term {term_id}")))?;

    let titles = parse_titles(raw_titles);
    if titles.is_empty() {
        return Ok(AttachReport::default());
    }

    let all = terms.list_all().await?;
    let mut report = AttachReport::default();

    for title in titles {
        let wanted = title.to_lowercase();
        let candidates: Vec<&Term> = all.iter().filter(|t| t.title.to_lowercase() == wanted).collect();

        let found = match candidates.as_slice() {
            [] => {
                warn!(term_id, title = %title, "related term not found");
                report.warnings.push(format!("Term \"{title}\" not found."));
                continue;
            }
            [only] => *only,
            _ => {
                warn!(term_id, title = %title, matches = candidates.len(), "ambiguous related term title");
                report
                    .warnings
                    .push(format!("Term \"{title}\" matches {} terms.", candidates.len()));
                continue;
            }
        };

        if found.id == target.id {
            report.skipped.push(SkippedTitle { title, reason: SkipReason::SelfLink });
            continue;
        }
        if related.links(target.id, found.id).await? {
            report.skipped.push(SkippedTitle { title, reason: SkipReason::AlreadyLinked });
            continue;
        }

        related
            .insert(&NewRelatedTerm {
                term_id: target.id,
                related_term_ids: vec![found.id],
                relationship_description: Some(description.to_string()),
            })
            .await?;
        report.created.push(found.clone());
    }

    info!(
        term_id,
        created = report.created.len(),
        skipped = report.skipped.len(),
        warnings = report.warnings.len(),
        "attached related terms"
    );
    Ok(report)
}
