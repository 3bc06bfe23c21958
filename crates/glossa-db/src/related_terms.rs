//! Related-term repository.
//!
//! A `RelatedTerm` row belongs to its owning term and carries a free-text
//! description; the set of terms it points at lives in
//! `related_term_members`. Record and members are always written together.

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::schema::{NewRelatedTerm, RelatedTerm, Term};
use std::collections::HashSet;
use std::sync::Arc;

/// Repository for term-to-term relationship records.
#[derive(Clone)]
pub struct RelatedTermRepository {
    db: Arc<Database>,
}

impl RelatedTermRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn term_exists(&self, id: i64) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM terms WHERE id = ?)")
            .bind(id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(exists != 0)
    }

    /// Insert a relationship record and its member set.
    ///
    /// The owning term may not appear among its own members. Repeated member
    /// ids collapse to one. Nothing is written if validation fails.
    pub async fn insert(&self, related: &NewRelatedTerm) -> Result<RelatedTerm> {
        if related.related_term_ids.contains(&related.term_id) {
            return Err(DbError::Validation(
                "A term cannot be related to itself.".to_string(),
            ));
        }
        if !self.term_exists(related.term_id).await? {
            return Err(DbError::NotFound(format!("term {}", related.term_id)));
        }

        let mut seen = HashSet::new();
        let members: Vec<i64> = related
            .related_term_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();
        for id in &members {
            if !self.term_exists(*id).await? {
                return Err(DbError::NotFound(format!("term {id}")));
            }
        }

        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO related_terms (term_id, relationship_description) VALUES (?, ?)",
        )
        .bind(related.term_id)
        .bind(&related.relationship_description)
        .execute(&mut *tx)
        .await?;
        let id = result.last_insert_rowid();

        for member in &members {
            sqlx::query("INSERT INTO related_term_members (related_term_id, term_id) VALUES (?, ?)")
                .bind(id)
                .bind(*member)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(RelatedTerm {
            id,
            term_id: related.term_id,
            relationship_description: related.relationship_description.clone(),
        })
    }

    /// Records owned by a term, in insertion order.
    pub async fn list_for_term(&self, term_id: i64) -> Result<Vec<RelatedTerm>> {
        let rows = sqlx::query_as::<_, RelatedTerm>(
            "SELECT id, term_id, relationship_description
             FROM related_terms WHERE term_id = ? ORDER BY id",
        )
        .bind(term_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows)
    }

    /// Member terms of one record, in term default order.
    pub async fn members(&self, related_term_id: i64) -> Result<Vec<Term>> {
        let rows = sqlx::query_as::<_, Term>(
            "SELECT t.id, t.category_id, t.title, t.description, t.image
             FROM related_term_members m
             JOIN terms t ON t.id = m.term_id
             WHERE m.related_term_id = ?
             ORDER BY t.title, t.id",
        )
        .bind(related_term_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows)
    }

    /// Whether any record owned by `term_id` already contains `related_id`.
    pub async fn links(&self, term_id: i64, related_id: i64) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM related_terms r
                JOIN related_term_members m ON m.related_term_id = r.id
                WHERE r.term_id = ? AND m.term_id = ?
             )",
        )
        .bind(term_id)
        .bind(related_id)
        .fetch_one(self.db.pool())
        .await?;
        Ok(exists != 0)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM related_terms WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("related term {id}")));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM related_terms")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count as u64)
    }
}
