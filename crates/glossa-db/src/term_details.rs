//! Term detail repository.

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::schema::{NewTermDetail, TermDetail};
use std::sync::Arc;

/// Repository for the extra sections attached to a term.
#[derive(Clone)]
pub struct TermDetailRepository {
    db: Arc<Database>,
}

impl TermDetailRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn insert(&self, detail: &NewTermDetail) -> Result<TermDetail> {
        let term_exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM terms WHERE id = ?)")
            .bind(detail.term_id)
            .fetch_one(self.db.pool())
            .await?;
        if term_exists == 0 {
            return Err(DbError::NotFound(format!("term {}", detail.term_id)));
        }

        let result = sqlx::query(
            "INSERT INTO term_details (term_id, section_title, content, image) VALUES (?, ?, ?, ?)",
        )
        .bind(detail.term_id)
        .bind(&detail.section_title)
        .bind(&detail.content)
        .bind(&detail.image)
        .execute(self.db.pool())
        .await?;

        Ok(TermDetail {
            id: result.last_insert_rowid(),
            term_id: detail.term_id,
            section_title: detail.section_title.clone(),
            content: detail.content.clone(),
            image: detail.image.clone(),
        })
    }

    /// Sections of a term in insertion order.
    pub async fn list_for_term(&self, term_id: i64) -> Result<Vec<TermDetail>> {
        let rows = sqlx::query_as::<_, TermDetail>(
            "SELECT id, term_id, section_title, content, image
             FROM term_details WHERE term_id = ? ORDER BY id",
        )
        .bind(term_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM term_details WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("term detail {id}")));
        }
        Ok(())
    }
}
