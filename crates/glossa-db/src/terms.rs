//! Term repository.

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::schema::{NewTerm, Term};
use std::sync::Arc;

const TERM_COLUMNS: &str = "id, category_id, title, description, image";

/// Repository for term operations.
#[derive(Clone)]
pub struct TermRepository {
    db: Arc<Database>,
}

impl TermRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn ensure_category(&self, category_id: i64) -> Result<()> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?)")
            .bind(category_id)
            .fetch_one(self.db.pool())
            .await?;
        if exists == 0 {
            return Err(DbError::NotFound(format!("category {category_id}")));
        }
        Ok(())
    }

    /// Insert a new term under an existing category.
    pub async fn insert(&self, term: &NewTerm) -> Result<Term> {
        if term.title.trim().is_empty() {
            return Err(DbError::Validation("Term title must not be empty.".to_string()));
        }
        self.ensure_category(term.category_id).await?;

        let result = sqlx::query(
            "INSERT INTO terms (category_id, title, description, image) VALUES (?, ?, ?, ?)",
        )
        .bind(term.category_id)
        .bind(&term.title)
        .bind(&term.description)
        .bind(&term.image)
        .execute(self.db.pool())
        .await?;

        Ok(Term {
            id: result.last_insert_rowid(),
            category_id: term.category_id,
            title: term.title.clone(),
            description: term.description.clone(),
            image: term.image.clone(),
        })
    }

    /// Find a term by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Term>> {
        let sql = format!("SELECT {TERM_COLUMNS} FROM terms WHERE id = ?");
        let term = sqlx::query_as::<_, Term>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(term)
    }

    /// Every term in default order (title, then id).
    pub async fn list_all(&self) -> Result<Vec<Term>> {
        let sql = format!("SELECT {TERM_COLUMNS} FROM terms ORDER BY title, id");
        let rows = sqlx::query_as::<_, Term>(&sql)
            .fetch_all(self.db.pool())
            .await?;
        Ok(rows)
    }

    /// Terms of one category in default order.
    pub async fn list_by_category(&self, category_id: i64) -> Result<Vec<Term>> {
        let sql = format!(
            "SELECT {TERM_COLUMNS} FROM terms WHERE category_id = ? ORDER BY title, id"
        );
        let rows = sqlx::query_as::<_, Term>(&sql)
            .bind(category_id)
            .fetch_all(self.db.pool())
            .await?;
        Ok(rows)
    }

    /// Update an existing term.
    pub async fn update(&self, term: &Term) -> Result<()> {
        if term.title.trim().is_empty() {
            return Err(DbError::Validation("Term title must not be empty.".to_string()));
        }
        self.ensure_category(term.category_id).await?;

        let result = sqlx::query(
            "UPDATE terms SET category_id = ?, title = ?, description = ?, image = ? WHERE id = ?",
        )
        .bind(term.category_id)
        .bind(&term.title)
        .bind(&term.description)
        .bind(&term.image)
        .bind(term.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("term {}", term.id)));
        }
        Ok(())
    }

    /// Delete a term along with its details, relations and recommendations.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM terms WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("term {id}")));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM terms")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count as u64)
    }
}
