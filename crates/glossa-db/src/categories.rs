//! Category repository.
//!
//! Categories form a tree through `parent_id`. The tree is stored flat and
//! walked by id, so every write that changes a parent is checked for cycles.

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::schema::{Category, NewCategory};
use std::collections::HashSet;
use std::sync::Arc;

/// Repository for category operations.
#[derive(Clone)]
pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new category. A fresh row cannot close a cycle, so only the
    /// parent's existence is checked.
    pub async fn insert(&self, category: &NewCategory) -> Result<Category> {
        if let Some(parent_id) = category.parent_id {
            if self.find_by_id(parent_id).await?.is_none() {
                return Err(DbError::NotFound(format!("category {parent_id}")));
            }
        }

        let result = sqlx::query(
            "INSERT INTO categories (name, description, parent_id) VALUES (?, ?, ?)",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.parent_id)
        .execute(self.db.pool())
        .await
        .map_err(|e| DbError::from_insert(e, format!("category '{}'", category.name)))?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: category.name.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id,
        })
    }

    /// Find a category by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, parent_id FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(category)
    }

    /// All categories in insertion order.
    pub async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, parent_id FROM categories ORDER BY id",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows)
    }

    /// All categories ordered by name.
    pub async fn list_by_name(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, parent_id FROM categories ORDER BY name, id",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows)
    }

    /// Direct children of a category, ordered by name.
    pub async fn subcategories(&self, id: i64) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, parent_id FROM categories
             WHERE parent_id = ? ORDER BY name, id",
        )
        .bind(id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows)
    }

    /// Update name, description and parent of an existing category.
    pub async fn update(&self, category: &Category) -> Result<()> {
        if let Some(parent_id) = category.parent_id {
            self.check_parent(category.id, parent_id).await?;
        }

        let result = sqlx::query(
            "UPDATE categories SET name = ?, description = ?, parent_id = ? WHERE id = ?",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.parent_id)
        .bind(category.id)
        .execute(self.db.pool())
        .await
        .map_err(|e| DbError::from_insert(e, format!("category '{}'", category.name)))?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("category {}", category.id)));
        }
        Ok(())
    }

    /// Reject a parent that is missing, is the category itself, or lies
    /// below it in the tree.
    async fn check_parent(&self, id: i64, parent_id: i64) -> Result<()> {
        if parent_id == id {
            return Err(DbError::Validation(
                "A category cannot be its own parent.".to_string(),
            ));
        }

        let mut seen = HashSet::from([id]);
        let mut cursor = Some(parent_id);
        while let Some(current) = cursor {
            if !seen.insert(current) {
                return Err(DbError::Validation(format!(
                    "Setting parent {parent_id} on category {id} would create a cycle."
                )));
            }
            let node = self
                .find_by_id(current)
                .await?
                .ok_or_else(|| DbError::NotFound(format!("category {current}")))?;
            cursor = node.parent_id;
        }
        Ok(())
    }

    /// Delete a category together with its subcategories and their terms.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("category {id}")));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> CategoryRepository {
        let db = Database::open_in_memory().await.unwrap();
        db.initialize().await.unwrap();
        CategoryRepository::new(Arc::new(db))
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repo().await;
        let created = repo.insert(&NewCategory::new("Programming")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Programming");
        assert_eq!(found.parent_id, None);
        assert!(repo.find_by_id(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let repo = repo().await;
        repo.insert(&NewCategory::new("Databases")).await.unwrap();
        let err = repo.insert(&NewCategory::new("Databases")).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_unknown_parent_rejected() {
        let repo = repo().await;
        let err = repo.insert(&NewCategory::new("Orphan").with_parent(42)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_subcategories_ordered_by_name() {
        let repo = repo().await;
        let root = repo.insert(&NewCategory::new("Web")).await.unwrap();
        repo.insert(&NewCategory::new("Frontend").with_parent(root.id)).await.unwrap();
        repo.insert(&NewCategory::new("Backend").with_parent(root.id)).await.unwrap();

        let names: Vec<String> = repo
            .subcategories(root.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Backend", "Frontend"]);
    }

    #[tokio::test]
    async fn test_parent_cycle_rejected() {
        let repo = repo().await;
        let a = repo.insert(&NewCategory::new("A")).await.unwrap();
        let b = repo.insert(&NewCategory::new("B").with_parent(a.id)).await.unwrap();
        let c = repo.insert(&NewCategory::new("C").with_parent(b.id)).await.unwrap();

        let mut looped = a.clone();
        looped.parent_id = Some(c.id);
        let err = repo.update(&looped).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let mut own = b.clone();
        own.parent_id = Some(b.id);
        assert!(matches!(repo.update(&own).await.unwrap_err(), DbError::Validation(_)));

        // Nothing was written.
        assert_eq!(repo.find_by_id(a.id).await.unwrap().unwrap().parent_id, None);
    }

    #[tokio::test]
    async fn test_reparent_to_sibling_allowed() {
        let repo = repo().await;
        let root = repo.insert(&NewCategory::new("Root")).await.unwrap();
        let left = repo.insert(&NewCategory::new("Left").with_parent(root.id)).await.unwrap();
        let mut right = repo.insert(&NewCategory::new("Right").with_parent(root.id)).await.unwrap();

        right.parent_id = Some(left.id);
        repo.update(&right).await.unwrap();
        assert_eq!(repo.subcategories(left.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_subcategories() {
        let repo = repo().await;
        let root = repo.insert(&NewCategory::new("Root")).await.unwrap();
        repo.insert(&NewCategory::new("Child").with_parent(root.id)).await.unwrap();

        repo.delete(root.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(repo.delete(root.id).await.unwrap_err(), DbError::NotFound(_)));
    }
}
