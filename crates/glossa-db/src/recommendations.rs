//! Profession recommendation repository.

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::schema::{NewRecommendation, ProfessionRecommendation, Term};
use std::sync::Arc;

const RECOMMENDATION_COLUMNS: &str = "id, term_id, quote_about_profession, video_about_profession, \
     quote_about_path, video_about_path, roadmap_image";

/// Joined recommendation + term row.
#[derive(sqlx::FromRow)]
struct RecommendationWithTermRow {
    id: i64,
    term_id: i64,
    quote_about_profession: String,
    video_about_profession: Option<String>,
    quote_about_path: String,
    video_about_path: Option<String>,
    roadmap_image: Option<String>,
    term_category_id: i64,
    term_title: String,
    term_description: String,
    term_image: Option<String>,
}

impl RecommendationWithTermRow {
    fn split(self) -> (ProfessionRecommendation, Term) {
        let term = Term {
            id: self.term_id,
            category_id: self.term_category_id,
            title: self.term_title,
            description: self.term_description,
            image: self.term_image,
        };
        let recommendation = ProfessionRecommendation {
            id: self.id,
            term_id: self.term_id,
            quote_about_profession: self.quote_about_profession,
            video_about_profession: self.video_about_profession,
            quote_about_path: self.quote_about_path,
            video_about_path: self.video_about_path,
            roadmap_image: self.roadmap_image,
        };
        (recommendation, term)
    }
}

/// Repository for career-guidance content attached to terms.
#[derive(Clone)]
pub struct RecommendationRepository {
    db: Arc<Database>,
}

impl RecommendationRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn insert(&self, rec: &NewRecommendation) -> Result<ProfessionRecommendation> {
        let term_exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM terms WHERE id = ?)")
            .bind(rec.term_id)
            .fetch_one(self.db.pool())
            .await?;
        if term_exists == 0 {
            return Err(DbError::NotFound(format!("term {}", rec.term_id)));
        }

        let result = sqlx::query(
            "INSERT INTO profession_recommendations
                (term_id, quote_about_profession, video_about_profession,
                 quote_about_path, video_about_path, roadmap_image)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(rec.term_id)
        .bind(&rec.quote_about_profession)
        .bind(&rec.video_about_profession)
        .bind(&rec.quote_about_path)
        .bind(&rec.video_about_path)
        .bind(&rec.roadmap_image)
        .execute(self.db.pool())
        .await?;

        Ok(ProfessionRecommendation {
            id: result.last_insert_rowid(),
            term_id: rec.term_id,
            quote_about_profession: rec.quote_about_profession.clone(),
            video_about_profession: rec.video_about_profession.clone(),
            quote_about_path: rec.quote_about_path.clone(),
            video_about_path: rec.video_about_path.clone(),
            roadmap_image: rec.roadmap_image.clone(),
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ProfessionRecommendation>> {
        let sql = format!("SELECT {RECOMMENDATION_COLUMNS} FROM profession_recommendations WHERE id = ?");
        let rec = sqlx::query_as::<_, ProfessionRecommendation>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(rec)
    }

    /// All recommendations with their term, in insertion order.
    pub async fn list_with_terms(&self) -> Result<Vec<(ProfessionRecommendation, Term)>> {
        let rows = sqlx::query_as::<_, RecommendationWithTermRow>(
            "SELECT r.id, r.term_id, r.quote_about_profession, r.video_about_profession,
                    r.quote_about_path, r.video_about_path, r.roadmap_image,
                    t.category_id AS term_category_id, t.title AS term_title,
                    t.description AS term_description, t.image AS term_image
             FROM profession_recommendations r
             JOIN terms t ON t.id = r.term_id
             ORDER BY r.id",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.into_iter().map(RecommendationWithTermRow::split).collect())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM profession_recommendations WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("recommendation {id}")));
        }
        Ok(())
    }
}
