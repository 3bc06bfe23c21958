//! Row types and table definitions for the glossary store.

use serde::{Deserialize, Serialize};

pub const TABLE_CATEGORIES: &str = "categories";
pub const TABLE_TERMS: &str = "terms";
pub const TABLE_TERM_DETAILS: &str = "term_details";
pub const TABLE_RELATED_TERMS: &str = "related_terms";
pub const TABLE_RELATED_TERM_MEMBERS: &str = "related_term_members";
pub const TABLE_RECOMMENDATIONS: &str = "profession_recommendations";

/// DDL executed by [`crate::Database::initialize`], one statement per entry.
pub(crate) const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS categories (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL UNIQUE,
        description TEXT,
        parent_id   INTEGER REFERENCES categories(id) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS idx_categories_parent ON categories(parent_id)",
    "CREATE TABLE IF NOT EXISTS terms (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        title       TEXT NOT NULL,
        description TEXT NOT NULL,
        image       TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_terms_category ON terms(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_terms_title ON terms(title)",
    "CREATE TABLE IF NOT EXISTS term_details (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        term_id       INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        section_title TEXT NOT NULL,
        content       TEXT NOT NULL,
        image         TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_term_details_term ON term_details(term_id)",
    "CREATE TABLE IF NOT EXISTS related_terms (
        id                       INTEGER PRIMARY KEY AUTOINCREMENT,
        term_id                  INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        relationship_description TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_related_terms_term ON related_terms(term_id)",
    "CREATE TABLE IF NOT EXISTS related_term_members (
        related_term_id INTEGER NOT NULL REFERENCES related_terms(id) ON DELETE CASCADE,
        term_id         INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        PRIMARY KEY (related_term_id, term_id)
    )",
    "CREATE TABLE IF NOT EXISTS profession_recommendations (
        id                     INTEGER PRIMARY KEY AUTOINCREMENT,
        term_id                INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        quote_about_profession TEXT NOT NULL,
        video_about_profession TEXT,
        quote_about_path       TEXT NOT NULL,
        video_about_path       TEXT,
        roadmap_image          TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_recommendations_term ON profession_recommendations(term_id)",
];

// =============================================================================
// Category
// =============================================================================

/// A named grouping of terms. `parent_id` links the category into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

// =============================================================================
// Term
// =============================================================================

/// Glossary entry. Default ordering everywhere is by title, then id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Term {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTerm {
    pub category_id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl NewTerm {
    pub fn new(category_id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            category_id,
            title: title.into(),
            description: description.into(),
            image: None,
        }
    }
}

// =============================================================================
// Term detail
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TermDetail {
    pub id: i64,
    pub term_id: i64,
    pub section_title: String,
    pub content: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTermDetail {
    pub term_id: i64,
    pub section_title: String,
    pub content: String,
    pub image: Option<String>,
}

// =============================================================================
// Related terms
// =============================================================================

/// A described relationship from `term_id` to a set of member terms.
/// Members live in `related_term_members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RelatedTerm {
    pub id: i64,
    pub term_id: i64,
    pub relationship_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRelatedTerm {
    pub term_id: i64,
    pub related_term_ids: Vec<i64>,
    pub relationship_description: Option<String>,
}

// =============================================================================
// Profession recommendation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfessionRecommendation {
    pub id: i64,
    pub term_id: i64,
    pub quote_about_profession: String,
    pub video_about_profession: Option<String>,
    pub quote_about_path: String,
    pub video_about_path: Option<String>,
    pub roadmap_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecommendation {
    pub term_id: i64,
    pub quote_about_profession: String,
    pub video_about_profession: Option<String>,
    pub quote_about_path: String,
    pub video_about_path: Option<String>,
    pub roadmap_image: Option<String>,
}
