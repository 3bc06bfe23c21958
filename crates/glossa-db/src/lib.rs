//! Glossa Database Layer
//!
//! Relational storage for the glossary on SQLite through sqlx: categories,
//! terms, term details, related-term records and profession
//! recommendations. Every entity has its own repository sharing one
//! [`Database`] handle.
//!
//! # Example
//!
//! ```rust,no_run
//! use glossa_db::{Database, NewCategory, CategoryRepository};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::open("sqlite://data/glossa.db", 5).await?;
//!     db.initialize().await?;
//!
//!     let categories = CategoryRepository::new(Arc::new(db));
//!     categories.insert(&NewCategory::new("Programming")).await?;
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod schema;
pub mod categories;
pub mod terms;
pub mod term_details;
pub mod related_terms;
pub mod recommendations;

pub use database::{Database, DatabaseStats};
pub use error::{DbError, Result};
pub use schema::{
    Category, NewCategory, Term, NewTerm, TermDetail, NewTermDetail,
    RelatedTerm, NewRelatedTerm, ProfessionRecommendation, NewRecommendation,
    TABLE_CATEGORIES, TABLE_TERMS, TABLE_TERM_DETAILS, TABLE_RELATED_TERMS,
    TABLE_RELATED_TERM_MEMBERS, TABLE_RECOMMENDATIONS,
};
pub use categories::CategoryRepository;
pub use terms::TermRepository;
pub use term_details::TermDetailRepository;
pub use related_terms::RelatedTermRepository;
pub use recommendations::RecommendationRepository;
