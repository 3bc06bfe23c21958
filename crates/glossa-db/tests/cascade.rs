//! Deleting a category or term removes everything hanging off it.

use glossa_db::{
    CategoryRepository, Database, NewCategory, NewRecommendation, NewRelatedTerm, NewTerm,
    NewTermDetail, RecommendationRepository, RelatedTermRepository, TermDetailRepository,
    TermRepository,
};
use std::sync::Arc;

async fn open() -> Arc<Database> {
    let db = Database::open_in_memory().await.expect("open in-memory db");
    db.initialize().await.expect("create schema");
    Arc::new(db)
}

#[tokio::test]
async fn test_category_delete_cascades_to_all_dependents() {
    let db = open().await;
    let categories = CategoryRepository::new(db.clone());
    let terms = TermRepository::new(db.clone());
    let details = TermDetailRepository::new(db.clone());
    let related = RelatedTermRepository::new(db.clone());
    let recs = RecommendationRepository::new(db.clone());

    let web = categories.insert(&NewCategory::new("Web")).await.unwrap();
    let backend = categories
        .insert(&NewCategory::new("Backend").with_parent(web.id))
        .await
        .unwrap();
    let other = categories.insert(&NewCategory::new("Other")).await.unwrap();

    let django = terms.insert(&NewTerm::new(backend.id, "Django", "Python web framework")).await.unwrap();
    let flask = terms.insert(&NewTerm::new(web.id, "Flask", "Microframework")).await.unwrap();
    let git = terms.insert(&NewTerm::new(other.id, "Git", "VCS")).await.unwrap();

    details
        .insert(&NewTermDetail {
            term_id: django.id,
            section_title: "ORM".to_string(),
            content: "Models map to tables".to_string(),
            image: None,
        })
        .await
        .unwrap();
    related
        .insert(&NewRelatedTerm {
            term_id: git.id,
            related_term_ids: vec![django.id, flask.id],
            relationship_description: Some("deployed with".to_string()),
        })
        .await
        .unwrap();
    recs.insert(&NewRecommendation {
        term_id: django.id,
        quote_about_profession: "Ship it".to_string(),
        quote_about_path: "Start small".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    categories.delete(web.id).await.unwrap();

    let stats = db.stats().await.unwrap();
    assert_eq!(stats.categories, 1);
    assert_eq!(stats.terms, 1);
    assert_eq!(stats.term_details, 0);
    assert_eq!(stats.recommendations, 0);
    // The record survives because its owner (Git) survives, but it is now empty.
    assert_eq!(stats.related_terms, 1);
    let record = &related.list_for_term(git.id).await.unwrap()[0];
    assert!(related.members(record.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recommendations_listed_with_terms() {
    let db = open().await;
    let category = CategoryRepository::new(db.clone())
        .insert(&NewCategory::new("Careers"))
        .await
        .unwrap();
    let terms = TermRepository::new(db.clone());
    let recs = RecommendationRepository::new(db.clone());

    let rust = terms.insert(&NewTerm::new(category.id, "Rust", "Systems language")).await.unwrap();
    let created = recs
        .insert(&NewRecommendation {
            term_id: rust.id,
            quote_about_profession: "Fearless".to_string(),
            video_about_profession: Some("<iframe></iframe>".to_string()),
            quote_about_path: "Read the book".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let listed = recs.list_with_terms().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].0, created);
    assert_eq!(listed[0].1, rust);

    assert_eq!(recs.find_by_id(created.id).await.unwrap(), Some(created.clone()));
    recs.delete(created.id).await.unwrap();
    assert!(recs.find_by_id(created.id).await.unwrap().is_none());
}
