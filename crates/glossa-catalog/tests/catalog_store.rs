//! Catalog operations against a real (in-memory) store.

use glossa_catalog::{Catalog, RelatedGroup, SkipReason, SortOrder, TermQuery};
use glossa_common::GlossaError;
use glossa_db::{
    CategoryRepository, Database, NewCategory, NewRelatedTerm, NewTerm, RelatedTermRepository,
    Term, TermRepository,
};
use std::sync::Arc;

struct Store {
    db: Arc<Database>,
    terms: TermRepository,
    related: RelatedTermRepository,
    category_id: i64,
}

impl Store {
    async fn new() -> Self {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        db.initialize().await.unwrap();
        let category = CategoryRepository::new(db.clone())
            .insert(&NewCategory::new("Testing"))
            .await
            .unwrap();
        Self {
            terms: TermRepository::new(db.clone()),
            related: RelatedTermRepository::new(db.clone()),
            db,
            category_id: category.id,
        }
    }

    async fn term(&self, title: &str) -> Term {
        self.terms
            .insert(&NewTerm::new(self.category_id, title, "desc"))
            .await
            .unwrap()
    }

    fn catalog(&self) -> Catalog {
        Catalog::new(self.db.clone())
    }
}

#[tokio::test]
async fn test_resolver_groups_by_description() {
    let store = Store::new().await;
    let t = store.term("T").await;
    let a = store.term("A").await;
    let b = store.term("B").await;
    let c = store.term("C").await;

    store
        .related
        .insert(&NewRelatedTerm {
            term_id: t.id,
            related_term_ids: vec![b.id, a.id],
            relationship_description: Some("synonym".to_string()),
        })
        .await
        .unwrap();
    store
        .related
        .insert(&NewRelatedTerm {
            term_id: t.id,
            related_term_ids: vec![c.id],
            relationship_description: None,
        })
        .await
        .unwrap();

    let groups = store.catalog().related_groups(t.id).await.unwrap();
    assert_eq!(
        groups,
        vec![
            RelatedGroup { description: "synonym".to_string(), terms: vec![a, b] },
            RelatedGroup { description: String::new(), terms: vec![c] },
        ]
    );
}

#[tokio::test]
async fn test_resolver_unknown_term_is_not_found() {
    let store = Store::new().await;
    let err = store.catalog().related_groups(404).await.unwrap_err();
    assert!(matches!(err, GlossaError::NotFound(_)));
}

#[tokio::test]
async fn test_resolver_term_without_relations_is_empty() {
    let store = Store::new().await;
    let lonely = store.term("Lonely").await;
    assert!(store.catalog().related_groups(lonely.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_attach_is_idempotent() {
    let store = Store::new().await;
    let unit = store.term("UnitTest").await;
    let mock = store.term("Mock").await;
    let catalog = store.catalog();

    let first = catalog.attach_related(unit.id, "mock", "Used for isolation").await.unwrap();
    assert_eq!(first.created, vec![mock.clone()]);

    let second = catalog.attach_related(unit.id, "MOCK", "Used for isolation").await.unwrap();
    assert!(second.created.is_empty());
    assert_eq!(second.skipped[0].reason, SkipReason::AlreadyLinked);

    assert_eq!(store.related.count().await.unwrap(), 1);
    let groups = catalog.related_groups(unit.id).await.unwrap();
    assert_eq!(groups[0].description, "Used for isolation");
    assert_eq!(groups[0].terms, vec![mock]);
}

#[tokio::test]
async fn test_attach_skips_self_and_warns_on_unknown() {
    let store = Store::new().await;
    let unit = store.term("UnitTest").await;
    let mock = store.term("Mock").await;
    let stub = store.term("Stub").await;

    let report = store
        .catalog()
        .attach_related(unit.id, "unittest, Nope, Mock, , stub", "see also")
        .await
        .unwrap();

    assert_eq!(report.created, vec![mock, stub]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::SelfLink);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("Nope"));
    assert_eq!(store.related.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_attach_ambiguous_title_is_warning() {
    let store = Store::new().await;
    let unit = store.term("UnitTest").await;
    store.term("Mock").await;
    store.term("mock").await;

    let report = store.catalog().attach_related(unit.id, "Mock", "").await.unwrap();
    assert!(report.created.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(store.related.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_attach_unknown_target_is_not_found() {
    let store = Store::new().await;
    store.term("Mock").await;
    let err = store.catalog().attach_related(999, "Mock", "").await.unwrap_err();
    assert!(matches!(err, GlossaError::NotFound(_)));
}

#[tokio::test]
async fn test_browse_facet_ignores_filters() {
    let store = Store::new().await;
    for title in ["(Python)", "123Test", "!!!", "Java", "Django"] {
        store.term(title).await;
    }

    let browse = store
        .catalog()
        .browse(&TermQuery::new().letter("j").sort(SortOrder::Desc))
        .await
        .unwrap();

    assert_eq!(browse.available_letters, vec!["D", "J", "P", "1"]);
    let titles: Vec<&str> = browse.page.items.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Java"]);
    assert_eq!(browse.page.count, 1);
}
