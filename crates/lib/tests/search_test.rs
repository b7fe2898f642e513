//! # Search Logic Tests
//!
//! Tests for the cross-collection search pipeline against an in-memory
//! SQLite provider: degraded-mode scoring, grouping and merge caps,
//! result-type normalization, and search history persistence.

use folio::{
    providers::db::sqlite::SqliteProvider,
    search::{execute_search, recent_searches, search_collection, MERGED_RESULT_LIMIT},
    types::{ContentType, ResultType, SearchData},
};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn seeded_provider() -> anyhow::Result<Arc<SqliteProvider>> {
    init_tracing();
    let provider = SqliteProvider::new(":memory:").await?;
    provider.initialize_schema().await?;
    provider
        .initialize_with_data(
            "
            INSERT INTO blogs (title, content, tags, created_at) VALUES
                ('React Hooks Deep Dive', 'All about hooks', 'react,frontend', '2024-03-01T00:00:00.000Z'),
                ('React Server Components', 'A tour of RSC', 'react', '2024-03-03T00:00:00.000Z'),
                ('Cooking With Gas', 'Not about software', 'life', '2024-03-05T00:00:00.000Z');
            INSERT INTO projects (name, description, tags, created_at) VALUES
                ('Portfolio Site', 'Built with React and a Rust backend', 'react,rust', '2024-02-01T00:00:00.000Z'),
                ('CLI Toolbox', 'Assorted shell utilities', 'cli', '2024-02-02T00:00:00.000Z');
            INSERT INTO services (name, description, category, created_at) VALUES
                ('Frontend Consulting', 'React audits and training', 'consulting', '2024-01-15T00:00:00.000Z');
            INSERT INTO messages (name, content, created_at) VALUES
                ('Ada', 'Do you take React contract work?', '2024-04-01T00:00:00.000Z');
            ",
        )
        .await?;
    Ok(Arc::new(provider))
}

#[tokio::test]
async fn test_degraded_search_scores_everything_one_and_keeps_recency_order() {
    let provider = seeded_provider().await.unwrap();

    let results =
        search_collection(provider.as_ref(), ContentType::Blog, "react", None).await;

    assert_eq!(results.len(), 2);
    assert!(
        results.iter().all(|r| r.score == 1.0),
        "Without an embedding every result must score exactly 1."
    );
    // Newest first.
    assert_eq!(results[0].title, "React Server Components");
    assert_eq!(results[1].title, "React Hooks Deep Dive");
}

#[tokio::test]
async fn test_embedding_path_scores_by_self_similarity() {
    let provider = seeded_provider().await.unwrap();
    let embedding: Vec<f32> = vec![0.2, 0.4, 0.6];

    let results = search_collection(
        provider.as_ref(),
        ContentType::Blog,
        "react",
        Some(&embedding),
    )
    .await;

    // Items carry no embeddings of their own, so each falls back to the
    // query vector and scores a trivial 1.0.
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| (r.score - 1.0).abs() < 1e-9));
}

#[tokio::test]
async fn test_all_types_search_groups_and_caps_results() {
    let provider = seeded_provider().await.unwrap();

    let data = execute_search(provider.clone(), None, "react", ContentType::All, None)
        .await
        .unwrap();

    let SearchData::Grouped { grouped, items } = data else {
        panic!("all-types search must return the grouped shape");
    };
    assert_eq!(grouped.blog.len(), 2);
    assert_eq!(grouped.project.len(), 1);
    assert_eq!(grouped.service.len(), 1);
    assert_eq!(grouped.message.len(), 1);
    assert_eq!(items.len(), 5);
    assert!(items.len() <= MERGED_RESULT_LIMIT);
    assert!(items.iter().all(|r| r.score == 1.0));
}

#[tokio::test]
async fn test_merged_items_cap_at_ten() {
    let provider = SqliteProvider::new(":memory:").await.unwrap();
    provider.initialize_schema().await.unwrap();
    // Seed more than 5 matches per collection; each contributes at most 5,
    // and the merged list caps at 10.
    let mut statements = String::new();
    for i in 0..6 {
        statements.push_str(&format!(
            "INSERT INTO blogs (title, created_at) VALUES ('rust post {i}', '2024-01-0{}T00:00:00.000Z');",
            i + 1
        ));
        statements.push_str(&format!(
            "INSERT INTO projects (name, created_at) VALUES ('rust tool {i}', '2024-01-0{}T00:00:00.000Z');",
            i + 1
        ));
        statements.push_str(&format!(
            "INSERT INTO services (name, created_at) VALUES ('rust help {i}', '2024-01-0{}T00:00:00.000Z');",
            i + 1
        ));
    }
    provider.initialize_with_data(&statements).await.unwrap();
    let provider = Arc::new(provider);

    let data = execute_search(provider.clone(), None, "rust", ContentType::All, None)
        .await
        .unwrap();

    let SearchData::Grouped { grouped, items } = data else {
        panic!("all-types search must return the grouped shape");
    };
    assert_eq!(grouped.blog.len(), 5, "per-collection fetch caps at 5");
    assert_eq!(items.len(), MERGED_RESULT_LIMIT);
}

#[tokio::test]
async fn test_failing_collection_yields_empty_results_only_for_itself() {
    let provider = seeded_provider().await.unwrap();
    // Break one collection; its queries now fail at the storage layer.
    provider
        .initialize_with_data("DROP TABLE messages")
        .await
        .unwrap();

    let results =
        search_collection(provider.as_ref(), ContentType::Message, "react", None).await;
    assert!(
        results.is_empty(),
        "a failing collection must yield an empty list, not an error"
    );

    let data = execute_search(provider.clone(), None, "react", ContentType::All, None)
        .await
        .unwrap();
    let SearchData::Grouped { grouped, items } = data else {
        panic!("all-types search must return the grouped shape");
    };
    assert!(grouped.message.is_empty());
    assert_eq!(grouped.blog.len(), 2, "healthy collections still return");
    assert_eq!(grouped.project.len(), 1);
    assert_eq!(grouped.service.len(), 1);
    assert_eq!(items.len(), 4);
}

#[tokio::test]
async fn test_single_type_search_with_no_matches_is_an_empty_success() {
    let provider = seeded_provider().await.unwrap();

    let data = execute_search(
        provider.clone(),
        None,
        "quantum blockchain",
        ContentType::Blog,
        None,
    )
    .await
    .unwrap();

    let SearchData::Flat(results) = data else {
        panic!("single-type search must return the flat shape");
    };
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_record_is_persisted_with_canonical_result_types() {
    let provider = seeded_provider().await.unwrap();

    execute_search(provider.clone(), None, "react", ContentType::Blog, None)
        .await
        .unwrap();

    let records = recent_searches(provider.as_ref(), None).await.unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.query, "react");
    assert_eq!(record.content_type, ContentType::Blog);
    assert!(record.embedding.is_none(), "degraded mode stores no embedding");
    assert_eq!(record.results.len(), 2);
    assert!(record
        .results
        .iter()
        .all(|r| r.result_type == ResultType::Blog));

    // The canonical capitalized singular form is what gets stored.
    let serialized = serde_json::to_string(&record.results).unwrap();
    assert!(serialized.contains("\"Blog\""));
    assert!(!serialized.contains("\"blogs\""));
}

#[tokio::test]
async fn test_recent_searches_filters_by_identity_and_orders_newest_first() {
    let provider = seeded_provider().await.unwrap();

    execute_search(
        provider.clone(),
        None,
        "react",
        ContentType::All,
        Some("user-a"),
    )
    .await
    .unwrap();
    execute_search(
        provider.clone(),
        None,
        "portfolio",
        ContentType::Project,
        Some("user-b"),
    )
    .await
    .unwrap();
    execute_search(
        provider.clone(),
        None,
        "consulting",
        ContentType::Service,
        Some("user-a"),
    )
    .await
    .unwrap();

    let for_a = recent_searches(provider.as_ref(), Some("user-a"))
        .await
        .unwrap();
    assert_eq!(for_a.len(), 2);
    assert_eq!(for_a[0].query, "consulting", "newest first");
    assert_eq!(for_a[1].query, "react");

    let global = recent_searches(provider.as_ref(), None).await.unwrap();
    assert_eq!(global.len(), 3);
}

#[tokio::test]
async fn test_recent_searches_caps_at_five() {
    let provider = seeded_provider().await.unwrap();

    for i in 0..7 {
        execute_search(
            provider.clone(),
            None,
            &format!("query {i}"),
            ContentType::Blog,
            None,
        )
        .await
        .unwrap();
    }

    let records = recent_searches(provider.as_ref(), None).await.unwrap();
    assert_eq!(records.len(), 5);
}

#[tokio::test]
async fn test_legacy_result_type_variants_normalize_on_read() {
    let provider = seeded_provider().await.unwrap();
    // Records written by the previous system stored lowercase plural
    // collection names in the results payload.
    provider
        .initialize_with_data(
            r#"INSERT INTO searches (query, content_type, results, created_at) VALUES
                ('old record', 'blog',
                 '[{"item_id": 1, "result_type": "blogs", "score": 1.0, "title": "React Hooks Deep Dive"}]',
                 '2024-01-01T00:00:00+00:00')"#,
        )
        .await
        .unwrap();

    let records = recent_searches(provider.as_ref(), None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].results.len(), 1);
    assert_eq!(records[0].results[0].result_type, ResultType::Blog);
}

#[test]
fn test_result_type_normalization() {
    assert_eq!(ResultType::normalize("blog"), Some(ResultType::Blog));
    assert_eq!(ResultType::normalize("blogs"), Some(ResultType::Blog));
    assert_eq!(ResultType::normalize("Projects"), Some(ResultType::Project));
    assert_eq!(ResultType::normalize("SERVICE"), Some(ResultType::Service));
    assert_eq!(ResultType::normalize("message"), Some(ResultType::Contact));
    assert_eq!(ResultType::normalize("contacts"), Some(ResultType::Contact));
    assert_eq!(ResultType::normalize("widget"), None);
}

#[test]
fn test_content_type_parsing() {
    assert_eq!(ContentType::parse("blog"), Some(ContentType::Blog));
    assert_eq!(ContentType::parse("Blogs"), Some(ContentType::Blog));
    assert_eq!(ContentType::parse("all"), Some(ContentType::All));
    assert_eq!(ContentType::parse("nonsense"), None);
}
