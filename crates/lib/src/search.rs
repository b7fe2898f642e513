//! # Search Logic
//!
//! This module provides the core logic for the cross-collection portfolio
//! search. The flow is deliberately simple:
//! 1.  **Pseudo-Embedding**: the query is expanded through the generative
//!     API and byte-encoded into a vector; failure degrades to `None`.
//! 2.  **Keyword Matching**: each requested collection is searched with a
//!     case-insensitive keyword query, newest-first, at most 5 rows.
//! 3.  **Scoring & Merging**: results are scored (cosine against the query
//!     vector, or a uniform 1.0 in degraded mode), merged across
//!     collections, and capped.
//!
//! Every search is also persisted as a [`SearchRecord`] for the
//! recent-searches view. A collection that fails yields an empty list for
//! that collection only; the overall search never fails because of one
//! collection or because the AI enhancer is down.

use crate::{
    embedding::{cosine_similarity, generate_pseudo_embedding},
    providers::{
        ai::AiProvider,
        db::storage::{ContentSearch, SearchHistory},
    },
    types::{ContentType, GroupedResults, RecordedResult, SearchData, SearchRecord, SearchResult},
    PromptError,
};
use chrono::Utc;
use std::{cmp::Ordering, sync::Arc};
use thiserror::Error;
use tracing::{info, warn};

/// How many rows each collection contributes before merging.
pub const COLLECTION_FETCH_LIMIT: u32 = 5;
/// Cap on the merged cross-collection result list.
pub const MERGED_RESULT_LIMIT: usize = 10;
/// How many records the recent-searches view returns.
pub const RECENT_SEARCH_LIMIT: u32 = 5;

/// Custom error types for the search process. Only storage-level failures
/// surface; everything AI-related degrades instead.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Storage error: {0}")]
    Storage(#[from] PromptError),
}

/// Searches one collection and scores the results.
///
/// With no embedding available every result keeps the uniform score 1.0
/// and the newest-first order from the store. With an embedding, each item
/// is scored by cosine similarity against the query vector; items carry no
/// embeddings of their own in this design, so the item side falls back to
/// the query vector itself (a documented simplification that yields a
/// trivial self-similarity of 1.0). Collection-level failures are caught
/// here and yield an empty list.
pub async fn search_collection<P>(
    provider: &P,
    content_type: ContentType,
    query: &str,
    query_embedding: Option<&[f32]>,
) -> Vec<SearchResult>
where
    P: ContentSearch + Sync,
{
    let mut results = match provider
        .keyword_search(content_type, query, COLLECTION_FETCH_LIMIT)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            warn!(
                collection = content_type.as_str(),
                "Collection search failed, returning no results for it: {e}"
            );
            return Vec::new();
        }
    };

    match query_embedding {
        None => {
            for result in &mut results {
                result.score = 1.0;
            }
        }
        Some(embedding) => {
            for result in &mut results {
                let item_vector = result.embedding.as_deref().unwrap_or(embedding);
                result.score = cosine_similarity(item_vector, embedding);
            }
            sort_by_score(&mut results);
        }
    }
    results
}

/// The entry point used by the search endpoint.
///
/// A concrete `content_type` searches that one collection and returns a
/// flat scored list. `All` fans out to the four collections concurrently
/// and waits for every one of them (no partial short-circuit), returning
/// both the per-collection grouping and a merged list sorted by descending
/// score and capped at [`MERGED_RESULT_LIMIT`]. Either way, one
/// [`SearchRecord`] is persisted summarizing the invocation; the embedding
/// is attached only when it was actually computed.
pub async fn execute_search<P>(
    provider: Arc<P>,
    ai_provider: Option<&dyn AiProvider>,
    query: &str,
    content_type: ContentType,
    user_id: Option<&str>,
) -> Result<SearchData, SearchError>
where
    P: ContentSearch + SearchHistory + Send + Sync,
{
    let embedding = generate_pseudo_embedding(ai_provider, query).await;
    info!(
        query,
        content_type = content_type.as_str(),
        degraded = embedding.is_none(),
        "Executing portfolio search"
    );

    let data = match content_type {
        ContentType::All => {
            let (blog, project, service, message) = tokio::join!(
                search_collection(
                    provider.as_ref(),
                    ContentType::Blog,
                    query,
                    embedding.as_deref()
                ),
                search_collection(
                    provider.as_ref(),
                    ContentType::Project,
                    query,
                    embedding.as_deref()
                ),
                search_collection(
                    provider.as_ref(),
                    ContentType::Service,
                    query,
                    embedding.as_deref()
                ),
                search_collection(
                    provider.as_ref(),
                    ContentType::Message,
                    query,
                    embedding.as_deref()
                ),
            );

            let mut items: Vec<SearchResult> = blog
                .iter()
                .chain(&project)
                .chain(&service)
                .chain(&message)
                .cloned()
                .collect();
            sort_by_score(&mut items);
            items.truncate(MERGED_RESULT_LIMIT);

            SearchData::Grouped {
                grouped: GroupedResults {
                    blog,
                    project,
                    service,
                    message,
                },
                items,
            }
        }
        concrete => SearchData::Flat(
            search_collection(provider.as_ref(), concrete, query, embedding.as_deref()).await,
        ),
    };

    let record = SearchRecord {
        query: query.to_string(),
        content_type,
        embedding,
        results: recorded_results(&data),
        user_id: user_id.map(String::from),
        created_at: Utc::now(),
    };
    provider.insert_search(&record).await?;

    Ok(data)
}

/// Returns the most recent search records, newest-first, optionally
/// filtered by the identity that issued them.
pub async fn recent_searches<P>(
    provider: &P,
    user_id: Option<&str>,
) -> Result<Vec<SearchRecord>, SearchError>
where
    P: SearchHistory + Sync,
{
    Ok(provider
        .recent_searches(user_id, RECENT_SEARCH_LIMIT)
        .await?)
}

/// Stable descending sort by score; ties keep their existing (newest-first)
/// relative order.
fn sort_by_score(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

fn recorded_results(data: &SearchData) -> Vec<RecordedResult> {
    let items = match data {
        SearchData::Grouped { items, .. } => items,
        SearchData::Flat(items) => items,
    };
    items
        .iter()
        .map(|result| RecordedResult {
            item_id: result.id,
            result_type: result.result_type,
            score: result.score,
            title: result.title.clone(),
        })
        .collect()
}
