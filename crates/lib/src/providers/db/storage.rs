use crate::{
    errors::PromptError,
    types::{ContentType, SearchRecord, SearchResult},
};
use async_trait::async_trait;

/// Keyword search over a single content collection.
///
/// Implementations match the query case-insensitively against the
/// collection's own field set and return rows newest-first with a score of
/// 0; scoring and re-ordering belong to the search engine, not the store.
#[async_trait]
pub trait ContentSearch {
    async fn keyword_search(
        &self,
        content_type: ContentType,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SearchResult>, PromptError>;
}

/// Persistence for search history records.
///
/// Records are insert-only; there is no update path and no contention
/// between concurrent searches.
#[async_trait]
pub trait SearchHistory {
    async fn insert_search(&self, record: &SearchRecord) -> Result<(), PromptError>;

    /// The most recent records, newest-first, optionally filtered by the
    /// identity that issued them.
    async fn recent_searches(
        &self,
        user_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<SearchRecord>, PromptError>;
}
