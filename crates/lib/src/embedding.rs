//! # Pseudo-Embedding and Similarity
//!
//! This system has no access to a true embedding endpoint. Instead, the
//! query is expanded through the generative chat API and the UTF-8 bytes of
//! the response are normalized into a numeric vector. That pseudo-embedding
//! is then compared with cosine similarity.
//!
//! The whole path is a degraded-mode enhancer: a missing provider, a failed
//! call, or a timeout all resolve to `None` and the caller ranks by
//! keyword match and recency instead. No error ever propagates from here.

use crate::{prompts::base::QUERY_EXPANSION_SYSTEM_PROMPT, providers::ai::AiProvider};
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on the generative call backing pseudo-embedding generation.
/// A timeout is treated identically to any other embedding failure.
pub const EMBEDDING_TIMEOUT: Duration = Duration::from_secs(5);

/// Derives a pseudo-embedding for `text` under the default
/// [`EMBEDDING_TIMEOUT`].
///
/// Returns `None` immediately when no provider is configured, and `None`
/// (after a warning) when the generative call fails or times out. On
/// success, each UTF-8 byte of the response maps to a float in `[0, 1]`.
pub async fn generate_pseudo_embedding(
    ai_provider: Option<&dyn AiProvider>,
    text: &str,
) -> Option<Vec<f32>> {
    generate_pseudo_embedding_with_timeout(ai_provider, text, EMBEDDING_TIMEOUT).await
}

/// [`generate_pseudo_embedding`] with an explicit timeout bound.
pub async fn generate_pseudo_embedding_with_timeout(
    ai_provider: Option<&dyn AiProvider>,
    text: &str,
    timeout: Duration,
) -> Option<Vec<f32>> {
    let provider = ai_provider?;

    let response = match tokio::time::timeout(
        timeout,
        provider.generate(QUERY_EXPANSION_SYSTEM_PROMPT, text),
    )
    .await
    {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            warn!("Pseudo-embedding call failed, degrading to keyword ranking: {e}");
            return None;
        }
        Err(_) => {
            warn!("Pseudo-embedding call exceeded {timeout:?}, degrading to keyword ranking");
            return None;
        }
    };

    debug!(
        response_len = response.len(),
        "Derived pseudo-embedding from generative response"
    );
    Some(response.bytes().map(|b| b as f32 / 255.0).collect())
}

/// Standard cosine similarity with this system's production guards:
/// returns 0 when either vector is empty, when the lengths differ (no
/// partial comparison, no padding), or when either magnitude is zero.
///
/// The length guard means two pseudo-embeddings derived from different
/// generative responses almost never compare as similar. That is the
/// behavior the ranked-results and recent-searches paths rely on, so it is
/// kept as-is rather than "fixed".
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
