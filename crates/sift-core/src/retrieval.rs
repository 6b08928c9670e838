//! Keyword-overlap retrieval over a small, static set of text chunks
//!
//! Used to fetch explanatory text (cancellation terms, renewal rules) for a
//! classified service. No index is built: every search scores every chunk.

use tracing::debug;

use crate::models::RagChunk;

/// Number of chunks returned when the caller does not ask for a specific count
pub const DEFAULT_TOP_K: usize = 3;

/// Static chunk set with ranked keyword search
#[derive(Debug, Clone, Default)]
pub struct RetrievalIndex {
    chunks: Vec<RagChunk>,
}

impl RetrievalIndex {
    pub fn new(chunks: Vec<RagChunk>) -> Self {
        Self { chunks }
    }

    pub fn chunks(&self) -> &[RagChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Up to `k` chunks ranked by keyword overlap with `query`
    ///
    /// Ranking is stable: equal scores keep chunk order, so a blank query
    /// yields the first `k` chunks as loaded. The returned iterator is consumed
    /// once; call `search` again for a fresh ranking.
    pub fn search<'a>(&'a self, query: &str, k: usize) -> impl Iterator<Item = &'a RagChunk> + 'a {
        let query = query.to_lowercase();

        let mut scored: Vec<(usize, usize)> = self
            .chunks
            .iter()
            .enumerate()
            .map(|(idx, chunk)| (idx, score(&chunk.text.to_lowercase(), &query)))
            .collect();
        // sort_by is stable
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        debug!(
            "Retrieval for '{}': top scores {:?}",
            query,
            scored.iter().take(k).map(|(_, s)| *s).collect::<Vec<_>>()
        );

        scored
            .into_iter()
            .take(k)
            .map(move |(idx, _)| &self.chunks[idx])
    }

    /// [`search`](Self::search) with [`DEFAULT_TOP_K`]
    pub fn search_default<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a RagChunk> + 'a {
        self.search(query, DEFAULT_TOP_K)
    }
}

/// Count of chunk tokens that contain the query or are contained by it
///
/// Tokens come from splitting on single spaces, so a doubled space yields an
/// empty token, which every non-blank query contains.
fn score(text: &str, query: &str) -> usize {
    if query.trim().is_empty() {
        return 0;
    }
    text.split(' ')
        .filter(|token| token.contains(query) || query.contains(token))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> RetrievalIndex {
        RetrievalIndex::new(vec![
            RagChunk::new(
                "watcha_terms",
                "왓챠는 월 단위로 자동 결제되며 결제일 전에 구독을 취소할 수 있습니다.",
            ),
            RagChunk::new(
                "netflix_terms",
                "넷플릭스는 일반적으로 언제든지 해지할 수 있으며, 해지 후 다음 결제일까지 시청 가능합니다.",
            ),
            RagChunk::new(
                "youtube_terms",
                "유튜브 프리미엄은 결제 주기에 따라 자동 갱신되며, 해지 시 다음 결제일까지 혜택이 유지됩니다.",
            ),
        ])
    }

    fn sources<'a>(chunks: impl Iterator<Item = &'a RagChunk>) -> Vec<&'a str> {
        chunks.map(|c| c.source.as_str()).collect()
    }

    #[test]
    fn test_search_ranks_matching_chunk_first() {
        let index = index();
        let result = sources(index.search("해지", 3));
        // netflix mentions 해지 twice, youtube once, watcha never
        assert_eq!(result, vec!["netflix_terms", "youtube_terms", "watcha_terms"]);
    }

    #[test]
    fn test_search_case_insensitive() {
        let index = RetrievalIndex::new(vec![
            RagChunk::new("a", "nothing here"),
            RagChunk::new("b", "Cancel anytime from the Account page"),
        ]);
        let result = sources(index.search("CANCEL", 1));
        assert_eq!(result, vec!["b"]);
    }

    #[test]
    fn test_query_containing_token_counts() {
        let index = RetrievalIndex::new(vec![
            RagChunk::new("a", "unrelated words"),
            RagChunk::new("b", "plan renewal"),
        ]);
        // "plan" is contained in the query "planning"
        let result = sources(index.search("planning", 1));
        assert_eq!(result, vec!["b"]);
    }

    #[test]
    fn test_blank_query_keeps_order() {
        let index = index();
        assert_eq!(
            sources(index.search("", 2)),
            vec!["watcha_terms", "netflix_terms"]
        );
        assert_eq!(
            sources(index.search("   ", 3)),
            vec!["watcha_terms", "netflix_terms", "youtube_terms"]
        );
    }

    #[test]
    fn test_k_bounds() {
        let index = index();
        assert_eq!(index.search("해지", 0).count(), 0);
        assert_eq!(index.search("해지", 10).count(), 3);
        assert_eq!(index.search_default("해지").count(), DEFAULT_TOP_K);
    }

    #[test]
    fn test_empty_index() {
        let index = RetrievalIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.search("해지", 3).count(), 0);
    }

    #[test]
    fn test_search_is_repeatable() {
        let index = index();
        let first = sources(index.search("결제일", 3));
        let second = sources(index.search("결제일", 3));
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_counts_empty_tokens() {
        assert_eq!(score("a  b", "zzz"), 1);
        assert_eq!(score("해지  해지", "해지"), 3);
        assert_eq!(score("a  b", "  "), 0);
    }

    #[test]
    fn test_double_space_outranks_no_overlap() {
        let index = RetrievalIndex::new(vec![
            RagChunk::new("x", "alpha beta"),
            RagChunk::new("y", "gamma  delta"),
        ]);
        assert_eq!(sources(index.search("해지", 1)), vec!["y"]);
    }
}
