//! Alias matching against the service catalog
//!
//! Scoring is deliberately simple: notification text is short and templated
//! per issuer, so plain containment of a normalized alias resolves most real
//! cases. Token-set Jaccard similarity covers word-order variation. There is
//! no edit distance and no n-gram index; the catalog is tens of aliases.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::AliasCatalog;
use crate::models::{MatchResult, NormalizedText};
use crate::normalize::Normalizer;

/// Scores at or above this count as a match
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.70;

/// Matcher configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Minimum score for a confident match
    pub threshold: f64,
    /// Aliases shorter than this (in chars) never take the containment
    /// short-circuit and are scored by token overlap only. 0 disables.
    pub min_containment_chars: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            min_containment_chars: 0,
        }
    }
}

/// Similarity between a normalized text and a normalized alias, in [0.0, 1.0]
///
/// Containment scores 1.0; otherwise Jaccard index over space-separated tokens.
pub fn similarity(text: &str, alias: &str) -> f64 {
    if alias.trim().is_empty() {
        return 0.0;
    }
    if text.contains(alias) {
        return 1.0;
    }
    jaccard(text, alias)
}

/// Jaccard index of the space-separated token sets of two strings
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a_tokens: HashSet<&str> = a.split(' ').filter(|t| !t.is_empty()).collect();
    let b_tokens: HashSet<&str> = b.split(' ').filter(|t| !t.is_empty()).collect();
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }

    let intersection = a_tokens.intersection(&b_tokens).count();
    let union = a_tokens.union(&b_tokens).count();
    intersection as f64 / union as f64
}

/// Matches normalized text against a catalog whose aliases were normalized
/// once, up front, with the same normalizer used for input text
#[derive(Debug, Clone)]
pub struct AliasMatcher {
    entries: Vec<(String, Vec<NormalizedText>)>,
    config: MatcherConfig,
}

impl AliasMatcher {
    pub fn new(normalizer: &Normalizer, catalog: &AliasCatalog, config: MatcherConfig) -> Self {
        let entries = catalog
            .iter()
            .map(|(service, aliases)| {
                let normalized = aliases.iter().map(|a| normalizer.normalize(a)).collect();
                (service.to_string(), normalized)
            })
            .collect();

        Self { entries, config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Number of services the matcher knows about
    pub fn service_count(&self) -> usize {
        self.entries.len()
    }

    /// Best-scoring service for `text`
    ///
    /// Ties keep the first maximum in catalog order. Below the threshold the
    /// service is absent but the best score is still reported.
    pub fn match_text(&self, text: &NormalizedText) -> MatchResult {
        let mut best_service: Option<&str> = None;
        let mut best_alias: Option<&str> = None;
        let mut best_score = 0.0;

        for (service, aliases) in &self.entries {
            for alias in aliases {
                let score = self.score(text.as_str(), alias.as_str());
                if score > best_score {
                    best_score = score;
                    best_service = Some(service.as_str());
                    best_alias = Some(alias.as_str());
                }
            }
        }

        if best_score >= self.config.threshold {
            if let Some(service) = best_service {
                return MatchResult {
                    service: Some(service.to_string()),
                    score: best_score,
                };
            }
        }

        if best_score > 0.0 {
            debug!(
                "Near miss for '{}': {:?} via alias {:?} (score {:.3} < {:.2})",
                text, best_service, best_alias, best_score, self.config.threshold
            );
        }
        MatchResult::no_match(best_score)
    }

    fn score(&self, text: &str, alias: &str) -> f64 {
        if alias.chars().count() < self.config.min_containment_chars {
            return jaccard(text, alias);
        }
        similarity(text, alias)
    }
}

/// One-shot match of `text` against `catalog`
///
/// Builds a throwaway matcher; callers matching many texts should keep an
/// [`AliasMatcher`] instead.
pub fn match_service(
    text: &NormalizedText,
    catalog: &AliasCatalog,
    normalizer: &Normalizer,
    config: &MatcherConfig,
) -> MatchResult {
    AliasMatcher::new(normalizer, catalog, config.clone()).match_text(text)
}
