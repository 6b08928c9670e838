//! Domain models for Sift

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Metadata key carrying the caller-supplied amount
pub const META_AMOUNT: &str = "amount";
/// Metadata key carrying the originating application identifier
pub const META_APP_ID: &str = "app_id";
/// Metadata key carrying the payment keyword found in the raw text
pub const META_PAYMENT_KEYWORD: &str = "payment_keyword";

/// A captured payment notification, exactly as the device posted it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNotification {
    /// Package name / identifier of the app that posted the notification
    pub app_id: String,
    pub text: String,
}

impl RawNotification {
    pub fn new(app_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            text: text.into(),
        }
    }

    /// Stable SHA-256 fingerprint over (app_id, text)
    ///
    /// Notification listeners frequently deliver the same event twice
    /// (posted + updated), so batches are deduplicated on this value.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.app_id.as_bytes());
        // Separator so ("ab", "c") and ("a", "bc") hash differently
        hasher.update([0u8]);
        hasher.update(self.text.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Canonicalized notification text
///
/// Uppercase, single-spaced, trimmed, and restricted to the normalizer's
/// allow-list. Only the [`Normalizer`](crate::normalize::Normalizer) creates these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Merchant-ish substring of a normalized text (amounts and currency removed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MerchantCandidate(String);

impl MerchantCandidate {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for MerchantCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Best catalog match for a normalized text
///
/// `service` is `None` when the best score fell below the match threshold;
/// the score is still reported so near misses can be logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub service: Option<String>,
    pub score: f64,
}

impl MatchResult {
    pub fn no_match(score: f64) -> Self {
        Self {
            service: None,
            score,
        }
    }

    pub fn is_match(&self) -> bool {
        self.service.is_some()
    }
}

/// Where a result's billing period came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodReason {
    /// Billing cycle configured for the matched service
    Catalog,
    /// Service matched but has no billing cycle configured
    NotConfigured,
    /// No service matched
    Unmatched,
}

impl PeriodReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::NotConfigured => "not_configured",
            Self::Unmatched => "unmatched",
        }
    }
}

impl std::fmt::Display for PeriodReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured outcome of classifying one notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub normalized_text: NormalizedText,
    pub merchant: MerchantCandidate,
    pub service: Option<String>,
    pub category: Option<String>,
    pub confidence: f64,
    /// Expected days between charges for the matched service
    pub period_days: Option<u32>,
    pub period_reason: PeriodReason,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ClassificationResult {
    /// Amount recorded in metadata, if the caller supplied one
    pub fn amount(&self) -> Option<i64> {
        self.metadata.get(META_AMOUNT).and_then(|v| v.as_i64())
    }
}

/// A unit of retrievable knowledge (e.g. a service's cancellation terms)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagChunk {
    pub source: String,
    pub text: String,
}

impl RagChunk {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}
