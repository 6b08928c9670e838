//! End-to-end notification classification
//!
//! raw text -> normalize -> merchant extraction -> alias match -> result.
//! "No match" is a value (`service: None`), never an error.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::debug;

use crate::catalog::{BillingTable, CategoryTable};
use crate::matcher::AliasMatcher;
use crate::models::{
    ClassificationResult, PeriodReason, RawNotification, META_AMOUNT, META_APP_ID,
    META_PAYMENT_KEYWORD,
};
use crate::normalize::Normalizer;
use crate::preprocess::Preprocessor;

/// Classifier composing the normalizer, matcher, and reference tables
#[derive(Debug, Clone)]
pub struct Classifier {
    normalizer: Normalizer,
    matcher: AliasMatcher,
    categories: CategoryTable,
    billing: BillingTable,
    preprocessor: Preprocessor,
}

impl Classifier {
    pub fn new(
        normalizer: Normalizer,
        matcher: AliasMatcher,
        categories: CategoryTable,
        billing: BillingTable,
        preprocessor: Preprocessor,
    ) -> Self {
        Self {
            normalizer,
            matcher,
            categories,
            billing,
            preprocessor,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn matcher(&self) -> &AliasMatcher {
        &self.matcher
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Classify raw notification text
    ///
    /// `amount` is whatever the caller already extracted from the same text;
    /// it is carried through in metadata under [`META_AMOUNT`].
    pub fn classify(&self, raw: &str, amount: Option<i64>) -> ClassificationResult {
        let normalized_text = self.normalizer.normalize(raw);
        let merchant = self.normalizer.extract_merchant(&normalized_text);
        let matched = self.matcher.match_text(&normalized_text);

        let category = matched
            .service
            .as_deref()
            .and_then(|s| self.categories.get(s))
            .map(str::to_string);

        let (period_days, period_reason) = match matched.service.as_deref() {
            Some(service) => match self.billing.get(service) {
                Some(days) => (Some(days), PeriodReason::Catalog),
                None => (None, PeriodReason::NotConfigured),
            },
            None => (None, PeriodReason::Unmatched),
        };

        let mut metadata = BTreeMap::new();
        if let Some(amount) = amount {
            metadata.insert(META_AMOUNT.to_string(), json!(amount));
        }

        debug!(
            "Classified '{}' -> {:?} ({:.3})",
            normalized_text, matched.service, matched.score
        );

        ClassificationResult {
            normalized_text,
            merchant,
            service: matched.service,
            category,
            confidence: matched.score,
            period_days,
            period_reason,
            metadata,
        }
    }

    /// Classify a captured notification, extracting the amount from its text
    ///
    /// Adds the originating app and any payment keyword to the metadata.
    pub fn classify_notification(&self, notification: &RawNotification) -> ClassificationResult {
        let amount = self.preprocessor.extract_amount(&notification.text);
        let mut result = self.classify(&notification.text, amount);

        result
            .metadata
            .insert(META_APP_ID.to_string(), json!(notification.app_id));
        if let Some(keyword) = self.preprocessor.payment_keyword(&notification.text) {
            result
                .metadata
                .insert(META_PAYMENT_KEYWORD.to_string(), json!(keyword));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AliasCatalog, ServiceEntry};
    use crate::matcher::MatcherConfig;
    use crate::normalize::NormalizerConfig;
    use crate::preprocess::default_payment_keywords;

    fn classifier() -> Classifier {
        let services = vec![
            ServiceEntry::new("NETFLIX", &["NETFLIX", "넷플릭스"])
                .with_category("OTT")
                .with_billing_cycle(30),
            ServiceEntry::new("BAEMIN", &["BAEMIN", "배달의민족"]).with_category("DELIVERY"),
            ServiceEntry::new("MYSTERY", &["MYSTERY BOX"]),
        ];
        let normalizer = Normalizer::new(&NormalizerConfig::default()).unwrap();
        let matcher = AliasMatcher::new(
            &normalizer,
            &AliasCatalog::from_services(&services),
            MatcherConfig::default(),
        );
        Classifier::new(
            normalizer,
            matcher,
            CategoryTable::from_services(&services),
            BillingTable::from_services(&services),
            Preprocessor::new(default_payment_keywords()).unwrap(),
        )
    }

    #[test]
    fn test_classify_match() {
        let result = classifier().classify("NETFLIX*13,500원 승인", Some(13500));

        assert_eq!(result.normalized_text.as_str(), "NETFLIX 13 500원 승인");
        assert_eq!(result.merchant.as_str(), "NETFLIX 승인");
        assert_eq!(result.service.as_deref(), Some("NETFLIX"));
        assert_eq!(result.category.as_deref(), Some("OTT"));
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.period_days, Some(30));
        assert_eq!(result.period_reason, PeriodReason::Catalog);
        assert_eq!(result.amount(), Some(13500));
    }

    #[test]
    fn test_classify_without_billing_cycle() {
        let result = classifier().classify("배달의민족 23,000원 결제", None);
        assert_eq!(result.service.as_deref(), Some("BAEMIN"));
        assert_eq!(result.category.as_deref(), Some("DELIVERY"));
        assert_eq!(result.period_days, None);
        assert_eq!(result.period_reason, PeriodReason::NotConfigured);
        assert!(result.metadata.is_empty());
    }

    #[test]
    fn test_classify_unmapped_category() {
        let result = classifier().classify("MYSTERY BOX 9,900원", None);
        assert_eq!(result.service.as_deref(), Some("MYSTERY"));
        assert_eq!(result.category, None);
    }

    #[test]
    fn test_classify_no_match() {
        let result = classifier().classify("RANDOM COFFEE SHOP 4500", Some(4500));
        assert_eq!(result.service, None);
        assert_eq!(result.category, None);
        assert!(result.confidence < 0.7);
        assert_eq!(result.period_reason, PeriodReason::Unmatched);
        assert_eq!(result.merchant.as_str(), "RANDOM COFFEE SHOP");
        assert_eq!(result.amount(), Some(4500));
    }

    #[test]
    fn test_classify_empty_input() {
        let result = classifier().classify("   ", None);
        assert!(result.normalized_text.is_empty());
        assert!(result.merchant.is_empty());
        assert_eq!(result.service, None);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_classify_notification_metadata() {
        let notification = RawNotification::new("com.kbstar.kbbank", "[KB] 넷플릭스 13,500원 승인");
        let result = classifier().classify_notification(&notification);

        assert_eq!(result.service.as_deref(), Some("NETFLIX"));
        assert_eq!(result.amount(), Some(13500));
        assert_eq!(result.metadata[META_APP_ID], json!("com.kbstar.kbbank"));
        assert_eq!(result.metadata[META_PAYMENT_KEYWORD], json!("승인"));
    }

    #[test]
    fn test_classify_notification_without_amount() {
        let notification = RawNotification::new("com.example", "넷플릭스 새 에피소드 공개");
        let result = classifier().classify_notification(&notification);

        assert_eq!(result.service.as_deref(), Some("NETFLIX"));
        assert_eq!(result.amount(), None);
        assert!(!result.metadata.contains_key(META_PAYMENT_KEYWORD));
    }

    #[test]
    fn test_result_serializes() {
        let result = classifier().classify("NETFLIX 13,500원", Some(13500));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["service"], json!("NETFLIX"));
        assert_eq!(value["normalized_text"], json!("NETFLIX 13 500원"));
        assert_eq!(value["period_reason"], json!("catalog"));
        assert_eq!(value["metadata"]["amount"], json!(13500));
    }
}
