//! Process-wide engine: classifier plus retrieval index built from one config
//!
//! Built once at startup and shared read-only afterwards (wrap in `Arc` to
//! hand to request handlers or worker threads; no locking is needed).

use std::path::Path;

use tracing::{info, warn};

use crate::catalog::{AliasCatalog, BillingTable, CategoryTable};
use crate::classify::Classifier;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::matcher::AliasMatcher;
use crate::models::{ClassificationResult, RagChunk, RawNotification};
use crate::normalize::Normalizer;
use crate::preprocess::Preprocessor;
use crate::retrieval::RetrievalIndex;

#[derive(Debug, Clone)]
pub struct Engine {
    classifier: Classifier,
    retrieval: RetrievalIndex,
    catalog: AliasCatalog,
    categories: CategoryTable,
}

impl Engine {
    /// Build every component from a configuration
    ///
    /// Fails only if a substitution rule or script range does not compile. An
    /// empty catalog or chunk set is accepted (it never matches / never
    /// returns anything) but is logged, since it usually means a bad deploy.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let normalizer = Normalizer::new(&config.normalizer)?;
        let catalog = AliasCatalog::from_services(&config.services);
        let categories = CategoryTable::from_services(&config.services);
        let billing = BillingTable::from_services(&config.services);

        if catalog.is_empty() {
            warn!("Alias catalog is empty; no notification will match a service");
        }
        if config.chunks.is_empty() {
            warn!("Retrieval chunk set is empty; searches will return nothing");
        }

        let matcher = AliasMatcher::new(&normalizer, &catalog, config.matcher.clone());
        let preprocessor = Preprocessor::new(config.payment_keywords.clone())?;
        let classifier = Classifier::new(
            normalizer,
            matcher,
            categories.clone(),
            billing,
            preprocessor,
        );

        info!(
            "Engine ready: {} services, {} aliases, {} chunks",
            catalog.len(),
            catalog.alias_count(),
            config.chunks.len()
        );

        Ok(Self {
            classifier,
            retrieval: RetrievalIndex::new(config.chunks.clone()),
            catalog,
            categories,
        })
    }

    /// Load configuration (see [`EngineConfig::load`]) and build the engine
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        Self::from_config(&EngineConfig::load(override_path)?)
    }

    /// Engine built from the embedded default configuration
    pub fn embedded() -> Result<Self> {
        Self::from_config(&EngineConfig::embedded()?)
    }

    pub fn classify(&self, raw: &str, amount: Option<i64>) -> ClassificationResult {
        self.classifier.classify(raw, amount)
    }

    pub fn classify_notification(&self, notification: &RawNotification) -> ClassificationResult {
        self.classifier.classify_notification(notification)
    }

    pub fn search<'a>(&'a self, query: &str, k: usize) -> impl Iterator<Item = &'a RagChunk> + 'a {
        self.retrieval.search(query, k)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn retrieval(&self) -> &RetrievalIndex {
        &self.retrieval
    }

    pub fn catalog(&self) -> &AliasCatalog {
        &self.catalog
    }

    pub fn category(&self, service: &str) -> Option<&str> {
        self.categories.get(service)
    }
}
