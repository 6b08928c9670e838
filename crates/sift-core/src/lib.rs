//! Sift Core Library
//!
//! Classification and retrieval engine for payment notification text:
//! - Normalization of noisy issuer-formatted text into a canonical form
//! - Merchant extraction (amounts and currency stripped)
//! - Alias matching against a static service catalog (containment + Jaccard)
//! - Classification into service, category, and billing period
//! - Keyword-overlap retrieval of explanatory text chunks
//! - Caller-side amount / payment keyword detection
//! - TOML configuration with embedded defaults
//! - CSV import of captured notifications
//!
//! Every classification and retrieval operation is pure and synchronous; an
//! [`Engine`] can be shared across threads without locking.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod import;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod preprocess;
pub mod retrieval;

pub use catalog::{AliasCatalog, BillingTable, CategoryTable, ServiceEntry};
pub use classify::Classifier;
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use import::{dedupe, parse_notifications};
pub use matcher::{match_service, AliasMatcher, MatcherConfig};
pub use models::{
    ClassificationResult, MatchResult, MerchantCandidate, NormalizedText, PeriodReason, RagChunk,
    RawNotification,
};
pub use normalize::{Normalizer, NormalizerConfig, RuleConfig, SubstitutionRule};
pub use preprocess::Preprocessor;
pub use retrieval::RetrievalIndex;
