//! Engine configuration loading
//!
//! The alias catalog, category and billing tables, substitution rules, and
//! retrieval chunks are all configuration. The engine components never read
//! files themselves; this module turns TOML into the plain structures they
//! are constructed from.
//!
//! ## Configuration Resolution
//!
//! Config is resolved in order, taking the first that exists:
//! 1. An explicitly given path (a missing one is logged and skipped)
//! 2. Override in data dir (~/.local/share/sift/config/engine.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! An override file replaces the embedded file as a whole. Sections it leaves
//! out take built-in defaults (an empty catalog and chunk set for
//! `[[services]]` / `[[chunks]]`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::catalog::ServiceEntry;
use crate::error::{Error, Result};
use crate::matcher::MatcherConfig;
use crate::models::RagChunk;
use crate::normalize::{NormalizerConfig, RuleConfig};
use crate::preprocess::default_payment_keywords;

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Everything needed to build an [`Engine`](crate::engine::Engine)
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub normalizer: NormalizerConfig,
    pub matcher: MatcherConfig,
    pub payment_keywords: Vec<String>,
    pub services: Vec<ServiceEntry>,
    pub chunks: Vec<RagChunk>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            matcher: MatcherConfig::default(),
            payment_keywords: default_payment_keywords(),
            services: Vec::new(),
            chunks: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// The configuration compiled into the binary
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Resolve and load configuration (explicit path, data dir override, embedded)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        load_config(override_path)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("sift").join("config").join("engine.toml"))
}

/// Load configuration (explicit path, then data dir override, then embedded)
fn load_config(override_path: Option<&Path>) -> Result<EngineConfig> {
    let data_dir_path = default_config_path();
    load_config_from(override_path, data_dir_path.as_deref())
}

fn load_config_from(
    override_path: Option<&Path>,
    data_dir_path: Option<&Path>,
) -> Result<EngineConfig> {
    let content = match resolve_config_path(override_path, data_dir_path) {
        Some(path) => {
            info!("Loading engine config from {}", path.display());
            fs::read_to_string(path)
                .map_err(|e| Error::InvalidConfig(format!("Failed to read config: {}", e)))?
        }
        None => {
            debug!("Using embedded engine config");
            DEFAULT_CONFIG.to_string()
        }
    };

    parse_config(&content)
}

/// First existing config file among the explicit path and the data dir override
fn resolve_config_path<'a>(
    override_path: Option<&'a Path>,
    data_dir_path: Option<&'a Path>,
) -> Option<&'a Path> {
    if let Some(path) = override_path {
        if path.exists() {
            return Some(path);
        }
        warn!("Config file {} not found, falling back", path.display());
    }

    data_dir_path.filter(|path| path.exists())
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    normalizer: Option<RawNormalizer>,
    matcher: Option<RawMatcher>,
    preprocess: Option<RawPreprocess>,
    services: Option<Vec<ServiceEntry>>,
    chunks: Option<Vec<RagChunk>>,
}

#[derive(Debug, Deserialize)]
struct RawNormalizer {
    rules: Option<Vec<RuleConfig>>,
    script_ranges: Option<Vec<RawScriptRange>>,
    currency_units: Option<Vec<String>>,
    max_merchant_chars: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawScriptRange {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct RawMatcher {
    threshold: Option<f64>,
    min_containment_chars: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawPreprocess {
    payment_keywords: Option<Vec<String>>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidConfig(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(normalizer) = raw.normalizer {
        if let Some(rules) = normalizer.rules {
            config.normalizer.rules = rules;
        }
        if let Some(ranges) = normalizer.script_ranges {
            config.normalizer.script_ranges = ranges
                .iter()
                .map(|r| -> Result<(char, char)> {
                    Ok((single_char(&r.start)?, single_char(&r.end)?))
                })
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(units) = normalizer.currency_units {
            config.normalizer.currency_units = units;
        }
        if let Some(max) = normalizer.max_merchant_chars {
            if max == 0 {
                return Err(Error::InvalidConfig(
                    "max_merchant_chars must be positive".into(),
                ));
            }
            config.normalizer.max_merchant_chars = max;
        }
    }

    if let Some(matcher) = raw.matcher {
        if let Some(threshold) = matcher.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(Error::InvalidConfig(format!(
                    "matcher threshold {} is outside [0, 1]",
                    threshold
                )));
            }
            config.matcher.threshold = threshold;
        }
        if let Some(min) = matcher.min_containment_chars {
            config.matcher.min_containment_chars = min;
        }
    }

    if let Some(preprocess) = raw.preprocess {
        if let Some(keywords) = preprocess.payment_keywords {
            config.payment_keywords = keywords;
        }
    }

    if let Some(services) = raw.services {
        for service in &services {
            if service.id.trim().is_empty() {
                return Err(Error::InvalidConfig("service with empty id".into()));
            }
        }
        config.services = services;
    }

    if let Some(chunks) = raw.chunks {
        config.chunks = chunks;
    }

    Ok(config)
}

fn single_char(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::InvalidConfig(format!(
            "script range bound '{}' must be a single character",
            s
        ))),
    }
}
