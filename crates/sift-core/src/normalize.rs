//! Notification text normalization and merchant extraction
//!
//! Payment notifications arrive in whatever shape the card issuer likes:
//! mixed case, `*` separators, provider names glued together ("GOOGLEPAY"),
//! emoji, brackets. The normalizer folds all of that into a canonical form so
//! that aliases and notifications can be compared as plain strings.
//!
//! Normalization runs in a fixed order:
//! 1. Trim and uppercase (Unicode default casing, never locale-dependent)
//! 2. Ordered substitution rules, each applied to the output of the previous
//! 3. Characters outside the allow-list become spaces
//! 4. Whitespace collapse and trim
//!
//! Steps 2-4 repeat until the text stops changing, which makes
//! `normalize(normalize(x)) == normalize(x)` hold for every input. A pass
//! where a provider fold fires shortens the text, so the loop is bounded by
//! the input length rather than a fixed count.

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{MerchantCandidate, NormalizedText};

/// Merchant candidates are capped to this many characters
pub const MAX_MERCHANT_CHARS: usize = 80;

/// A substitution rule as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleConfig {
    /// Replace every occurrence of a literal substring
    Literal { from: String, to: String },
    /// Replace every match of a regex (`$1`-style group references allowed)
    Pattern {
        pattern: String,
        replacement: String,
    },
}

impl RuleConfig {
    pub fn literal(from: &str, to: &str) -> Self {
        Self::Literal {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn pattern(pattern: &str, replacement: &str) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Built-in substitution rules, in application order
pub fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::literal("*", " "),
        RuleConfig::pattern(r"\s+", " "),
        RuleConfig::pattern(r"GOOGLE\s*PAY|GOOGLEPAY", "GOOGLE"),
        RuleConfig::pattern(r"NAVER\s*\*?\s*PAY|NAVERPAY", "NAVER PAY"),
        RuleConfig::pattern(r"APPLE\s*\*?\s*COM|APPLECOM", "APPLE"),
    ]
}

/// Normalizer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    /// Substitution rules applied in order
    pub rules: Vec<RuleConfig>,
    /// Inclusive character ranges kept alongside A-Z and 0-9
    pub script_ranges: Vec<(char, char)>,
    /// Currency tokens stripped during merchant extraction
    pub currency_units: Vec<String>,
    pub max_merchant_chars: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            // Hangul syllables
            script_ranges: vec![('가', '힣')],
            currency_units: vec!["KRW".to_string(), "USD".to_string(), "원".to_string()],
            max_merchant_chars: MAX_MERCHANT_CHARS,
        }
    }
}

/// A compiled substitution rule
#[derive(Debug, Clone)]
pub enum SubstitutionRule {
    Literal { from: String, to: String },
    Pattern { regex: Regex, replacement: String },
}

impl SubstitutionRule {
    /// Compile a configured rule
    pub fn compile(config: &RuleConfig) -> Result<Self> {
        match config {
            RuleConfig::Literal { from, to } => {
                if from.is_empty() {
                    return Err(Error::InvalidConfig(
                        "literal substitution rule has an empty 'from'".into(),
                    ));
                }
                Ok(Self::Literal {
                    from: from.clone(),
                    to: to.clone(),
                })
            }
            RuleConfig::Pattern {
                pattern,
                replacement,
            } => Ok(Self::Pattern {
                regex: Regex::new(pattern)?,
                replacement: replacement.clone(),
            }),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Literal { from, to } => text.replace(from.as_str(), to),
            Self::Pattern { regex, replacement } => {
                regex.replace_all(text, replacement.as_str()).into_owned()
            }
        }
    }
}

/// Deterministic text normalizer
///
/// Holds only compiled, immutable state, so one instance can be shared across
/// threads without locking.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: Vec<SubstitutionRule>,
    disallowed: Regex,
    whitespace: Regex,
    amount_token: Regex,
    currency_token: Option<Regex>,
    max_merchant_chars: usize,
}

impl Normalizer {
    pub fn new(config: &NormalizerConfig) -> Result<Self> {
        let rules = config
            .rules
            .iter()
            .map(SubstitutionRule::compile)
            .collect::<Result<Vec<_>>>()?;

        let mut allowed = String::from("A-Z0-9");
        for &(start, end) in &config.script_ranges {
            if start > end {
                return Err(Error::InvalidConfig(format!(
                    "script range {}-{} is reversed",
                    start, end
                )));
            }
            allowed.push_str(&regex::escape(&start.to_string()));
            allowed.push('-');
            allowed.push_str(&regex::escape(&end.to_string()));
        }
        let disallowed = Regex::new(&format!(r"[^{}\s\-_.]", allowed))?;

        let units: Vec<String> = config
            .currency_units
            .iter()
            .map(|u| u.trim().to_uppercase())
            .filter(|u| !u.is_empty())
            .map(|u| regex::escape(&u))
            .collect();

        // Digit runs, optionally glued to a currency unit ("13,500원")
        let amount_token = if units.is_empty() {
            Regex::new(r"\b\d[\d,.]*\b")?
        } else {
            Regex::new(&format!(r"\b\d[\d,.]*(?:{})?\b", units.join("|")))?
        };
        let currency_token = if units.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"\b(?:{})\b", units.join("|")))?)
        };

        Ok(Self {
            rules,
            disallowed,
            whitespace: Regex::new(r"\s+")?,
            amount_token,
            currency_token,
            max_merchant_chars: config.max_merchant_chars,
        })
    }

    /// Canonicalize raw notification text
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let mut text = raw.trim().to_uppercase();

        let max_passes = text.chars().count() + 1;
        for _ in 0..max_passes {
            let next = self.clean_pass(&text);
            if next == text {
                break;
            }
            text = next;
        }

        NormalizedText::new(text)
    }

    /// Strip amounts and currency tokens, leaving the merchant-looking part
    ///
    /// Falls back to the (truncated) normalized text when nothing is left, so a
    /// non-blank input never produces a blank candidate.
    pub fn extract_merchant(&self, normalized: &NormalizedText) -> MerchantCandidate {
        let stripped = self.amount_token.replace_all(normalized.as_str(), " ");
        let stripped = match &self.currency_token {
            Some(re) => re.replace_all(&stripped, " ").into_owned(),
            None => stripped.into_owned(),
        };
        let stripped = self.collapse(&stripped);

        let source = if stripped.is_empty() {
            normalized.as_str()
        } else {
            stripped.as_str()
        };

        MerchantCandidate::new(truncate_chars(source, self.max_merchant_chars))
    }

    fn clean_pass(&self, input: &str) -> String {
        let mut text = input.to_string();
        for rule in &self.rules {
            text = rule.apply(&text);
        }
        let text = self.disallowed.replace_all(&text, " ");
        self.collapse(&text)
    }

    fn collapse(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}
