//! Caller-side preprocessing of raw notification text
//!
//! The capture layer decides whether a notification is a payment at all and
//! pulls the charged amount out of it before classification. These helpers
//! do that work on the raw (not normalized) text, since normalization drops
//! the thousands separators the amount pattern relies on.

use regex::Regex;

use crate::error::Result;

/// Default keywords marking a notification as a payment
/// (approved, withdrawn, paid)
pub fn default_payment_keywords() -> Vec<String> {
    vec!["승인".to_string(), "출금".to_string(), "결제".to_string()]
}

/// Amount and payment-keyword detection
#[derive(Debug, Clone)]
pub struct Preprocessor {
    amount: Regex,
    keywords: Vec<String>,
}

impl Preprocessor {
    pub fn new(keywords: Vec<String>) -> Result<Self> {
        Ok(Self {
            amount: Regex::new(r"[0-9,]+원")?,
            keywords: keywords.into_iter().filter(|k| !k.is_empty()).collect(),
        })
    }

    /// First won-suffixed amount in the text ("13,500원" -> 13500)
    ///
    /// Returns None when no amount is present, when the digits do not parse,
    /// or when the amount is not positive.
    pub fn extract_amount(&self, text: &str) -> Option<i64> {
        let found = self.amount.find(text)?;
        let digits: String = found
            .as_str()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits.parse::<i64>().ok().filter(|amount| *amount > 0)
    }

    /// First configured payment keyword contained in the text
    pub fn payment_keyword(&self, text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| text.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Payment keyword present and a positive amount found
    pub fn is_payment_notification(&self, text: &str) -> bool {
        self.payment_keyword(text).is_some() && self.extract_amount(text).is_some()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
