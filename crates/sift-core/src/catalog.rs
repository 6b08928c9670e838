//! Service alias catalog and per-service reference tables
//!
//! The catalog is the static reference table of recurring services the
//! matcher knows about. Entry order and alias order are significant: when two
//! aliases score the same, the one seen first wins.

use std::collections::HashMap;

use serde::Deserialize;

/// One service as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceEntry {
    /// Canonical service identifier (e.g. "NETFLIX")
    pub id: String,
    /// Textual variants seen in notifications, in priority order
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Expected days between charges
    #[serde(default)]
    pub billing_cycle_days: Option<u32>,
}

impl ServiceEntry {
    pub fn new(id: &str, aliases: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            category: None,
            billing_cycle_days: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_billing_cycle(mut self, days: u32) -> Self {
        self.billing_cycle_days = Some(days);
        self
    }
}

/// Ordered mapping from service identifier to its aliases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasCatalog {
    entries: Vec<(String, Vec<String>)>,
}

impl AliasCatalog {
    /// Build a catalog from (service, aliases) pairs, keeping their order
    ///
    /// A service listed twice has its aliases appended to the first entry.
    pub fn new<I, S, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, A)>,
        S: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let mut catalog = Self::default();
        for (service, aliases) in entries {
            let service = service.into();
            let aliases = aliases.into_iter().map(Into::<String>::into);
            match catalog.entries.iter_mut().find(|(id, _)| *id == service) {
                Some((_, existing)) => existing.extend(aliases),
                None => catalog.entries.push((service, aliases.collect())),
            }
        }
        catalog
    }

    pub fn from_services(services: &[ServiceEntry]) -> Self {
        Self::new(
            services
                .iter()
                .map(|s| (s.id.clone(), s.aliases.iter().cloned())),
        )
    }

    /// Iterate (service, aliases) in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(id, aliases)| (id.as_str(), aliases.as_slice()))
    }

    pub fn aliases(&self, service: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(id, _)| id == service)
            .map(|(_, aliases)| aliases.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of aliases across all services
    pub fn alias_count(&self) -> usize {
        self.entries.iter().map(|(_, a)| a.len()).sum()
    }
}

/// Service identifier to category lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    categories: HashMap<String, String>,
}

impl CategoryTable {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            categories: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn from_services(services: &[ServiceEntry]) -> Self {
        Self::new(
            services
                .iter()
                .filter_map(|s| s.category.as_ref().map(|c| (s.id.clone(), c.clone()))),
        )
    }

    pub fn get(&self, service: &str) -> Option<&str> {
        self.categories.get(service).map(String::as_str)
    }
}

/// Service identifier to billing cycle (days) lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingTable {
    cycles: HashMap<String, u32>,
}

impl BillingTable {
    pub fn new<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        Self {
            cycles: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn from_services(services: &[ServiceEntry]) -> Self {
        Self::new(
            services
                .iter()
                .filter_map(|s| s.billing_cycle_days.map(|d| (s.id.clone(), d))),
        )
    }

    pub fn get(&self, service: &str) -> Option<u32> {
        self.cycles.get(service).copied()
    }
}
