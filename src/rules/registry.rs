//! The rule catalog.
//!
//! The catalog is an explicit constructed object handed to the engine, not a
//! module-wide singleton, so concurrent scans with different enabled-rule
//! sets cannot interfere. Construction validates the configuration: duplicate
//! rule IDs and config entries naming unknown rules are rejected before any
//! file is scanned.

use super::list_rules::{IndexAsKeyRule, MissingListKeyRule};
use super::prop_rules::{UnstableCallbackRule, UnstableContextValueRule, UnstableLiteralPropRule};
use super::render_rules::{ComponentInRenderRule, UnmemoizedListComponentRule};
use super::{Rule, PARSE_FAILURE, RULE_INTERNAL_ERROR};
use crate::error::{Error, Result};
use crate::Config;
use std::collections::HashSet;

/// Get all registered rules
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(UnmemoizedListComponentRule),
        Box::new(UnstableCallbackRule),
        Box::new(UnstableLiteralPropRule),
        Box::new(MissingListKeyRule),
        Box::new(IndexAsKeyRule),
        Box::new(ComponentInRenderRule),
        Box::new(UnstableContextValueRule),
    ]
}

/// Get a rule by its ID
pub fn get_rule(id: &str) -> Option<Box<dyn Rule>> {
    all_rules().into_iter().find(|r| r.id() == id)
}

/// Check whether a rule ID exists in the catalog.
pub fn has_rule(id: &str) -> bool {
    all_rules().iter().any(|r| r.id() == id)
}

/// A validated set of rules for one scan.
pub struct RuleCatalog {
    rules: Vec<Box<dyn Rule>>,
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.rules.iter().map(|r| r.id()).collect::<Vec<_>>())
            .finish()
    }
}

impl RuleCatalog {
    /// Build the catalog, validating it against the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rules = all_rules();

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id()) {
                return Err(Error::config(format!("duplicate rule ID: {}", rule.id())));
            }
        }

        for rule_id in config.rules.keys() {
            // The engine's pseudo-rule IDs are reserved and not configurable.
            if rule_id == PARSE_FAILURE || rule_id == RULE_INTERNAL_ERROR {
                return Err(Error::config(format!(
                    "rule '{rule_id}' is reserved and cannot be configured"
                )));
            }
            if !seen.contains(rule_id.as_str()) {
                return Err(Error::config(format!(
                    "unknown rule '{rule_id}' in configuration"
                )));
            }
        }

        Ok(Self { rules })
    }

    /// Build a catalog from an explicit rule list, bypassing config
    /// validation. Fault-injection seam for engine tests.
    #[cfg(test)]
    pub(crate) fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// The rules in catalog order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSeverity;

    #[test]
    fn test_all_rule_ids_are_unique() {
        let mut seen = HashSet::new();
        for rule in all_rules() {
            assert!(seen.insert(rule.id()), "duplicate rule ID: {}", rule.id());
        }
    }

    #[test]
    fn test_catalog_from_default_config() {
        let catalog = RuleCatalog::from_config(&Config::default()).unwrap();
        assert_eq!(catalog.len(), all_rules().len());
    }

    #[test]
    fn test_unknown_rule_in_config_is_fatal() {
        let mut config = Config::default();
        config
            .rules
            .insert("no-such-rule".to_string(), RuleSeverity::Deny);
        let err = RuleCatalog::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("no-such-rule"));
    }

    #[test]
    fn test_reserved_rule_ids_are_rejected() {
        let mut config = Config::default();
        config
            .rules
            .insert(PARSE_FAILURE.to_string(), RuleSeverity::Allow);
        assert!(RuleCatalog::from_config(&config).is_err());
    }

    #[test]
    fn test_get_rule_by_id() {
        assert!(get_rule("missing-list-key").is_some());
        assert!(get_rule("nonexistent").is_none());
        assert!(has_rule("unstable-callback"));
    }
}
