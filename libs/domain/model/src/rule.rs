use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// What to do with a notification that matches a rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Dismiss,
    Silent,
    Normal,
}

/// A single filter entry in the daemon's rules file. Fields left unset match
/// anything for that dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Regex matched against the notification's title and message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    pub action: RuleAction,
    /// Legacy boolean precedence: when present, overrides `action` entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppress: Option<bool>,
}

impl Rule {
    /// Compiles `pattern`, if present, surfacing a regex error up front
    /// rather than at match time.
    pub fn compiled_pattern(&self) -> Result<Option<Regex>, ModelError> {
        match &self.pattern {
            Some(p) => Ok(Some(Regex::new(p)?)),
            None => Ok(None),
        }
    }

    pub fn matches(
        &self,
        server: &str,
        source: &str,
        status: &str,
        title: &str,
        message: &str,
    ) -> Result<bool, ModelError> {
        if let Some(expected) = &self.server {
            if expected != server {
                return Ok(false);
            }
        }
        if let Some(expected) = &self.source {
            if expected != source {
                return Ok(false);
            }
        }
        if let Some(expected) = &self.status {
            if expected != status {
                return Ok(false);
            }
        }
        if let Some(pattern) = self.compiled_pattern()? {
            if !pattern.is_match(title) && !pattern.is_match(message) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The effective action, honoring the legacy `suppress` boolean when set.
    pub fn effective_action(&self) -> RuleAction {
        match self.suppress {
            Some(true) => RuleAction::Dismiss,
            Some(false) => RuleAction::Normal,
            None => self.action,
        }
    }
}

/// The daemon's full rules file: an ordered list, first match wins.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RulesConfig {
    /// Returns the first matching rule's effective action, or `Normal` if no
    /// rule matches.
    pub fn resolve(
        &self,
        server: &str,
        source: &str,
        status: &str,
        title: &str,
        message: &str,
    ) -> Result<RuleAction, ModelError> {
        for rule in &self.rules {
            if rule.matches(server, source, status, title, message)? {
                return Ok(rule.effective_action());
            }
        }
        Ok(RuleAction::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        let config = RulesConfig {
            rules: vec![
                Rule {
                    server: None,
                    source: Some("chat".into()),
                    status: None,
                    pattern: None,
                    sound: None,
                    action: RuleAction::Silent,
                    suppress: None,
                },
                Rule {
                    server: None,
                    source: Some("chat".into()),
                    status: None,
                    pattern: None,
                    sound: None,
                    action: RuleAction::Dismiss,
                    suppress: None,
                },
            ],
        };
        assert_eq!(
            config.resolve("s1", "chat", "", "t", "m").unwrap(),
            RuleAction::Silent
        );
    }

    #[test]
    fn legacy_suppress_overrides_action() {
        let rule = Rule {
            server: None,
            source: None,
            status: None,
            pattern: None,
            sound: None,
            action: RuleAction::Normal,
            suppress: Some(true),
        };
        assert_eq!(rule.effective_action(), RuleAction::Dismiss);
    }

    #[test]
    fn no_match_falls_back_to_normal() {
        let config = RulesConfig::default();
        assert_eq!(
            config.resolve("s1", "src", "", "t", "m").unwrap(),
            RuleAction::Normal
        );
    }

    #[test]
    fn invalid_pattern_surfaces_regex_error() {
        let rule = Rule {
            server: None,
            source: None,
            status: None,
            pattern: Some("(".into()),
            sound: None,
            action: RuleAction::Normal,
            suppress: None,
        };
        assert!(rule.compiled_pattern().is_err());
    }
}
