use crate::{ModelError, RuleAction, RulesConfig};

/// The daemon ingress pipeline's decision for an incoming notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Drop entirely; never shown, never stored.
    Dismiss,
    /// Store in the center, but do not pop up or play a sound.
    SilentStore,
    /// Show a popup; open the center automatically once it expires.
    NormalWithCenterOpen,
    /// Show a popup; no automatic center-open on expiry.
    NormalOtherwise,
}

/// Applies `rules` to an incoming notification's coordinates and combines
/// the result with whether the daemon's notification center is currently
/// open, producing the ingress pipeline's classification.
pub fn classify(
    rules: &RulesConfig,
    server: &str,
    source: &str,
    status: &str,
    title: &str,
    message: &str,
    center_is_open: bool,
) -> Result<Classification, ModelError> {
    let action = rules.resolve(server, source, status, title, message)?;
    Ok(match action {
        RuleAction::Dismiss => Classification::Dismiss,
        RuleAction::Silent => Classification::SilentStore,
        RuleAction::Normal if center_is_open => Classification::NormalWithCenterOpen,
        RuleAction::Normal => Classification::NormalOtherwise,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_without_open_center_skips_auto_open() {
        let rules = RulesConfig::default();
        let result = classify(&rules, "s", "src", "", "t", "m", false).unwrap();
        assert_eq!(result, Classification::NormalOtherwise);
    }

    #[test]
    fn normal_with_open_center_marks_auto_open() {
        let rules = RulesConfig::default();
        let result = classify(&rules, "s", "src", "", "t", "m", true).unwrap();
        assert_eq!(result, Classification::NormalWithCenterOpen);
    }
}
