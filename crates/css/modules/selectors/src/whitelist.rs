//! Selectors that are always kept, whatever the document contains.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitelistKind {
    /// The whole selector equals the pattern.
    Equals,
    /// The selector contains the pattern anywhere.
    Containing,
}

/// One whitelist entry. Matching ignores ASCII and Unicode case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistRule {
    pub kind: WhitelistKind,
    pub pattern: String,
}

impl WhitelistRule {
    #[must_use]
    pub fn equals(pattern: impl Into<String>) -> Self {
        Self {
            kind: WhitelistKind::Equals,
            pattern: pattern.into(),
        }
    }

    #[must_use]
    pub fn containing(pattern: impl Into<String>) -> Self {
        Self {
            kind: WhitelistKind::Containing,
            pattern: pattern.into(),
        }
    }

    /// Test against a selector already lowercased by the caller.
    fn matches_lowercase(&self, selector: &str) -> bool {
        let pattern = self.pattern.to_lowercase();
        match self.kind {
            WhitelistKind::Equals => selector == pattern,
            WhitelistKind::Containing => selector.contains(&pattern),
        }
    }
}

/// True when any rule keeps `selector`.
pub fn is_whitelisted(rules: &[WhitelistRule], selector: &str) -> bool {
    if rules.is_empty() {
        return false;
    }
    let lowered = selector.to_lowercase();
    rules.iter().any(|rule| rule.matches_lowercase(&lowered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_is_case_insensitive_and_whole() {
        let rules = [WhitelistRule::equals(".Not-Used-WL p")];
        assert!(is_whitelisted(&rules, ".not-used-wl P"));
        assert!(!is_whitelisted(&rules, ".not-used-wl p span"));
    }

    #[test]
    fn containing_matches_substrings() {
        let rules = [WhitelistRule::containing("modal")];
        assert!(is_whitelisted(&rules, "body.MODAL-open .x"));
        assert!(!is_whitelisted(&rules, ".dialog"));
    }

    #[test]
    fn rules_deserialize_from_json() -> Result<(), serde_json::Error> {
        let rules: Vec<WhitelistRule> =
            serde_json::from_str(r#"[{"kind":"containing","pattern":"js-"}]"#)?;
        assert_eq!(rules, [WhitelistRule::containing("js-")]);
        Ok(())
    }
}
