//! Keep one declaration per property inside each rule.

use css_syntax::{Declaration, MediaRule, NestedRule, StyleRule, Stylesheet, TopLevelRule};

/// Drop declarations overridden later in the same rule.
///
/// Declarations are visited last to first. The last occurrence of a property
/// wins unless an earlier occurrence is `!important`, in which case the
/// earliest important one wins. The returned rule lists properties in the
/// order they were first met during that reverse walk.
#[must_use]
pub fn optimize_rule(rule: &StyleRule) -> StyleRule {
    let mut kept: Vec<&Declaration> = Vec::with_capacity(rule.declarations.len());
    for declaration in rule.declarations.iter().rev() {
        match kept
            .iter_mut()
            .find(|seen| seen.property == declaration.property)
        {
            Some(seen) if declaration.important => *seen = declaration,
            Some(_) => {}
            None => kept.push(declaration),
        }
    }
    StyleRule {
        selectors: rule.selectors.clone(),
        declarations: kept.into_iter().cloned().collect(),
    }
}

#[must_use]
pub fn optimize_rules(rules: &[StyleRule]) -> Vec<StyleRule> {
    rules.iter().map(optimize_rule).collect()
}

/// Optimize the style rules of a media block; nested at-rules are copied.
#[must_use]
pub fn optimize_media(media: &MediaRule) -> MediaRule {
    MediaRule {
        query: media.query.clone(),
        rules: media
            .rules
            .iter()
            .map(|rule| match rule {
                NestedRule::Style(style) => NestedRule::Style(optimize_rule(style)),
                NestedRule::Opaque(_) => rule.clone(),
            })
            .collect(),
        end: media.end,
    }
}

/// Optimize top-level style rules and the rules nested in media blocks.
/// Everything else is copied unchanged.
#[must_use]
pub fn optimize_stylesheet(sheet: &Stylesheet) -> Stylesheet {
    Stylesheet::new(
        sheet
            .rules
            .iter()
            .map(|rule| match rule {
                TopLevelRule::Style(style) => TopLevelRule::Style(optimize_rule(style)),
                TopLevelRule::Media(media) => TopLevelRule::Media(optimize_media(media)),
                TopLevelRule::Supports(_) | TopLevelRule::Import(_) | TopLevelRule::Opaque(_) => {
                    rule.clone()
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::SourcePosition;

    fn rule(declarations: &[(&str, &str)]) -> StyleRule {
        StyleRule {
            selectors: vec!["p".to_owned(), ".x".to_owned()],
            declarations: declarations
                .iter()
                .zip(1..)
                .map(|(&(property, value), column)| {
                    Declaration::new(property, value, SourcePosition::new(0, column))
                })
                .collect(),
        }
    }

    fn pairs(rule: &StyleRule) -> Vec<(&str, &str)> {
        rule.declarations
            .iter()
            .map(|declaration| (declaration.property.as_str(), declaration.value.as_str()))
            .collect()
    }

    #[test]
    fn last_plain_declaration_wins() {
        let optimized = optimize_rule(&rule(&[("color", "red"), ("color", "blue")]));
        assert_eq!(pairs(&optimized), [("color", "blue")]);
        assert_eq!(optimized.selectors, ["p", ".x"]);
    }

    #[test]
    fn earlier_important_beats_later_plain() {
        let optimized = optimize_rule(&rule(&[("color", "red!important"), ("color", "blue")]));
        assert_eq!(pairs(&optimized), [("color", "red!important")]);
    }

    #[test]
    fn important_spellings_all_count() {
        for spelling in ["red ! important", "red !IMPORTANT"] {
            let optimized = optimize_rule(&rule(&[("color", spelling), ("color", "blue")]));
            assert_eq!(pairs(&optimized), [("color", "red!important")]);
        }
    }

    #[test]
    fn output_follows_reverse_discovery_order() {
        let optimized = optimize_rule(&rule(&[
            ("margin", "0"),
            ("color", "red"),
            ("margin", "1px"),
        ]));
        assert_eq!(pairs(&optimized), [("margin", "1px"), ("color", "red")]);
    }

    #[test]
    fn second_run_removes_nothing() {
        let once = optimize_rule(&rule(&[
            ("color", "red!important"),
            ("margin", "0"),
            ("color", "blue"),
            ("padding", "2px"),
        ]));
        let twice = optimize_rule(&once);
        assert_eq!(once.declarations.len(), twice.declarations.len());
        for declaration in &twice.declarations {
            assert!(once.declarations.contains(declaration));
        }
        assert_eq!(optimize_rule(&twice), once);
    }

    #[test]
    fn stylesheet_reaches_into_media_only() -> Result<(), &'static str> {
        let nested = rule(&[("color", "red"), ("color", "blue")]);
        let sheet = Stylesheet::new(vec![
            TopLevelRule::Style(nested.clone()),
            TopLevelRule::Media(MediaRule {
                query: "print".to_owned(),
                rules: vec![nested.clone().into()],
                end: SourcePosition::default(),
            }),
            TopLevelRule::Supports(css_syntax::SupportsRule {
                condition: "(display:grid)".to_owned(),
                rules: vec![nested.into()],
                end: SourcePosition::default(),
            }),
        ]);
        let optimized = optimize_stylesheet(&sheet);
        let TopLevelRule::Media(media) = &optimized.rules[1] else {
            return Err("expected media rule");
        };
        let style = media.rules[0].as_style().ok_or("expected style rule")?;
        assert_eq!(pairs(style), [("color", "blue")]);
        assert_eq!(optimized.rules[2], sheet.rules[2]);
        Ok(())
    }
}
