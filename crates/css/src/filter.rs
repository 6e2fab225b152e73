//! Drop rules whose selectors match nothing.

use css_selectors::{DocumentQuery, SelectorUsage};
use css_syntax::{MediaRule, NestedRule, StyleRule, Stylesheet, SupportsRule, TopLevelRule};
use log::debug;

/// Keep what `usage` considers used.
///
/// A rule with several selectors keeps only its used members and goes away
/// when none is left. Conditional blocks are filtered recursively and omitted
/// once empty. Imports and other at-rules, nested ones included, are copied
/// unchanged. Style rules without declarations are never emitted.
pub fn filter_stylesheet<Q>(sheet: &Stylesheet, usage: &SelectorUsage<'_, Q>) -> Stylesheet
where
    Q: DocumentQuery + ?Sized,
{
    let rules = sheet
        .rules
        .iter()
        .filter_map(|rule| match rule {
            TopLevelRule::Style(style) => filter_style_rule(style, usage).map(TopLevelRule::Style),
            TopLevelRule::Media(media) => {
                let rules = filter_style_rules(&media.rules, usage);
                if rules.is_empty() {
                    debug!("Dropping unused @media {}", media.query);
                    return None;
                }
                Some(TopLevelRule::Media(MediaRule {
                    query: media.query.clone(),
                    rules,
                    end: media.end,
                }))
            }
            TopLevelRule::Supports(supports) => {
                let rules = filter_style_rules(&supports.rules, usage);
                (!rules.is_empty()).then(|| {
                    TopLevelRule::Supports(SupportsRule {
                        condition: supports.condition.clone(),
                        rules,
                        end: supports.end,
                    })
                })
            }
            TopLevelRule::Import(_) | TopLevelRule::Opaque(_) => Some(rule.clone()),
        })
        .collect();
    Stylesheet::new(rules)
}

fn filter_style_rules<Q>(rules: &[NestedRule], usage: &SelectorUsage<'_, Q>) -> Vec<NestedRule>
where
    Q: DocumentQuery + ?Sized,
{
    rules
        .iter()
        .filter_map(|rule| match rule {
            NestedRule::Style(style) => filter_style_rule(style, usage).map(NestedRule::Style),
            NestedRule::Opaque(_) => Some(rule.clone()),
        })
        .collect()
}

fn filter_style_rule<Q>(rule: &StyleRule, usage: &SelectorUsage<'_, Q>) -> Option<StyleRule>
where
    Q: DocumentQuery + ?Sized,
{
    if rule.declarations.is_empty() {
        return None;
    }
    if let [single] = rule.selectors.as_slice() {
        return usage.is_used(single).then(|| rule.clone());
    }
    let selectors: Vec<String> = rule
        .selectors
        .iter()
        .filter(|selector| !selector.trim().is_empty() && usage.is_used(selector))
        .cloned()
        .collect();
    if selectors.is_empty() {
        debug!("Dropping unused rule {}", rule.canonical_selectors());
        return None;
    }
    Some(StyleRule {
        selectors,
        declarations: rule.declarations.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_selectors::SelectorSyntaxError;
    use css_syntax::{Declaration, ImportRule, OpaqueRule, SourcePosition};

    struct Known(&'static [&'static str]);

    impl DocumentQuery for Known {
        fn matches_any(&self, selector: &str) -> Result<bool, SelectorSyntaxError> {
            Ok(self.0.contains(&selector))
        }
    }

    fn rule(selectors: &[&str], declared: bool) -> StyleRule {
        StyleRule {
            selectors: selectors.iter().map(|&sel| sel.to_owned()).collect(),
            declarations: if declared {
                vec![Declaration::new("color", "red", SourcePosition::default())]
            } else {
                Vec::new()
            },
        }
    }

    #[test]
    fn multi_selector_rules_keep_used_members() {
        let query = Known(&["div"]);
        let usage = SelectorUsage::new(&query);
        let sheet = Stylesheet::new(vec![
            TopLevelRule::Style(rule(&["div", ".gone", "p"], true)),
            TopLevelRule::Style(rule(&[".gone", "p"], true)),
        ]);
        let filtered = filter_stylesheet(&sheet, &usage);
        assert_eq!(filtered.rules, vec![TopLevelRule::Style(rule(&["div"], true))]);
    }

    #[test]
    fn empty_rules_and_blocks_disappear() -> Result<(), &'static str> {
        let query = Known(&["div"]);
        let usage = SelectorUsage::new(&query);
        let import = TopLevelRule::Import(ImportRule {
            target: "x.css".to_owned(),
            prelude: "url(x.css)".to_owned(),
            insertion_index: 0,
        });
        let sheet = Stylesheet::new(vec![
            TopLevelRule::Style(rule(&["div"], false)),
            TopLevelRule::Media(MediaRule {
                query: "print".to_owned(),
                rules: vec![rule(&[".gone"], true).into()],
                end: SourcePosition::default(),
            }),
            TopLevelRule::Supports(SupportsRule {
                condition: "(display:grid)".to_owned(),
                rules: vec![rule(&["div"], true).into(), rule(&["p"], true).into()],
                end: SourcePosition::default(),
            }),
            import.clone(),
        ]);
        let filtered = filter_stylesheet(&sheet, &usage);
        assert_eq!(filtered.rules.len(), 2);
        let TopLevelRule::Supports(supports) = &filtered.rules[0] else {
            return Err("expected supports rule");
        };
        assert_eq!(supports.rules, vec![rule(&["div"], true).into()]);
        assert_eq!(filtered.rules[1], import);
        Ok(())
    }

    #[test]
    fn nested_at_rules_keep_their_block() -> Result<(), &'static str> {
        let query = Known(&[]);
        let usage = SelectorUsage::new(&query);
        let page = NestedRule::Opaque(OpaqueRule {
            name: "page".to_owned(),
            prelude: String::new(),
            body: Some("margin:0".to_owned()),
        });
        let sheet = Stylesheet::new(vec![TopLevelRule::Media(MediaRule {
            query: "print".to_owned(),
            rules: vec![page.clone(), rule(&[".gone"], true).into()],
            end: SourcePosition::default(),
        })]);
        let filtered = filter_stylesheet(&sheet, &usage);
        let Some(TopLevelRule::Media(media)) = filtered.rules.first() else {
            return Err("expected media rule");
        };
        assert_eq!(media.rules, vec![page]);
        Ok(())
    }
}
