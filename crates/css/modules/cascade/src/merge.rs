//! Fold duplicate rules of a concatenated stylesheet into one.

use std::collections::HashSet;

use css_syntax::{ImportRule, MediaRule, NestedRule, StyleRule, Stylesheet, TopLevelRule};
use log::debug;

use crate::error::UnsupportedRule;
use crate::ordering::OrderingMode;

/// Merge rules sharing a selector list or a media query.
///
/// For every key seen for the first time, all rules with the same key that
/// come later (per `mode`) are appended to it, and the key is marked so the
/// later rules are not emitted again. Style rules without declarations never
/// take part and are dropped. Imports are moved ahead of everything else,
/// keeping their relative order. Other at-rules pass through.
///
/// The nested rules of every emitted media block are merged the same way.
///
/// # Errors
/// Returns [`UnsupportedRule`] for the first `None` slot.
pub fn merge_rules<I>(slots: I, mode: OrderingMode) -> Result<Stylesheet, UnsupportedRule>
where
    I: IntoIterator<Item = Option<TopLevelRule>>,
{
    let slots: Vec<Option<TopLevelRule>> = slots.into_iter().collect();
    let mut consolidated: HashSet<String> = HashSet::new();
    let mut imports: Vec<ImportRule> = Vec::new();
    let mut rules: Vec<TopLevelRule> = Vec::new();

    for (index, slot) in slots.iter().enumerate() {
        let Some(rule) = slot else {
            return Err(UnsupportedRule { index });
        };
        match rule {
            TopLevelRule::Media(media) => {
                if consolidated.contains(media.canonical_query()) {
                    continue;
                }
                let winner = absorb_later_media(media, &slots, mode, &mut consolidated);
                rules.push(TopLevelRule::Media(winner));
            }
            TopLevelRule::Style(style) => {
                let key = style.canonical_selectors();
                if consolidated.contains(&key) {
                    continue;
                }
                if style.declarations.is_empty() {
                    debug!("Dropping empty rule {key}");
                    continue;
                }
                let winner = absorb_later_style(style, &key, &slots, mode, &mut consolidated);
                rules.push(TopLevelRule::Style(winner));
            }
            TopLevelRule::Import(import) => {
                imports.push(ImportRule {
                    insertion_index: imports.len(),
                    ..import.clone()
                });
            }
            TopLevelRule::Supports(_) | TopLevelRule::Opaque(_) => rules.push(rule.clone()),
        }
    }

    let mut merged: Vec<TopLevelRule> = imports.into_iter().map(TopLevelRule::Import).collect();
    merged.reserve(rules.len());
    for rule in rules {
        match rule {
            TopLevelRule::Media(media) => {
                let media = remerge_media(media, mode)?;
                if !media.rules.is_empty() {
                    merged.push(TopLevelRule::Media(media));
                }
            }
            other => merged.push(other),
        }
    }
    Ok(Stylesheet::new(merged))
}

/// [`merge_rules`] over an already parsed stylesheet.
///
/// # Errors
/// Never fails for a parsed stylesheet; the error type is shared with
/// [`merge_rules`].
pub fn merge_stylesheet(sheet: &Stylesheet, mode: OrderingMode) -> Result<Stylesheet, UnsupportedRule> {
    merge_rules(sheet.rules.iter().cloned().map(Some), mode)
}

fn absorb_later_style(
    style: &StyleRule,
    key: &str,
    slots: &[Option<TopLevelRule>],
    mode: OrderingMode,
    consolidated: &mut HashSet<String>,
) -> StyleRule {
    let mut winner = style.clone();
    let Some(own_end) = style.first_declaration_end() else {
        return winner;
    };
    for other in slots.iter().flatten() {
        let TopLevelRule::Style(other) = other else {
            continue;
        };
        let Some(other_end) = other.first_declaration_end() else {
            continue;
        };
        if mode.is_later(other_end, own_end) && other.canonical_selectors() == key {
            consolidated.insert(key.to_owned());
            winner.declarations.extend(other.declarations.iter().cloned());
        }
    }
    winner
}

fn absorb_later_media(
    media: &MediaRule,
    slots: &[Option<TopLevelRule>],
    mode: OrderingMode,
    consolidated: &mut HashSet<String>,
) -> MediaRule {
    let mut winner = media.clone();
    for other in slots.iter().flatten() {
        let TopLevelRule::Media(other) = other else {
            continue;
        };
        if mode.is_later(other.end, media.end) && other.canonical_query() == media.canonical_query() {
            consolidated.insert(media.query.clone());
            winner.rules.extend(other.rules.iter().cloned());
        }
    }
    winner
}

fn remerge_media(media: MediaRule, mode: OrderingMode) -> Result<MediaRule, UnsupportedRule> {
    let slots = media.rules.into_iter().map(|rule| {
        Some(match rule {
            NestedRule::Style(style) => TopLevelRule::Style(style),
            NestedRule::Opaque(opaque) => TopLevelRule::Opaque(opaque),
        })
    });
    let nested = merge_rules(slots, mode)?;
    Ok(MediaRule {
        rules: nested
            .rules
            .into_iter()
            .filter_map(|rule| match rule {
                TopLevelRule::Style(style) => Some(NestedRule::Style(style)),
                TopLevelRule::Opaque(opaque) => Some(NestedRule::Opaque(opaque)),
                TopLevelRule::Media(_) | TopLevelRule::Supports(_) | TopLevelRule::Import(_) => None,
            })
            .collect(),
        ..media
    })
}
