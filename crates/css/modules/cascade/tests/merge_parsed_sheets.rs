#![cfg(test)]

use core::error::Error;

use css_cascade::{OrderingMode, UnsupportedRule, merge_rules, merge_stylesheet, optimize_stylesheet};
use css_syntax::{SerializeOptions, parse_rule_slots, parse_stylesheet, serialize};

fn consolidate(css: &str, mode: OrderingMode) -> Result<String, Box<dyn Error>> {
    let merged = merge_stylesheet(&parse_stylesheet(css)?, mode)?;
    Ok(serialize(&optimize_stylesheet(&merged), SerializeOptions::MINIFIED))
}

#[test]
fn duplicate_selector_lists_fold_once() -> Result<(), Box<dyn Error>> {
    let css = ".a,.b{color:red} .c{margin:0} .a,.b{color:blue;padding:1px} .a{color:green}";
    assert_eq!(
        consolidate(css, OrderingMode::Legacy)?,
        ".a,.b{padding:1px;color:blue}.c{margin:0}.a{color:green}"
    );
    Ok(())
}

#[test]
fn important_survives_later_plain_values() -> Result<(), Box<dyn Error>> {
    let css = "p{color:red!important} p{color:blue}";
    assert_eq!(consolidate(css, OrderingMode::Legacy)?, "p{color:red!important}");
    Ok(())
}

#[test]
fn media_and_passthrough_rules() -> Result<(), Box<dyn Error>> {
    let css = "@media print{p{color:red}} @font-face{font-family:x} @media print{p{color:blue} a{color:red}}";
    assert_eq!(
        consolidate(css, OrderingMode::Legacy)?,
        "@media print{p{color:blue}a{color:red}}@font-face{font-family:x}"
    );
    Ok(())
}

#[test]
fn full_ordering_merges_across_lines() -> Result<(), Box<dyn Error>> {
    let css = "p {\n  color: red;\n  margin: 0;\n}\np { color: blue }\n";
    assert_eq!(
        consolidate(css, OrderingMode::Full)?,
        "p{color:blue;margin:0}"
    );
    Ok(())
}

#[test]
fn unreadable_rule_stops_the_merge() {
    let slots = parse_rule_slots("p{color:red} ]]{color:blue}");
    assert!(slots.contains(&None));
    assert!(matches!(
        merge_rules(slots, OrderingMode::Legacy),
        Err(UnsupportedRule { index: 1 })
    ));
}

#[test]
fn important_is_honoured_in_any_spelling() -> Result<(), Box<dyn Error>> {
    for css in ["p{color:red ! important;color:blue}", "p{color:red !IMPORTANT} p{color:blue}"] {
        assert_eq!(consolidate(css, OrderingMode::Legacy)?, "p{color:red!important}");
    }
    Ok(())
}

#[test]
fn nested_at_rules_ride_along_with_their_media_block() -> Result<(), Box<dyn Error>> {
    let css = "@media screen{@supports (display:grid){.x{color:red}}} @media screen{.y{color:blue}}";
    assert_eq!(
        consolidate(css, OrderingMode::Legacy)?,
        "@media screen{@supports (display:grid){.x{color:red}}.y{color:blue}}"
    );
    Ok(())
}
