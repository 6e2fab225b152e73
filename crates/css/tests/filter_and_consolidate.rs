#![cfg(test)]

use core::error::Error;

use css::{
    ConsolidateOptions, CssError, OrderingMode, UsageOptions, WhitelistRule, filter_used_css,
    merge_and_optimize, minify_css, try_filter_used_css,
};

const CONTAINERS: &str = r#"<div class="container"></div><div class="container red"></div>"#;

#[test]
fn unused_rules_are_removed_and_whitelist_is_honoured() -> Result<(), Box<dyn Error>> {
    let options = UsageOptions {
        whitelist: vec![WhitelistRule::equals(".not-used-wl p")],
        ..UsageOptions::default()
    };
    let css = try_filter_used_css(
        CONTAINERS,
        ".container{color:green} div{color:gold} .not-used{color:black} .not-used-wl p{color:green}",
        &options,
    )?;
    assert_eq!(
        css,
        ".container{color:green}div{color:gold}.not-used-wl p{color:green}"
    );
    assert!(!css.contains(".not-used{"));
    Ok(())
}

#[test]
fn media_blocks_without_used_rules_vanish() -> Result<(), Box<dyn Error>> {
    let css = try_filter_used_css(
        CONTAINERS,
        "@media print{.gone{color:red}} @media screen{.red{color:red} .gone{color:blue}}",
        &UsageOptions::default(),
    )?;
    assert_eq!(css, "@media screen{.red{color:red}}");
    Ok(())
}

#[test]
fn state_pseudo_classes_and_vendor_pseudo_elements() -> Result<(), Box<dyn Error>> {
    let css = ".container:hover{color:red} .gone:hover{color:red} div::-webkit-scrollbar{width:0}";
    let kept = try_filter_used_css(CONTAINERS, css, &UsageOptions::default())?;
    assert_eq!(
        kept,
        ".container:hover{color:red}div::-webkit-scrollbar{width:0}"
    );

    let options = UsageOptions {
        remove_vendor_pseudo_classes: true,
        ..UsageOptions::default()
    };
    let kept = try_filter_used_css(CONTAINERS, css, &options)?;
    assert_eq!(kept, ".container:hover{color:red}");
    Ok(())
}

#[test]
fn unreadable_css_is_reported_not_raised() {
    let outcome = filter_used_css(CONTAINERS, "}}} {", &UsageOptions::default());
    assert!(outcome.parse_error);
    assert!(outcome.css.is_empty());
    assert!(matches!(
        try_filter_used_css(CONTAINERS, "}}} {", &UsageOptions::default()),
        Err(CssError::Parse(_))
    ));
}

#[test]
fn pretty_output_when_minify_is_off() -> Result<(), Box<dyn Error>> {
    let options = UsageOptions {
        minify_output: false,
        ..UsageOptions::default()
    };
    let css = try_filter_used_css(CONTAINERS, "div{color:gold}", &options)?;
    assert_eq!(css, "div {\n  color: gold;\n}\n");
    Ok(())
}

#[test]
fn later_source_wins_after_merge() -> Result<(), Box<dyn Error>> {
    let merged = merge_and_optimize(&["p{color:red}", "p{color:blue}"], &ConsolidateOptions::default())?;
    assert_eq!(merged, "p{color:blue}");
    Ok(())
}

#[test]
fn merge_folds_rules_and_media_across_sources() -> Result<(), Box<dyn Error>> {
    let first = "@import url(base.css);\n.a {\n  color: red;\n}\n@media print {\n  .a { color: black }\n}";
    let second = ".a { font-size: 1px }\n@media print { .a { color: gray } }";
    for ordering in [OrderingMode::Legacy, OrderingMode::Full] {
        let options = ConsolidateOptions {
            ordering,
            ..ConsolidateOptions::default()
        };
        let merged = merge_and_optimize(&[first, second], &options)?;
        assert_eq!(
            merged,
            "@import url(base.css);.a{font-size:1px;color:red}@media print{.a{color:gray}}"
        );
    }
    Ok(())
}

#[test]
fn minify_keeps_every_rule() -> Result<(), Box<dyn Error>> {
    let css = minify_css(".a {\n  color: red;\n}\n\n.b { margin: 0 }\n")?;
    assert_eq!(css, ".a{color:red}.b{margin:0}");
    Ok(())
}

#[test]
fn minify_keeps_at_rules_nested_in_conditional_blocks() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        minify_css("@media screen {\n  @supports (display:grid) { .x{color:red} }\n}")?,
        "@media screen{@supports (display:grid){.x{color:red}}}"
    );
    assert_eq!(
        minify_css("@media print { @page { margin: 0 } .y { color: blue } }")?,
        "@media print{@page{margin: 0}.y{color:blue}}"
    );
    Ok(())
}

#[test]
fn filter_keeps_nested_at_rules_it_cannot_look_into() -> Result<(), Box<dyn Error>> {
    let css = try_filter_used_css(
        CONTAINERS,
        "@supports (display:grid){@media screen{.container{color:red}}.gone{color:blue}}",
        &UsageOptions::default(),
    )?;
    assert_eq!(css, "@supports (display:grid){@media screen{.container{color:red}}}");
    Ok(())
}

#[test]
fn important_wins_the_merge_in_any_spelling() -> Result<(), Box<dyn Error>> {
    for css in ["p{color:red ! important;color:blue}", "p{color:red !IMPORTANT;color:blue}"] {
        let merged = merge_and_optimize(&[css], &ConsolidateOptions::default())?;
        assert_eq!(merged, "p{color:red!important}");
    }
    Ok(())
}

#[test]
fn merge_keeps_string_continuations_intact() -> Result<(), Box<dyn Error>> {
    let merged = merge_and_optimize(&["p::before{content:\"a\\\nb\"}"], &ConsolidateOptions::default())?;
    assert_eq!(merged, "p::before{content:\"ab\"}");
    Ok(())
}
