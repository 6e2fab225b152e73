#![cfg(test)]

use core::error::Error;

use css_syntax::{
    NestedRule, SerializeOptions, TopLevelRule, parse_stylesheet, parse_with_repair, repair_stylesheet,
    serialize,
};

#[test]
fn recognises_every_rule_kind() -> Result<(), Box<dyn Error>> {
    let css = r#"
        @import url("base.css") screen;
        @charset "utf-8";
        .a, .b { color: red; margin: 0 !important }
        @media (max-width: 600px) { .c { display: none } }
        @supports (display: grid) { .d { display: grid } }
        @font-face { font-family: "X"; src: url(x.woff) }
    "#;
    let sheet = parse_stylesheet(css)?;
    let kinds: Vec<&str> = sheet
        .rules
        .iter()
        .map(|rule| match rule {
            TopLevelRule::Style(_) => "style",
            TopLevelRule::Media(_) => "media",
            TopLevelRule::Supports(_) => "supports",
            TopLevelRule::Import(_) => "import",
            TopLevelRule::Opaque(_) => "opaque",
        })
        .collect();
    assert_eq!(kinds, ["import", "opaque", "style", "media", "supports", "opaque"]);

    let TopLevelRule::Import(import) = &sheet.rules[0] else {
        return Err("expected import".into());
    };
    assert_eq!(import.target, "base.css");
    assert_eq!(import.insertion_index, 0);

    let TopLevelRule::Style(style) = &sheet.rules[2] else {
        return Err("expected style rule".into());
    };
    assert_eq!(style.selectors, [".a", ".b"]);
    assert!(!style.declarations[0].important);
    assert!(style.declarations[1].important);
    assert_eq!(style.declarations[1].value, "0!important");

    let TopLevelRule::Media(media) = &sheet.rules[3] else {
        return Err("expected media rule".into());
    };
    assert_eq!(media.query, "(max-width: 600px)");
    assert_eq!(media.rules.len(), 1);
    Ok(())
}

#[test]
fn minified_round_trip_is_stable() -> Result<(), Box<dyn Error>> {
    let css = "@media screen{.a{color:red}}.b,.c{margin:0;padding:1px}";
    let sheet = parse_stylesheet(css)?;
    let once = serialize(&sheet, SerializeOptions::MINIFIED);
    assert_eq!(once, css);
    let twice = serialize(&parse_stylesheet(&once)?, SerializeOptions::MINIFIED);
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn strict_parse_rejects_what_repair_skips() -> Result<(), Box<dyn Error>> {
    let css = ".a{color:red} .b{*zoom:1;color:blue}";
    assert!(parse_stylesheet(css).is_err());
    let repaired = repair_stylesheet(css)?;
    let serialized = serialize(&repaired, SerializeOptions::MINIFIED);
    assert_eq!(serialized, ".a{color:red}.b{color:blue}");
    Ok(())
}

#[test]
fn garbage_fails_both_parses() {
    let failure = parse_with_repair("}}} {").err();
    assert!(failure.is_some(), "expected a parse failure");
}

#[test]
fn blank_input_is_an_empty_stylesheet() -> Result<(), Box<dyn Error>> {
    assert!(parse_with_repair("  /* nothing */ \n")?.is_empty());
    Ok(())
}

#[test]
fn nested_at_rules_survive_inside_conditional_blocks() -> Result<(), Box<dyn Error>> {
    for css in [
        "@media screen{@supports (display:grid){.x{color:red}}}",
        "@supports (display:grid){@media screen{.x{color:red}}}",
        "@media print{@page{margin:0}.y{color:blue}}",
        "@media print{@import url(x.css);.y{color:blue}}",
    ] {
        let sheet = parse_stylesheet(css)?;
        assert_eq!(serialize(&sheet, SerializeOptions::MINIFIED), css);
    }

    let sheet = parse_stylesheet("@media print{@page{margin:0}.a{color:red}}")?;
    let TopLevelRule::Media(media) = &sheet.rules[0] else {
        return Err("expected media rule".into());
    };
    assert!(matches!(&media.rules[0], NestedRule::Opaque(page) if page.name == "page"));
    let style = media.rules[1].as_style().ok_or("expected style rule")?;
    assert_eq!(style.selectors, [".a"]);
    Ok(())
}

#[test]
fn important_spellings_are_normalized() -> Result<(), Box<dyn Error>> {
    let sheet = parse_stylesheet("p{color:red ! important;margin:0 !IMPORTANT}")?;
    assert_eq!(
        serialize(&sheet, SerializeOptions::MINIFIED),
        "p{color:red!important;margin:0!important}"
    );
    Ok(())
}
