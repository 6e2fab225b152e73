//! Run a selector list over every element of a document.

use cssparser::{Parser, ParserInput};
use html::Document;
use selectors::NthIndexCache;
use selectors::matching::{
    IgnoreNthChildForInvalidation, MatchingContext, MatchingMode, NeedsSelectorFlags, QuirksMode,
    matches_selector,
};
use selectors::parser::{ParseRelative, SelectorList};

use super::{ElementWrapper, SelectorImpl, SelectorParser};
use crate::error::SelectorSyntaxError;

/// Parse `selector_text` and report whether any element of `document`
/// matches one of its members.
///
/// # Errors
/// Returns [`SelectorSyntaxError`] when the text is not a selector list this
/// parser accepts, which includes any leftover pseudo-class or pseudo-element.
pub fn document_matches(document: &Document, selector_text: &str) -> Result<bool, SelectorSyntaxError> {
    let mut input = ParserInput::new(selector_text);
    let mut parser = Parser::new(&mut input);
    let selector_list =
        SelectorList::<SelectorImpl>::parse(&SelectorParser, &mut parser, ParseRelative::No)
            .map_err(|err| SelectorSyntaxError {
                selector: selector_text.to_owned(),
                reason: format!("{:?}", err.kind),
            })?;

    let mut nth_index_cache = NthIndexCache::default();
    let mut context = MatchingContext::new(
        MatchingMode::Normal,
        None,
        &mut nth_index_cache,
        QuirksMode::NoQuirks,
        NeedsSelectorFlags::No,
        IgnoreNthChildForInvalidation::No,
    );

    Ok(document
        .elements()
        .filter_map(|id| ElementWrapper::new(document, id))
        .any(|element| {
            selector_list
                .0
                .iter()
                .any(|selector| matches_selector(selector, 0, None, &element, &mut context))
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div class="container"><p id="intro" lang="en-US">one</p><p>two</p></div>
        <ul><li>a</li><li class="Last">b</li></ul>
        <a href="/x">link</a>
    "#;

    fn matches(selector: &str) -> Result<bool, SelectorSyntaxError> {
        document_matches(&Document::parse(PAGE), selector)
    }

    #[test]
    fn simple_and_compound_selectors() -> Result<(), SelectorSyntaxError> {
        assert!(matches(".container")?);
        assert!(matches("div.container > p#intro")?);
        assert!(matches("DIV P")?);
        assert!(!matches(".missing")?);
        assert!(!matches("ul > p")?);
        Ok(())
    }

    #[test]
    fn attribute_and_structural_selectors() -> Result<(), SelectorSyntaxError> {
        assert!(matches("[lang|=en]")?);
        assert!(matches(r#"a[href^="/"]"#)?);
        assert!(matches("li:nth-child(2)")?);
        assert!(matches("p + p")?);
        assert!(!matches("li:nth-child(3)")?);
        assert!(matches(":not(.container)")?);
        Ok(())
    }

    #[test]
    fn state_pseudo_classes_are_syntax_errors() {
        assert!(matches("a:hover").is_err());
        assert!(matches("p::before").is_err());
        assert!(matches("div >").is_err());
    }
}
