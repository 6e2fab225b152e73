//! `cssparser`-driven construction of the [`Stylesheet`] tree.
//!
//! There are two entry points with the same walk underneath: a strict parse
//! that refuses any rejected rule or declaration, and a recovering parse that
//! drops what it cannot read the way a browser would.

use cssparser::{
    AtRuleParser, BasicParseError, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseError,
    ParseErrorKind, Parser, ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser,
    RuleBodyParser, StyleSheetParser, Token,
};
use log::{debug, warn};

use crate::error::{ParseFailure, SyntaxError};
use crate::model::{
    Declaration, ImportRule, MediaRule, NestedRule, OpaqueRule, SourcePosition, StyleRule,
    Stylesheet, SupportsRule, TopLevelRule, collapse_whitespace, with_important,
};

const SNIPPET_CHARS: usize = 80;

fn shorten(source: &str) -> String {
    let collapsed = collapse_whitespace(source);
    if collapsed.chars().count() <= SNIPPET_CHARS {
        return collapsed;
    }
    let mut short: String = collapsed.chars().take(SNIPPET_CHARS).collect();
    short.push_str("...");
    short
}

fn syntax_error(error: &ParseError<'_, ()>, source: &str) -> SyntaxError {
    let message = match &error.kind {
        ParseErrorKind::Basic(kind) => format!("{kind:?}"),
        ParseErrorKind::Custom(()) => "invalid declaration".to_owned(),
    };
    SyntaxError {
        position: SourcePosition::new(error.location.line, error.location.column),
        message,
        snippet: shorten(source),
    }
}

fn location(input: &Parser<'_, '_>) -> SourcePosition {
    let current = input.current_source_location();
    SourcePosition::new(current.line, current.column)
}

fn consume_rest(input: &mut Parser<'_, '_>) {
    while input.next_including_whitespace_and_comments().is_ok() {}
}

fn push_selector(selectors: &mut Vec<String>, raw: &str) {
    let selector = collapse_whitespace(raw);
    if selector.is_empty() {
        debug!("Skipping empty selector in prelude");
    } else {
        selectors.push(selector);
    }
}

/// Split a qualified-rule prelude on top-level commas.
fn parse_selector_list<'input>(
    input: &mut Parser<'input, '_>,
) -> Result<Vec<String>, ParseError<'input, ()>> {
    let mut selectors = Vec::new();
    let mut start = input.position();
    loop {
        let before = input.position();
        match input.next_including_whitespace_and_comments().cloned() {
            Ok(Token::Comma) => {
                push_selector(&mut selectors, input.slice(start..before));
                start = input.position();
            }
            Ok(
                bad @ (Token::CloseCurlyBracket
                | Token::CloseParenthesis
                | Token::CloseSquareBracket
                | Token::Semicolon
                | Token::BadString(_)
                | Token::BadUrl(_)),
            ) => return Err(input.new_unexpected_token_error(bad)),
            Ok(_) => {}
            Err(_) => break,
        }
    }
    push_selector(&mut selectors, input.slice_from(start));
    if selectors.is_empty() {
        return Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid));
    }
    Ok(selectors)
}

fn important_tail<'input>(input: &mut Parser<'input, '_>) -> Result<(), BasicParseError<'input>> {
    input.expect_ident_matching("important")?;
    input.expect_exhausted()
}

/// Declaration blocks: `property: value` items only.
struct DeclarationBodyParser;

impl<'input> DeclarationParser<'input> for DeclarationBodyParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let start = input.position();
        let mut value_end = None;
        let mut malformed = false;
        loop {
            let before = input.position();
            match input.next_including_whitespace_and_comments().cloned() {
                Ok(Token::BadString(_) | Token::BadUrl(_)) => malformed = true,
                Ok(Token::Delim('!')) if input.try_parse(important_tail).is_ok() => {
                    value_end = Some(before);
                    break;
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
        let end = location(input);
        let important = value_end.is_some();
        let value = match value_end {
            Some(value_end) => input.slice(start..value_end),
            None => input.slice_from(start),
        }
        .trim();
        if malformed || value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(Declaration {
            property: name.as_ref().to_owned(),
            value: with_important(value, important),
            important,
            end,
        })
    }
}

impl AtRuleParser<'_> for DeclarationBodyParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl QualifiedRuleParser<'_> for DeclarationBodyParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl RuleBodyItemParser<'_, Declaration, ()> for DeclarationBodyParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Read a declaration block, recording every declaration that had to be skipped.
fn parse_declarations(input: &mut Parser<'_, '_>, rejected: &mut Vec<SyntaxError>) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    for item in RuleBodyParser::new(input, &mut DeclarationBodyParser) {
        match item {
            Ok(declaration) => declarations.push(declaration),
            Err((error, source)) => rejected.push(syntax_error(&error, source)),
        }
    }
    declarations
}

/// Rules inside `@media` / `@supports`: style rules are parsed, nested
/// at-rules are kept as raw text.
struct NestedRuleParser<'diag> {
    rejected: &'diag mut Vec<SyntaxError>,
}

impl<'input> AtRuleParser<'input> for NestedRuleParser<'_> {
    type Prelude = (String, String);
    type AtRule = NestedRule;
    type Error = ();

    fn parse_prelude<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let start = input.position();
        consume_rest(input);
        Ok((name.as_ref().to_owned(), collapse_whitespace(input.slice_from(start))))
    }

    fn rule_without_block(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        debug!("Keeping nested @{name} statement as written");
        Ok(NestedRule::Opaque(OpaqueRule {
            name,
            prelude,
            body: None,
        }))
    }

    fn parse_block<'tokens>(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        let start = input.position();
        consume_rest(input);
        debug!("Keeping nested @{name} block as written");
        Ok(NestedRule::Opaque(OpaqueRule {
            name,
            prelude,
            body: Some(input.slice_from(start).trim().to_owned()),
        }))
    }
}

impl<'input> QualifiedRuleParser<'input> for NestedRuleParser<'_> {
    type Prelude = Vec<String>;
    type QualifiedRule = NestedRule;
    type Error = ();

    fn parse_prelude<'tokens>(
        &mut self,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        parse_selector_list(input)
    }

    fn parse_block<'tokens>(
        &mut self,
        selectors: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        let declarations = parse_declarations(input, self.rejected);
        Ok(NestedRule::Style(StyleRule {
            selectors,
            declarations,
        }))
    }
}

fn parse_nested_rules(input: &mut Parser<'_, '_>, rejected: &mut Vec<SyntaxError>) -> Vec<NestedRule> {
    let mut rules = Vec::new();
    let mut failures = Vec::new();
    {
        let mut nested = NestedRuleParser {
            rejected: &mut *rejected,
        };
        for item in StyleSheetParser::new(input, &mut nested) {
            match item {
                Ok(rule) => rules.push(rule),
                Err((error, source)) => failures.push(syntax_error(&error, source)),
            }
        }
    }
    rejected.extend(failures);
    rules
}

enum AtPrelude {
    Media(String),
    Supports(String),
    Import { target: String, prelude: String },
    Other { name: String, prelude: String },
}

struct TopLevelParser<'diag> {
    rejected: &'diag mut Vec<SyntaxError>,
    imports: usize,
}

impl<'input> AtRuleParser<'input> for TopLevelParser<'_> {
    type Prelude = AtPrelude;
    type AtRule = TopLevelRule;
    type Error = ();

    fn parse_prelude<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let start = input.position();
        if name.eq_ignore_ascii_case("import") {
            let target = input.try_parse(|nested| {
                nested
                    .expect_url_or_string()
                    .map(|target| target.as_ref().to_owned())
            });
            consume_rest(input);
            let prelude = collapse_whitespace(input.slice_from(start));
            return match target {
                Ok(target) => Ok(AtPrelude::Import { target, prelude }),
                Err(_) => Err(input.new_error(BasicParseErrorKind::AtRuleInvalid(name))),
            };
        }
        consume_rest(input);
        let prelude = collapse_whitespace(input.slice_from(start));
        Ok(if name.eq_ignore_ascii_case("media") {
            AtPrelude::Media(prelude)
        } else if name.eq_ignore_ascii_case("supports") {
            AtPrelude::Supports(prelude)
        } else {
            AtPrelude::Other {
                name: name.as_ref().to_owned(),
                prelude,
            }
        })
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        match prelude {
            AtPrelude::Import { target, prelude } => {
                let insertion_index = self.imports;
                self.imports += 1;
                Ok(TopLevelRule::Import(ImportRule {
                    target,
                    prelude,
                    insertion_index,
                }))
            }
            AtPrelude::Other { name, prelude } => Ok(TopLevelRule::Opaque(OpaqueRule {
                name,
                prelude,
                body: None,
            })),
            AtPrelude::Media(_) | AtPrelude::Supports(_) => Err(()),
        }
    }

    fn parse_block<'tokens>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        match prelude {
            AtPrelude::Media(query) => {
                let rules = parse_nested_rules(input, self.rejected);
                Ok(TopLevelRule::Media(MediaRule {
                    query,
                    rules,
                    end: location(input),
                }))
            }
            AtPrelude::Supports(condition) => {
                let rules = parse_nested_rules(input, self.rejected);
                Ok(TopLevelRule::Supports(SupportsRule {
                    condition,
                    rules,
                    end: location(input),
                }))
            }
            AtPrelude::Import { .. } => {
                consume_rest(input);
                Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid))
            }
            AtPrelude::Other { name, prelude } => {
                let start = input.position();
                consume_rest(input);
                Ok(TopLevelRule::Opaque(OpaqueRule {
                    name,
                    prelude,
                    body: Some(input.slice_from(start).trim().to_owned()),
                }))
            }
        }
    }
}

impl<'input> QualifiedRuleParser<'input> for TopLevelParser<'_> {
    type Prelude = Vec<String>;
    type QualifiedRule = TopLevelRule;
    type Error = ();

    fn parse_prelude<'tokens>(
        &mut self,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        parse_selector_list(input)
    }

    fn parse_block<'tokens>(
        &mut self,
        selectors: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        let declarations = parse_declarations(input, self.rejected);
        Ok(TopLevelRule::Style(StyleRule {
            selectors,
            declarations,
        }))
    }
}

/// Walk the whole stylesheet once. Top-level rules that could not be read
/// leave a `None` slot; every rejection, nested ones included, is returned
/// sorted by position.
fn walk(css: &str) -> (Vec<Option<TopLevelRule>>, Vec<SyntaxError>) {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rejected = Vec::new();
    let mut failures = Vec::new();
    let mut slots = Vec::new();
    {
        let mut top = TopLevelParser {
            rejected: &mut rejected,
            imports: 0,
        };
        for item in StyleSheetParser::new(&mut parser, &mut top) {
            match item {
                Ok(rule) => slots.push(Some(rule)),
                Err((error, source)) => {
                    failures.push(syntax_error(&error, source));
                    slots.push(None);
                }
            }
        }
    }
    rejected.extend(failures);
    rejected.sort_by_key(|error| error.position);
    (slots, rejected)
}

/// Parse a stylesheet, refusing any rule or declaration the tokenizer-level
/// grammar rejects.
///
/// # Errors
/// Returns the first rejected construct in source order.
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, SyntaxError> {
    let (slots, rejected) = walk(css);
    if let Some(first) = rejected.into_iter().next() {
        return Err(first);
    }
    Ok(Stylesheet::new(slots.into_iter().flatten().collect()))
}

/// Parse a stylesheet, skipping rejected rules and declarations.
///
/// # Errors
/// Fails only when the input had content and not a single rule survived.
pub fn repair_stylesheet(css: &str) -> Result<Stylesheet, SyntaxError> {
    let (slots, rejected) = walk(css);
    for error in &rejected {
        warn!("Skipping unreadable CSS: {error}");
    }
    let rules: Vec<TopLevelRule> = slots.into_iter().flatten().collect();
    if rules.is_empty()
        && let Some(first) = rejected.into_iter().next()
    {
        return Err(SyntaxError {
            message: format!("no rule could be recovered ({})", first.message),
            ..first
        });
    }
    Ok(Stylesheet::new(rules))
}

/// Strict parse, falling back to the recovering parse.
///
/// # Errors
/// Returns [`ParseFailure`] when both parses fail.
pub fn parse_with_repair(css: &str) -> Result<Stylesheet, ParseFailure> {
    match parse_stylesheet(css) {
        Ok(sheet) => Ok(sheet),
        Err(strict) => {
            debug!("Strict CSS parse failed ({strict}), retrying with recovery");
            repair_stylesheet(css).map_err(|repair| ParseFailure { strict, repair })
        }
    }
}

/// Top-level rules with a `None` entry wherever a rule could not be classified.
pub fn parse_rule_slots(css: &str) -> Vec<Option<TopLevelRule>> {
    walk(css).0
}
