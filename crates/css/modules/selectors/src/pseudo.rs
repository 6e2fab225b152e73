//! Pseudo-class and pseudo-element tokens the document query cannot evaluate.
//!
//! Interaction states (`:hover`), pseudo-elements (`::before`) and a few
//! structural forms are cut out of a selector before it is matched, so
//! `a:hover` is considered used whenever some `a` exists. Order matters:
//! longer tokens precede their prefixes (`:focus-within` before `:focus`).

/// Removed first, in this order.
pub static PSEUDO_TOKENS: &[&str] = &[
    "::visited", "::valid", "::target", "::spelling-error", "::selection", "::scope", "::root",
    "::right", "::required", "::read-write", "::read-only", "::placeholder-shown",
    "::placeholder", "::out-of-range", "::optional", "::only-of-type", "::only-child",
    "::marker", "::link", "::left", "::last-of-type", "::last-child", "::invalid",
    "::indeterminate", "::in-range", "::hover", "::grammar-error", "::fullscreen", "::focus",
    "::first-of-type", "::first-line", "::first-letter", "::first-child", "::first",
    "::enabled", "::empty", "::disabled", "::default", "::cue", "::checked", "::before",
    "::backdrop", "::any", "::after", "::active", "::-webkit-slider-thumb",
    "::-webkit-slider-runnable-track", "::-webkit-progress-value", "::-webkit-progress-bar",
    "::-ms-value", "::-ms-track", "::-ms-tooltip", "::-ms-ticks-before", "::-ms-ticks-after",
    "::-ms-thumb", "::-ms-reveal", "::-ms-fill-upper", "::-ms-fill-lower", "::-ms-fill",
    "::-ms-expand", "::-ms-clear", "::-ms-check", "::-ms-browse", "::-moz-range-track",
    "::-moz-range-thumb", "::-moz-range-progress", "::-moz-progress-bar", ":visited", ":valid",
    ":target", ":scope", ":root", ":right", ":required", ":read-write", ":read-only",
    ":placeholder-shown", ":placeholder", ":out-of-range", ":optional", ":only-of-type",
    ":only-child", ":link", ":left", ":last-of-type", ":last-child", ":invalid",
    ":indeterminate", ":in-range", ":hover", ":fullscreen", ":focus-within", ":focus-visible",
    ":focus", ":first-of-type", ":first-line", ":first-letter", ":first-child", ":first",
    ":enabled", ":empty", ":disabled", ":defined", ":default", ":checked", ":blank", ":before",
    ":any-link", ":any", ":after", ":active", ":-ms-input-placeholder",
];

/// Empty functional forms, removed after [`PSEUDO_TOKENS`]. Stripping the
/// argument of e.g. `:not(:hover)` leaves `:not()`, which no matcher accepts.
pub static EMPTY_FUNCTIONAL_TOKENS: &[&str] = &[
    ":where()", ":nth-col()", ":nth-last-col()", ":dir()", ":lang()", ":nth-of-type()",
    ":nth-last-of-type()", ":nth-last-child()", ":nth-child()", ":not()", "::where()",
    "::nth-col()", ":nth-last-col()", "::dir()", "::lang()", "::nth-of-type()",
    "::nth-last-of-type()", "::nth-last-child()", "::nth-child()", "::not()",
];

/// Remove every catalogued token from `selector` by literal substring
/// replacement.
///
/// Selectors that are empty, start with `:` or contain no `:` are returned
/// unchanged.
pub fn strip_pseudo_tokens(selector: &str) -> String {
    if selector.is_empty() || selector.starts_with(':') || !selector.contains(':') {
        return selector.to_owned();
    }
    let mut stripped = selector.to_owned();
    for token in PSEUDO_TOKENS.iter().chain(EMPTY_FUNCTIONAL_TOKENS) {
        if stripped.contains(token) {
            stripped = stripped.replace(token, "");
        }
    }
    stripped
}
