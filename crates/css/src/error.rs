use css_cascade::UnsupportedRule;
use css_syntax::ParseFailure;
use thiserror::Error;

/// Failure of a single filtering, minification or consolidation call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CssError {
    #[error(transparent)]
    Parse(#[from] ParseFailure),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedRule),
}
