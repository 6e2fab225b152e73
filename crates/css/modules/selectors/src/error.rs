use thiserror::Error;

/// The document query could not parse a selector.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot match selector `{selector}`: {reason}")]
pub struct SelectorSyntaxError {
    pub selector: String,
    pub reason: String,
}
