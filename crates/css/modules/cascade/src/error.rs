use thiserror::Error;

/// A slot of the merge input held a rule the parser could not classify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("unsupported rule at position {index} of the stylesheet")]
pub struct UnsupportedRule {
    pub index: usize,
}
