use thiserror::Error;

use crate::model::SourcePosition;

/// A rule or declaration the parser had to reject.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} at {position}: `{snippet}`")]
pub struct SyntaxError {
    pub position: SourcePosition,
    pub message: String,
    /// Source text of the rejected construct, shortened for logs.
    pub snippet: String,
}

/// The stylesheet could not be parsed, neither strictly nor with recovery.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("stylesheet is unparseable even after repair: {repair}")]
pub struct ParseFailure {
    /// First error of the strict parse.
    pub strict: SyntaxError,
    /// Why the recovering parse gave up.
    pub repair: SyntaxError,
}
