use css::CssError;
use thiserror::Error;

use crate::cdn::RemoteFailure;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Nothing to process")]
    NothingToProcess,
    #[error("{0:#}")]
    Fetch(anyhow::Error),
    #[error(transparent)]
    Css(#[from] CssError),
    #[error(transparent)]
    Remote(#[from] RemoteFailure),
}
