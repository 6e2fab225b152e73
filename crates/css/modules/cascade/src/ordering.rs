//! Which of two rules comes later in the consolidated source.

use css_syntax::SourcePosition;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingMode {
    /// Compare columns only.
    ///
    /// Consolidation flattens every source onto a single line before parsing,
    /// so the column alone orders rules there. Multi-line input may misorder.
    #[default]
    Legacy,
    /// Compare line first, then column.
    Full,
}

impl OrderingMode {
    /// True when `candidate` ends strictly after `reference`.
    #[inline]
    #[must_use]
    pub fn is_later(self, candidate: SourcePosition, reference: SourcePosition) -> bool {
        match self {
            Self::Legacy => candidate.column > reference.column,
            Self::Full => candidate > reference,
        }
    }
}
