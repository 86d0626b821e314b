//! Umbrella error for engine entry points.

use super::edit::EditError;
use crate::error::{ErrorSeverity, SheetError};
use crate::stats::ResolveError;

/// Errors surfaced by [`super::SheetEngine`] and [`super::SheetSession`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("edit rejected: {0}")]
    Edit(#[from] EditError),

    #[error("recompute failed: {0}")]
    Resolve(#[from] ResolveError),
}

impl SheetError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Edit(err) => err.severity(),
            Self::Resolve(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Edit(err) => err.error_code(),
            Self::Resolve(err) => err.error_code(),
        }
    }
}
