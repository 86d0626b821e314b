//! Common error infrastructure for sheet-core.
//!
//! Domain-specific errors live next to the code that raises them
//! ([`crate::stats::ResolveError`], [`crate::engine::EditError`], ...). This
//! module holds the shared severity classification and the construction-time
//! [`ModelError`] raised while authoring modifiers.
//!
//! Runtime inconsistencies in a character's selections are *not* errors: the
//! progression rules report them as [`crate::progression::Violation`]s.

/// Severity level of an error, used for categorization and handling strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller can retry with different input.
    Recoverable,

    /// Invalid input or content; reject without retrying.
    ///
    /// Examples: modifier with an unknown target, edit on level 1 slots.
    Validation,

    /// Unexpected inconsistency that points at a bug.
    Internal,

    /// The engine cannot produce a result for this character.
    ///
    /// Examples: resolver reached an unknown catalog id, arithmetic overflow.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all sheet-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on how the caller should react, not on impact
pub trait SheetError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Construction-time errors for modifiers and conditions.
///
/// These indicate a content-authoring bug. Catalog loaders reject the entry
/// instead of letting a modifier silently evaluate to nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown stat target '{0}'")]
    UnknownTarget(String),

    #[error("unknown trait '{0}'")]
    UnknownTrait(String),

    #[error("{kind} condition is missing required field '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("invalid {kind} condition: {reason}")]
    InvalidCondition {
        kind: &'static str,
        reason: String,
    },

    #[error("modifier on '{target}' cannot derive from {source_stat}: it is not resolved earlier")]
    CyclicDerivation {
        target: String,
        source_stat: &'static str,
    },
}

impl SheetError for ModelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTarget(_) => "MODEL_UNKNOWN_TARGET",
            Self::UnknownTrait(_) => "MODEL_UNKNOWN_TRAIT",
            Self::MissingField { .. } => "MODEL_MISSING_FIELD",
            Self::InvalidCondition { .. } => "MODEL_INVALID_CONDITION",
            Self::CyclicDerivation { .. } => "MODEL_CYCLIC_DERIVATION",
        }
    }
}
