//! Level-progression consistency.
//!
//! A character's selections can become illegal when the level drops, a class
//! is removed or an earlier choice is replaced. These are routine, not
//! errors: the [`Validator`] either repairs them (live editing) or reports
//! them as [`ValidationError`]s (import and audit).
mod fix;
mod rules;
mod tier;
mod usage;
mod validator;
mod violation;

pub use fix::{ClassField, Fix, PayloadField};
pub use rules::{ProgressionRule, RuleContext, default_rules};
pub use tier::Tier;
pub use usage::{Occurrence, Span, UsageCounts, occurrences, option_usage};
pub use validator::{ValidationMode, Validator};
pub use violation::{RuleKind, ValidationError, Violation};
