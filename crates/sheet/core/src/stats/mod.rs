//! Derived statistics.
//!
//! ```text
//! [ catalog + raw selections ]
//!      ↓ active_modifiers (source tiers: class → … → additional)
//! [ sourced modifiers ]
//!      ↓ evaluate (AND over conditions, against one snapshot)
//! [ applicable modifiers ]
//!      ↓ resolve (traits → proficiency → dependent stats)
//! [ DerivedStats ]
//! ```
//!
//! Every step is a pure function of the character record, the catalog and
//! the rules configuration.

mod derived;
mod evaluate;
mod resolve;
mod source;

pub use derived::{DerivedStats, StatBounds};
pub use evaluate::{CharacterSnapshot, all_hold, evaluate};
pub use resolve::{ResolveError, active_modifiers, resolve};
pub use source::{SourceTier, SourcedModifier};
