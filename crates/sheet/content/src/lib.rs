//! Data-driven content and character records.
//!
//! This crate provides loaders for the files the engine consumes:
//! - Catalog tables (classes, subclasses, domain cards, gear, loot and
//!   level-up options) in RON
//! - Rules configuration in TOML
//! - Character records in JSON
//!
//! Catalog data is read-only once loaded; records are always fed through
//! [`sheet_core::SheetEngine`] before their derived stats are trusted.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ContentFactory, LoadResult, RecordLoader, RulesLoader, TableFile,
};
