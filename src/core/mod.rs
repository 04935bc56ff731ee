//! Core catalogue engine.
//!
//! ## Module Structure
//!
//! - `data`: catalogue model and report locations
//! - `parsers`: TS reader with line spans
//! - `writer`: canonical TS serialization
//! - `plural`: locale plural rules
//! - `translator`: runtime lookup with source fallback
//! - `file_scanner`: discovery of `.ts` files
//! - `context`: configuration plus parsed catalogues for a run

pub mod context;
pub mod data;
pub mod file_scanner;
pub mod parsers;
pub mod plural;
pub mod translator;
pub mod writer;

pub use context::{CheckContext, LoadedCatalog};
pub use data::*;
pub use plural::PluralRule;
pub use translator::Translator;
