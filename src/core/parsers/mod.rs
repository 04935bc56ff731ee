//! Catalogue file parsers.
//!
//! - `ts`: Qt Linguist TS XML reader

pub mod ts;
