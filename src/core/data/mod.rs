//! Core data types shared by the parser, writer, translator and rules.
//!
//! ## Module Structure
//!
//! - `catalog`: the TS document model (Catalog, Context, Message, Translation)
//! - `message`: report locations inside catalogue files (MessageContext, MessageLocation)

pub mod catalog;
pub mod message;

pub use catalog::{
    Catalog, CatalogStats, Context, LineRef, LocationRef, Message, Translation, TranslationState,
    TranslationValue,
};
pub use message::{MessageContext, MessageLocation};
