//! Catalogue integrity rules.
//!
//! Each rule is a pure function over parsed catalogues returning its own
//! issue type. The `check_*_issues` wrappers pull their inputs from a
//! `CheckContext`.
//!
//! ## Module Structure
//!
//! - `empty_translation`: finished messages with empty text
//! - `unfinished`: messages still marked unfinished
//! - `numerus`: numerus form counts against the locale plural rule
//! - `duplicate`: duplicate contexts and messages
//! - `identical`: translations identical to their source
//! - `placeholder`: `%1`..`%99` markers that differ
//! - `language`: missing or unsupported `language` attribute

pub mod duplicate;
pub mod empty_translation;
pub mod identical;
pub mod language;
pub mod numerus;
pub mod placeholder;
pub mod unfinished;
