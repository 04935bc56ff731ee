//! tsglot - Qt Linguist translation catalogue toolkit
//!
//! tsglot is a CLI tool and library for working with Qt Linguist `.ts`
//! catalogues: it parses and re-serializes them, serves translations with
//! numerus selection and fallback to the source text, and checks catalogues
//! for integrity issues such as unfinished messages, wrong plural form
//! counts and mismatched `%1` placeholders.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Catalogue model, TS reader/writer, plural rules and translator
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Integrity rules run by `tsglot check`
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
