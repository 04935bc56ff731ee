//! Language attribute rule.
//!
//! Numerus messages can only be checked and translated correctly when the
//! catalogue's `language` attribute names a language with a known plural
//! rule.

use crate::{
    core::{CheckContext, LoadedCatalog},
    issues::UnknownLanguageIssue,
};

pub fn check_language_issues(ctx: &CheckContext) -> Vec<UnknownLanguageIssue> {
    ctx.catalogs.iter().filter_map(check_language).collect()
}

/// Catalogues without numerus messages do not need a plural rule.
pub fn check_language(catalog: &LoadedCatalog) -> Option<UnknownLanguageIssue> {
    let has_numerus = catalog.catalog().messages().any(|(_, m)| m.is_numerus());
    if !has_numerus || catalog.catalog().plural_rule().is_some() {
        return None;
    }
    Some(UnknownLanguageIssue {
        file_path: catalog.file_path.clone(),
        language: catalog.catalog().language.clone(),
        file_locale: catalog.file_locale.clone(),
    })
}
