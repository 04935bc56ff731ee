//! Runtime lookup table over a loaded catalogue.
//!
//! A `Translator` is built once and then queried synchronously. Only
//! translations a user should see are kept: finished, active and non-empty.
//! Everything else falls back to the source text.

use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    path::Path,
};

use anyhow::Result;

use crate::core::{
    context::LoadedCatalog,
    data::{Catalog, TranslationValue},
    parsers::ts::parse_ts_file,
    plural::PluralRule,
};

/// Served forms keyed by source, then disambiguation.
type SourceTable = HashMap<String, HashMap<String, Vec<String>>>;

#[derive(Debug, Clone)]
pub struct Translator {
    language: Option<String>,
    rule: PluralRule,
    contexts: HashMap<String, SourceTable>,
    len: usize,
}

impl Translator {
    /// Build the lookup table from the catalogue's `language` attribute.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::with_rule(catalog, catalog.plural_rule())
    }

    /// Parse a TS file and build its lookup table.
    ///
    /// Without a `language` attribute the plural rule comes from the file
    /// name (`drawpile_pl.ts`), as it does for `check`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loaded = LoadedCatalog::new(path.to_string_lossy(), parse_ts_file(path)?);
        let translator = Self::with_rule(loaded.catalog(), loaded.plural_rule());
        tracing::debug!(
            "Loaded {} translation(s) from {}",
            translator.len,
            path.display()
        );
        Ok(translator)
    }

    /// When a key appears twice among active messages the first one decides,
    /// even if it is not servable.
    fn with_rule(catalog: &Catalog, rule: Option<PluralRule>) -> Self {
        let rule = rule.unwrap_or_else(|| {
            tracing::debug!(
                language = ?catalog.language,
                "Unknown catalogue language, using English plural rules"
            );
            PluralRule::EnglishStyle
        });

        let mut contexts: HashMap<String, SourceTable> = HashMap::new();
        let mut seen = HashSet::new();
        let mut len = 0;

        for (context, message) in catalog.messages() {
            if !message.is_active() {
                continue;
            }
            let key = (
                context.name.as_str(),
                message.source.as_str(),
                message.disambiguation(),
            );
            if !seen.insert(key) {
                continue;
            }
            if !message.is_finished() || message.translation.has_empty_form() {
                continue;
            }
            let forms = match &message.translation.value {
                TranslationValue::Single(text) => vec![text.clone()],
                TranslationValue::Numerus(forms) => forms.clone(),
            };

            contexts
                .entry(context.name.clone())
                .or_default()
                .entry(message.source.clone())
                .or_default()
                .insert(message.disambiguation().to_string(), forms);
            len += 1;
        }

        Self {
            language: catalog.language.clone(),
            rule,
            contexts,
            len,
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    /// Number of served translations.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn forms(&self, context: &str, source: &str, disambiguation: &str) -> Option<&[String]> {
        let by_comment = self.contexts.get(context)?.get(source)?;
        by_comment
            .get(disambiguation)
            .or_else(|| {
                if disambiguation.is_empty() {
                    None
                } else {
                    by_comment.get("")
                }
            })
            .map(Vec::as_slice)
    }

    /// The served translation, if any. Numerus messages yield their first form.
    pub fn lookup(&self, context: &str, source: &str, disambiguation: &str) -> Option<&str> {
        self.forms(context, source, disambiguation)
            .and_then(|forms| forms.first())
            .map(String::as_str)
    }

    /// Translate `source`, falling back to it when nothing is served.
    pub fn translate<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        disambiguation: &str,
    ) -> Cow<'a, str> {
        match self.lookup(context, source, disambiguation) {
            Some(text) => Cow::Borrowed(text),
            None => {
                tracing::trace!(context, source, "No translation, using source text");
                Cow::Borrowed(source)
            }
        }
    }

    /// Translate a quantity-dependent message and substitute `%n` with `n`.
    ///
    /// The form is chosen by the catalogue's plural rule and clamped to the
    /// forms actually present.
    pub fn translate_n(&self, context: &str, source: &str, disambiguation: &str, n: i64) -> String {
        let text = match self.forms(context, source, disambiguation) {
            Some(forms) if !forms.is_empty() => {
                let index = self.rule.form_index(n).min(forms.len() - 1);
                forms[index].as_str()
            }
            _ => {
                tracing::trace!(context, source, n, "No translation, using source text");
                source
            }
        };
        text.replace("%n", &n.to_string())
    }
}
