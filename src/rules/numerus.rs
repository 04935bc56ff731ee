//! Numerus form count rule.
//!
//! Every numerus translation must provide exactly as many forms as its
//! language's plural rule selects from. Catalogues whose language is unknown
//! are skipped here and reported by the `language` rule.

use crate::{
    core::{CheckContext, TranslationValue, context::MessageRef},
    issues::NumerusMismatchIssue,
};

pub fn check_numerus_issues(ctx: &CheckContext) -> Vec<NumerusMismatchIssue> {
    check_numerus(ctx.messages())
}

pub fn check_numerus<'a>(
    messages: impl IntoIterator<Item = MessageRef<'a>>,
) -> Vec<NumerusMismatchIssue> {
    let mut issues = Vec::new();

    for m in messages {
        let TranslationValue::Numerus(forms) = &m.message.translation.value else {
            continue;
        };
        // `<translation type="unfinished"/>` as written by lupdate for new strings
        if forms.is_empty() {
            continue;
        }
        let Some(rule) = m.catalog.plural_rule() else {
            continue;
        };

        let expected = rule.form_count();
        if forms.len() != expected {
            let language = m
                .catalog
                .catalog()
                .language
                .clone()
                .or_else(|| m.catalog.file_locale.clone())
                .unwrap_or_default();
            issues.push(NumerusMismatchIssue {
                context: m.report_context(),
                language,
                expected,
                found: forms.len(),
            });
        }
    }

    issues
}
