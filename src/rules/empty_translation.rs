//! Empty translation detection rule.
//!
//! A message marked finished must have text in every form, otherwise the
//! application shows an empty label.

use crate::{
    core::{CheckContext, TranslationValue, context::MessageRef},
    issues::EmptyTranslationIssue,
};

pub fn check_empty_translation_issues(ctx: &CheckContext) -> Vec<EmptyTranslationIssue> {
    check_empty_translations(ctx.messages())
}

pub fn check_empty_translations<'a>(
    messages: impl IntoIterator<Item = MessageRef<'a>>,
) -> Vec<EmptyTranslationIssue> {
    let mut issues = Vec::new();

    for m in messages {
        let translation = &m.message.translation;
        if !m.message.is_finished() || !translation.has_empty_form() {
            continue;
        }
        let empty_forms = match &translation.value {
            TranslationValue::Single(_) => Vec::new(),
            TranslationValue::Numerus(forms) => forms
                .iter()
                .enumerate()
                .filter(|(_, form)| form.is_empty())
                .map(|(i, _)| i)
                .collect(),
        };
        issues.push(EmptyTranslationIssue {
            context: m.report_context(),
            empty_forms,
        });
    }

    issues
}
