//! Placeholder consistency rule.
//!
//! `QString::arg` substitutes `%1`..`%99` (and the localized `%L1` forms)
//! by number, so every marker in the source must appear in the translation
//! and no new ones may be introduced. `%n` is handled by numerus selection
//! and is not compared here.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use crate::{
    core::{CheckContext, TranslationValue, context::MessageRef},
    issues::PlaceholderMismatchIssue,
};

static ARG_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%L?([1-9][0-9]?)").expect("Placeholder regex should compile"));

/// Numbers of the `%N` markers in a text.
pub fn placeholders(text: &str) -> BTreeSet<u32> {
    ARG_MARKER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

pub fn check_placeholder_issues(ctx: &CheckContext) -> Vec<PlaceholderMismatchIssue> {
    check_placeholders(ctx.messages())
}

pub fn check_placeholders<'a>(
    messages: impl IntoIterator<Item = MessageRef<'a>>,
) -> Vec<PlaceholderMismatchIssue> {
    let mut issues = Vec::new();

    for m in messages {
        if !m.message.is_finished() {
            continue;
        }
        let expected = placeholders(&m.message.source);

        let forms: Vec<(Option<usize>, &str)> = match &m.message.translation.value {
            TranslationValue::Single(text) => vec![(None, text.as_str())],
            TranslationValue::Numerus(forms) => forms
                .iter()
                .enumerate()
                .map(|(i, f)| (Some(i), f.as_str()))
                .collect(),
        };

        for (form, text) in forms {
            // Empty text is reported by the empty-translation rule.
            if text.is_empty() {
                continue;
            }
            let found = placeholders(text);
            if found == expected {
                continue;
            }
            issues.push(PlaceholderMismatchIssue {
                context: m.report_context(),
                missing: expected.difference(&found).map(marker).collect(),
                extra: found.difference(&expected).map(marker).collect(),
                form,
            });
        }
    }

    issues
}

fn marker(n: &u32) -> String {
    format!("%{}", n)
}
