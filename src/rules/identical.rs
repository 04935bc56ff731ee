//! Untranslated-copy detection rule.
//!
//! Flags finished translations that repeat the source verbatim. Sources
//! without words (e.g. "100%", "<b>%1</b>") and texts listed in
//! `ignoreTexts` are skipped since they legitimately stay the same.

use std::collections::HashSet;

use crate::{
    core::{CheckContext, context::MessageRef},
    issues::IdenticalIssue,
    utils::has_translatable_text,
};

pub fn check_identical_issues(ctx: &CheckContext) -> Vec<IdenticalIssue> {
    check_identical(ctx.messages(), &ctx.ignore_texts)
}

pub fn check_identical<'a>(
    messages: impl IntoIterator<Item = MessageRef<'a>>,
    ignore_texts: &HashSet<String>,
) -> Vec<IdenticalIssue> {
    messages
        .into_iter()
        .filter(|m| m.message.is_finished())
        .filter(|m| has_translatable_text(&m.message.source))
        .filter(|m| !ignore_texts.contains(&m.message.source))
        .filter(|m| {
            let forms = m.message.translation.forms();
            let mut non_empty = forms.iter().filter(|f| !f.is_empty()).peekable();
            non_empty.peek().is_some() && non_empty.all(|f| *f == m.message.source)
        })
        .map(|m| IdenticalIssue {
            context: m.report_context(),
        })
        .collect()
}
