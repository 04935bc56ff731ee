//! Unfinished translation detection rule.
//!
//! Unfinished messages are never shown to users; the application falls
//! back to the source text for them.

use crate::{
    core::{CheckContext, TranslationState, context::MessageRef},
    issues::UnfinishedIssue,
};

pub fn check_unfinished_issues(ctx: &CheckContext) -> Vec<UnfinishedIssue> {
    check_unfinished(ctx.messages())
}

pub fn check_unfinished<'a>(
    messages: impl IntoIterator<Item = MessageRef<'a>>,
) -> Vec<UnfinishedIssue> {
    messages
        .into_iter()
        .filter(|m| m.message.translation.state == TranslationState::Unfinished)
        .map(|m| UnfinishedIssue {
            context: m.report_context(),
        })
        .collect()
}
