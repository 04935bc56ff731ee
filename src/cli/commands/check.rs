use anyhow::Result;
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{
    helper::finish,
    {CommandResult, CommandSummary},
};

use crate::{
    core::CheckContext,
    issues::Issue,
    rules::{
        duplicate::{check_duplicate_context_issues, check_duplicate_message_issues},
        empty_translation::check_empty_translation_issues,
        identical::check_identical_issues,
        language::check_language_issues,
        numerus::check_numerus_issues,
        placeholder::check_placeholder_issues,
        unfinished::check_unfinished_issues,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum CheckRule {
    EmptyTranslation,
    Unfinished,
    Numerus,
    Duplicate,
    Identical,
    Placeholder,
    Language,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::EmptyTranslation,
            CheckRule::Unfinished,
            CheckRule::Numerus,
            CheckRule::Duplicate,
            CheckRule::Identical,
            CheckRule::Placeholder,
            CheckRule::Language,
        ]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;

    let mut rules = if cmd.rules.is_empty() {
        CheckRule::all()
    } else {
        cmd.rules
    };
    rules.sort();
    rules.dedup();

    let issues = run_rules(&ctx, &rules);

    Ok(finish(CommandSummary::Check, issues, ctx.files.len(), true))
}

/// Run the selected rules; parse errors are always included.
pub fn run_rules(ctx: &CheckContext, rules: &[CheckRule]) -> Vec<Issue> {
    let mut all_issues: Vec<Issue> = Vec::new();

    for rule in rules {
        match rule {
            CheckRule::EmptyTranslation => {
                let issues = check_empty_translation_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::EmptyTranslation));
            }
            CheckRule::Unfinished => {
                let issues = check_unfinished_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::Unfinished));
            }
            CheckRule::Numerus => {
                let issues = check_numerus_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::NumerusMismatch));
            }
            CheckRule::Duplicate => {
                let issues = check_duplicate_context_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::DuplicateContext));
                let issues = check_duplicate_message_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::DuplicateMessage));
            }
            CheckRule::Identical => {
                let issues = check_identical_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::Identical));
            }
            CheckRule::Placeholder => {
                let issues = check_placeholder_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::PlaceholderMismatch));
            }
            CheckRule::Language => {
                let issues = check_language_issues(ctx);
                all_issues.extend(issues.into_iter().map(Issue::UnknownLanguage));
            }
        }
    }

    all_issues.extend(ctx.parse_errors().iter().cloned().map(Issue::ParseError));
    tracing::debug!("{} issue(s) from {} rule(s)", all_issues.len(), rules.len());

    all_issues
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::{config::Config, issues::Rule};

    const IT_TS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="it_IT">
<context>
    <name>dialogs::JoinDialog</name>
    <message>
        <source>Joining %1</source>
        <translation>Connessione</translation>
    </message>
    <message>
        <source>Session</source>
        <translation type="unfinished"></translation>
    </message>
</context>
</TS>
"#;

    fn context() -> (tempfile::TempDir, CheckContext) {
        let dir = tempdir().unwrap();
        let translations = dir.path().join("translations");
        fs::create_dir_all(&translations).unwrap();
        fs::write(translations.join("drawpile_it.ts"), IT_TS).unwrap();
        fs::write(translations.join("drawpile_de.ts"), "<TS><context>").unwrap();
        let ctx = CheckContext::from_config(dir.path().to_path_buf(), Config::default());
        (dir, ctx)
    }

    #[test]
    fn test_run_all_rules() {
        let (_dir, ctx) = context();
        let mut issues = run_rules(&ctx, &CheckRule::all());
        issues.sort();

        let rules: Vec<Rule> = issues.iter().map(Issue::rule).collect();
        assert_eq!(
            rules,
            vec![Rule::ParseError, Rule::PlaceholderMismatch, Rule::Unfinished]
        );
    }

    #[test]
    fn test_run_selected_rules_keeps_parse_errors() {
        let (_dir, ctx) = context();
        let issues = run_rules(&ctx, &[CheckRule::Unfinished]);

        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.rule() == Rule::Unfinished));
        assert!(issues.iter().any(|i| i.rule() == Rule::ParseError));
    }
}
