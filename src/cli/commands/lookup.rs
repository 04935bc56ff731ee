use anyhow::Result;

use super::super::args::LookupCommand;
use super::{CommandResult, CommandSummary, LookupSummary, helper::finish};
use crate::core::Translator;

pub fn lookup(cmd: LookupCommand) -> Result<CommandResult> {
    let translator = Translator::load(&cmd.file)?;
    let summary = resolve(&translator, &cmd);

    if !summary.translated {
        tracing::debug!(
            context = %cmd.context,
            source = %cmd.source,
            "Not translated in {}",
            cmd.file.display()
        );
    }

    Ok(finish(CommandSummary::Lookup(summary), Vec::new(), 1, true))
}

fn resolve(translator: &Translator, cmd: &LookupCommand) -> LookupSummary {
    let translated = translator
        .lookup(&cmd.context, &cmd.source, &cmd.disambiguation)
        .is_some();
    let text = match cmd.count {
        Some(n) => translator.translate_n(&cmd.context, &cmd.source, &cmd.disambiguation, n),
        None => translator
            .translate(&cmd.context, &cmd.source, &cmd.disambiguation)
            .into_owned(),
    };
    LookupSummary { text, translated }
}
