use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "reset",
            "Delete every transaction after confirmation",
            "reset [--yes]",
            cmd_reset,
        ),
        CommandDefinition::new(
            "export",
            "Write all transactions to a workbook file",
            "export [path]",
            cmd_export,
        ),
        CommandDefinition::new(
            "import",
            "Replace all transactions with the rows of a workbook file",
            "import <path>",
            cmd_import,
        ),
    ]
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {}
        ["--yes"] | ["-y"] => context.tracker.view_mut().preconfirm(true),
        _ => return Err(CommandError::InvalidArguments("usage: reset [--yes]".into())),
    }

    if context.tracker.reset()? {
        io::print_success("All data cleared.");
    } else {
        io::print_info("Reset cancelled.");
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => PathBuf::from(&context.config.export_file),
        [path] => PathBuf::from(path),
        _ => return Err(CommandError::InvalidArguments("usage: export [path]".into())),
    };

    let count = context.tracker.export(&path)?;
    io::print_success(format!(
        "Exported {count} transaction(s) to {}.",
        path.display()
    ));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::InvalidArguments("usage: import <path>".into()));
    };
    let path = PathBuf::from(path);

    let count = context.runtime.block_on(context.tracker.import(&path))?;
    io::print_success(format!(
        "Imported {count} transaction(s) from {}.",
        path.display()
    ));
    context.tracker.view().print_summary();
    Ok(())
}
