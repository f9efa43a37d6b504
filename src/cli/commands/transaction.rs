use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::core::services::TransactionForm;
use crate::domain::{Category, TransactionId, TransactionKind};

use super::CommandDefinition;

const ADD_USAGE: &str = "add <title> <amount> <income|expense> <category> [YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandDefinition::new("list", "Show transactions, newest first", "list", cmd_list),
        CommandDefinition::new("delete", "Delete a transaction by id", "delete <id>", cmd_delete),
        CommandDefinition::new(
            "search",
            "Filter the list by title; no query shows everything",
            "search [query]",
            cmd_search,
        ),
        CommandDefinition::new("summary", "Show balance, income and expenses", "summary", cmd_summary),
        CommandDefinition::new("chart", "Show the income/expense split", "chart", cmd_chart),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut form = context.tracker.blank_form();
    match args {
        [] if context.mode == CliMode::Interactive => fill_form_interactive(&mut form)?,
        [title, amount, kind, category, rest @ ..] if rest.len() <= 1 => {
            form.title = title.to_string();
            form.amount = amount.to_string();
            form.kind = TransactionKind::parse(kind);
            form.category = Some(category.to_string());
            if let Some(date) = rest.first() {
                form.date = Some(date.to_string());
            }
        }
        _ => {
            return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
        }
    }

    context.tracker.add(&mut form)?;
    context.tracker.view().print_summary();
    Ok(())
}

fn fill_form_interactive(form: &mut TransactionForm) -> CommandResult {
    form.title = io::prompt_text("Title", None)?;
    form.amount = io::prompt_text("Amount", None)?;

    let kinds = [TransactionKind::Income, TransactionKind::Expense];
    let labels: Vec<String> = vec!["Income".into(), "Expense".into()];
    form.kind = Some(kinds[io::prompt_select("Type", &labels)?]);

    let categories: Vec<String> = Category::KNOWN
        .iter()
        .map(|category| format!("{} {}", category.icon(), category))
        .collect();
    let picked = io::prompt_select("Category", &categories)?;
    form.category = Category::KNOWN
        .get(picked)
        .map(|category| category.as_str().to_string());

    let today = form.date.clone();
    form.date = Some(io::prompt_text("Date (YYYY-MM-DD)", today.as_deref())?);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    // a full redraw also drops any active search filter
    context.tracker.refresh();
    let view = context.tracker.view();
    view.print_list();
    view.print_summary();
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    let id: TransactionId = raw.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a transaction id"))
    })?;

    if context.tracker.delete(id)? {
        io::print_success(format!("Deleted transaction #{id}."));
    } else {
        io::print_warning(format!("No transaction with id #{id}."));
    }
    context.tracker.view().print_summary();
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let visible = context.tracker.search(&query);
    context.tracker.view().print_list();
    if !query.is_empty() {
        io::print_info(format!("{visible} matching `{query}`."));
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.tracker.view().print_summary();
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let tracker = &context.tracker;
    tracker.view().print_chart(tracker.formatter());
    Ok(())
}
