//! Shell context construction, dispatch, and error reporting.

use std::{io, path::PathBuf};

use strsim::levenshtein;

use crate::{
    cli::{
        commands::{self, CommandDefinition, CommandRegistry},
        io as cli_io,
        output::{self, OutputPreferences},
        view::TerminalView,
    },
    config::ConfigManager,
    core::{utils::PathResolver, Tracker, TrackerError},
    currency::CurrencyFormatter,
    errors::LedgerError,
    ledger::LedgerStore,
    storage::JsonFileStore,
};

pub use crate::cli::shell_context::{CliMode, ShellContext};
pub use crate::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    /// Opens config and ledger under `base` and draws the initial state.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script,
            theme: config.theme,
        });

        let storage = JsonFileStore::new(config_manager.storage_dir())?;
        let store = LedgerStore::load(Box::new(storage), config.storage_key.clone())?;
        let mut tracker = Tracker::new(
            store,
            TerminalView::new(mode),
            CurrencyFormatter::new(config.locale),
        )
        .with_theme(config.theme);
        tracker.refresh();

        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        tracing::debug!(
            home = %config_manager.base_dir().display(),
            transactions = tracker.transactions().len(),
            "shell context ready"
        );

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            tracker,
            config_manager,
            config,
            runtime,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.command(command).map(|entry| entry.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes and runs one command line.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn prompt(&self) -> String {
        let balance = self.tracker.summary().balance;
        format!("cashflow [{}]> ", self.tracker.formatter().format(balance))
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action("Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            // already shown through the view
            CommandError::Tracker(inner) if inner.is_user_facing() => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                tracing::warn!(error = %other, command = ?self.last_command, "command failed");
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }
}

/// Runs `lines` in script mode against the home directory `base`.
pub fn process_script(base: PathBuf, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut context = ShellContext::with_base_dir(CliMode::Script, base)?;
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::currency::LocalePreset;
    use crate::domain::TransactionKind;
    use tempfile::tempdir;

    #[test]
    fn parse_line_handles_quotes() {
        let tokens =
            crate::cli::shell::parse_command_line("add \"Monthly Salary\" 5000 income salary")
                .unwrap();
        assert_eq!(tokens, vec!["add", "Monthly Salary", "5000", "income", "salary"]);
    }

    #[test]
    fn script_adds_and_deletes() {
        let home = tempdir().unwrap();
        let context = process_script(
            home.path().to_path_buf(),
            &[
                "add Salary 5000 income salary 2024-01-01",
                "add Groceries 200 expense food 2024-01-02",
                "delete 2",
                "exit",
            ],
        )
        .unwrap();

        let ledger = context.tracker.transactions();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].title, "Salary");
        assert_eq!(ledger[0].kind, TransactionKind::Income);
        assert_eq!(context.tracker.summary().balance, 5000.0);
        assert!(!context.running);
    }

    #[test]
    fn invalid_add_is_reported_not_fatal() {
        let home = tempdir().unwrap();
        let context = process_script(
            home.path().to_path_buf(),
            &["add Salary \"\" income salary", "add", "delete abc"],
        )
        .unwrap();
        assert!(context.tracker.transactions().is_empty());
        assert!(context.running);
    }

    #[test]
    fn reset_without_flag_is_declined_in_script_mode() {
        let home = tempdir().unwrap();
        let context = process_script(
            home.path().to_path_buf(),
            &["add Rent 900 expense utilities", "reset"],
        )
        .unwrap();
        assert_eq!(context.tracker.transactions().len(), 1);

        let context = process_script(home.path().to_path_buf(), &["reset --yes"]).unwrap();
        assert!(context.tracker.transactions().is_empty());
    }

    #[test]
    fn ledger_survives_restart() {
        let home = tempdir().unwrap();
        process_script(home.path().to_path_buf(), &["add Bonus 300 income other"]).unwrap();
        let context = process_script(home.path().to_path_buf(), &["list"]).unwrap();
        assert_eq!(context.tracker.transactions().len(), 1);
        assert_eq!(context.tracker.view().list().len(), 1);
    }

    #[test]
    fn list_clears_an_active_search() {
        let home = tempdir().unwrap();
        let mut context = process_script(
            home.path().to_path_buf(),
            &[
                "add Salary 5000 income salary 2024-01-01",
                "add Groceries 200 expense food 2024-01-02",
                "search gro",
            ],
        )
        .unwrap();
        assert_eq!(context.tracker.view().list().visible().count(), 1);

        context.process_line("list").unwrap();
        assert_eq!(context.tracker.view().list().visible().count(), 2);
    }

    #[test]
    fn config_changes_are_saved() {
        let home = tempdir().unwrap();
        process_script(
            home.path().to_path_buf(),
            &["theme dark", "config locale en-US"],
        )
        .unwrap();

        let context = process_script(home.path().to_path_buf(), &[]).unwrap();
        assert_eq!(context.config.theme, Theme::Dark);
        assert_eq!(context.config.locale, LocalePreset::EnUs);
        assert_eq!(context.tracker.theme(), Theme::Dark);
        assert_eq!(context.tracker.formatter().preset(), LocalePreset::EnUs);
    }

    #[test]
    fn unknown_command_keeps_running() {
        let home = tempdir().unwrap();
        let mut context = ShellContext::with_base_dir(CliMode::Script, home.path().into()).unwrap();
        assert_eq!(context.process_line("lst").unwrap(), LoopControl::Continue);
        assert_eq!(context.last_command.as_deref(), Some("lst"));
        assert!(context.prompt().starts_with("cashflow ["));
    }
}
