use tokio::runtime::Runtime;

use crate::{
    cli::{commands::CommandRegistry, view::TerminalView},
    config::{Config, ConfigManager},
    core::Tracker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: Tracker<TerminalView>,
    pub config_manager: ConfigManager,
    pub config: Config,
    /// Drives the async workbook reads from the synchronous shell loop.
    pub runtime: Runtime,
    pub last_command: Option<String>,
    pub running: bool,
}

