pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
mod shell;
mod shell_context;
pub mod ui;
pub mod view;

pub use shell::run_cli;
