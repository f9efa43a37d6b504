use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::config::Theme;
use crate::currency::{CurrencyFormatter, LocalePreset};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "theme",
            "Toggle or set the color theme",
            "theme [light|dark]",
            cmd_theme,
        ),
        CommandDefinition::new(
            "config",
            "Show settings or change the display locale",
            "config [locale <tag>]",
            cmd_config,
        ),
    ]
}

fn cmd_theme(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let theme = match args {
        [] => context.tracker.toggle_theme(),
        [raw] => {
            let theme = Theme::parse(raw).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unknown theme `{raw}` (light or dark)"))
            })?;
            context.tracker.set_theme(theme);
            theme
        }
        _ => return Err(CommandError::InvalidArguments("usage: theme [light|dark]".into())),
    };

    context.config.theme = theme;
    context.persist_config()?;
    io::print_success(format!("Theme set to {theme}."));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            show_config(context);
            Ok(())
        }
        ["locale", tag] => set_locale(context, tag),
        _ => Err(CommandError::InvalidArguments(
            "usage: config [locale <tag>]".into(),
        )),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output_section("Configuration");
    io::print_info(format!(
        "  Locale      : {} ({})",
        config.locale,
        config.locale.currency().as_str()
    ));
    io::print_info(format!("  Theme       : {}", config.theme));
    io::print_info(format!("  Storage key : {}", config.storage_key));
    io::print_info(format!("  Export file : {}", config.export_file));
    io::print_info(format!(
        "  Config file : {}",
        context.config_manager.path().display()
    ));
}

fn set_locale(context: &mut ShellContext, tag: &str) -> CommandResult {
    let Some(preset) = LocalePreset::parse(tag) else {
        let known: Vec<&str> = LocalePreset::ALL.iter().map(|preset| preset.tag()).collect();
        return Err(CommandError::InvalidArguments(format!(
            "unknown locale `{tag}` (available: {})",
            known.join(", ")
        )));
    };

    context.tracker.set_formatter(CurrencyFormatter::new(preset));
    context.config.locale = preset;
    context.persist_config()?;
    io::print_success(format!(
        "Locale set to {preset}; amounts shown in {}.",
        preset.currency().as_str()
    ));
    Ok(())
}
