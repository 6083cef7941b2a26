use crate::cli::output;
use crate::cli::{CommandError, CommandResult, ShellContext};
use crate::config::CONFIG_KEYS;

use super::CommandEntry;

pub(super) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            context.config.set_value(&key, &value)?;
            context.config_manager.save(&context.config)?;
            if key == "currency_symbol" {
                let symbol = context.config.currency_symbol.clone();
                context.controller.view_mut().set_currency(symbol.clone());
                context.controller.chart_mut().set_currency(symbol);
            }
            output::success(format!("Saved `{key}`."));
            if key != "currency_symbol" {
                output::info("The new value takes effect the next time the app starts.");
            }
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show|set <key> <value>]".into(),
        )),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  file            : {}", context.config_manager.path().display()));
    output::info(format!("  currency_symbol : {}", config.currency_symbol));
    output::info(format!(
        "  log_filter      : {}",
        config.log_filter.as_deref().unwrap_or("(default)")
    ));
    output::info(format!(
        "  data_dir        : {}",
        context.config_manager.data_dir(config).display()
    ));
}
