use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::cli::view::format_amount;
use crate::cli::{CommandError, CommandResult, ShellContext};
use crate::ledger::MonthKey;

use super::CommandEntry;

pub(super) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "show",
            "Show the selected month's summary, transactions, and chart",
            "show",
            cmd_show,
        )
        .with_aliases(&["summary"]),
        CommandEntry::new(
            "limit",
            "Set or clear the selected month's budget limit",
            "limit <amount> | limit clear",
            cmd_limit,
        ),
        CommandEntry::new(
            "limits",
            "List every month that has a budget limit",
            "limits",
            cmd_limits,
        ),
        CommandEntry::new(
            "month",
            "Select the month to work with",
            "month [YYYY-MM]",
            cmd_month,
        ),
        CommandEntry::new("prev", "Select the previous month", "prev", cmd_prev),
        CommandEntry::new("next", "Select the next month", "next", cmd_next),
    ]
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.refresh();
    Ok(())
}

fn cmd_limit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [action] if action.eq_ignore_ascii_case("clear") => {
            context.controller.clear_budget_limit()?;
            Ok(())
        }
        [amount] => {
            if context.controller.set_budget_limit(amount)? {
                Ok(())
            } else {
                Err(CommandError::Rejected(format!("invalid budget limit `{amount}`")))
            }
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: limit <amount> | limit clear".into(),
        )),
    }
}

fn cmd_limits(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: limits".into()));
    }
    let limits = context.controller.data().budget_limits();
    if limits.is_empty() {
        output::info("No budget limits set.");
        return Ok(());
    }
    let mut table = Table::new(vec![TableColumn::left("Month"), TableColumn::right("Limit")]);
    for (month, limit) in limits.iter() {
        table.push_row(vec![
            month.to_string(),
            format_amount(&context.config.currency_symbol, *limit),
        ]);
    }
    output::info(table.render());
    Ok(())
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            context.controller.refresh();
            Ok(())
        }
        [raw] => {
            let month: MonthKey = raw.parse()?;
            context
                .controller
                .select_month(month.year(), month.month())?;
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: month [YYYY-MM]".into(),
        )),
    }
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.previous_month();
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.next_month();
    Ok(())
}
