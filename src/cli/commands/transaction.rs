use crate::cli::{CommandError, CommandResult, ShellContext};
use crate::core::services::SummaryService;
use crate::core::SummaryView;
use crate::ledger::{TransactionId, TransactionInput};

use super::CommandEntry;

pub(super) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense",
            "add <YYYY-MM-DD> <income|expense> <amount> <description...>",
            cmd_add,
        ),
        CommandEntry::new(
            "delete",
            "Remove a transaction by id",
            "delete <id>",
            cmd_delete,
        )
        .with_aliases(&["rm"]),
        CommandEntry::new(
            "list",
            "List the selected month's transactions, newest first",
            "list",
            cmd_list,
        )
        .with_aliases(&["ls"]),
    ]
}

/// Missing positional arguments are passed on as empty fields so validation reports them.
pub(crate) fn input_from_args(args: &[&str]) -> TransactionInput {
    let field = |idx: usize| args.get(idx).copied().unwrap_or_default().to_string();
    TransactionInput::new(
        field(0),
        field(1).to_lowercase(),
        args.get(3..).map(|rest| rest.join(" ")).unwrap_or_default(),
        field(2),
    )
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = input_from_args(args);
    match context.controller.submit_transaction(&input)? {
        Some(_) => Ok(()),
        None => Err(CommandError::Rejected("transaction not saved".into())),
    }
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    let id = TransactionId::from(*id);
    if context.controller.delete_transaction(&id)? {
        Ok(())
    } else {
        Err(CommandError::Rejected(format!("no transaction with id {id}")))
    }
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: list".into()));
    }
    let month = context.controller.data().selected_month();
    let rows = SummaryService::sorted_for_display(context.controller.data().transactions_in(month));
    context.controller.view_mut().render_transactions(&rows);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_collects_remaining_words() {
        let input = input_from_args(&["2025-01-05", "Income", "1000", "Monthly", "salary"]);
        assert_eq!(input.date, "2025-01-05");
        assert_eq!(input.kind, "income");
        assert_eq!(input.amount, "1000");
        assert_eq!(input.description, "Monthly salary");
    }

    #[test]
    fn missing_arguments_become_empty_fields() {
        let input = input_from_args(&["2025-01-05"]);
        assert_eq!(input.kind, "");
        assert_eq!(input.amount, "");
        assert_eq!(input.description, "");
    }
}
