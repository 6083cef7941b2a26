pub mod commands;
pub mod output;
mod shell;
pub mod table;
pub mod view;

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::errors::BudgetError;

pub use shell::{run_cli, CliMode, ShellContext, TerminalController, SCRIPT_ENV};

/// Fatal CLI errors that end the process.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Errors from a single command; reported and then the shell continues.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] BudgetError),
    /// The action was refused and the reason has already been shown.
    #[error("{0}")]
    Rejected(String),
    #[error("Exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// Options parsed from the process arguments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub home: Option<PathBuf>,
    /// Command to run once instead of starting the shell.
    pub command: Vec<String>,
}

impl CliOptions {
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if !options.command.is_empty() {
                options.command.push(arg);
                continue;
            }
            match arg.as_str() {
                "--home" => {
                    let dir = args
                        .next()
                        .ok_or_else(|| CliError::Input("--home requires a directory".into()))?;
                    options.home = Some(PathBuf::from(dir));
                }
                "-h" | "--help" => options.command.push("help".into()),
                "-V" | "--version" => options.command.push("version".into()),
                flag if flag.starts_with("--") => {
                    return Err(CliError::Input(format!("unknown flag `{flag}`")));
                }
                _ => options.command.push(arg),
            }
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, CliError> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_means_interactive() {
        assert_eq!(parse(&[]).unwrap(), CliOptions::default());
    }

    #[test]
    fn home_flag_and_command_are_split() {
        let options = parse(&["--home", "/tmp/x", "add", "2025-01-01", "income", "5", "--home"])
            .unwrap();
        assert_eq!(options.home, Some(PathBuf::from("/tmp/x")));
        assert_eq!(
            options.command,
            vec!["add", "2025-01-01", "income", "5", "--home"]
        );
    }

    #[test]
    fn missing_home_value_is_an_error() {
        assert!(matches!(parse(&["--home"]), Err(CliError::Input(_))));
        assert!(matches!(parse(&["--bogus"]), Err(CliError::Input(_))));
    }

    #[test]
    fn version_flag_maps_to_command() {
        assert_eq!(parse(&["-V"]).unwrap().command, vec!["version"]);
    }
}
