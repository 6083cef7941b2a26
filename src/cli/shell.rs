use std::{
    borrow::Cow,
    io::{self, BufRead, Stdout},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use tracing::debug;

use super::commands::CommandRegistry;
use super::output;
use super::view::{TerminalChart, TerminalView};
use super::{CliError, CliOptions, CommandError};
use crate::config::{Config, ConfigManager};
use crate::core::utils::PathResolver;
use crate::core::{Controller, DataManager, SystemClock};
use crate::storage::JsonStorage;

/// Environment variable that switches the shell to reading commands from stdin.
pub const SCRIPT_ENV: &str = "BUDGET_PULSE_SCRIPT";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
    OneShot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type TerminalController =
    Controller<JsonStorage, SystemClock, TerminalView<Stdout>, TerminalChart<Stdout>>;

/// Everything a command handler can reach.
pub struct ShellContext {
    pub(crate) registry: CommandRegistry,
    pub(crate) controller: TerminalController,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode, options: &CliOptions) -> Result<Self, CliError> {
        let base = PathResolver::resolve_base(options.home.clone());
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        crate::init(config.log_filter.as_deref());

        let color = mode == CliMode::Interactive
            && colored::control::SHOULD_COLORIZE.should_colorize();
        if !color {
            colored::control::set_override(false);
        }

        let data_dir = config_manager.data_dir(&config);
        debug!(data_dir = %data_dir.display(), ?mode, "opening data store");
        let storage = JsonStorage::new(data_dir)?;
        let data = DataManager::open(storage, SystemClock)?;
        let view = TerminalView::new(io::stdout(), config.currency_symbol.clone(), color);
        let chart = TerminalChart::new(io::stdout(), config.currency_symbol.clone());

        Ok(Self {
            registry: CommandRegistry::default(),
            controller: Controller::new(data, view, chart),
            config_manager,
            config,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        format!("budget [{}]> ", self.controller.data().selected_month())
    }

    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|entry| entry.handler) else {
            self.suggest_command(command);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(suggestion) = self.registry.suggest(input) {
            output::info(format!("Did you mean `{suggestion}`?"));
        }
    }

    /// Prints a failed command; the shell keeps running.
    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested | CommandError::Rejected(_) => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            CommandError::Core(err) => output::error(err),
        }
    }

    fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }
}

/// Runs one command, the stdin script, or the interactive shell depending on `options`
/// and the environment.
pub fn run_cli(options: CliOptions) -> Result<(), CliError> {
    let mode = if !options.command.is_empty() {
        CliMode::OneShot
    } else if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode, &options)?;

    match mode {
        CliMode::OneShot => run_once(&mut context, &options.command),
        CliMode::Script => run_script(&mut context),
        CliMode::Interactive => run_interactive(&mut context),
    }
}

fn run_once(context: &mut ShellContext, command: &[String]) -> Result<(), CliError> {
    let (name, rest) = match command.split_first() {
        Some(parts) => parts,
        None => return Ok(()),
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    match context.dispatch(&name.to_lowercase(), &args) {
        Ok(_) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("Type `help` to see available commands.");
    context.controller.refresh();

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };
    let Some((first, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    if first.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    let control = context.dispatch(&first.to_lowercase(), &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        // Only the first word is a command name.
        if prefix.trim_start().contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let start = prefix.len() - prefix.trim_start().len();
        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}
