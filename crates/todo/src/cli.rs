// crates/todo/src/cli.rs

use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// The single operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddTask { description: String, due_date: String },
    /// The id exactly as typed; it is matched against each line's leading
    /// digits as text.
    Remove { id: String },
    List,
}

/// Everything parsed from argv, before the environment is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub action: Action,
    pub file: Option<PathBuf>,
    pub verbose: bool,
}

pub fn build_cli() -> Command {
    Command::new("todo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keeps a todo list as numbered lines in a plain text file")
        .subcommand_required(true)
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .num_args(1)
                .value_name("PATH")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Task file to use (defaults to $TODO_FILE, then tasks.txt)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("add-task")
                .about("Append a task with the next free id")
                .arg(
                    Arg::new("description")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("What needs doing"),
                )
                .arg(
                    Arg::new("due_date")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("When it is due"),
                ),
        )
        .subcommand(
            Command::new("remove").about("Remove the task with the given id").arg(
                Arg::new("id")
                    .required(true)
                    .allow_hyphen_values(true)
                    .help("Id of the task to remove"),
            ),
        )
        .subcommand(Command::new("list").about("Print the task file as is"))
}

/// Parses argv (including the program name) into an `Invocation`.
///
/// Usage mistakes come back as one of three fixed messages. Help and version
/// requests come back as the untouched `clap::Error` so the caller can print
/// them and exit successfully.
pub fn parse_args<I, T>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_cli().try_get_matches_from(args).map_err(usage_error)?;
    invocation_from_matches(&matches)
}

fn invocation_from_matches(matches: &ArgMatches) -> Result<Invocation> {
    let (action, sub_matches) = match matches.subcommand() {
        Some(("add-task", sub)) => {
            let description = required_value(sub, "description")?;
            let due_date = required_value(sub, "due_date")?;
            (Action::AddTask { description, due_date }, sub)
        }
        Some(("remove", sub)) => {
            let id = required_value(sub, "id")?;
            (Action::Remove { id }, sub)
        }
        Some(("list", sub)) => (Action::List, sub),
        _ => return Err(anyhow!("Invalid action provided.")),
    };

    // Global args are propagated down to the subcommand that was used.
    let file = sub_matches.get_one::<PathBuf>("file").cloned();
    let verbose = sub_matches.get_flag("verbose");

    Ok(Invocation { action, file, verbose })
}

fn required_value(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("Incorrect number of arguments provided."))
}

fn usage_error(err: clap::Error) -> anyhow::Error {
    let message = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => return err.into(),
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            "No arguments provided."
        }
        ErrorKind::InvalidSubcommand => "Invalid action provided.",
        _ => "Incorrect number of arguments provided.",
    };
    log::debug!("clap rejected the arguments: {}", err);
    anyhow!(message)
}
