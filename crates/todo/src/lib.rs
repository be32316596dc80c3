// crates/todo/src/lib.rs

use anyhow::Result;
use std::io::Write;
use task_store::TaskStore;

pub mod cli;
pub mod config;

pub use cli::{parse_args, Action, Invocation};
pub use config::AppConfig;

/// Sets up `env_logger` on stderr. `RUST_LOG` takes precedence; otherwise
/// only warnings and errors are shown unless `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    // A second call (e.g. from tests) keeps the first logger.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Runs one action against the task file named in `config`. Listings are
/// written to `out`.
pub fn run<W: Write>(config: &AppConfig, action: &Action, out: &mut W) -> Result<()> {
    let store = TaskStore::open(&config.tasks_file)?;

    match action {
        Action::AddTask { description, due_date } => {
            let id = store.add(description, due_date)?;
            log::info!("Added task {} to {}", id, store.path().display());
        }
        Action::Remove { id } => {
            let removed = store.remove_task(id)?;
            if removed == 0 {
                log::info!("No task with id {}; {} left unchanged", id, store.path().display());
            } else {
                log::info!("Removed task {} from {}", id, store.path().display());
            }
        }
        Action::List => store.list_tasks(out)?,
    }

    Ok(())
}
