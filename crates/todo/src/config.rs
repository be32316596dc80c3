// crates/todo/src/config.rs

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";

/// Environment variable naming the task file when `--file` is not given.
pub const TASKS_FILE_ENV: &str = "TODO_FILE";

/// Runtime configuration composed from CLI + environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub tasks_file: PathBuf,
    pub verbose: bool,
}

impl AppConfig {
    /// `--file` wins over `$TODO_FILE`, which wins over `tasks.txt` in the
    /// current directory.
    pub fn resolve(file_arg: Option<PathBuf>, verbose: bool) -> Self {
        Self::from_sources(file_arg, env::var_os(TASKS_FILE_ENV), verbose)
    }

    fn from_sources(file_arg: Option<PathBuf>, env_file: Option<OsString>, verbose: bool) -> Self {
        let tasks_file = file_arg
            .or_else(|| env_file.filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE));
        Self { tasks_file, verbose }
    }
}
