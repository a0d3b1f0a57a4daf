use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "expensetui.db";
const LOG_FILE_NAME: &str = "expensetui.log";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

impl Config {
    /// Use `data_dir` if given, otherwise the platform data directory.
    /// The directory is created if missing.
    pub(crate) fn resolve(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir()?,
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            data_dir,
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Pull `--data-dir <path>` (or `--data-dir=<path>`) out of the argument list.
/// Returns the override and the remaining arguments.
pub(crate) fn take_data_dir_flag(args: &[String]) -> Result<(Option<PathBuf>, Vec<String>)> {
    let mut data_dir = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--data-dir" {
            let value = iter
                .next()
                .ok_or_else(|| anyhow::anyhow!("--data-dir needs a path"))?;
            data_dir = Some(PathBuf::from(crate::run::shellexpand(value)));
        } else if let Some(value) = arg.strip_prefix("--data-dir=") {
            data_dir = Some(PathBuf::from(crate::run::shellexpand(value)));
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((data_dir, rest))
}
