mod config;
mod export;
mod logging;
mod models;
mod run;
mod store;
mod tracker;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let (data_dir, args) = config::take_data_dir_flag(&std::env::args().collect::<Vec<_>>())?;
    let config = config::Config::resolve(data_dir.as_deref())?;

    if let Err(e) = logging::init(&config.log_path) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    tracing::info!(data_dir = %config.data_dir.display(), "starting expensetui");

    let store = store::Store::open(&config.db_path)?;
    let mut tracker = tracker::Tracker::load(store)?;

    match args.len() {
        1 => run::as_tui(&mut tracker, export::default_export_dir()),
        2.. => run::as_cli(&args, &mut tracker),
        _ => {
            eprintln!("Usage: expensetui [command]");
            Ok(())
        }
    }
}
