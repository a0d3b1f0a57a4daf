use anyhow::{Context, Result};
use chrono::TimeZone;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{round_cents, Record};

pub(crate) const EXPORT_FILE_NAME: &str = "expense_log.csv";

const HEADER: [&str; 3] = ["Date", "Description", "Amount"];

/// Write the records as CSV, in the order given. Dates are calendar dates
/// in `tz`; fields containing commas, quotes or newlines are quoted.
pub(crate) fn write_csv<W, Tz>(writer: W, records: &[Record], tz: &Tz) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for record in records {
        wtr.write_record([
            record.calendar_date(tz),
            record.description.clone(),
            format!("{:.2}", round_cents(record.amount)),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `expense_log.csv` into `dir`, creating the directory if needed.
/// Returns the path written.
pub(crate) fn export_to_dir(records: &[Record], dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(EXPORT_FILE_NAME);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(file, records, &chrono::Local)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "exported log");
    Ok(path)
}

/// Downloads folder, else home, else the working directory.
pub(crate) fn default_export_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|d| {
            d.download_dir()
                .map(Path::to_path_buf)
                .or_else(|| Some(d.home_dir().to_path_buf()))
        })
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
