//! JSON file helpers and the result sink

use crate::{Error, RecommendationRecord, Result};
use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Load a JSON document from disk
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(format!("{}", path.display()))
        } else {
            Error::Io(e)
        }
    })?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

/// Write a value as JSON, creating parent directories as needed
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Result file name for a given timestamp: `results-YYMMDD-HHMMSS.json`
pub fn result_file_name(timestamp: DateTime<Local>) -> String {
    format!("results-{}.json", timestamp.format("%y%m%d-%H%M%S"))
}

/// Write a batch of recommendation records into `output_dir`
///
/// Returns the path of the written file.
pub fn write_results(output_dir: &Path, records: &[RecommendationRecord]) -> Result<PathBuf> {
    let path = output_dir.join(result_file_name(Local::now()));
    write_json(records, &path)?;
    tracing::info!("Wrote {} recommendation records to {}", records.len(), path.display());
    Ok(path)
}
