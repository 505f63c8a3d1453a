//! Storage record loading — a single numeric column, optionally headered.
//!
//! The first row is skipped only when it does not parse as a number, so
//! both headered and headerless files load the same readings. Rows with
//! extra fields keep their first field; blank rows are ignored. An empty
//! file yields an empty record, which the analysis treats as a normal
//! no-episode outcome.

use std::path::Path;

use thiserror::Error;

/// Errors from the record loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("'{path}' line {line}: cannot parse '{value}' as a storage reading")]
    BadValue {
        path: String,
        line: usize,
        value: String,
    },
}

/// Read a storage record from a single-column CSV file.
pub fn load_readings(path: &Path) -> Result<Vec<f64>, LoadError> {
    let display = path.display().to_string();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Read {
            path: display.clone(),
            source,
        })?;

    let mut readings = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(|source| LoadError::Read {
            path: display.clone(),
            source,
        })?;
        let field = record.get(0).unwrap_or("");
        if field.is_empty() {
            continue;
        }
        match field.parse::<f64>() {
            Ok(v) => readings.push(v),
            // The first row may be a header; anything later must parse.
            Err(_) if idx == 0 => continue,
            Err(_) => {
                return Err(LoadError::BadValue {
                    path: display,
                    line: idx + 1,
                    value: field.to_string(),
                })
            }
        }
    }
    Ok(readings)
}
