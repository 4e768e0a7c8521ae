//! Dataset loading from a remote URL or a local CSV file.
//!
//! Retrieval and parse failures are reported as [`PreprocessError::LoadFailed`]
//! so the caller can distinguish a load error from a loaded-but-empty
//! dataset instead of conflating both into an empty frame.

use crate::error::{PreprocessError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Load a CSV dataset from an `http(s)://` URL or a filesystem path.
pub fn load(source: &str) -> Result<DataFrame> {
    if source.starts_with("http://") || source.starts_with("https://") {
        load_remote(source)
    } else {
        load_local(Path::new(source))
    }
}

fn load_remote(url: &str) -> Result<DataFrame> {
    debug!("Fetching remote dataset: {}", url);

    let response = reqwest::blocking::get(url).map_err(|e| PreprocessError::LoadFailed {
        origin: url.to_string(),
        reason: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(PreprocessError::LoadFailed {
            origin: url.to_string(),
            reason: format!("HTTP status {}", response.status()),
        });
    }

    let body = response.text().map_err(|e| PreprocessError::LoadFailed {
        origin: url.to_string(),
        reason: e.to_string(),
    })?;

    read_csv_bytes(body.into_bytes()).map_err(|e| PreprocessError::LoadFailed {
        origin: url.to_string(),
        reason: e.to_string(),
    })
}

fn load_local(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PreprocessError::LoadFailed {
            origin: path.display().to_string(),
            reason: "file not found".to_string(),
        });
    }

    // Standard loading with quote handling, then a retry without it for
    // sources with malformed quoting.
    match read_csv_path(path, true) {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("CSV read with quote handling failed: {}", e);
        }
    }

    read_csv_path(path, false).map_err(|e| PreprocessError::LoadFailed {
        origin: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn read_csv_path(path: &Path, quoted: bool) -> PolarsResult<DataFrame> {
    let mut options = CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true);

    if quoted {
        options =
            options.with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')));
    }

    options
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

fn read_csv_bytes(bytes: Vec<u8>) -> PolarsResult<DataFrame> {
    let cursor = Cursor::new(bytes);
    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .into_reader_with_file_handle(cursor)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pm_preprocessing_loader_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_load_missing_file_is_load_failed() {
        let result = load("definitely/not/a/real/file.csv");
        assert!(matches!(
            result.unwrap_err(),
            PreprocessError::LoadFailed { .. }
        ));
    }

    #[test]
    fn test_load_local_csv() {
        let path = temp_file("small.csv");
        fs::write(&path, "Type,Target\nL,0\nM,1\n").unwrap();

        let df = load(path.to_str().unwrap()).unwrap();
        assert_eq!(df.shape(), (2, 2));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_header_only_csv_is_empty_frame() {
        let path = temp_file("header_only.csv");
        fs::write(&path, "Type,Target\n").unwrap();

        let df = load(path.to_str().unwrap()).unwrap();
        assert_eq!(df.height(), 0);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_csv_bytes() {
        let df = read_csv_bytes(b"a,b\n1,2\n3,4\n".to_vec()).unwrap();
        assert_eq!(df.shape(), (2, 2));
    }
}
