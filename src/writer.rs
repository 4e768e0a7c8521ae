//! CSV output writing.

use polars::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::error::{Result, ResultExt};

/// Writes the processed dataset to a CSV file.
///
/// The output directory is created if missing and an existing file at the
/// target path is overwritten.
pub struct OutputWriter {
    output_dir: PathBuf,
    output_name: String,
}

impl OutputWriter {
    /// Creates a writer targeting `<output_dir>/<output_name>.csv`.
    pub fn new(output_dir: impl Into<PathBuf>, output_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            output_name: output_name.into(),
        }
    }

    /// Returns the path the dataset will be written to.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.output_name))
    }

    /// Writes the frame as CSV with a header row and no index column.
    pub fn write(&self, df: &mut DataFrame) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .context(format!("creating {}", self.output_dir.display()))?;

        let path = self.output_path();
        let mut file =
            fs::File::create(&path).context(format!("creating {}", path.display()))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(df)
            .context(format!("writing {}", path.display()))?;

        info!("Dataset saved: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_output_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pm-writer-{}-{}", tag, std::process::id()))
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let dir = temp_output_dir("create");
        let writer = OutputWriter::new(&dir, "processed");
        let mut df = df!(
            "Type" => [1i32, 2],
            "Target" => [0i64, 1]
        )
        .expect("Should create test DataFrame");

        let path = writer.write(&mut df).expect("Should write");

        assert_eq!(path, dir.join("processed.csv"));
        let contents = fs::read_to_string(&path).expect("Should read back");
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Type,Target"));
        assert_eq!(lines.next(), Some("1,0"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = temp_output_dir("overwrite");
        let writer = OutputWriter::new(&dir, "processed");

        let mut first = df!("Target" => [0i64, 1, 1]).expect("Should create test DataFrame");
        writer.write(&mut first).expect("Should write");

        let mut second = df!("Target" => [1i64]).expect("Should create test DataFrame");
        let path = writer.write(&mut second).expect("Should overwrite");

        let contents = fs::read_to_string(&path).expect("Should read back");
        assert_eq!(contents.lines().count(), 2);

        fs::remove_dir_all(&dir).ok();
    }
}
