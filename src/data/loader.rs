// ============================================================
// Layer 4 — JSON-Lines Record Source
// ============================================================
// Reads a review file in Amazon format: one JSON object per
// line. Blank lines are skipped; any other line that does not
// parse (bad JSON, missing key, wrong type) aborts the load
// with the file name and 1-based line number attached.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::review::ReviewRecord;
use crate::domain::traits::RecordSource;

/// Loads review records from a single .json (JSON-lines) file.
pub struct JsonLinesSource {
    path: PathBuf,
}

impl JsonLinesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonLinesSource {
    fn load_all(&self) -> Result<Vec<ReviewRecord>> {
        let path = self.path();
        let file = File::open(path)
            .with_context(|| format!("Cannot open review file '{}'", path.display()))?;

        let mut records = Vec::new();

        // Line numbers are 1-based in every error message
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| {
                format!("Cannot read line {} of '{}'", idx + 1, path.display())
            })?;

            // Trailing newlines and spacer lines carry no record
            if line.trim().is_empty() {
                continue;
            }

            // Missing keys and wrong types fail here too, not just bad JSON
            let record: ReviewRecord = serde_json::from_str(&line).with_context(|| {
                format!("Malformed review record at {}:{}", path.display(), idx + 1)
            })?;
            records.push(record);
        }

        tracing::debug!(
            "Read {} records from '{}'",
            records.len(),
            path.display()
        );
        Ok(records)
    }
}

/// Write records as JSON lines, overwriting `path`.
pub fn write_json_lines(path: &Path, records: &[ReviewRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    let mut out = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()
        .with_context(|| format!("Cannot flush '{}'", path.display()))?;

    tracing::debug!("Wrote {} records to '{}'", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_records_in_order() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.json");
        fs::write(
            &path,
            "{\"asin\":\"A1\",\"reviewerID\":\"U1\",\"reviewText\":\"good item\",\"summary\":\"nice\"}\n\
             {\"asin\":\"A2\",\"reviewerID\":\"U2\",\"reviewText\":\"bad item\",\"summary\":\"meh\"}\n",
        ).unwrap();

        let source  = JsonLinesSource::new(&path);
        assert_eq!(source.path(), path.as_path());

        let records = source.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].asin, "A1");
        assert_eq!(records[1].summary, "meh");
    }

    #[test]
    fn test_skips_blank_lines() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("val.json");
        fs::write(
            &path,
            "\n{\"asin\":\"A\",\"reviewerID\":\"U\",\"reviewText\":\"t\",\"summary\":\"s\"}\n\n",
        ).unwrap();

        assert_eq!(JsonLinesSource::new(&path).load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonLinesSource::new(dir.path().join("nope.json"))
            .load_all()
            .unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.json");
        fs::write(
            &path,
            "{\"asin\":\"A\",\"reviewerID\":\"U\",\"reviewText\":\"t\",\"summary\":\"s\"}\n{not json}\n",
        ).unwrap();

        let err = JsonLinesSource::new(&path).load_all().unwrap_err();
        assert!(err.to_string().ends_with(":2"), "unexpected error: {err}");
    }

    #[test]
    fn test_written_file_reads_back() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let records = vec![
            ReviewRecord::new("A1", "U1", "line one", "s1"),
            ReviewRecord::new("A2", "U2", "has \"quotes\"\nand newline", "s2"),
        ];

        write_json_lines(&path, &records).unwrap();
        assert_eq!(JsonLinesSource::new(&path).load_all().unwrap(), records);
    }
}
