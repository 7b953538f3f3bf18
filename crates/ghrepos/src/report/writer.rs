//! CSV output.
//!
//! The document is rendered fully in memory and written with a single call,
//! so a run that fails earlier never leaves a file behind.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::repo::RepoRecord;

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 7] = [
    "URL",
    "Private",
    "Fork",
    "Language",
    "LastCommitDate",
    "LastCommitYear",
    "Description",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    url: &'a str,
    private: bool,
    fork: bool,
    language: Option<&'a str>,
    last_commit_date: Option<String>,
    last_commit_year: Option<String>,
    description: Option<&'a str>,
}

impl<'a> From<&'a RepoRecord> for CsvRow<'a> {
    fn from(repo: &'a RepoRecord) -> Self {
        Self {
            url: &repo.html_url,
            private: repo.is_private(),
            fork: repo.is_fork,
            language: repo.language.as_deref(),
            last_commit_date: repo.last_commit_date.map(format_commit_date),
            last_commit_year: repo.last_commit_date.map(|d| format!("{:04}", d.year())),
            description: repo.description.as_deref(),
        }
    }
}

/// `2024-01-03T00:00:00Z`
fn format_commit_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render records as CSV. The header row is always present and every row,
/// the last included, ends with `\n`.
pub fn render_csv(records: &[RepoRecord]) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for repo in records {
        writer.serialize(CsvRow::from(repo))?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Write records to `path`, replacing any existing file.
pub fn write_report(path: impl AsRef<Path>, records: &[RepoRecord]) -> Result<()> {
    let path = path.as_ref();
    let failure = |source: csv::Error| ReportError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let bytes = render_csv(records).map_err(failure)?;
    fs::write(path, bytes).map_err(|e| failure(csv::Error::from(e)))?;

    tracing::info!(path = %path.display(), rows = records.len(), "Wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Visibility;

    fn record(full_name: &str) -> RepoRecord {
        RepoRecord {
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{full_name}"),
            visibility: Visibility::Public,
            is_fork: false,
            language: None,
            description: None,
            last_commit_date: None,
        }
    }

    fn render(records: &[RepoRecord]) -> String {
        String::from_utf8(render_csv(records).expect("render")).expect("utf-8")
    }

    #[test]
    fn test_header_written_without_records() {
        assert_eq!(
            render(&[]),
            "URL,Private,Fork,Language,LastCommitDate,LastCommitYear,Description\n"
        );
    }

    #[test]
    fn test_full_row() {
        let mut repo = record("acme/widgets");
        repo.visibility = Visibility::Private;
        repo.language = Some("Rust".to_string());
        repo.description = Some("Widgets".to_string());
        repo.last_commit_date = DateTime::from_timestamp(1_704_240_000, 0);

        let out = render(&[repo]);
        let lines: Vec<&str> = out.split_terminator('\n').collect();
        assert_eq!(
            lines[1],
            "https://github.com/acme/widgets,true,false,Rust,2024-01-03T00:00:00Z,2024,Widgets"
        );
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_absent_values_are_empty_fields() {
        let out = render(&[record("acme/bare")]);
        assert_eq!(
            out.lines().nth(1),
            Some("https://github.com/acme/bare,false,false,,,,")
        );
    }

    #[test]
    fn test_description_is_quoted_when_needed() {
        let mut repo = record("acme/quotes");
        repo.description = Some("Fast, \"safe\"\nand small".to_string());

        let out = render(&[repo]);
        assert!(out.contains("\"Fast, \"\"safe\"\"\nand small\"\n"));

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let row = reader.records().next().expect("row").expect("valid csv");
        assert_eq!(&row[6], "Fast, \"safe\"\nand small");
    }

    #[test]
    fn test_every_row_terminated() {
        let out = render(&[record("acme/a"), record("acme/b")]);
        assert_eq!(out.matches('\n').count(), 3);
        assert!(out.ends_with("false,false,,,,\n"));
    }

    #[test]
    fn test_write_report_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join(format!("ghrepos-missing-{}", std::process::id()))
            .join("nested")
            .join("out.csv");
        let err = write_report(&path, &[]).expect_err("missing parent");
        assert!(matches!(err, ReportError::OutputWriteFailure { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_report_writes_file() {
        let path = std::env::temp_dir().join(format!("ghrepos-writer-{}.csv", std::process::id()));
        write_report(&path, &[record("acme/a")]).expect("write");
        let contents = fs::read_to_string(&path).expect("read back");
        assert!(contents.starts_with("URL,Private,"));
        assert_eq!(contents.lines().count(), 2);
        let _ = fs::remove_file(path);
    }
}
