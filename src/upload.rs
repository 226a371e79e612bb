use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::csv::{has_csv_extension, read_csv, CsvError};
use crate::dataflow::ComputedState;

type LoadResult = Option<Result<DataFrame, CsvError>>;

/// A user-provided CSV file and the table read from it.
///
/// Nothing happens until a file is provided: with no selection there is no table and
/// nothing to render. Selecting a `.csv` path starts a background read; other paths are
/// rejected and leave the current table untouched.
pub struct CsvUpload {
    path_input: String,
    source: Option<PathBuf>,
    table: ComputedState<LoadResult>,
    last_error: Option<String>,
}

impl Default for CsvUpload {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvUpload {
    pub fn new() -> Self {
        Self {
            path_input: String::new(),
            source: None,
            table: ComputedState::default(),
            last_error: None,
        }
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn path_input_mut(&mut self) -> &mut String {
        &mut self.path_input
    }

    /// Path of the file currently shown (or being read).
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether a file has been provided.
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.table.is_running()
    }

    /// The uploaded table, once it has been read successfully. Hidden while a newly
    /// selected file is still being read.
    pub fn table(&self) -> Option<&DataFrame> {
        if self.is_loading() {
            return None;
        }
        match self.table.value() {
            Some(Ok(df)) => Some(df),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Selects the path typed into the path field. An empty field is not a file, so
    /// this returns `Ok(false)` without changing anything.
    pub fn submit(&mut self) -> Result<bool, CsvError> {
        let typed = self.path_input.trim();
        if typed.is_empty() {
            return Ok(false);
        }
        let path = PathBuf::from(typed);
        self.select(path).map(|()| true)
    }

    /// Starts reading `path` in the background.
    pub fn select(&mut self, path: impl Into<PathBuf>) -> Result<(), CsvError> {
        let path = path.into();
        if !has_csv_extension(&path) {
            let err = CsvError::NotCsv(path);
            self.last_error = Some(err.to_string());
            log::warn!("rejected upload: {err}");
            return Err(err);
        }

        tracing::info!(path = %path.display(), "reading uploaded csv");
        self.path_input = path.display().to_string();
        self.source = Some(path.clone());
        self.last_error = None;
        self.table.spawn(move || Some(read_csv(&path)));
        Ok(())
    }

    /// Forgets the selected file and its table.
    pub fn clear(&mut self) {
        self.source = None;
        self.last_error = None;
        self.table.set(None);
    }

    /// Applies a finished background read. Returns `true` when a new result arrived.
    pub fn poll(&mut self) -> bool {
        let updated = self.table.poll();
        if updated {
            self.record_result();
        }
        updated
    }

    /// Blocks until the running read is done.
    pub fn wait(&mut self) -> bool {
        let updated = self.table.wait();
        if updated {
            self.record_result();
        }
        updated
    }

    fn record_result(&mut self) {
        match self.table.value() {
            Some(Ok(df)) => {
                tracing::info!(rows = df.height(), columns = df.width(), "uploaded csv ready");
                self.last_error = None;
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, "uploaded csv could not be read");
                self.last_error = Some(err.to_string());
            }
            None => {}
        }
    }
}

impl std::fmt::Debug for CsvUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvUpload")
            .field("source", &self.source)
            .field("loading", &self.is_loading())
            .field("rows", &self.table().map(|df| df.height()))
            .field("last_error", &self.last_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{write_sample, SAMPLE_ROWS};

    #[test]
    fn nothing_is_active_without_a_file() {
        let mut upload = CsvUpload::new();
        assert!(!upload.is_active());
        assert_eq!(upload.submit().unwrap(), false);
        *upload.path_input_mut() = "   ".to_owned();
        assert_eq!(upload.submit().unwrap(), false);
        assert!(!upload.is_active());
        assert!(!upload.poll());
        assert!(upload.table().is_none());
    }

    #[test]
    fn non_csv_files_are_rejected() {
        let mut upload = CsvUpload::new();
        let err = upload.select("notes.txt").unwrap_err();
        assert!(matches!(err, CsvError::NotCsv(_)));
        assert!(!upload.is_active());
        assert!(upload.last_error().is_some());
    }

    #[test]
    fn selecting_a_csv_loads_its_table() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(dir.path()).unwrap();

        let mut upload = CsvUpload::new();
        *upload.path_input_mut() = sample.path.display().to_string();
        assert!(upload.submit().unwrap());
        assert!(upload.is_active());
        upload.wait();

        let table = upload.table().expect("table loaded");
        assert_eq!(table.height(), SAMPLE_ROWS);
        assert!(table.equals(&sample.frame));
        assert_eq!(upload.source(), Some(sample.path.as_path()));
        assert!(upload.last_error().is_none());
    }

    #[test]
    fn rejected_selection_keeps_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(dir.path()).unwrap();

        let mut upload = CsvUpload::new();
        upload.select(&sample.path).unwrap();
        upload.wait();
        assert!(upload.select(dir.path().join("picture.png")).is_err());
        assert_eq!(upload.table().map(|df| df.height()), Some(SAMPLE_ROWS));
        assert_eq!(upload.source(), Some(sample.path.as_path()));
    }

    #[test]
    fn previous_table_is_hidden_while_a_new_file_loads() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let sample = write_sample(first.path()).unwrap();
        let next = write_sample(second.path()).unwrap();

        let mut upload = CsvUpload::new();
        upload.select(&sample.path).unwrap();
        upload.wait();
        assert!(upload.table().is_some());

        upload.select(&next.path).unwrap();
        assert!(upload.is_loading());
        assert!(upload.table().is_none());
        assert_eq!(upload.source(), Some(next.path.as_path()));

        upload.wait();
        assert_eq!(upload.table().map(|df| df.height()), Some(SAMPLE_ROWS));
    }

    #[test]
    fn unreadable_csv_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut upload = CsvUpload::new();
        upload.select(dir.path().join("missing.csv")).unwrap();
        upload.wait();
        assert!(upload.table().is_none());
        assert!(upload.last_error().is_some());
    }

    #[test]
    fn clear_forgets_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(dir.path()).unwrap();
        let mut upload = CsvUpload::new();
        upload.select(&sample.path).unwrap();
        upload.wait();
        upload.clear();
        assert!(!upload.is_active());
        assert!(upload.table().is_none());
    }
}
