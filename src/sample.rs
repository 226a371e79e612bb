//! The fixed people table the introduction notebook writes to disk.

use std::path::{Path, PathBuf};

use polars::prelude::{df, DataFrame, PolarsResult};

use crate::csv::{write_csv, CsvError};

pub const SAMPLE_FILE_NAME: &str = "Sample.csv";
pub const SAMPLE_COLUMNS: [&str; 5] = ["Name", "Age", "City", "Salary", "Department"];
pub const SAMPLE_ROWS: usize = 10;

/// Ten employees with name, age, city, salary and department.
pub fn sample_frame() -> PolarsResult<DataFrame> {
    df!(
        "Name" => [
            "Alice Johnson", "Bob Smith", "Charlie Brown", "Diana Prince",
            "Edward Elric", "Fiona Green", "George Lucas", "Hannah Baker",
            "Ian Wright", "Julia Roberts",
        ],
        "Age" => [29_i64, 34, 22, 31, 27, 45, 38, 26, 33, 41],
        "City" => [
            "New York", "Los Angeles", "Chicago", "Houston",
            "Phoenix", "Philadelphia", "San Antonio", "San Diego",
            "Dallas", "San Jose",
        ],
        "Salary" => [55000_i64, 72000, 48000, 62000, 50000, 80000, 90000, 53000, 60000, 75000],
        "Department" => [
            "Marketing", "IT", "Finance", "HR",
            "Engineering", "Sales", "Management", "IT",
            "Finance", "Marketing",
        ]
    )
}

/// The sample table together with the file it was written to.
#[derive(Debug, Clone)]
pub struct SampleFile {
    pub path: PathBuf,
    pub frame: DataFrame,
}

/// Builds the sample table and writes it to `dir/Sample.csv`.
pub fn write_sample(dir: &Path) -> Result<SampleFile, CsvError> {
    let mut frame = sample_frame()?;
    let path = dir.join(SAMPLE_FILE_NAME);
    write_csv(&mut frame, &path)?;
    tracing::info!(path = %path.display(), rows = frame.height(), "wrote sample table");
    Ok(SampleFile { path, frame })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    #[test]
    fn sample_has_ten_rows_and_five_named_columns() {
        let df = sample_frame().unwrap();
        assert_eq!(df.height(), SAMPLE_ROWS);
        assert_eq!(df.width(), SAMPLE_COLUMNS.len());
        let names: Vec<&str> = df.get_column_names().iter().map(|name| name.as_str()).collect();
        assert_eq!(names, SAMPLE_COLUMNS);
        for column in df.get_columns() {
            assert_eq!(column.len(), SAMPLE_ROWS);
        }
    }

    #[test]
    fn numeric_columns_are_integers() {
        let df = sample_frame().unwrap();
        assert_eq!(df.column("Age").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("Salary").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("Name").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn write_sample_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(dir.path()).unwrap();
        assert_eq!(sample.path, dir.path().join("Sample.csv"));
        let text = std::fs::read_to_string(&sample.path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Name,Age,City,Salary,Department"));
        assert_eq!(lines.next(), Some("Alice Johnson,29,New York,55000,Marketing"));
        assert_eq!(text.lines().count(), SAMPLE_ROWS + 1);
    }

    #[test]
    fn writing_into_a_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_sample(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CsvError::Io { .. }));
    }
}
