//! Reading and writing CSV files as polars dataframes.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, PolarsError, SerReader, SerWriter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("'{}' is not a .csv file", .0.display())]
    NotCsv(PathBuf),
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("csv error: {0}")]
    Polars(#[from] PolarsError),
}

/// Case-insensitive check for a `.csv` extension.
pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Reads a comma separated file with a header row.
pub fn read_csv(path: &Path) -> Result<DataFrame, CsvError> {
    let io_error = |source: io::Error| CsvError::Io {
        path: path.to_owned(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    if file.metadata().map_err(io_error)?.is_dir() {
        return Err(io_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "is a directory",
        )));
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(file)
        .finish()?;
    Ok(df)
}

/// Writes `df` with a header row and no index column, replacing an existing file.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), CsvError> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer).include_header(true).finish(df)?;
    std::fs::write(path, buffer).map_err(|source| CsvError::Io {
        path: path.to_owned(),
        source,
    })
}
