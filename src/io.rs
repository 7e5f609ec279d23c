//! CSV loaders for experiment data.
//!
//! These sit outside the statistical core: they turn a CSV file into plain
//! `Vec<f64>` groups (or a validated [`Sample`]) and never run any test
//! themselves.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::types::Sample;

/// Errors raised while loading experiment data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be read.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The requested column is not in the header row.
    #[error("column `{column}` not found (available: {available})")]
    MissingColumn {
        /// Requested column.
        column: String,
        /// Comma-separated header names.
        available: String,
    },

    /// A cell could not be parsed as a number.
    #[error("row {row}, column `{column}`: `{value}` is not a number")]
    InvalidNumber {
        /// 1-based data row (header excluded).
        row: usize,
        /// Column name.
        column: String,
        /// Offending cell text.
        value: String,
    },

    /// The loaded values do not form a valid sample.
    #[error(transparent)]
    Core(#[from] crate::Error),

    /// A group label selected no rows.
    #[error("no rows with {column} = `{label}`")]
    EmptyGroup {
        /// Group column.
        column: String,
        /// Label that matched nothing.
        label: String,
    },
}

/// Read one numeric column from a CSV file with a header row.
///
/// Blank cells are rejected like any other unparsable value.
pub fn load_metric_column(path: impl AsRef<Path>, metric: &str) -> Result<Vec<f64>, LoadError> {
    let path = path.as_ref();
    let values = read_metric_column(open(path)?, metric)?;
    debug!(path = %path.display(), metric, n = values.len(), "loaded column");
    Ok(values)
}

/// Read one numeric column and validate it into a [`Sample`].
///
/// `NaN` and `inf` cells parse as numbers, so they are caught here rather
/// than by the CSV reader.
pub fn load_sample(path: impl AsRef<Path>, metric: &str) -> Result<Sample, LoadError> {
    Ok(Sample::new(load_metric_column(path, metric)?)?)
}

/// Read a long-format CSV and split `metric` by the labels in `group_column`.
///
/// Rows whose group label is neither `control_label` nor `test_label` are
/// skipped. Returns `(control, test)`.
pub fn load_grouped(
    path: impl AsRef<Path>,
    metric: &str,
    group_column: &str,
    control_label: &str,
    test_label: &str,
) -> Result<(Vec<f64>, Vec<f64>), LoadError> {
    let path = path.as_ref();
    let groups = read_grouped(
        open(path)?,
        metric,
        group_column,
        control_label,
        test_label,
    )?;
    debug!(
        path = %path.display(),
        metric,
        n_control = groups.0.len(),
        n_test = groups.1.len(),
        "loaded groups"
    );
    Ok(groups)
}

/// Reader-based variant of [`load_metric_column`].
pub fn read_metric_column<R: Read>(reader: R, metric: &str) -> Result<Vec<f64>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let metric_idx = column_index(reader.headers()?, metric)?;

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        values.push(parse_cell(&record, metric_idx, row + 1, metric)?);
    }
    Ok(values)
}

/// Reader-based variant of [`load_grouped`].
pub fn read_grouped<R: Read>(
    reader: R,
    metric: &str,
    group_column: &str,
    control_label: &str,
    test_label: &str,
) -> Result<(Vec<f64>, Vec<f64>), LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?;
    let metric_idx = column_index(headers, metric)?;
    let group_idx = column_index(headers, group_column)?;

    let mut control = Vec::new();
    let mut test = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let target = match record.get(group_idx) {
            Some(label) if label == control_label => &mut control,
            Some(label) if label == test_label => &mut test,
            _ => continue,
        };
        target.push(parse_cell(&record, metric_idx, row + 1, metric)?);
    }

    for (values, label) in [(&control, control_label), (&test, test_label)] {
        if values.is_empty() {
            return Err(LoadError::EmptyGroup {
                column: group_column.to_string(),
                label: label.to_string(),
            });
        }
    }
    Ok((control, test))
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn {
            column: column.to_string(),
            available: headers.iter().collect::<Vec<_>>().join(", "),
        })
}

fn parse_cell(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    column: &str,
) -> Result<f64, LoadError> {
    let cell = record.get(idx).unwrap_or_default();
    cell.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WIDE: &str = "Impression,Click,Purchase,Earning\n\
                        82529.46,6090.08,665.21,2311.28\n\
                        98050.45,3382.86,315.08,1742.81\n\
                        82696.02,4167.97,458.08,1797.83\n";

    const LONG: &str = "Purchase,Group\n\
                        665.21,Control\n\
                        315.08,Control\n\
                        702.16,Test\n\
                        458.08,Control\n\
                        640.00,Test\n\
                        12.00,Holdout\n";

    #[test]
    fn test_read_metric_column() {
        let values = read_metric_column(WIDE.as_bytes(), "Purchase").unwrap();
        assert_eq!(values, vec![665.21, 315.08, 458.08]);
    }

    #[test]
    fn test_missing_column() {
        let err = read_metric_column(WIDE.as_bytes(), "Revenue").unwrap_err();
        match err {
            LoadError::MissingColumn { column, available } => {
                assert_eq!(column, "Revenue");
                assert!(available.contains("Earning"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_number() {
        let csv = "Purchase\n1.5\nn/a\n";
        let err = read_metric_column(csv.as_bytes(), "Purchase").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { row: 2, .. }));
    }

    #[test]
    fn test_read_grouped_skips_other_labels() {
        let (control, test) =
            read_grouped(LONG.as_bytes(), "Purchase", "Group", "Control", "Test").unwrap();
        assert_eq!(control, vec![665.21, 315.08, 458.08]);
        assert_eq!(test, vec![702.16, 640.0]);
    }

    #[test]
    fn test_empty_group() {
        let err = read_grouped(LONG.as_bytes(), "Purchase", "Group", "Control", "B").unwrap_err();
        assert!(matches!(err, LoadError::EmptyGroup { ref label, .. } if label == "B"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WIDE.as_bytes()).unwrap();
        let values = load_metric_column(file.path(), "Click").unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[1], 3382.86);
    }

    #[test]
    fn test_load_sample_rejects_non_finite_cells() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Purchase\n1.5\n2.5\nNaN\n").unwrap();

        let values = load_metric_column(file.path(), "Purchase").unwrap();
        assert!(values[2].is_nan());

        let err = load_sample(file.path(), "Purchase").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Core(crate::Error::NonFiniteInput { index: 2, .. })
        ));
        assert!(err.to_string().contains("index 2"));
    }

    #[test]
    fn test_load_sample() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WIDE.as_bytes()).unwrap();
        let sample = load_sample(file.path(), "Earning").unwrap();
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_metric_column(dir.path().join("absent.csv"), "Click").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
