use super::traits::PointCloudFile;
use super::{BraceFile, TabularFile};
use crate::core::models::point_cloud::PointCloud;
use nalgebra::Point3;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// The text conventions a point cloud can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointCloudFormat {
    /// CSV with a header row; each data row has a `[x y z]` field.
    Tabular,
    /// Whitespace-separated `{x y z}` groups.
    BraceDelimited,
}

impl PointCloudFormat {
    /// Guesses the format of `text` read from `path`.
    ///
    /// A `.csv` extension selects [`Tabular`](Self::Tabular); otherwise text starting
    /// with `{` is [`BraceDelimited`](Self::BraceDelimited) and anything else is tabular.
    pub fn detect(path: &Path, text: &str) -> Self {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::Tabular
        } else if text.trim_start().starts_with('{') {
            Self::BraceDelimited
        } else {
            Self::Tabular
        }
    }
}

#[derive(Debug, Error)]
pub enum PointCloudError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error on line {line} (record {record}): {kind}")]
    Parse {
        line: usize,
        record: usize,
        kind: ParseErrorKind,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("Row has no bracketed '[x y z]' coordinate field")]
    MissingCoordinateField,
    #[error("Expected 3 coordinates, found {found}")]
    WrongComponentCount { found: usize },
    #[error("Invalid number '{value}'")]
    InvalidNumber { value: String },
    #[error("Coordinate '{value}' is not finite")]
    NonFinite { value: String },
    #[error("Unbalanced brace '{brace}'")]
    UnbalancedBrace { brace: char },
    #[error("Unexpected text '{text}' outside a brace group")]
    UnexpectedText { text: String },
}

/// Parses three finite reals separated by whitespace and/or commas.
pub(super) fn parse_triple(text: &str) -> Result<Point3<f64>, ParseErrorKind> {
    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.len() != 3 {
        return Err(ParseErrorKind::WrongComponentCount {
            found: tokens.len(),
        });
    }

    let mut coords = [0.0; 3];
    for (coord, token) in coords.iter_mut().zip(&tokens) {
        let value: f64 = token.parse().map_err(|_| ParseErrorKind::InvalidNumber {
            value: token.to_string(),
        })?;
        if !value.is_finite() {
            return Err(ParseErrorKind::NonFinite {
                value: token.to_string(),
            });
        }
        *coord = value;
    }
    Ok(Point3::from(coords))
}

/// Parses `text` in the given format into an unlabelled point cloud.
///
/// Blank input yields an empty cloud; deciding whether that is acceptable is left to
/// the caller.
///
/// # Errors
///
/// Returns [`PointCloudError::Parse`] with the offending line and record for malformed
/// input, or [`PointCloudError::Csv`] for CSV framing errors.
pub fn parse_point_cloud(
    text: &str,
    format: PointCloudFormat,
) -> Result<PointCloud, PointCloudError> {
    let mut bytes = text.as_bytes();
    match format {
        PointCloudFormat::Tabular => TabularFile::read_from(&mut bytes),
        PointCloudFormat::BraceDelimited => BraceFile::read_from(&mut bytes),
    }
}

/// Reads and parses the file at `path`, labelling the cloud with the file stem.
///
/// With `format` set to `None` the format is detected from the path and content.
pub fn read_point_cloud(
    path: &Path,
    format: Option<PointCloudFormat>,
) -> Result<PointCloud, PointCloudError> {
    let (cloud, format) = match format {
        Some(PointCloudFormat::Tabular) => (
            TabularFile::read_from_path(path)?,
            PointCloudFormat::Tabular,
        ),
        Some(PointCloudFormat::BraceDelimited) => (
            BraceFile::read_from_path(path)?,
            PointCloudFormat::BraceDelimited,
        ),
        None => {
            let text = std::fs::read_to_string(path)?;
            let format = PointCloudFormat::detect(path, &text);
            (parse_point_cloud(&text, format)?, format)
        }
    };
    debug!(
        "Read {} points from '{}' ({:?}).",
        cloud.len(),
        path.display(),
        format
    );

    Ok(match path.file_stem() {
        Some(stem) => cloud.with_label(stem.to_string_lossy()),
        None => cloud,
    })
}
