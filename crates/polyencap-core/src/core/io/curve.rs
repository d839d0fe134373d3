use crate::core::models::curve::EncapsulationCurve;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Serialize)]
struct CurveRow {
    #[serde(rename = "Fraction Inside")]
    fraction_inside: String,
    #[serde(rename = "Encapsulation Efficiency (%)")]
    efficiency: String,
}

/// Writes `curve` as CSV, one row per threshold, both columns rounded to two decimals.
pub fn write_curve_csv(
    curve: &EncapsulationCurve,
    writer: impl Write,
) -> Result<(), CurveExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in curve.iter() {
        csv_writer.serialize(CurveRow {
            fraction_inside: format!("{:.2}", point.threshold),
            efficiency: format!("{:.2}", point.percentage),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_curve_csv_to_path(
    curve: &EncapsulationCurve,
    path: impl AsRef<Path>,
) -> Result<(), CurveExportError> {
    let file = File::create(path)?;
    write_curve_csv(curve, BufWriter::new(file))
}
