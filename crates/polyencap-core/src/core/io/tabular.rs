use super::point_cloud::{ParseErrorKind, PointCloudError, parse_triple};
use super::traits::PointCloudFile;
use crate::core::models::point_cloud::PointCloud;
use std::io::{BufRead, Read, Write};

/// 1-based physical line of the record starting at or after `byte`.
///
/// Blank lines are skipped by the CSV reader without advancing its line counter, and a
/// record's start offset may still point at them, so line breaks are skipped first.
fn line_at(text: &str, byte: usize) -> usize {
    let bytes = text.as_bytes();
    let mut start = byte.min(bytes.len());
    while start < bytes.len() && matches!(bytes[start], b'\n' | b'\r') {
        start += 1;
    }
    bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1
}

/// CSV exports with one atom per row and the position in a `[x y z]` field.
///
/// The header row is skipped. Rows may carry extra columns (such as a leading index);
/// the first field that is wrapped in square brackets holds the coordinates.
pub struct TabularFile;

impl PointCloudFile for TabularFile {
    type Error = PointCloudError;

    fn read_from(reader: &mut impl BufRead) -> Result<PointCloud, Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut points = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            let record_number = index + 1;
            let line = record
                .position()
                .map_or(record_number + 1, |position| {
                    line_at(&text, position.byte() as usize)
                });

            let field = record
                .iter()
                .map(str::trim)
                .find(|field| field.starts_with('[') && field.ends_with(']'))
                .ok_or(PointCloudError::Parse {
                    line,
                    record: record_number,
                    kind: ParseErrorKind::MissingCoordinateField,
                })?;
            let inner = &field[1..field.len() - 1];
            let point = parse_triple(inner).map_err(|kind| PointCloudError::Parse {
                line,
                record: record_number,
                kind,
            })?;
            points.push(point);
        }
        Ok(PointCloud::new(points))
    }

    fn write_to(cloud: &PointCloud, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["0"])?;
        for p in cloud {
            csv_writer.write_record([format!("[{} {} {}]", p.x, p.y, p.z)])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
