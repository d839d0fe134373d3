use crate::core::models::point_cloud::PointCloud;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing point-cloud file formats.
///
/// Implementors handle the format-specific parsing and serialization; the path-based
/// helpers only add buffering around them.
pub trait PointCloudFile {
    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads a point cloud from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed, unlabelled point cloud in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<PointCloud, Self::Error>;

    /// Writes a point cloud to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(cloud: &PointCloud, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a point cloud from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<PointCloud, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a point cloud to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(cloud, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
