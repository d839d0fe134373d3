use super::point_cloud::{ParseErrorKind, PointCloudError, parse_triple};
use super::traits::PointCloudFile;
use crate::core::models::point_cloud::PointCloud;
use std::io::{BufRead, Write};

/// Coordinate listings of the form `{x y z} {x y z} ...`, as written by molecular
/// viewers' selection dumps. Groups may be spread over several lines.
pub struct BraceFile;

impl PointCloudFile for BraceFile {
    type Error = PointCloudError;

    fn read_from(reader: &mut impl BufRead) -> Result<PointCloud, Self::Error> {
        let mut points = Vec::new();
        // Start line and accumulated text of the group being read.
        let mut group: Option<(usize, String)> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            let error = |kind, record| PointCloudError::Parse {
                line: line_number,
                record,
                kind,
            };

            let mut chars = line.char_indices();
            while let Some((offset, ch)) = chars.next() {
                match (ch, group.as_mut()) {
                    ('{', None) => group = Some((line_number, String::new())),
                    ('{', Some(_)) | ('}', None) => {
                        return Err(error(
                            ParseErrorKind::UnbalancedBrace { brace: ch },
                            points.len() + 1,
                        ));
                    }
                    ('}', Some((_, text))) => {
                        let point =
                            parse_triple(text).map_err(|kind| error(kind, points.len() + 1))?;
                        points.push(point);
                        group = None;
                    }
                    (_, Some((_, text))) => text.push(ch),
                    (_, None) if ch.is_whitespace() => {}
                    (_, None) => {
                        let text: String = line[offset..]
                            .chars()
                            .take_while(|c| !c.is_whitespace() && *c != '{' && *c != '}')
                            .collect();
                        return Err(error(
                            ParseErrorKind::UnexpectedText { text },
                            points.len() + 1,
                        ));
                    }
                }
            }
            if let Some((_, text)) = group.as_mut() {
                text.push(' ');
            }
        }

        match group {
            Some((line, _)) => Err(PointCloudError::Parse {
                line,
                record: points.len() + 1,
                kind: ParseErrorKind::UnbalancedBrace { brace: '{' },
            }),
            None => Ok(PointCloud::new(points)),
        }
    }

    fn write_to(cloud: &PointCloud, writer: &mut impl Write) -> Result<(), Self::Error> {
        let groups: Vec<String> = cloud
            .iter()
            .map(|p| format!("{{{} {} {}}}", p.x, p.y, p.z))
            .collect();
        writeln!(writer, "{}", groups.join(" "))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn read(text: &str) -> Result<PointCloud, PointCloudError> {
        BraceFile::read_from(&mut text.as_bytes())
    }

    fn parse_error(text: &str) -> (usize, usize, ParseErrorKind) {
        match read(text) {
            Err(PointCloudError::Parse { line, record, kind }) => (line, record, kind),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn reads_single_line_listing() {
        let cloud = read("{1.0 2.0 3.0} {-4.5 0 1e2}\n").unwrap();
        assert_eq!(
            cloud.points(),
            &[Point3::new(1.0, 2.0, 3.0), Point3::new(-4.5, 0.0, 100.0)]
        );
    }

    #[test]
    fn groups_may_span_lines() {
        let cloud = read("{1 2\n3}\n  {4   5 6}").unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.points()[0], Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn unbalanced_braces_are_reported_with_position() {
        assert_eq!(
            parse_error("{1 2 3} {4 5 6"),
            (1, 2, ParseErrorKind::UnbalancedBrace { brace: '{' })
        );
        assert_eq!(
            parse_error("{1 2 3}\n{4 {5 6}"),
            (2, 2, ParseErrorKind::UnbalancedBrace { brace: '{' })
        );
        assert_eq!(
            parse_error("{1 2 3}}"),
            (1, 2, ParseErrorKind::UnbalancedBrace { brace: '}' })
        );
    }

    #[test]
    fn stray_text_and_bad_groups_are_rejected() {
        assert_eq!(
            parse_error("{1 2 3} atoms {4 5 6}"),
            (
                1,
                2,
                ParseErrorKind::UnexpectedText {
                    text: "atoms".to_string()
                }
            )
        );
        assert_eq!(
            parse_error("{1 2 3}\n\n{4 5 6 7}"),
            (3, 2, ParseErrorKind::WrongComponentCount { found: 4 })
        );
    }

    #[test]
    fn written_clouds_read_back_unchanged() {
        let cloud = PointCloud::new(vec![Point3::new(1.5, -2.0, 0.25), Point3::new(3.0, 4.0, 5.0)]);
        let mut buffer = Vec::new();
        BraceFile::write_to(&cloud, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "{1.5 -2 0.25} {3 4 5}\n");
        assert_eq!(read(&String::from_utf8(buffer).unwrap()).unwrap(), cloud);
    }
}
