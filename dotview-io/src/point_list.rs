//! Count-prefixed point list format
//!
//! ```text
//! 3
//! 0 0 0
//! 1 0 0
//! 0 1 0
//! ```
//!
//! Tokens are separated by arbitrary whitespace; line breaks carry no
//! meaning. Anything after the declared points is ignored.

use crate::{PointCloudReader, PointCloudWriter};
use dotview_core::{Error, Point3f, PointSet, Result};
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;

/// Reader for point-list files
pub struct PointListReader;

impl PointListReader {
    /// Parse point-list text already held in memory
    pub fn parse(content: &str) -> Result<PointSet> {
        let mut tokens = content.split_whitespace();

        let count_token = tokens
            .next()
            .ok_or_else(|| Error::MalformedData("missing point count".to_string()))?;
        let count: usize = count_token.parse().map_err(|_| {
            Error::MalformedData(format!("invalid point count '{}'", count_token))
        })?;

        log::info!("Found {} data points", count);

        // The count is untrusted; points are only stored as their coordinates arrive.
        let mut points = Vec::new();
        for i in 0..count {
            let mut coord = |axis: &str| -> Result<f32> {
                let token = tokens.next().ok_or_else(|| {
                    Error::MalformedData(format!(
                        "expected {} points but data ended at point {} ({})",
                        count, i, axis
                    ))
                })?;
                token.parse::<f32>().map_err(|_| {
                    Error::MalformedData(format!(
                        "invalid {} coordinate '{}' for point {}",
                        axis, token, i
                    ))
                })
            };

            let x = coord("x")?;
            let y = coord("y")?;
            let z = coord("z")?;
            log::debug!("({:.6}, {:.6}, {:.6})", x, y, z);
            points.push(Point3f::new(x, y, z));
        }

        Ok(PointSet::from_points(points))
    }
}

impl PointCloudReader for PointListReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointSet> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => Error::MalformedData(format!(
                "'{}' is not valid UTF-8 text",
                path.display()
            )),
            _ => Error::Io(e),
        })?;
        Self::parse(&content)
    }
}

/// Writer for point-list files
pub struct PointListWriter;

impl PointListWriter {
    /// Write a point set in point-list format to any writer
    pub fn write_to<W: Write>(cloud: &PointSet, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", cloud.len())?;
        for point in cloud {
            writeln!(writer, "{} {} {}", point.x, point.y, point.z)?;
        }
        Ok(())
    }
}

impl PointCloudWriter for PointListWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &PointSet, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(cloud, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
