//! I/O operations for dotview point sets
//!
//! The viewer reads a single, header-less text format: an unsigned point
//! count followed by that many whitespace-separated `x y z` triples.

pub mod point_list;

pub use point_list::{PointListReader, PointListWriter};

use dotview_core::{PointSet, Result};
use std::path::Path;

/// Trait for reading point sets from files
pub trait PointCloudReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointSet>;
}

/// Trait for writing point sets to files
pub trait PointCloudWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &PointSet, path: P) -> Result<()>;
}

/// Read a point-list file
pub fn read_point_set<P: AsRef<Path>>(path: P) -> Result<PointSet> {
    PointListReader::read_point_cloud(path)
}
