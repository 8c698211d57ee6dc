//! Core data structures for shapefile format components.
//!
//! This module defines the fundamental types used throughout the library:
//! - The main file header and per-record header
//! - Fixed-size primitives (points, bounding boxes, Z/M ranges)
//! - Shape and part type enumerations
//! - Reader configuration

use std::fmt;

use super::error::{Result, ShapefileError};
use super::geometry::Geometry;

/// Size of the main file header in bytes.
pub const FILE_HEADER_LEN: usize = 100;

/// Size of the main file header in 16-bit words.
pub const FILE_HEADER_WORDS: i64 = 50;

/// Size of a record header (record number + content length) in 16-bit words.
pub const RECORD_HEADER_WORDS: i64 = 4;

/// Magic code stored big-endian at offset 0.
pub const FILE_CODE: i32 = 9994;

/// The only format version this crate understands.
pub const FILE_VERSION: i32 = 1000;

/// Shape type tags defined by the format.
///
/// The same codes are used for the advisory header field and for the
/// leading tag of every record body. Only the record tag selects a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Null = 0,
    Point = 1,
    PolyLine = 3,
    Polygon = 5,
    MultiPoint = 8,
    PointZ = 11,
    PolyLineZ = 13,
    PolygonZ = 15,
    MultiPointZ = 18,
    PointM = 21,
    PolyLineM = 23,
    PolygonM = 25,
    MultiPointM = 28,
    MultiPatch = 31,
}

impl ShapeType {
    /// Returns the integer tag stored in the file.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether records of this type may carry elevation (Z) values.
    pub fn has_z(self) -> bool {
        matches!(
            self,
            ShapeType::PointZ
                | ShapeType::PolyLineZ
                | ShapeType::PolygonZ
                | ShapeType::MultiPointZ
                | ShapeType::MultiPatch
        )
    }

    /// Whether records of this type may carry measure (M) values.
    ///
    /// Every Z type also has an optional M section.
    pub fn has_m(self) -> bool {
        self.has_z()
            || matches!(
                self,
                ShapeType::PointM
                    | ShapeType::PolyLineM
                    | ShapeType::PolygonM
                    | ShapeType::MultiPointM
            )
    }
}

impl TryFrom<i32> for ShapeType {
    type Error = i32;

    /// Maps a raw tag to a shape type, handing the unrecognized code back on failure.
    fn try_from(code: i32) -> std::result::Result<Self, i32> {
        match code {
            0 => Ok(Self::Null),
            1 => Ok(Self::Point),
            3 => Ok(Self::PolyLine),
            5 => Ok(Self::Polygon),
            8 => Ok(Self::MultiPoint),
            11 => Ok(Self::PointZ),
            13 => Ok(Self::PolyLineZ),
            15 => Ok(Self::PolygonZ),
            18 => Ok(Self::MultiPointZ),
            21 => Ok(Self::PointM),
            23 => Ok(Self::PolyLineM),
            25 => Ok(Self::PolygonM),
            28 => Ok(Self::MultiPointM),
            31 => Ok(Self::MultiPatch),
            other => Err(other),
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ShapeType::Null => "NULL_SHAPE",
            ShapeType::Point => "POINT",
            ShapeType::PolyLine => "POLY_LINE",
            ShapeType::Polygon => "POLYGON",
            ShapeType::MultiPoint => "MULTI_POINT",
            ShapeType::PointZ => "POINT_Z",
            ShapeType::PolyLineZ => "POLY_LINE_Z",
            ShapeType::PolygonZ => "POLYGON_Z",
            ShapeType::MultiPointZ => "MULTI_POINT_Z",
            ShapeType::PointM => "POINT_M",
            ShapeType::PolyLineM => "POLY_LINE_M",
            ShapeType::PolygonM => "POLYGON_M",
            ShapeType::MultiPointM => "MULTI_POINT_M",
            ShapeType::MultiPatch => "MULTI_PATCH",
        };
        f.write_str(name)
    }
}

/// Surface primitive of a single MultiPatch part.
///
/// Files in the wild use codes outside the documented set, so unrecognized
/// values are kept verbatim instead of failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartType {
    TriangleStrip,
    TriangleFan,
    OuterRing,
    InnerRing,
    FirstRing,
    Ring,
    Unknown(i32),
}

impl PartType {
    /// Returns the integer code stored in the file.
    pub fn code(self) -> i32 {
        match self {
            PartType::TriangleStrip => 0,
            PartType::TriangleFan => 1,
            PartType::OuterRing => 2,
            PartType::InnerRing => 3,
            PartType::FirstRing => 4,
            PartType::Ring => 5,
            PartType::Unknown(code) => code,
        }
    }
}

impl From<i32> for PartType {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::TriangleStrip,
            1 => Self::TriangleFan,
            2 => Self::OuterRing,
            3 => Self::InnerRing,
            4 => Self::FirstRing,
            5 => Self::Ring,
            other => Self::Unknown(other),
        }
    }
}

/// A planar coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding rectangle stored ahead of most geometries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// Minimum and maximum elevation of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZRange {
    pub min: f64,
    pub max: f64,
}

/// Minimum and maximum measure of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MRange {
    pub min: f64,
    pub max: f64,
}

/// Parsed 100-byte main file header.
///
/// The shape type is kept as its raw code: the header field is advisory and
/// unknown codes are accepted here, only record tags are checked.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    /// Total file length in 16-bit words, header included.
    pub file_length: i32,
    pub version: i32,
    pub shape_type_code: i32,
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    pub m_min: f64,
    pub m_max: f64,
}

impl FileHeader {
    /// The declared dominant shape type, if the code is a known one.
    pub fn shape_type(&self) -> Option<ShapeType> {
        ShapeType::try_from(self.shape_type_code).ok()
    }

    /// Total declared file length in bytes.
    pub fn file_length_bytes(&self) -> i64 {
        i64::from(self.file_length) * 2
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min,
            y_min: self.y_min,
            x_max: self.x_max,
            y_max: self.y_max,
        }
    }

    pub fn z_range(&self) -> ZRange {
        ZRange { min: self.z_min, max: self.z_max }
    }

    pub fn m_range(&self) -> MRange {
        MRange { min: self.m_min, max: self.m_max }
    }
}

/// The 8-byte header preceding every record body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// 1-based record number as stored in the file.
    pub record_number: i32,
    /// Body length in 16-bit words.
    pub content_length: i32,
}

impl RecordHeader {
    /// Body length in bytes.
    ///
    /// Fails with [`ShapefileError::InvalidCount`] for a negative length.
    pub fn content_bytes(&self) -> Result<usize> {
        usize::try_from(self.content_length)
            .map(|words| words * 2)
            .map_err(|_| ShapefileError::InvalidCount {
                field: "content length",
                value: self.content_length,
                record_number: self.record_number,
            })
    }
}

/// A record header paired with its decoded geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub header: RecordHeader,
    pub geometry: Geometry,
}

impl Record {
    pub fn record_number(&self) -> i32 {
        self.header.record_number
    }

    pub fn shape_type(&self) -> ShapeType {
        self.geometry.shape_type()
    }
}

/// Options accepted by [`ShapefileReader`](crate::ShapefileReader).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderOptions {
    /// Require record N (in file order) to carry record number N.
    ///
    /// Off by default: stored record numbers are informational.
    pub check_record_numbers: bool,
}
