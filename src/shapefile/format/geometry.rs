//! Per-variant geometry decoders.
//!
//! Each decoder starts right after the record's shape-type tag and is built
//! from the primitive and array readers.
//!
//! # Optional sections
//!
//! Z and M variants end with sections that writers may omit:
//!
//! ```text
//! [Box][NumParts][NumPoints][Parts][Points]   ← always present
//! [ZRange][ZArray]                            ← Z variants, optional
//! [MRange][MArray]                            ← M and Z variants, optional
//! ```
//!
//! Nothing in the record flags them. Presence is decided from the bytes
//! left in the declared content length: none left means absent, enough for
//! the whole section means present, anything in between is `Truncated`.

use byteorder::LittleEndian;
use log::{trace, warn};

use crate::shapefile::types::error::{Result, ShapefileError};
use crate::shapefile::types::geometry::*;
use crate::shapefile::types::models::{PartType, ShapeType};
use crate::shapefile::utils::RecordBody;
use super::arrays;
use super::primitives::{self, F64_LEN};

/// Outcome of checking the remaining record bytes for an optional section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
    /// Some bytes remain but fewer than the section needs.
    Partial,
}

impl Presence {
    /// Classifies a section of `section_len` bytes given `remaining` record bytes.
    pub fn of(remaining: usize, section_len: usize) -> Self {
        if remaining == 0 {
            Presence::Absent
        } else if remaining >= section_len {
            Presence::Present
        } else {
            Presence::Partial
        }
    }
}

/// Decodes the body of a record whose tag was `shape_type`.
pub fn decode(shape_type: ShapeType, body: &mut RecordBody) -> Result<Geometry> {
    let geometry = match shape_type {
        ShapeType::Null => Geometry::Null,
        ShapeType::Point => Geometry::Point(primitives::read_point(body)?),
        ShapeType::MultiPoint => Geometry::MultiPoint(decode_multi_point(body)?),
        ShapeType::PolyLine => Geometry::PolyLine(decode_multi_part(body)?),
        ShapeType::Polygon => Geometry::Polygon(decode_multi_part(body)?),
        ShapeType::PointM => Geometry::PointM(decode_point_m(body)?),
        ShapeType::MultiPointM => Geometry::MultiPointM(decode_multi_point_m(body)?),
        ShapeType::PolyLineM => Geometry::PolyLineM(decode_multi_part_m(body)?),
        ShapeType::PolygonM => Geometry::PolygonM(decode_multi_part_m(body)?),
        ShapeType::PointZ => Geometry::PointZ(decode_point_z(body)?),
        ShapeType::MultiPointZ => Geometry::MultiPointZ(decode_multi_point_z(body)?),
        ShapeType::PolyLineZ => Geometry::PolyLineZ(decode_multi_part_z(body)?),
        ShapeType::PolygonZ => Geometry::PolygonZ(decode_multi_part_z(body)?),
        ShapeType::MultiPatch => Geometry::MultiPatch(decode_multi_patch(body)?),
    };
    Ok(geometry)
}

fn decode_multi_point(body: &mut RecordBody) -> Result<MultiPoint> {
    let bbox = primitives::read_bbox(body)?;
    let points = arrays::read_counted_points(body)?;
    Ok(MultiPoint { bbox, points })
}

fn decode_multi_part(body: &mut RecordBody) -> Result<MultiPart> {
    let bbox = primitives::read_bbox(body)?;
    let (parts, points) = arrays::read_parts_and_points(body)?;
    Ok(MultiPart { bbox, parts, points })
}

fn decode_point_m(body: &mut RecordBody) -> Result<PointM> {
    let point = primitives::read_point(body)?;
    let m = read_optional_scalar(body, "point measure")?;
    Ok(PointM { x: point.x, y: point.y, m })
}

fn decode_multi_point_m(body: &mut RecordBody) -> Result<MultiPointM> {
    let MultiPoint { bbox, points } = decode_multi_point(body)?;
    let measures = read_optional_measures(body, points.len())?;
    Ok(MultiPointM { bbox, points, measures })
}

fn decode_multi_part_m(body: &mut RecordBody) -> Result<MultiPartM> {
    let MultiPart { bbox, parts, points } = decode_multi_part(body)?;
    let measures = read_optional_measures(body, points.len())?;
    Ok(MultiPartM { bbox, parts, points, measures })
}

fn decode_point_z(body: &mut RecordBody) -> Result<PointZ> {
    let point = primitives::read_point(body)?;
    let z = body.read_f64::<LittleEndian>()?;
    let m = read_optional_scalar(body, "point measure")?;
    Ok(PointZ { x: point.x, y: point.y, z, m })
}

fn decode_multi_point_z(body: &mut RecordBody) -> Result<MultiPointZ> {
    let MultiPoint { bbox, points } = decode_multi_point(body)?;
    let elevations = read_optional_elevations(body, points.len())?;
    let measures = read_optional_measures(body, points.len())?;
    Ok(MultiPointZ { bbox, points, elevations, measures })
}

fn decode_multi_part_z(body: &mut RecordBody) -> Result<MultiPartZ> {
    let MultiPart { bbox, parts, points } = decode_multi_part(body)?;
    let elevations = read_optional_elevations(body, points.len())?;
    let measures = read_optional_measures(body, points.len())?;
    Ok(MultiPartZ { bbox, parts, points, elevations, measures })
}

/// MultiPatch stores one part type per part between the offsets and the points.
fn decode_multi_patch(body: &mut RecordBody) -> Result<MultiPatch> {
    let bbox = primitives::read_bbox(body)?;
    let (num_parts, num_points) = arrays::read_part_counts(body)?;
    let parts = arrays::read_i32_array(body, num_parts)?;
    let part_types: Vec<PartType> = arrays::read_i32_array(body, num_parts)?
        .into_iter()
        .map(PartType::from)
        .collect();
    let unknown = part_types
        .iter()
        .find(|t| matches!(t, PartType::Unknown(_)));
    if let Some(PartType::Unknown(code)) = unknown {
        warn!(
            "Record {}: multipatch contains unrecognized part type {}",
            body.record_number(),
            code
        );
    }
    let points = arrays::read_points(body, num_points)?;
    let elevations = read_optional_elevations(body, num_points)?;
    let measures = read_optional_measures(body, num_points)?;
    Ok(MultiPatch {
        bbox,
        parts,
        part_types,
        points,
        elevations,
        measures,
    })
}

/// Byte length of a range followed by `num_values` doubles.
fn section_len(num_values: usize) -> Option<usize> {
    num_values.checked_add(2)?.checked_mul(F64_LEN)
}

/// Decides whether a section of `section_len` bytes follows, failing on a partial one.
fn section_present(
    body: &RecordBody,
    section_len: Option<usize>,
    context: &'static str,
) -> Result<bool> {
    let remaining = body.remaining();
    let presence = match section_len {
        Some(len) => Presence::of(remaining, len),
        None if remaining == 0 => Presence::Absent,
        None => Presence::Partial,
    };
    trace!(
        "Record {}: {} {:?} ({} bytes remaining)",
        body.record_number(),
        context,
        presence,
        remaining
    );
    match presence {
        Presence::Present => Ok(true),
        Presence::Absent => Ok(false),
        Presence::Partial => Err(ShapefileError::Truncated {
            context,
            offset: body.offset(),
        }),
    }
}

fn read_optional_elevations(
    body: &mut RecordBody,
    num_points: usize,
) -> Result<Option<Elevations>> {
    if !section_present(body, section_len(num_points), "elevation section")? {
        return Ok(None);
    }
    let range = primitives::read_z_range(body)?;
    let values = arrays::read_f64_array(body, num_points)?;
    Ok(Some(Elevations { range, values }))
}

fn read_optional_measures(body: &mut RecordBody, num_points: usize) -> Result<Option<Measures>> {
    if !section_present(body, section_len(num_points), "measure section")? {
        return Ok(None);
    }
    let range = primitives::read_m_range(body)?;
    let values = arrays::read_f64_array(body, num_points)?;
    Ok(Some(Measures { range, values }))
}

fn read_optional_scalar(body: &mut RecordBody, context: &'static str) -> Result<Option<f64>> {
    if !section_present(body, Some(F64_LEN), context)? {
        return Ok(None);
    }
    Ok(Some(body.read_f64::<LittleEndian>()?))
}
