//! Length-prefixed arrays of points, part offsets and scalar values.
//!
//! Counts are read as signed 32-bit integers. A negative count is a format
//! error, and every array is checked against the remaining record body
//! before anything is allocated for it.

use byteorder::LittleEndian;

use crate::shapefile::types::error::{Result, ShapefileError};
use crate::shapefile::types::models::Point;
use crate::shapefile::utils::RecordBody;
use super::primitives::{self, F64_LEN, POINT_LEN};

/// Reads a little-endian count, rejecting negative values.
pub fn read_count(body: &mut RecordBody, field: &'static str) -> Result<usize> {
    let value = body.read_i32::<LittleEndian>()?;
    usize::try_from(value).map_err(|_| ShapefileError::InvalidCount {
        field,
        value,
        record_number: body.record_number(),
    })
}

pub fn read_points(body: &mut RecordBody, count: usize) -> Result<Vec<Point>> {
    body.ensure(count, POINT_LEN)?;
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(primitives::read_point(body)?);
    }
    Ok(points)
}

pub fn read_i32_array(body: &mut RecordBody, count: usize) -> Result<Vec<i32>> {
    body.ensure(count, 4)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(body.read_i32::<LittleEndian>()?);
    }
    Ok(values)
}

pub fn read_f64_array(body: &mut RecordBody, count: usize) -> Result<Vec<f64>> {
    body.ensure(count, F64_LEN)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(body.read_f64::<LittleEndian>()?);
    }
    Ok(values)
}

/// Reads NumPoints followed by that many points.
pub fn read_counted_points(body: &mut RecordBody) -> Result<Vec<Point>> {
    let num_points = read_count(body, "point count")?;
    read_points(body, num_points)
}

/// Reads NumParts then NumPoints.
pub fn read_part_counts(body: &mut RecordBody) -> Result<(usize, usize)> {
    let num_parts = read_count(body, "part count")?;
    let num_points = read_count(body, "point count")?;
    Ok((num_parts, num_points))
}

/// Reads NumParts, NumPoints, the part offsets and the points.
pub fn read_parts_and_points(body: &mut RecordBody) -> Result<(Vec<i32>, Vec<Point>)> {
    let (num_parts, num_points) = read_part_counts(body)?;
    let parts = read_i32_array(body, num_parts)?;
    let points = read_points(body, num_points)?;
    Ok((parts, points))
}
