//! Fixed-size field groups shared by the geometry decoders.

use byteorder::LittleEndian;

use crate::shapefile::types::error::Result;
use crate::shapefile::types::models::{BoundingBox, MRange, Point, ZRange};
use crate::shapefile::utils::RecordBody;

/// Size of an encoded [`Point`] in bytes.
pub const POINT_LEN: usize = 16;

/// Size of an encoded f64 value in bytes.
pub const F64_LEN: usize = 8;

pub fn read_point(body: &mut RecordBody) -> Result<Point> {
    Ok(Point {
        x: body.read_f64::<LittleEndian>()?,
        y: body.read_f64::<LittleEndian>()?,
    })
}

/// Reads Xmin, Ymin, Xmax, Ymax.
pub fn read_bbox(body: &mut RecordBody) -> Result<BoundingBox> {
    Ok(BoundingBox {
        x_min: body.read_f64::<LittleEndian>()?,
        y_min: body.read_f64::<LittleEndian>()?,
        x_max: body.read_f64::<LittleEndian>()?,
        y_max: body.read_f64::<LittleEndian>()?,
    })
}

pub fn read_z_range(body: &mut RecordBody) -> Result<ZRange> {
    Ok(ZRange {
        min: body.read_f64::<LittleEndian>()?,
        max: body.read_f64::<LittleEndian>()?,
    })
}

pub fn read_m_range(body: &mut RecordBody) -> Result<MRange> {
    Ok(MRange {
        min: body.read_f64::<LittleEndian>()?,
        max: body.read_f64::<LittleEndian>()?,
    })
}
