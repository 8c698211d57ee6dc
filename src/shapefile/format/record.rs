//! Record framing: the 8-byte record header, the shape-type tag and the
//! hand-off to the per-variant decoders.
//!
//! # Record Structure
//! ```text
//! [4 bytes] Record number                    (big-endian i32)
//! [4 bytes] Content length in 16-bit words   (big-endian i32)
//! [4 bytes] Shape type tag                   (little-endian i32)  ┐
//! [N bytes] Variant fields                                        ┘ content
//! ```

use std::io::Read;
use byteorder::{BigEndian, LittleEndian};
use log::{debug, warn};

use crate::shapefile::types::error::{Result, ShapefileError};
use crate::shapefile::types::geometry::Geometry;
use crate::shapefile::types::models::{Record, RecordHeader, ShapeType};
use crate::shapefile::utils::{ByteSource, RecordBody};
use super::geometry;

/// Reads the record number and content length.
pub fn read_header<R: Read>(source: &mut ByteSource<R>) -> Result<RecordHeader> {
    let record_number = source.read_i32::<BigEndian>("record number")?;
    let content_length = source.read_i32::<BigEndian>("record content length")?;
    Ok(RecordHeader {
        record_number,
        content_length,
    })
}

/// Reads one complete record from a source positioned at a record boundary.
///
/// The whole body is read before decoding, so a source that ends inside the
/// record fails with `Truncated` and yields no record at all.
pub fn read_record<R: Read>(source: &mut ByteSource<R>) -> Result<Record> {
    let header = read_header(source)?;
    let content_bytes = header.content_bytes()?;
    let body_offset = source.position();
    let content = source.read_bytes(content_bytes, "record content")?;

    let mut body = RecordBody::new(&content, header.record_number, body_offset);
    let geometry = decode_body(&mut body)?;
    if body.remaining() > 0 {
        warn!(
            "Record {}: {} declared content bytes left unread",
            header.record_number,
            body.remaining()
        );
    }
    debug!(
        "Record {}: {} ({} content bytes)",
        header.record_number,
        geometry.shape_type(),
        content_bytes
    );

    Ok(Record { header, geometry })
}

/// Reads the shape-type tag and dispatches to the matching decoder.
pub fn decode_body(body: &mut RecordBody) -> Result<Geometry> {
    let code = body.read_i32::<LittleEndian>()?;
    let shape_type = ShapeType::try_from(code).map_err(|code| ShapefileError::UnknownShapeType {
        code,
        record_number: body.record_number(),
    })?;
    geometry::decode(shape_type, body)
}

/// Decodes a single record body (shape-type tag included) from raw bytes.
///
/// `content` is treated as the record's declared content, so optional Z/M
/// sections are detected from its length. Returns the geometry together
/// with the number of bytes consumed.
pub fn decode_geometry(content: &[u8]) -> Result<(Geometry, usize)> {
    let mut body = RecordBody::new(content, 0, 0);
    let geometry = decode_body(&mut body)?;
    Ok((geometry, body.consumed()))
}
