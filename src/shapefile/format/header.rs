//! Main file header parsing.
//!
//! # Header Structure
//! ```text
//! [4 bytes]  File code, must be 9994        (big-endian i32)
//! [20 bytes] Reserved
//! [4 bytes]  File length in 16-bit words    (big-endian i32)
//! [4 bytes]  Version, must be 1000          (little-endian i32)
//! [4 bytes]  Shape type                     (little-endian i32)
//! [64 bytes] Xmin Ymin Xmax Ymax Zmin Zmax Mmin Mmax (little-endian f64)
//! ```

use std::io::Read;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::{debug, info};

use crate::shapefile::types::error::{Result, ShapefileError};
use crate::shapefile::types::models::{FileHeader, FILE_CODE, FILE_HEADER_LEN, FILE_VERSION};
use crate::shapefile::utils::ByteSource;

const RESERVED_LEN: u64 = 20;

/// Parses the 100-byte main file header from the start of `source`.
///
/// Fields are validated in file order, so a wrong magic code is reported
/// before a short read further into the header.
pub fn parse<R: Read>(source: &mut ByteSource<R>) -> Result<FileHeader> {
    info!("Parsing shapefile header");

    let file_code = source.read_i32::<BigEndian>("file code")?;
    if file_code != FILE_CODE {
        return Err(ShapefileError::InvalidHeader(format!(
            "invalid file code: {} (expected {})",
            file_code, FILE_CODE
        )));
    }

    source.skip(RESERVED_LEN, "reserved header bytes")?;

    let file_length = source.read_i32::<BigEndian>("file length")?;
    let version = source.read_i32::<LittleEndian>("version")?;
    if version != FILE_VERSION {
        return Err(ShapefileError::UnsupportedVersion(version));
    }
    let shape_type_code = source.read_i32::<LittleEndian>("shape type")?;

    let header = FileHeader {
        file_length,
        version,
        shape_type_code,
        x_min: source.read_f64::<LittleEndian>("Xmin")?,
        y_min: source.read_f64::<LittleEndian>("Ymin")?,
        x_max: source.read_f64::<LittleEndian>("Xmax")?,
        y_max: source.read_f64::<LittleEndian>("Ymax")?,
        z_min: source.read_f64::<LittleEndian>("Zmin")?,
        z_max: source.read_f64::<LittleEndian>("Zmax")?,
        m_min: source.read_f64::<LittleEndian>("Mmin")?,
        m_max: source.read_f64::<LittleEndian>("Mmax")?,
    };

    match header.shape_type() {
        Some(shape_type) => debug!("Declared shape type: {}", shape_type),
        None => debug!("Declared shape type code {} is not a known shape type", shape_type_code),
    }
    info!(
        "Header parsed successfully: file_length={} words, shape_type={}, bbox=({}, {}, {}, {})",
        header.file_length,
        header.shape_type_code,
        header.x_min,
        header.y_min,
        header.x_max,
        header.y_max
    );

    Ok(header)
}

impl FileHeader {
    /// Reads a main file header from the start of `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        parse(&mut ByteSource::new(reader))
    }

    /// Re-encodes the header fields in their on-disk layout.
    ///
    /// The reserved bytes are not modeled and are written as zero.
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_LEN] {
        let mut buf = [0u8; FILE_HEADER_LEN];
        BigEndian::write_i32(&mut buf[0..4], FILE_CODE);
        BigEndian::write_i32(&mut buf[24..28], self.file_length);
        LittleEndian::write_i32(&mut buf[28..32], self.version);
        LittleEndian::write_i32(&mut buf[32..36], self.shape_type_code);
        let bounds = [
            self.x_min, self.y_min, self.x_max, self.y_max,
            self.z_min, self.z_max, self.m_min, self.m_max,
        ];
        for (i, value) in bounds.iter().enumerate() {
            let start = 36 + i * 8;
            LittleEndian::write_f64(&mut buf[start..start + 8], *value);
        }
        buf
    }
}
