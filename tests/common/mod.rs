//! In-memory fixture builders for shapefile geometry streams.

#![allow(dead_code)]

use std::io::{self, Read};

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

/// Builds a record body: shape-type tag followed by little-endian fields.
pub struct Body {
    bytes: Vec<u8>,
}

impl Body {
    pub fn new(shape_type: i32) -> Self {
        let mut bytes = Vec::new();
        bytes.write_i32::<LittleEndian>(shape_type).unwrap();
        Self { bytes }
    }

    pub fn i32(mut self, value: i32) -> Self {
        self.bytes.write_i32::<LittleEndian>(value).unwrap();
        self
    }

    pub fn f64(mut self, value: f64) -> Self {
        self.bytes.write_f64::<LittleEndian>(value).unwrap();
        self
    }

    pub fn i32s(self, values: &[i32]) -> Self {
        values.iter().fold(self, |body, v| body.i32(*v))
    }

    pub fn f64s(self, values: &[f64]) -> Self {
        values.iter().fold(self, |body, v| body.f64(*v))
    }

    pub fn bbox(self, x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        self.f64s(&[x_min, y_min, x_max, y_max])
    }

    pub fn points(self, points: &[(f64, f64)]) -> Self {
        points.iter().fold(self, |body, (x, y)| body.f64(*x).f64(*y))
    }

    /// Appends raw bytes, e.g. to produce a partial optional section.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Writes a 100-byte main file header.
pub fn file_header(file_length_words: i32, shape_type: i32, bounds: [f64; 8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(100);
    out.write_i32::<BigEndian>(9994).unwrap();
    out.extend_from_slice(&[0u8; 20]);
    out.write_i32::<BigEndian>(file_length_words).unwrap();
    out.write_i32::<LittleEndian>(1000).unwrap();
    out.write_i32::<LittleEndian>(shape_type).unwrap();
    for value in bounds {
        out.write_f64::<LittleEndian>(value).unwrap();
    }
    out
}

/// Writes a record header followed by `body`, with the content length derived from it.
pub fn record(record_number: i32, body: &[u8]) -> Vec<u8> {
    assert_eq!(body.len() % 2, 0, "record bodies are whole 16-bit words");
    let mut out = Vec::with_capacity(8 + body.len());
    out.write_i32::<BigEndian>(record_number).unwrap();
    out.write_i32::<BigEndian>((body.len() / 2) as i32).unwrap();
    out.extend_from_slice(body);
    out
}

/// Assembles a complete stream, numbering records from 1 and computing the file length.
pub fn shapefile(shape_type: i32, bodies: &[Vec<u8>]) -> Vec<u8> {
    let records: Vec<u8> = bodies
        .iter()
        .enumerate()
        .flat_map(|(i, body)| record(i as i32 + 1, body))
        .collect();
    let file_length_words = ((100 + records.len()) / 2) as i32;
    let mut out = file_header(file_length_words, shape_type, [0.0; 8]);
    out.extend(records);
    out
}

/// A byte source that serves `data` up to `fail_at`, then fails with a
/// non-EOF I/O error.
pub struct FailingReader {
    data: Vec<u8>,
    position: usize,
    fail_at: usize,
}

impl FailingReader {
    pub fn new(data: Vec<u8>, fail_at: usize) -> Self {
        Self {
            data,
            position: 0,
            fail_at,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.position >= self.fail_at {
            return Err(io::Error::new(io::ErrorKind::Other, "device read failure"));
        }
        let end = self.fail_at.min(self.data.len());
        let n = buf.len().min(end.saturating_sub(self.position));
        buf[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }
}
