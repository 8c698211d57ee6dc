//! Low-level byte reading utilities
//!
//! Byte order is chosen per call through the `byteorder` type parameter:
//! the main file header mixes big-endian and little-endian fields, so no
//! reader carries a fixed endianness.

use std::io::{self, Read};
use byteorder::{ByteOrder, ReadBytesExt};

use super::types::error::{Result, ShapefileError};

/// Forward-only byte source that remembers how far it has read.
///
/// The position is only used to give `Truncated` errors an absolute offset.
pub struct ByteSource<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Absolute offset of the next byte to be read.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn read_i32<B: ByteOrder>(&mut self, context: &'static str) -> Result<i32> {
        let offset = self.position;
        let value = self
            .inner
            .read_i32::<B>()
            .map_err(|e| eof_as_truncated(e, context, offset))?;
        self.position += 4;
        Ok(value)
    }

    pub fn read_f64<B: ByteOrder>(&mut self, context: &'static str) -> Result<f64> {
        let offset = self.position;
        let value = self
            .inner
            .read_f64::<B>()
            .map_err(|e| eof_as_truncated(e, context, offset))?;
        self.position += 8;
        Ok(value)
    }

    /// Discards exactly `len` bytes.
    pub fn skip(&mut self, len: u64, context: &'static str) -> Result<()> {
        let skipped = io::copy(&mut (&mut self.inner).take(len), &mut io::sink())?;
        if skipped < len {
            return Err(ShapefileError::Truncated {
                context,
                offset: self.position + skipped,
            });
        }
        self.position += len;
        Ok(())
    }

    /// Reads exactly `len` bytes into a new buffer.
    ///
    /// The buffer grows with the data actually read, so a corrupt length
    /// cannot force a large up-front allocation.
    pub fn read_bytes(&mut self, len: usize, context: &'static str) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            return Err(ShapefileError::Truncated {
                context,
                offset: self.position + buf.len() as u64,
            });
        }
        self.position += len as u64;
        Ok(buf)
    }
}

fn eof_as_truncated(err: io::Error, context: &'static str, offset: u64) -> ShapefileError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        ShapefileError::Truncated { context, offset }
    } else {
        ShapefileError::Io(err)
    }
}

/// Bounded cursor over one record body.
///
/// Every read is checked against the record's declared content length;
/// reading past it is a [`ShapefileError::RecordLengthMismatch`].
pub struct RecordBody<'a> {
    data: &'a [u8],
    position: usize,
    record_number: i32,
    base_offset: u64,
}

impl<'a> RecordBody<'a> {
    /// Wraps `data`, which starts at absolute file offset `base_offset`.
    pub fn new(data: &'a [u8], record_number: i32, base_offset: u64) -> Self {
        Self {
            data,
            position: 0,
            record_number,
            base_offset,
        }
    }

    pub fn record_number(&self) -> i32 {
        self.record_number
    }

    /// Bytes read so far.
    pub fn consumed(&self) -> usize {
        self.position
    }

    /// Declared bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Absolute file offset of the next byte.
    pub fn offset(&self) -> u64 {
        self.base_offset + self.position as u64
    }

    /// Fails unless `count` elements of `width` bytes fit in the remaining body.
    pub fn ensure(&self, count: usize, width: usize) -> Result<()> {
        match count.checked_mul(width) {
            Some(len) if len <= self.remaining() => Ok(()),
            _ => Err(self.overrun(count.saturating_mul(width))),
        }
    }

    pub fn read_i32<B: ByteOrder>(&mut self) -> Result<i32> {
        Ok(B::read_i32(self.take(4)?))
    }

    pub fn read_f64<B: ByteOrder>(&mut self) -> Result<f64> {
        Ok(B::read_f64(self.take(8)?))
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.overrun(len));
        }
        let data = self.data;
        let bytes = &data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    fn overrun(&self, len: usize) -> ShapefileError {
        ShapefileError::RecordLengthMismatch {
            record_number: self.record_number,
            declared: self.data.len(),
            required: self.position.saturating_add(len),
        }
    }
}
