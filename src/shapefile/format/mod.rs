//! File format parsing layer for shapefile geometry streams.
//!
//! This module provides the mid-level parsing layer between the
//! position-tracking byte source and the high-level
//! [`Shapefile`](crate::shapefile::reader::Shapefile) dataset.
//!
//! # Module Organization
//!
//! - [`header`]: Parses the fixed 100-byte main file header
//! - [`record`]: Frames records and dispatches on the shape-type tag
//! - [`geometry`]: Decodes the fourteen geometry variants
//! - [`arrays`]: Length-prefixed point, offset and value arrays
//! - [`primitives`]: Points, bounding boxes and Z/M ranges
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  File Header    │ ← header::parse()
//! │  (100 bytes)    │
//! ├─────────────────┤
//! │  Record Header  │ ← record::read_header()
//! │  Record Content │ ← record::decode_body() → geometry::decode()
//! ├─────────────────┤
//! │  ...            │   repeated until the declared file length is used
//! └─────────────────┘
//! ```

pub mod arrays;
pub mod geometry;
pub mod header;
pub mod primitives;
pub mod record;
