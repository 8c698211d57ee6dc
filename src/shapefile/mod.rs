//! Core shapefile decoding module

mod format;
pub mod iter;
pub mod reader;
pub mod types;
mod utils;

pub use format::record::decode_geometry;
pub use iter::ShapefileReader;
pub use reader::Shapefile;
pub use types::error::{Result, ShapefileError};
