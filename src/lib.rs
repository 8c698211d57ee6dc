//! # shapefile-reader
//!
//! A decoder for the geometry stream of ESRI Shapefiles (`.shp`).
//! Parses the main file header and every record into a closed set of
//! fourteen geometry variants, including the optional Z and M sections.
//!
//! **Note:** The companion attribute table (`.dbf`) and spatial index
//! (`.shx`) are not read; records pair with attribute rows by position.
pub mod shapefile;

// Re-export the main types for convenience
pub use shapefile::{
    decode_geometry,
    Result,
    Shapefile,
    ShapefileError,
    ShapefileReader,
    types::{
        geometry::{
            Elevations,
            Geometry,
            Measures,
            MultiPart,
            MultiPartGeometry,
            MultiPartM,
            MultiPartZ,
            MultiPatch,
            MultiPoint,
            MultiPointM,
            MultiPointZ,
            PartsIter,
            PointM,
            PointZ,
        },
        models::{
            BoundingBox,
            FileHeader,
            MRange,
            PartType,
            Point,
            ReaderOptions,
            Record,
            RecordHeader,
            ShapeType,
            ZRange,
        },
    },
};
