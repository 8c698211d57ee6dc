//! Decoded geometry values.
//!
//! [`Geometry`] is a closed sum type over the fourteen record shapes. Shapes
//! that share an on-disk layout share a payload struct (a `PolyLine` and a
//! `Polygon` both hold a [`MultiPart`]) but stay distinct variants.

use std::borrow::Cow;

use super::models::{BoundingBox, MRange, PartType, Point, ShapeType, ZRange};

/// Optional measure section: an [`MRange`] followed by one value per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Measures {
    pub range: MRange,
    pub values: Vec<f64>,
}

/// Optional elevation section: a [`ZRange`] followed by one value per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Elevations {
    pub range: ZRange,
    pub values: Vec<f64>,
}

/// A point with an optional measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointM {
    pub x: f64,
    pub y: f64,
    pub m: Option<f64>,
}

/// A point with an elevation and an optional measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointZ {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    pub bbox: BoundingBox,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPointM {
    pub bbox: BoundingBox,
    pub points: Vec<Point>,
    pub measures: Option<Measures>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPointZ {
    pub bbox: BoundingBox,
    pub points: Vec<Point>,
    pub elevations: Option<Elevations>,
    pub measures: Option<Measures>,
}

/// Layout shared by `PolyLine` and `Polygon`.
///
/// `parts` holds the index into `points` where each segment or ring starts;
/// the last part runs to the end of `points`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPart {
    pub bbox: BoundingBox,
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
}

/// Layout shared by `PolyLineM` and `PolygonM`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPartM {
    pub bbox: BoundingBox,
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
    pub measures: Option<Measures>,
}

/// Layout shared by `PolyLineZ` and `PolygonZ`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPartZ {
    pub bbox: BoundingBox,
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
    pub elevations: Option<Elevations>,
    pub measures: Option<Measures>,
}

/// A set of surface patches; `part_types` has one entry per part.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPatch {
    pub bbox: BoundingBox,
    pub parts: Vec<i32>,
    pub part_types: Vec<PartType>,
    pub points: Vec<Point>,
    pub elevations: Option<Elevations>,
    pub measures: Option<Measures>,
}

/// Access to the individual parts of a part-bearing geometry.
pub trait MultiPartGeometry {
    /// Starting offsets of each part within [`points`](Self::points).
    fn part_offsets(&self) -> &[i32];

    fn points(&self) -> &[Point];

    fn num_parts(&self) -> usize {
        self.part_offsets().len()
    }

    /// Returns the points of part `index`.
    ///
    /// `None` if the index is out of range or the stored offsets do not
    /// describe a valid slice of the points array.
    fn part(&self, index: usize) -> Option<&[Point]> {
        part_slice(self.part_offsets(), self.points(), index)
    }

    /// Iterates over every part in order, yielding `None` for malformed ones.
    fn parts_iter(&self) -> PartsIter<'_> {
        PartsIter {
            offsets: self.part_offsets(),
            points: self.points(),
            index: 0,
        }
    }
}

fn part_slice<'a>(offsets: &[i32], points: &'a [Point], index: usize) -> Option<&'a [Point]> {
    let start = usize::try_from(*offsets.get(index)?).ok()?;
    let end = match offsets.get(index + 1) {
        Some(&next) => usize::try_from(next).ok()?,
        None => points.len(),
    };
    points.get(start..end)
}

/// Iterator over the point slices of each part.
///
/// Created by [`MultiPartGeometry::parts_iter`].
pub struct PartsIter<'a> {
    offsets: &'a [i32],
    points: &'a [Point],
    index: usize,
}

impl<'a> Iterator for PartsIter<'a> {
    type Item = Option<&'a [Point]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.offsets.len() {
            return None;
        }
        let part = part_slice(self.offsets, self.points, self.index);
        self.index += 1;
        Some(part)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.offsets.len().saturating_sub(self.index);
        (left, Some(left))
    }
}

macro_rules! impl_multi_part {
    ($($ty:ty),*) => {
        $(
            impl MultiPartGeometry for $ty {
                fn part_offsets(&self) -> &[i32] {
                    &self.parts
                }

                fn points(&self) -> &[Point] {
                    &self.points
                }
            }
        )*
    };
}

impl_multi_part!(MultiPart, MultiPartM, MultiPartZ, MultiPatch);

/// One decoded record body.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Null,
    Point(Point),
    MultiPoint(MultiPoint),
    PolyLine(MultiPart),
    Polygon(MultiPart),
    PointM(PointM),
    MultiPointM(MultiPointM),
    PolyLineM(MultiPartM),
    PolygonM(MultiPartM),
    PointZ(PointZ),
    MultiPointZ(MultiPointZ),
    PolyLineZ(MultiPartZ),
    PolygonZ(MultiPartZ),
    MultiPatch(MultiPatch),
}

impl Geometry {
    /// The shape type tag this geometry was decoded from.
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Geometry::Null => ShapeType::Null,
            Geometry::Point(_) => ShapeType::Point,
            Geometry::MultiPoint(_) => ShapeType::MultiPoint,
            Geometry::PolyLine(_) => ShapeType::PolyLine,
            Geometry::Polygon(_) => ShapeType::Polygon,
            Geometry::PointM(_) => ShapeType::PointM,
            Geometry::MultiPointM(_) => ShapeType::MultiPointM,
            Geometry::PolyLineM(_) => ShapeType::PolyLineM,
            Geometry::PolygonM(_) => ShapeType::PolygonM,
            Geometry::PointZ(_) => ShapeType::PointZ,
            Geometry::MultiPointZ(_) => ShapeType::MultiPointZ,
            Geometry::PolyLineZ(_) => ShapeType::PolyLineZ,
            Geometry::PolygonZ(_) => ShapeType::PolygonZ,
            Geometry::MultiPatch(_) => ShapeType::MultiPatch,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Geometry::Null)
    }

    /// The stored bounding box. Null and single-point shapes have none.
    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        match self {
            Geometry::Null | Geometry::Point(_) | Geometry::PointM(_) | Geometry::PointZ(_) => None,
            Geometry::MultiPoint(g) => Some(&g.bbox),
            Geometry::MultiPointM(g) => Some(&g.bbox),
            Geometry::MultiPointZ(g) => Some(&g.bbox),
            Geometry::PolyLine(g) | Geometry::Polygon(g) => Some(&g.bbox),
            Geometry::PolyLineM(g) | Geometry::PolygonM(g) => Some(&g.bbox),
            Geometry::PolyLineZ(g) | Geometry::PolygonZ(g) => Some(&g.bbox),
            Geometry::MultiPatch(g) => Some(&g.bbox),
        }
    }

    /// Planar coordinates of every vertex, in file order.
    ///
    /// Borrowed from the stored points array; only the single-point shapes
    /// build an owned one-element vector.
    pub fn points(&self) -> Cow<'_, [Point]> {
        match self {
            Geometry::Point(p) => Cow::Owned(vec![*p]),
            Geometry::PointM(p) => Cow::Owned(vec![Point { x: p.x, y: p.y }]),
            Geometry::PointZ(p) => Cow::Owned(vec![Point { x: p.x, y: p.y }]),
            other => Cow::Borrowed(other.point_slice()),
        }
    }

    pub fn num_points(&self) -> usize {
        match self {
            Geometry::Null => 0,
            Geometry::Point(_) | Geometry::PointM(_) | Geometry::PointZ(_) => 1,
            other => other.point_slice().len(),
        }
    }

    /// Number of parts; zero for shapes without a parts-index array.
    pub fn num_parts(&self) -> usize {
        self.as_multi_part().map_or(0, |g| g.num_parts())
    }

    /// The part-bearing view of this geometry, if it has one.
    pub fn as_multi_part(&self) -> Option<&dyn MultiPartGeometry> {
        match self {
            Geometry::PolyLine(g) | Geometry::Polygon(g) => Some(g),
            Geometry::PolyLineM(g) | Geometry::PolygonM(g) => Some(g),
            Geometry::PolyLineZ(g) | Geometry::PolygonZ(g) => Some(g),
            Geometry::MultiPatch(g) => Some(g),
            _ => None,
        }
    }

    pub fn measures(&self) -> Option<&Measures> {
        match self {
            Geometry::MultiPointM(g) => g.measures.as_ref(),
            Geometry::MultiPointZ(g) => g.measures.as_ref(),
            Geometry::PolyLineM(g) | Geometry::PolygonM(g) => g.measures.as_ref(),
            Geometry::PolyLineZ(g) | Geometry::PolygonZ(g) => g.measures.as_ref(),
            Geometry::MultiPatch(g) => g.measures.as_ref(),
            _ => None,
        }
    }

    pub fn elevations(&self) -> Option<&Elevations> {
        match self {
            Geometry::MultiPointZ(g) => g.elevations.as_ref(),
            Geometry::PolyLineZ(g) | Geometry::PolygonZ(g) => g.elevations.as_ref(),
            Geometry::MultiPatch(g) => g.elevations.as_ref(),
            _ => None,
        }
    }

    fn point_slice(&self) -> &[Point] {
        match self {
            Geometry::MultiPoint(g) => &g.points,
            Geometry::MultiPointM(g) => &g.points,
            Geometry::MultiPointZ(g) => &g.points,
            Geometry::PolyLine(g) | Geometry::Polygon(g) => &g.points,
            Geometry::PolyLineM(g) | Geometry::PolygonM(g) => &g.points,
            Geometry::PolyLineZ(g) | Geometry::PolygonZ(g) => &g.points,
            Geometry::MultiPatch(g) => &g.points,
            Geometry::Null | Geometry::Point(_) | Geometry::PointM(_) | Geometry::PointZ(_) => &[],
        }
    }
}
