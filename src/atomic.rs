use geo::{BoundingRect, Coord, Geometry, LineString, Point, Rect};

use crate::error::{DeoverlapError, Result};

/// Either a curve or a point.
///
/// These are the only units the engines clip directly; every other
/// geometry is decomposed into a sequence of these first (see
/// [`flatten_geometries`](crate::flatten_geometries)). Polygons
/// contribute one `LineString` per boundary ring.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicGeometry {
    Point(Point<f64>),
    LineString(LineString<f64>),
}

impl AtomicGeometry {
    /// Checks if the variant is a curve.
    #[inline]
    pub fn is_line_string(&self) -> bool {
        matches!(self, AtomicGeometry::LineString(_))
    }

    /// Returns the bounding envelope, or `None` for an empty curve.
    pub fn envelope(&self) -> Option<Rect<f64>> {
        match self {
            AtomicGeometry::Point(p) => Some(p.bounding_rect()),
            AtomicGeometry::LineString(ls) => ls.bounding_rect(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AtomicGeometry::Point(_) => "Point",
            AtomicGeometry::LineString(_) => "LineString",
        }
    }

    fn coords(&self) -> impl Iterator<Item = &Coord<f64>> {
        let (point, line) = match self {
            AtomicGeometry::Point(p) => (Some(&p.0), None),
            AtomicGeometry::LineString(ls) => (None, Some(ls.0.iter())),
        };
        point.into_iter().chain(line.into_iter().flatten())
    }

    /// Fails if any coordinate is NaN or infinite; the boolean-op
    /// sweep can't order such points.
    pub(crate) fn check_finite(&self) -> Result<()> {
        if self.coords().all(|c| c.x.is_finite() && c.y.is_finite()) {
            Ok(())
        } else {
            Err(DeoverlapError::NonFiniteCoordinate { kind: self.kind() })
        }
    }
}

impl From<Point<f64>> for AtomicGeometry {
    fn from(p: Point<f64>) -> Self {
        AtomicGeometry::Point(p)
    }
}

impl From<LineString<f64>> for AtomicGeometry {
    fn from(ls: LineString<f64>) -> Self {
        AtomicGeometry::LineString(ls)
    }
}

impl From<AtomicGeometry> for Geometry<f64> {
    fn from(atom: AtomicGeometry) -> Self {
        match atom {
            AtomicGeometry::Point(p) => Geometry::Point(p),
            AtomicGeometry::LineString(ls) => Geometry::LineString(ls),
        }
    }
}
