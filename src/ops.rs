//! Thin wrappers over the `geo` boolean-op, buffer and relate
//! algorithms, shaped for clipping atomic geometries against a mask.

use geo::{
    unary_union, BooleanOps, Buffer, Coord, Geometry, GeometryCollection, HasDimensions,
    Intersects, LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon, Rect, Relate,
};
use log::trace;

use crate::{flatten::rings, AtomicGeometry};

/// Distance used to pad the local mask right before clipping.
///
/// Boundaries that coincide exactly with a mask edge otherwise leave
/// zero-width slivers behind.
pub const ROBUSTNESS_EPSILON: f64 = 1e-9;

/// Result of clipping one atomic geometry against an area.
///
/// `kept` is the part outside the area and `removed` the part inside;
/// together they cover the input. Either may hold several pieces.
#[derive(Debug, Clone, Default)]
pub struct Split {
    pub kept: Vec<AtomicGeometry>,
    pub removed: Vec<AtomicGeometry>,
}

impl Split {
    /// A split that keeps the input whole.
    pub fn unclipped(atom: AtomicGeometry) -> Self {
        Split {
            kept: vec![atom],
            removed: vec![],
        }
    }
}

/// Clip `atom` against `area`.
pub fn clip(atom: &AtomicGeometry, area: &MultiPolygon<f64>) -> Split {
    let inside = |hit: bool| {
        if hit {
            Split {
                kept: vec![],
                removed: vec![atom.clone()],
            }
        } else {
            Split::unclipped(atom.clone())
        }
    };
    match atom {
        AtomicGeometry::Point(p) => inside(area.intersects(p)),
        // Zero-length curves are all-or-nothing, like points.
        AtomicGeometry::LineString(ls) if is_degenerate(ls) => inside(area.intersects(ls)),
        AtomicGeometry::LineString(ls) => {
            let input = MultiLineString::new(vec![ls.clone()]);
            let kept = pieces(area.clip(&input, true));
            let removed = pieces(area.clip(&input, false));
            trace!(
                "clipped curve of {n} coords: {k} kept, {r} removed pieces",
                n = ls.0.len(),
                k = kept.len(),
                r = removed.len(),
            );
            Split { kept, removed }
        }
    }
}

/// Drop degenerate output of the line clipper.
fn pieces(mls: MultiLineString<f64>) -> Vec<AtomicGeometry> {
    mls.into_iter()
        .filter(|ls| !is_degenerate(ls))
        .map(AtomicGeometry::from)
        .collect()
}

fn is_degenerate(ls: &LineString<f64>) -> bool {
    ls.0.windows(2).all(|w| w[0] == w[1])
}

/// Drop the material of later curves that an earlier curve already
/// covers, and points lying on any kept curve.
///
/// Pieces are taken in order; each curve is clipped against the
/// [`ROBUSTNESS_EPSILON`] neighbourhood of the earlier curves whose
/// envelopes come that close. The result covers every location of
/// the input at most once.
pub fn dissolve(pieces: Vec<AtomicGeometry>) -> Vec<AtomicGeometry> {
    let (points, lines): (Vec<_>, Vec<_>) = pieces.into_iter().partition(|p| !p.is_line_string());

    let mut curves: Vec<AtomicGeometry> = Vec::with_capacity(lines.len());
    for line in lines {
        match covered_near(&curves, &line) {
            Some(area) => curves.extend(clip(&line, &area).kept),
            None => curves.push(line),
        }
    }

    let mut out = curves.clone();
    for point in points {
        if out.contains(&point) {
            continue;
        }
        let on_curve = covered_near(&curves, &point).map_or(false, |area| !clip(&point, &area).removed.is_empty());
        if !on_curve {
            out.push(point);
        }
    }
    trace!("dissolved into {n} pieces", n = out.len());
    out
}

/// Padded area of the `curves` near `piece`, if any.
fn covered_near(curves: &[AtomicGeometry], piece: &AtomicGeometry) -> Option<MultiPolygon<f64>> {
    let rect = grow(piece.envelope()?, ROBUSTNESS_EPSILON);
    let near: Vec<AtomicGeometry> = curves
        .iter()
        .filter(|c| c.envelope().map_or(false, |r| r.intersects(&rect)))
        .cloned()
        .collect();
    if near.is_empty() {
        None
    } else {
        Some(buffer(&assemble(near), ROBUSTNESS_EPSILON))
    }
}

fn grow(rect: Rect<f64>, by: f64) -> Rect<f64> {
    let pad = Coord { x: by, y: by };
    Rect::new(rect.min() - pad, rect.max() + pad)
}

/// Union of the candidate mask entries, padded by
/// [`ROBUSTNESS_EPSILON`].
pub fn padded_union<'a, I>(entries: I) -> MultiPolygon<f64>
where
    I: IntoIterator<Item = &'a MultiPolygon<f64>>,
{
    unary_union(entries).buffer(ROBUSTNESS_EPSILON)
}

/// Expand a geometry by `distance`.
pub fn buffer(geom: &Geometry<f64>, distance: f64) -> MultiPolygon<f64> {
    geom.buffer(distance)
}

/// Reassemble pieces into one geometry.
///
/// A single piece keeps its own type, several curves become a
/// `MultiLineString`, several points a `MultiPoint` (repeats
/// collapsed), and a mix of both a `GeometryCollection`.
pub fn assemble(pieces: Vec<AtomicGeometry>) -> Geometry<f64> {
    let mut points = Vec::new();
    let mut lines = Vec::new();
    for piece in pieces {
        match piece {
            AtomicGeometry::Point(p) => {
                if !points.contains(&p) {
                    points.push(p);
                }
            }
            AtomicGeometry::LineString(ls) => lines.push(ls),
        }
    }

    let points: Option<Geometry<f64>> = match points.len() {
        0 => None,
        1 => Some(points[0].into()),
        _ => Some(MultiPoint::new(points).into()),
    };
    let lines: Option<Geometry<f64>> = match lines.len() {
        0 => None,
        1 => lines.pop().map(Geometry::from),
        _ => Some(MultiLineString::new(lines).into()),
    };

    match (points, lines) {
        (Some(p), None) => p,
        (None, Some(l)) => l,
        (Some(p), Some(l)) => Geometry::GeometryCollection(GeometryCollection::new_from(vec![p, l])),
        (None, None) => Geometry::GeometryCollection(GeometryCollection::<f64>::new_from(vec![])),
    }
}

/// The boundary of a polygon as curves: a `LineString` when there
/// are no holes, otherwise a `MultiLineString` of all rings.
pub fn boundary_of(poly: &Polygon<f64>) -> Geometry<f64> {
    if poly.interiors().is_empty() {
        poly.exterior().clone().into()
    } else {
        MultiLineString::new(rings(poly).cloned().collect()).into()
    }
}

/// Topological equality; empty geometries are equal to each other.
pub fn topo_equals(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => true,
        (false, false) => a.relate(b).is_equal_topo(),
        _ => false,
    }
}
