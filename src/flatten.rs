use geo::{Geometry, HasDimensions, LineString, Polygon};

use crate::{
    error::{DeoverlapError, Result},
    AtomicGeometry, GeomInput,
};

/// Recursively flattens any input into a sequence of non-empty
/// `LineString`s and `Point`s.
///
/// Members are visited depth first in their given order. A polygon
/// contributes its boundary rings (exterior, then each hole) and never
/// itself. `Line`, `Rect` and `Triangle` are rejected with
/// [`DeoverlapError::UnsupportedType`].
///
/// ```rust
/// use geo::{line_string, polygon, Geometry};
/// use geo_deoverlap::{flatten_geometries, GeomInput};
///
/// let input: GeomInput = vec![
///     Geometry::from(polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.)]),
///     Geometry::from(line_string![(x: 2., y: 0.), (x: 3., y: 0.)]),
/// ]
/// .into();
/// let atoms = flatten_geometries(&input).unwrap();
/// assert_eq!(atoms.len(), 2);
/// assert!(atoms.iter().all(|a| a.is_line_string()));
/// ```
pub fn flatten_geometries(input: &GeomInput) -> Result<Vec<AtomicGeometry>> {
    let mut out = Vec::new();
    flatten_input(input, &mut out)?;
    Ok(out)
}

fn flatten_input(input: &GeomInput, out: &mut Vec<AtomicGeometry>) -> Result<()> {
    match input {
        GeomInput::Geometry(g) => flatten_into(g, out),
        GeomInput::Sequence(items) => items.iter().try_for_each(|item| flatten_input(item, out)),
    }
}

/// Flattens a single geometry, appending to `out`.
pub(crate) fn flatten_into(geom: &Geometry<f64>, out: &mut Vec<AtomicGeometry>) -> Result<()> {
    match geom {
        Geometry::Point(p) => out.push((*p).into()),
        Geometry::LineString(ls) => {
            if !ls.is_empty() {
                out.push(ls.clone().into());
            }
        }
        Geometry::Polygon(poly) => push_rings(poly, out),
        Geometry::MultiPoint(mp) => out.extend(mp.iter().map(|p| AtomicGeometry::from(*p))),
        Geometry::MultiLineString(mls) => out.extend(
            mls.iter()
                .filter(|ls| !ls.is_empty())
                .map(|ls| AtomicGeometry::from(ls.clone())),
        ),
        Geometry::MultiPolygon(mp) => mp.iter().for_each(|poly| push_rings(poly, out)),
        Geometry::GeometryCollection(gc) => {
            for g in gc.iter() {
                flatten_into(g, out)?;
            }
        }
        Geometry::Line(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
            return Err(DeoverlapError::UnsupportedType {
                kind: geometry_kind(geom),
            })
        }
    }
    Ok(())
}

fn push_rings(poly: &Polygon<f64>, out: &mut Vec<AtomicGeometry>) {
    if poly.is_empty() {
        return;
    }
    out.extend(
        rings(poly)
            .filter(|ring| !ring.is_empty())
            .map(|ring| AtomicGeometry::from(ring.clone())),
    );
}

/// The boundary rings of a polygon: exterior first, then holes.
pub(crate) fn rings(poly: &Polygon<f64>) -> impl Iterator<Item = &LineString<f64>> {
    std::iter::once(poly.exterior()).chain(poly.interiors().iter())
}

/// Name of the geometry variant, for error messages and logs.
pub fn geometry_kind(geom: &Geometry<f64>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
