use geo::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

/// Caller-facing input: a single geometry or an arbitrarily nested
/// sequence of inputs.
///
/// Order is preserved everywhere an input defines one. Callers
/// collecting from an unordered container (eg. a hash set of wrapped
/// geometries) get that container's iteration order; nothing here
/// normalises it.
#[derive(Debug, Clone, PartialEq)]
pub enum GeomInput {
    Geometry(Geometry<f64>),
    Sequence(Vec<GeomInput>),
}

impl GeomInput {
    /// The empty input; also what `None` converts into.
    pub fn empty() -> Self {
        GeomInput::Sequence(Vec::new())
    }

    /// Visit every geometry leaf, depth first.
    pub(crate) fn for_each_leaf<'a, F: FnMut(&'a Geometry<f64>)>(&'a self, f: &mut F) {
        match self {
            GeomInput::Geometry(g) => f(g),
            GeomInput::Sequence(items) => items.iter().for_each(|item| item.for_each_leaf(f)),
        }
    }

    /// The top-level geometries in depth-first order; each one gets
    /// its own origin index.
    pub fn leaves(&self) -> Vec<&Geometry<f64>> {
        let mut out = vec![];
        self.for_each_leaf(&mut |g| out.push(g));
        out
    }
}

impl Default for GeomInput {
    fn default() -> Self {
        GeomInput::empty()
    }
}

impl From<Geometry<f64>> for GeomInput {
    fn from(g: Geometry<f64>) -> Self {
        GeomInput::Geometry(g)
    }
}

macro_rules! impl_from_geometry {
    ($($ty:ident),*) => {
        $(
            impl From<$ty<f64>> for GeomInput {
                fn from(g: $ty<f64>) -> Self {
                    GeomInput::Geometry(Geometry::$ty(g))
                }
            }
        )*
    };
}

impl_from_geometry!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);

impl<T: Into<GeomInput>> From<Vec<T>> for GeomInput {
    fn from(items: Vec<T>) -> Self {
        GeomInput::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<GeomInput>> From<Option<T>> for GeomInput {
    fn from(input: Option<T>) -> Self {
        input.map(Into::into).unwrap_or_default()
    }
}

impl<T: Into<GeomInput>> std::iter::FromIterator<T> for GeomInput {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        GeomInput::Sequence(iter.into_iter().map(Into::into).collect())
    }
}
