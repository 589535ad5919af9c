use std::collections::BTreeMap;

use geo::Geometry;
use itertools::Itertools;

use crate::{
    engine::{flat, structured, StructuredOutput},
    error::Result,
    GeomInput, Mask, Progress,
};

/// Flags selecting the engine and the shape of the result.
///
/// All flags default to `false`, which selects the flat engine and
/// discards removed material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Use the structured engine, which returns one geometry per
    /// surviving input and restores untouched polygons.
    pub preserve_types: bool,
    /// Return the removed material instead of discarding it.
    pub keep_duplicates: bool,
    /// With `preserve_types`, return removal keyed by origin index
    /// ([`Deoverlapped::Tracked`]). Ignored by the flat engine.
    pub track_origins: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preserve_types(mut self, flag: bool) -> Self {
        self.preserve_types = flag;
        self
    }

    pub fn keep_duplicates(mut self, flag: bool) -> Self {
        self.keep_duplicates = flag;
        self
    }

    pub fn track_origins(mut self, flag: bool) -> Self {
        self.track_origins = flag;
        self
    }
}

/// Result of [`deoverlap`].
#[derive(Debug, Clone)]
pub enum Deoverlapped {
    /// Kept and removed geometries as two lists. The flat engine
    /// yields points and curves; the structured engine one geometry
    /// per surviving input, with removal from all origins
    /// concatenated in origin order.
    Split {
        kept: Vec<Geometry<f64>>,
        removed: Vec<Geometry<f64>>,
        mask: Mask,
    },
    /// Structured output with removal attributed to origin indices.
    Tracked(StructuredOutput),
}

impl Deoverlapped {
    pub fn kept(&self) -> &[Geometry<f64>] {
        match self {
            Deoverlapped::Split { kept, .. } => kept,
            Deoverlapped::Tracked(out) => &out.kept,
        }
    }

    /// All removed material in origin order, whatever the shape.
    pub fn removed(&self) -> Vec<&Geometry<f64>> {
        match self {
            Deoverlapped::Split { removed, .. } => removed.iter().collect_vec(),
            Deoverlapped::Tracked(out) => out.removed_parts.values().flatten().collect_vec(),
        }
    }

    pub fn mask(&self) -> &Mask {
        match self {
            Deoverlapped::Split { mask, .. } => mask,
            Deoverlapped::Tracked(out) => &out.mask,
        }
    }
}

/// De-overlap `input` with the given `tolerance`.
///
/// Geometries are processed in input order, and each earlier geometry
/// claims the area within `tolerance` of what it keeps; later
/// geometries lose whatever falls inside an earlier claim. The engine
/// and the result shape follow `options`:
///
/// | `preserve_types` | `keep_duplicates` | `track_origins` | result |
/// |---|---|---|---|
/// | `false` | `false` | any | `Split`, no removed |
/// | `false` | `true` | any | `Split`, removed atoms |
/// | `true` | `false` | `false` | `Split`, no removed |
/// | `true` | `true` | `false` | `Split`, removed of all origins |
/// | `true` | `false` | `true` | `Tracked`, empty `removed_parts` |
/// | `true` | `true` | `true` | `Tracked` |
///
/// Removal is computed either way; it is only discarded from the
/// result.
///
/// ```rust
/// use geo::line_string;
/// use geo_deoverlap::{deoverlap, GeomInput, Options, Silent};
///
/// let input: GeomInput = vec![
///     line_string![(x: 0., y: 0.), (x: 3., y: 0.)],
///     line_string![(x: 1., y: 0.), (x: 2., y: 0.)],
/// ]
/// .into();
/// let out = deoverlap(&input, 0.2, Options::new().keep_duplicates(true), &mut Silent).unwrap();
/// assert_eq!(out.kept().len(), 1);
/// assert_eq!(out.removed().len(), 1);
/// ```
pub fn deoverlap<P: Progress + ?Sized>(
    input: &GeomInput,
    tolerance: f64,
    options: Options,
    progress: &mut P,
) -> Result<Deoverlapped> {
    let Options {
        preserve_types,
        keep_duplicates,
        track_origins,
    } = options;

    Ok(match (preserve_types, keep_duplicates, track_origins) {
        (false, keep, _) => {
            let out = flat::run(input, tolerance, progress)?;
            Deoverlapped::Split {
                kept: out.kept.into_iter().map(Geometry::from).collect(),
                removed: if keep {
                    out.removed.into_iter().map(Geometry::from).collect()
                } else {
                    vec![]
                },
                mask: out.mask,
            }
        }
        (true, keep, false) => {
            let out = structured::run(input, tolerance, progress)?;
            Deoverlapped::Split {
                kept: out.kept,
                removed: if keep {
                    out.removed_parts.into_iter().flat_map(|(_, parts)| parts).collect()
                } else {
                    vec![]
                },
                mask: out.mask,
            }
        }
        (true, keep, true) => {
            let mut out = structured::run(input, tolerance, progress)?;
            if !keep {
                out.removed_parts = BTreeMap::new();
            }
            Deoverlapped::Tracked(out)
        }
    })
}
