use std::collections::BTreeMap;

use geo::{Geometry, HasDimensions};
use log::{debug, info, trace};
use smallvec::SmallVec;

use super::clip_part;
use crate::{
    error::{check_tolerance, Result},
    flatten::{flatten_into, geometry_kind},
    ops, AtomicGeometry, GeomInput, Mask, Progress,
};

/// Output of the structured engine.
#[derive(Debug, Clone, Default)]
pub struct StructuredOutput {
    /// One entry per surviving top-level geometry, in input order.
    /// Wholly removed geometries are absent, not placeholders.
    pub kept: Vec<Geometry<f64>>,
    /// Removed material keyed by origin index.
    pub removed_parts: BTreeMap<usize, Vec<Geometry<f64>>>,
    /// Origin indices of geometries none of whose parts survived.
    pub wholly_removed: Vec<usize>,
    pub mask: Mask,
}

type Parts = SmallVec<[AtomicGeometry; 4]>;

/// De-overlap the top-level geometries of `input`, keeping each
/// geometry's parts together.
///
/// The top-level geometries are the leaves of `input` in depth-first
/// order; a leaf's position in that order is its origin index. All
/// parts of a geometry are clipped against the mask as it stood
/// before the geometry, so parts of one geometry never clip each
/// other. Surviving parts are reassembled into one geometry which
/// claims one mask entry. A polygon none of whose boundary was
/// clipped comes back as the original polygon.
pub fn run<P: Progress + ?Sized>(
    input: &GeomInput,
    tolerance: f64,
    progress: &mut P,
) -> Result<StructuredOutput> {
    check_tolerance(tolerance)?;
    let geoms = input.leaves();

    let mut out = StructuredOutput::default();
    progress.begin("De-overlapping (structured)", geoms.len());
    for (idx, geom) in geoms.into_iter().enumerate() {
        out.process(idx, geom, tolerance)?;
        progress.advance();
    }
    progress.finish();

    info!(
        "structured: {k} kept, {r} with removals, {w} wholly removed, {m} mask entries",
        k = out.kept.len(),
        r = out.removed_parts.len(),
        w = out.wholly_removed.len(),
        m = out.mask.len(),
    );
    Ok(out)
}

impl StructuredOutput {
    fn process(&mut self, idx: usize, geom: &Geometry<f64>, tolerance: f64) -> Result<()> {
        if geom.is_empty() {
            trace!("geometry {idx}: empty, skipped");
            return Ok(());
        }

        let mut parts = Vec::new();
        flatten_into(geom, &mut parts)?;
        if parts.is_empty() {
            trace!("geometry {idx}: no parts, skipped");
            return Ok(());
        }
        let num_parts = parts.len();

        let mut kept = Parts::new();
        let mut removed = Parts::new();
        for part in parts {
            let split = clip_part(part, &self.mask)?;
            kept.extend(split.kept);
            removed.extend(split.removed);
        }
        debug!(
            "geometry {idx} ({kind}): {num_parts} parts, {k} kept, {r} removed pieces",
            kind = geometry_kind(geom),
            k = kept.len(),
            r = removed.len(),
        );

        if kept.is_empty() {
            self.wholly_removed.push(idx);
            self.removed_parts.insert(idx, vec![geom.clone()]);
            return Ok(());
        }

        // Parts of one geometry may overlap each other; the kept result
        // covers their overlap once and removal is what it leaves out.
        let (kept, removed) = if num_parts > 1 {
            merge(kept, removed)
        } else {
            (kept.into_vec(), removed.into_vec())
        };

        let reassembled = ops::assemble(kept);
        let untouched_polygon = match geom {
            Geometry::Polygon(poly) => ops::topo_equals(&reassembled, &ops::boundary_of(poly)),
            _ => false,
        };

        if !untouched_polygon && !removed.is_empty() {
            self.removed_parts.insert(idx, vec![ops::assemble(removed)]);
        }
        self.mask.claim(&reassembled, tolerance);
        self.kept.push(if untouched_polygon {
            geom.clone()
        } else {
            reassembled
        });
        Ok(())
    }
}

/// Dissolve the kept pieces of a multi-part geometry, then drop from
/// the removed pieces whatever the dissolved result still covers.
fn merge(kept: Parts, removed: Parts) -> (Vec<AtomicGeometry>, Vec<AtomicGeometry>) {
    let kept = ops::dissolve(kept.into_vec());
    let removed = ops::dissolve(removed.into_vec());
    if removed.is_empty() {
        return (kept, removed);
    }

    let covered = ops::buffer(&ops::assemble(kept.clone()), ops::ROBUSTNESS_EPSILON);
    let removed = removed
        .into_iter()
        .flat_map(|piece| ops::clip(&piece, &covered).kept)
        .collect();
    (kept, removed)
}
