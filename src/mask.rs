use geo::{BoundingRect, Geometry, MultiPolygon, Rect};
use log::trace;
use rstar::{RTree, RTreeObject, AABB};

use crate::ops;

/// Envelope of one mask entry, tagged with its position in the mask.
#[derive(Debug, Clone)]
struct Envelope {
    aabb: AABB<[f64; 2]>,
    key: usize,
}

impl RTreeObject for Envelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb.clone()
    }
}

fn aabb(rect: Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}

/// The accumulated area already claimed by kept geometries.
///
/// Entries are tolerance-buffered copies of kept material, in the
/// order they were claimed. The mask is append-only: entries are
/// never mutated or removed. An R-tree over the entry envelopes is
/// updated on every push, so candidate queries always see the full
/// mask without rebuilding.
#[derive(Clone)]
pub struct Mask {
    entries: Vec<MultiPolygon<f64>>,
    index: RTree<Envelope>,
}

impl Default for Mask {
    fn default() -> Self {
        Mask {
            entries: Vec::new(),
            index: RTree::new(),
        }
    }
}

impl std::fmt::Debug for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mask")
            .field("entries", &self.entries)
            .finish()
    }
}

impl Mask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer `kept` by `tolerance` and append the result.
    pub fn claim(&mut self, kept: &Geometry<f64>, tolerance: f64) {
        self.push(ops::buffer(kept, tolerance));
    }

    fn push(&mut self, entry: MultiPolygon<f64>) {
        let key = self.entries.len();
        if let Some(rect) = entry.bounding_rect() {
            trace!("mask entry {key}: {rect:?}");
            self.index.insert(Envelope {
                aabb: aabb(rect),
                key,
            });
        }
        self.entries.push(entry);
    }

    /// Keys of entries whose envelope intersects `rect`, in ascending
    /// order.
    ///
    /// This is a broad-phase filter: a returned entry need not touch
    /// the geometry that `rect` bounds.
    pub fn candidates(&self, rect: Rect<f64>) -> Vec<usize> {
        let mut keys: Vec<usize> = self
            .index
            .locate_in_envelope_intersecting(&aabb(rect))
            .map(|e| e.key)
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Padded union of the entries near `rect`, or `None` if no entry
    /// is near enough to matter.
    pub fn local_union(&self, rect: Rect<f64>) -> Option<MultiPolygon<f64>> {
        let keys = self.candidates(rect);
        if keys.is_empty() {
            return None;
        }
        trace!("{n} mask candidates", n = keys.len());
        Some(ops::padded_union(keys.iter().map(|&k| &self.entries[k])))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MultiPolygon<f64>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<MultiPolygon<f64>> {
        self.entries
    }
}
