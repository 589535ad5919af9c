//! Removes spatial overlap among a collection of 2D geometries.
//!
//! 1. [Flattening](#flattening)
//! 1. [De-overlapping](#de-overlapping)
//!
//! # Flattening
//!
//! [`flatten_geometries`] decomposes arbitrarily nested input into a
//! sequence of [`AtomicGeometry`]: points and curves. Aggregates are
//! expanded in member order and polygons contribute their boundary
//! rings.
//!
//! # De-overlapping
//!
//! [`deoverlap`] walks the input in order while accumulating a
//! [`Mask`]: each geometry keeps whatever lies outside the mask, and
//! the kept material, buffered by the tolerance, is added to the mask.
//! Earlier geometries therefore win every overlap, and the kept set
//! covers each location at most once up to the tolerance.
//!
//! Two engines are available (see [`engine`]). The flat engine clips
//! every point and curve independently and returns the surviving
//! pieces. The structured engine clips the parts of each input
//! geometry together, returns one geometry per surviving input,
//! restores polygons that were left untouched, and attributes removed
//! material to the index of the input it came from.
//!
//! ## Usage
//!
//! ```rust
//! use geo::{line_string, Geometry};
//! use geo_deoverlap::{deoverlap, Deoverlapped, GeomInput, Options, Silent};
//!
//! let input: GeomInput = vec![
//!     line_string![(x: 0., y: 0.), (x: 4., y: 0.)],
//!     line_string![(x: 1., y: 0.05), (x: 2., y: 0.05)],
//!     line_string![(x: 3., y: 0.05), (x: 5., y: 0.05)],
//! ]
//! .into();
//!
//! let options = Options::new()
//!     .preserve_types(true)
//!     .keep_duplicates(true)
//!     .track_origins(true);
//! match deoverlap(&input, 0.1, options, &mut Silent).unwrap() {
//!     Deoverlapped::Tracked(out) => {
//!         assert_eq!(out.kept.len(), 2);
//!         assert_eq!(out.wholly_removed, vec![1]);
//!         assert!(matches!(out.removed_parts[&1][0], Geometry::LineString(_)));
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! Clipping, buffering and unions are delegated to [`geo`]; candidate
//! mask entries are found with an [`rstar`] R-tree over their
//! envelopes.
mod error;
pub use error::{DeoverlapError, Result};

mod atomic;
pub use atomic::AtomicGeometry;

mod input;
pub use input::GeomInput;

mod flatten;
pub use flatten::{flatten_geometries, geometry_kind};

pub mod ops;
pub use ops::ROBUSTNESS_EPSILON;

mod mask;
pub use mask::Mask;

mod progress;
pub use progress::{LogProgress, Progress, Silent};

pub mod engine;

mod dispatch;
pub use dispatch::{deoverlap, Deoverlapped, Options};

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
