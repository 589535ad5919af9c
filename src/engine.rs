//! The two mask-accumulation engines.
//!
//! Both walk their input in caller order against a single growing
//! [`Mask`]: whatever is kept first claims its tolerance-buffered
//! neighbourhood, and later geometries are clipped against it. The
//! [flat](flat::run) engine clips every atomic part independently;
//! the [structured](structured::run) engine clips the parts of each
//! top-level geometry together so the result can be reassembled.

pub mod flat;
pub use flat::FlatOutput;

pub mod structured;
pub use structured::StructuredOutput;

use crate::{
    error::Result,
    ops::{self, Split},
    AtomicGeometry, Mask,
};

/// Clip one part against the mask as it stands.
///
/// Parts with no mask entry near their envelope pass through whole.
fn clip_part(part: AtomicGeometry, mask: &Mask) -> Result<Split> {
    part.check_finite()?;
    if mask.is_empty() {
        return Ok(Split::unclipped(part));
    }
    let local = part.envelope().and_then(|rect| mask.local_union(rect));
    Ok(match local {
        Some(local) => ops::clip(&part, &local),
        None => Split::unclipped(part),
    })
}
