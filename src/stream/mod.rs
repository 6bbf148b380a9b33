//! FCP streaming layer
//!
//! Byte-stream framing over an unreliable serial link: the
//! [`FrameAssembler`] turns arbitrarily fragmented chunks into candidate
//! frames and resynchronizes after corruption; the [`Link`] facade composes
//! it with the payload codecs into the `encode`/`feed`/`reset` surface the
//! transport collaborator drives.

mod assembler;
mod link;

pub use assembler::{FrameAssembler, Rejection};
pub use link::{Link, Outcome};
