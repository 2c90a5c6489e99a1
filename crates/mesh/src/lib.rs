//! `extruded-text-mesh` turns laid-out text into 3D solids.
//!
//! Glyph outlines are extruded along +Z and combined with a rounded-rectangle
//! support plate in one of four ways, picked by [MeshTopology]:
//!
//! - [MeshTopology::TextOnly]: just the extruded text.
//! - [MeshTopology::TextWithSupport]: text lying on top of a plate.
//! - [MeshTopology::VerticalTextWithSupport]: text standing upright on a plate.
//! - [MeshTopology::NegativeText]: text cut out of a plate, with the glyph
//!   counters kept as loose plugs.
//!
//! The generated [Solid3D]s are plain triangle lists. Exporting them or
//! repairing overlaps is left to the caller.

mod assemble;
mod error;
mod extrude;
mod params;
mod solid;
mod support;

pub use assemble::{Dimensions, MeshResult, NegativeLayers, assemble};
pub use error::{MeshError, Result};
pub use extrude::{extrude, flatten};
pub use params::{DEFAULT_SIZE, DEFAULT_TEXT_DEPTH, MeshParams, MeshTopology, Padding};
pub use solid::{Aabb, Solid3D};
pub use support::{SupportShape, build_rounded_rect, clamp_radius};
