//! `extruded-text-layout` turns a string into positioned 2D glyph outlines.
//!
//! Glyph contours come from any [GlyphSource]. Each contour is decoded into a
//! closed [Path2D](extruded_text_core::Path2D) and classified as an outer path
//! or a hole by its winding direction, then the glyphs of every line are
//! placed and aligned.
//!
//! ```ignore
//! use extruded_text_layout::{layout, LayoutOptions};
//!
//! let text = layout(&font, "Hello\nWorld", &LayoutOptions::default());
//! println!("{} glyphs, {} wide", text.glyphs.len(), text.bounds.width());
//! ```

pub mod outline;
pub mod text;

pub use extruded_text_core::{Align, GlyphSource, TextLayout};
pub use outline::{decode, decode_glyph, winding};
pub use text::{LayoutOptions, align_offsets, layout};
