//! `extruded-text` is a library for turning text into 3D solids ready for
//! fabrication or rendering.
//!
//! Text is laid out from a font's glyph outlines, extruded, and optionally
//! mounted on (or cut into) a rounded-rectangle support plate.
//!
//! Fonts are read through the [GlyphSource] trait. TrueType and OpenType files
//! are supported out of the box via [TtfFont], whose parsed [TtfFace] serves
//! the glyph lookups.
//!
//! ```no_run
//! use extruded_text::{generate_mesh, MeshParams, MeshTopology, TtfFont};
//!
//! let font = TtfFont::from_path("DejaVuSans.ttf", 0)?;
//! let params = MeshParams::default().with_topology(MeshTopology::NegativeText);
//! let result = generate_mesh(&font.face()?, "Hello\nWorld", &params)?;
//!
//! println!("plate is {} x {}", result.dimensions.width, result.dimensions.height);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use extruded_text_core::{
    Align, Bounds, Contour, ContourPoint, FontGlyph, GlyphOutline, GlyphSource, Path2D, PathKind,
    Point, Segment, TextLayout,
};
pub use extruded_text_layout::{LayoutOptions, layout};
pub use extruded_text_mesh::{
    Dimensions, MeshError, MeshParams, MeshResult, MeshTopology, Padding, Solid3D, assemble,
    build_rounded_rect,
};
pub use extruded_text_ttf::{FontError, TtfFace, TtfFont};

/// Layout settings taken from the mesh settings.
pub fn layout_options(params: &MeshParams) -> LayoutOptions {
    LayoutOptions {
        size: params.effective_size(),
        spacing: params.spacing,
        line_spacing: params.line_spacing,
        align: params.align,
    }
}

/// Lay out `text` with `font` and build its solids.
///
/// Every call starts from scratch; nothing is cached between calls. The
/// settings are checked by [assemble].
pub fn generate_mesh<S: GlyphSource>(
    font: &S,
    text: &str,
    params: &MeshParams,
) -> extruded_text_mesh::Result<MeshResult> {
    let text_layout = layout(font, text, &layout_options(params));
    tracing::debug!(glyphs = text_layout.glyphs.len(), "generating mesh");

    assemble(&text_layout, params)
}
