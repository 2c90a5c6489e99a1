//! Combination of extruded text and support plate into the final solids.

use std::f64::consts::FRAC_PI_2;

use extruded_text_core::{Path2D, PathKind, TextLayout};
use nalgebra::Vector3;

use crate::error::{MeshError, Result};
use crate::extrude::extrude;
use crate::params::{MeshParams, MeshTopology};
use crate::solid::Solid3D;
use crate::support::{build_rounded_rect, clamp_radius};

/// Sizes a host needs to place the generated solids.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Dimensions {
    /// Support plate width.
    pub width: f64,
    /// Support plate height.
    pub height: f64,
    /// Corner radius the plate was built with.
    pub border_radius: f64,
    pub text_width: f64,
    pub text_height: f64,
    pub text_depth: f64,
}

/// Output of [assemble].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshResult {
    /// Extruded text, absent for negative text or when there is no ink.
    pub text_solid: Option<Solid3D>,
    /// Support plate, absent for text-only output.
    pub support_solid: Option<Solid3D>,
    pub dimensions: Dimensions,
}

/// Thicknesses of the stacked parts of a negative-text plate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NegativeLayers {
    /// Plain backing below the cut-out layer, zero when there is none.
    pub slab_depth: f64,
    /// Layer the glyphs are cut out of.
    pub cavity_depth: f64,
    /// Total plate thickness.
    pub total_depth: f64,
}

impl NegativeLayers {
    /// The plate is never thinner than the text it holds.
    pub fn new(support_depth: f64, text_depth: f64) -> Result<Self> {
        let total_depth = support_depth.max(text_depth);
        if total_depth <= 0.0 {
            return Err(MeshError::UnsupportedTopologyDepth { depth: total_depth });
        }

        Ok(Self {
            slab_depth: total_depth - text_depth,
            cavity_depth: text_depth,
            total_depth,
        })
    }
}

/// Extrude every glyph of the layout, holes cut from their outers.
fn extrude_text(layout: &TextLayout, depth: f64, segments: u32) -> Result<Option<Solid3D>> {
    if !layout.has_ink() {
        return Ok(None);
    }

    let glyphs = layout
        .glyphs
        .iter()
        .filter(|g| !g.is_empty())
        .map(|g| extrude(&g.outers, &g.holes, depth, segments))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(Solid3D::merge(glyphs)))
}

/// Move every glyph path of one kind into plate coordinates, retagged as `kind`.
fn glyph_paths(layout: &TextLayout, hole_paths: bool, dx: f64, dy: f64, kind: PathKind) -> Vec<Path2D> {
    layout
        .glyphs
        .iter()
        .flat_map(|g| if hole_paths { &g.holes } else { &g.outers })
        .map(|p| p.translated(dx, dy).with_kind(kind))
        .collect()
}

/// Build the solids for a laid-out text according to `params.topology`.
///
/// The text is placed inside the padded area of the plate, with its ink box
/// corner at `(padding.left, padding.bottom)`.
pub fn assemble(layout: &TextLayout, params: &MeshParams) -> Result<MeshResult> {
    params.validate()?;

    let topology = params.topology;
    let segments = params.segments();
    let text_depth = params.text_depth();
    let support_depth = params.support_depth();
    let padding = params.support_padding;
    let bounds = layout.bounds;

    let text_width = bounds.width();
    let text_height = bounds.height();

    // A standing text needs room for its depth on the plate, not its height.
    let plate_width = text_width + padding.left + padding.right;
    let plate_height = match topology {
        MeshTopology::VerticalTextWithSupport => text_depth,
        _ => text_height,
    } + padding.top
        + padding.bottom;

    let support = topology
        .has_support()
        .then(|| build_rounded_rect(plate_width, plate_height, params.support_corner_radius));

    let move_x = -bounds.min.x + padding.left;
    let move_y = -bounds.min.y + padding.bottom;

    let mut text_solid = None;
    let mut support_solid = None;

    match (topology, &support) {
        (MeshTopology::NegativeText, Some(support)) => {
            let layers = NegativeLayers::new(support_depth, text_depth)?;

            let slab = extrude(
                std::slice::from_ref(&support.path),
                &[],
                layers.slab_depth,
                segments,
            )?;

            // Letter outlines become holes in the plate, counters become solid plugs.
            let cutouts = glyph_paths(layout, false, move_x, move_y, PathKind::Hole);
            let counters = glyph_paths(layout, true, move_x, move_y, PathKind::Outer);

            let mut plate = extrude(
                std::slice::from_ref(&support.path),
                &cutouts,
                layers.cavity_depth,
                segments,
            )?;
            let mut plugs = extrude(&counters, &[], layers.cavity_depth, segments)?;

            if layers.slab_depth > 0.0 {
                let lift = Vector3::new(0.0, 0.0, layers.slab_depth);
                plate.translate(lift);
                plugs.translate(lift);
            }

            support_solid = Some(Solid3D::merge([plate, plugs, slab]));
        }
        _ => {
            if let Some(support) = &support {
                support_solid = Some(extrude(
                    std::slice::from_ref(&support.path),
                    &[],
                    support_depth,
                    segments,
                )?);
            }

            text_solid = extrude_text(layout, text_depth, segments)?.map(|mut text| {
                let mut lift_y = move_y;
                if topology == MeshTopology::VerticalTextWithSupport {
                    text.rotate_x(FRAC_PI_2);
                    lift_y += text_depth;
                }
                text.translate(Vector3::new(move_x, lift_y, support_depth));
                text
            });
        }
    }

    let border_radius = match &support {
        Some(support) => support.radius,
        None => clamp_radius(plate_width, plate_height, params.support_corner_radius),
    };

    let dimensions = Dimensions {
        width: plate_width,
        height: plate_height,
        border_radius,
        text_width,
        text_height,
        text_depth,
    };

    tracing::debug!(
        ?topology,
        glyphs = layout.glyphs.len(),
        width = dimensions.width,
        height = dimensions.height,
        text_faces = text_solid.as_ref().map_or(0, Solid3D::face_count),
        support_faces = support_solid.as_ref().map_or(0, Solid3D::face_count),
        "assembled mesh"
    );

    Ok(MeshResult {
        text_solid,
        support_solid,
        dimensions,
    })
}
