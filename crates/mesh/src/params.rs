//! Mesh generation settings.

use extruded_text_core::Align;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Depth used when the requested text depth is negative.
pub const DEFAULT_TEXT_DEPTH: f64 = 50.0;

/// Glyph size used when the requested size is negative.
pub const DEFAULT_SIZE: f64 = 20.0;

/// How text and support plate are combined.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeshTopology {
    /// Extruded text on its own.
    TextOnly,
    /// Text standing flat on top of a plate.
    #[default]
    TextWithSupport,
    /// Text cut out of the plate, with the counters as separate plugs.
    NegativeText,
    /// Text standing upright on a plate.
    VerticalTextWithSupport,
}

impl MeshTopology {
    pub fn has_support(self) -> bool {
        self != MeshTopology::TextOnly
    }
}

/// Space between the text and the edges of the support plate.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Padding {
    /// Same padding on every side.
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

/// Every setting that shapes the generated mesh.
///
/// Missing fields deserialize to their defaults, so a partial settings file is
/// enough:
///
/// ```
/// use extruded_text_mesh::{MeshParams, MeshTopology};
///
/// let params: MeshParams = toml::from_str("topology = \"negative-text\"\nextrude_depth = 5.0").unwrap();
/// assert_eq!(params.topology, MeshTopology::NegativeText);
/// assert_eq!(params.support_depth, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParams {
    pub topology: MeshTopology,
    /// Height of one em, in output units.
    pub size: f64,
    /// Thickness of the extruded text.
    pub extrude_depth: f64,
    /// Extra gap after each glyph.
    pub spacing: f64,
    /// Extra gap between lines.
    pub line_spacing: f64,
    pub align: Align,
    /// Thickness of the support plate.
    pub support_depth: f64,
    pub support_corner_radius: f64,
    /// Number of straight pieces each curve is split into.
    pub curve_segments: u32,
    pub support_padding: Padding,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            topology: MeshTopology::default(),
            size: DEFAULT_SIZE,
            extrude_depth: DEFAULT_TEXT_DEPTH,
            spacing: 0.1,
            line_spacing: 1.0,
            align: Align::Left,
            support_depth: 10.0,
            support_corner_radius: 10.0,
            curve_segments: 12,
            support_padding: Padding::default(),
        }
    }
}

impl MeshParams {
    pub fn with_topology(mut self, topology: MeshTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_extrude_depth(mut self, depth: f64) -> Self {
        self.extrude_depth = depth;
        self
    }

    pub fn with_spacing(mut self, spacing: f64, line_spacing: f64) -> Self {
        self.spacing = spacing;
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_support(mut self, depth: f64, corner_radius: f64, padding: Padding) -> Self {
        self.support_depth = depth;
        self.support_corner_radius = corner_radius;
        self.support_padding = padding;
        self
    }

    pub fn with_curve_segments(mut self, segments: u32) -> Self {
        self.curve_segments = segments;
        self
    }

    /// Reject settings that are not finite numbers.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("size", self.size),
            ("extrude_depth", self.extrude_depth),
            ("spacing", self.spacing),
            ("line_spacing", self.line_spacing),
            ("support_depth", self.support_depth),
            ("support_corner_radius", self.support_corner_radius),
            ("support_padding.top", self.support_padding.top),
            ("support_padding.bottom", self.support_padding.bottom),
            ("support_padding.left", self.support_padding.left),
            ("support_padding.right", self.support_padding.right),
        ];

        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(MeshError::InvalidParameter { name, value }),
            None => Ok(()),
        }
    }

    /// Glyph size, falling back to the default when negative.
    pub fn effective_size(&self) -> f64 {
        if self.size < 0.0 {
            tracing::warn!(size = self.size, "negative text size, using default");
            DEFAULT_SIZE
        } else {
            self.size
        }
    }

    /// Text thickness, falling back to the default when negative.
    pub fn text_depth(&self) -> f64 {
        if self.extrude_depth < 0.0 {
            tracing::warn!(depth = self.extrude_depth, "negative text depth, using default");
            DEFAULT_TEXT_DEPTH
        } else {
            self.extrude_depth
        }
    }

    /// Support thickness, clamped to zero.
    pub fn support_depth(&self) -> f64 {
        if self.support_depth < 0.0 {
            tracing::warn!(depth = self.support_depth, "negative support depth, clamping to 0");
            0.0
        } else {
            self.support_depth
        }
    }

    pub(crate) fn segments(&self) -> u32 {
        self.curve_segments.max(1)
    }
}
