#![no_std]

//! `extruded-text-core` provides core primitives for the `extruded-text` crate.
//!
//! It holds the glyph-outline data model shared by the layout and mesh crates,
//! and the [GlyphSource] trait implemented by font backends.

use alloc::vec::Vec;

extern crate alloc;

/// A point in a 2D plane.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }

    pub fn translated(self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A control point of a font contour, in glyph-local font units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ContourPoint {
    pub x: f64,
    pub y: f64,
    /// Does this point lie on the outline, or is it a quadratic control point?
    pub on_curve: bool,
}

impl ContourPoint {
    pub const fn on(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            on_curve: true,
        }
    }

    pub const fn off(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            on_curve: false,
        }
    }
}

/// One closed loop of a glyph outline. The last point connects back to the first.
pub type Contour = Vec<ContourPoint>;

/// A single drawing command of a [Path2D], starting at the previous segment's end.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    /// Straight line to `to`.
    Line { to: Point },
    /// Quadratic Bézier curve through control point `ctrl` to `to`.
    Quadratic { ctrl: Point, to: Point },
    /// Counter-clockwise circular arc around `center`, ending at `to`.
    Arc { center: Point, to: Point },
}

impl Segment {
    /// Endpoint of this segment.
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line { to } | Segment::Quadratic { to, .. } | Segment::Arc { to, .. } => to,
        }
    }

    fn translated(self, dx: f64, dy: f64) -> Segment {
        match self {
            Segment::Line { to } => Segment::Line {
                to: to.translated(dx, dy),
            },
            Segment::Quadratic { ctrl, to } => Segment::Quadratic {
                ctrl: ctrl.translated(dx, dy),
                to: to.translated(dx, dy),
            },
            Segment::Arc { center, to } => Segment::Arc {
                center: center.translated(dx, dy),
                to: to.translated(dx, dy),
            },
        }
    }
}

/// Whether a path adds or subtracts filled area.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PathKind {
    Outer,
    Hole,
}

/// A closed 2D path made of line, curve and arc segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Path2D {
    pub start: Point,
    pub segments: Vec<Segment>,
    pub kind: PathKind,
}

impl Path2D {
    pub fn new(start: Point, kind: PathKind) -> Self {
        Self {
            start,
            segments: Vec::new(),
            kind,
        }
    }

    /// Current pen position: the end of the last segment, or the start point.
    pub fn end(&self) -> Point {
        self.segments.last().map_or(self.start, Segment::end)
    }

    /// Append a segment, dropping straight lines of zero length.
    pub fn push(&mut self, segment: Segment) {
        if let Segment::Line { to } = segment {
            if to == self.end() {
                return;
            }
        }
        self.segments.push(segment);
    }

    /// Add a straight segment back to the start point if the pen is elsewhere.
    pub fn close(&mut self) {
        let start = self.start;
        self.push(Segment::Line { to: start });
    }

    pub fn is_closed(&self) -> bool {
        self.end() == self.start
    }

    /// Copy of this path shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Path2D {
        Path2D {
            start: self.start.translated(dx, dy),
            segments: self
                .segments
                .iter()
                .map(|s| s.translated(dx, dy))
                .collect(),
            kind: self.kind,
        }
    }

    /// Same geometry, different role.
    pub fn with_kind(mut self, kind: PathKind) -> Path2D {
        self.kind = kind;
        self
    }
}

/// Decoded outline of one glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    pub outers: Vec<Path2D>,
    pub holes: Vec<Path2D>,
}

impl GlyphOutline {
    pub fn is_empty(&self) -> bool {
        self.outers.is_empty() && self.holes.is_empty()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Zero-size box at a single point.
    pub const fn point(p: Point) -> Self {
        Self { min: p, max: p }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Does this box cover no area at all?
    pub fn is_empty(&self) -> bool {
        self.min == self.max
    }

    /// Grow to contain `other`.
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

/// Positioned, scaled outlines of a whole (possibly multi-line) string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    pub glyphs: Vec<GlyphOutline>,
    /// Tight box around all ink. Collapsed to one point when there is none.
    pub bounds: Bounds,
}

impl TextLayout {
    pub fn has_ink(&self) -> bool {
        !self.bounds.is_empty() && self.glyphs.iter().any(|g| !g.is_empty())
    }
}

/// Horizontal alignment of the lines of a multi-line text.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A glyph as handed out by a font backend, in font units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontGlyph {
    pub contours: Vec<Contour>,
    /// Ink bounds of this glyph, `None` for blank glyphs such as a space.
    pub bounds: Option<Bounds>,
    /// Horizontal advance of the pen after this glyph.
    pub advance: f64,
}

/// Provides glyph outlines to the layout engine.
///
/// Implementors may back this with a font file, generated tables, or anything
/// else that can describe glyphs as quadratic contours.
pub trait GlyphSource {
    /// Number of font units per em square.
    fn units_per_em(&self) -> u16;

    /// Look up the glyph for a character. `None` if the font does not cover it.
    fn glyph(&self, ch: char) -> Option<FontGlyph>;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn units_per_em(&self) -> u16 {
        (**self).units_per_em()
    }

    fn glyph(&self, ch: char) -> Option<FontGlyph> {
        (**self).glyph(ch)
    }
}
