//! Multi-line text layout.

use extruded_text_core::{Align, Bounds, FontGlyph, GlyphSource, Point, TextLayout};
use rayon::prelude::*;

use crate::outline::decode_glyph;

/// Settings which control how a string is laid out.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Glyph size: the height of one em, in output units.
    pub size: f64,
    /// Extra horizontal gap added after each glyph.
    pub spacing: f64,
    /// Extra vertical gap between lines, on top of `size`.
    pub line_spacing: f64,
    pub align: Align,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            size: 20.0,
            spacing: 0.1,
            line_spacing: 1.0,
            align: Align::Left,
        }
    }
}

/// A glyph found during measurement, waiting to be decoded at its final position.
struct Placement {
    glyph: FontGlyph,
    line: usize,
    x: f64,
    y: f64,
}

/// Result of the measurement pass.
struct Measurement {
    placements: Vec<Placement>,
    line_widths: Vec<f64>,
    bounds: Option<Bounds>,
}

/// Walk every line once, positioning glyphs and measuring ink.
fn measure<S: GlyphSource>(font: &S, lines: &[&str], scale: f64, options: &LayoutOptions) -> Measurement {
    let mut placements = Vec::new();
    let mut line_widths = Vec::with_capacity(lines.len());
    let mut bounds: Option<Bounds> = None;

    for (line, text) in lines.iter().enumerate() {
        let y = -(line as f64) * (options.size + options.line_spacing);
        let mut pen = 0.0;
        let mut width: f64 = 0.0;

        for ch in text.chars() {
            let Some(glyph) = font.glyph(ch) else {
                tracing::trace!(?ch, "font has no glyph, skipping");
                continue;
            };

            let x = pen;
            pen += glyph.advance * scale + options.spacing;

            if let Some(ink) = glyph.bounds {
                let placed = Bounds {
                    min: Point::new(x + ink.min.x * scale, y + ink.min.y * scale),
                    max: Point::new(x + ink.max.x * scale, y + ink.max.y * scale),
                };
                width = width.max(placed.max.x);
                bounds = Some(bounds.map_or(placed, |b| b.union(placed)));
            }

            placements.push(Placement { glyph, line, x, y });
        }

        line_widths.push(width);
    }

    Measurement {
        placements,
        line_widths,
        bounds,
    }
}

/// Horizontal offset of each line for the requested alignment.
pub fn align_offsets(line_widths: &[f64], align: Align) -> Vec<f64> {
    let divisor = match align {
        Align::Left => return vec![0.0; line_widths.len()],
        Align::Center => 2.0,
        Align::Right => 1.0,
    };

    let max_width = line_widths.iter().copied().fold(0.0, f64::max);
    line_widths
        .iter()
        .map(|&width| {
            if width < max_width {
                (max_width - width) / divisor
            } else {
                0.0
            }
        })
        .collect()
}

/// Lay out `text` with glyphs from `font`.
///
/// Lines are split on `\n` and stripped of trailing whitespace. Glyphs advance
/// by their own width plus `spacing`; kerning is not applied. Each line sits
/// `size + line_spacing` below the previous one.
pub fn layout<S: GlyphSource>(font: &S, text: &str, options: &LayoutOptions) -> TextLayout {
    let units_per_em = font.units_per_em();
    if units_per_em == 0 {
        tracing::warn!("font reports zero units per em, nothing to lay out");
        return TextLayout::default();
    }
    let scale = options.size / f64::from(units_per_em);

    let lines: Vec<&str> = text.split('\n').map(str::trim_end).collect();
    let measurement = measure(font, &lines, scale, options);

    // Offsets need the widest line, so they can only be known once every line is measured.
    let offsets = align_offsets(&measurement.line_widths, options.align);

    let glyphs = measurement
        .placements
        .par_iter()
        .map(|p| decode_glyph(&p.glyph, scale, p.x + offsets[p.line], p.y))
        .collect();

    let bounds = measurement
        .bounds
        .unwrap_or_else(|| Bounds::point(Point::default()));

    tracing::debug!(
        lines = lines.len(),
        glyphs = measurement.placements.len(),
        width = bounds.width(),
        height = bounds.height(),
        "laid out text"
    );

    TextLayout { glyphs, bounds }
}
