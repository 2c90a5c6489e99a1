//! Conversion of raw quadratic font contours into closed [Path2D]s.

use extruded_text_core::{ContourPoint, FontGlyph, GlyphOutline, Path2D, PathKind, Point, Segment};

/// Contours shorter than this cannot enclose anything.
const MIN_CONTOUR_POINTS: usize = 2;

/// Classify a contour by the direction it is traversed in.
///
/// Accumulates `(prev.x - curr.x) * (curr.y + prev.y)` over the raw points.
/// A positive sum marks a counter-clockwise loop, which fonts use for holes.
pub fn winding(contour: &[ContourPoint]) -> PathKind {
    let Some(mut last) = contour.last() else {
        return PathKind::Outer;
    };

    let mut sum = 0.0;
    for point in contour {
        sum += (last.x - point.x) * (point.y + last.y);
        last = point;
    }

    if sum > 0.0 {
        PathKind::Hole
    } else {
        PathKind::Outer
    }
}

/// Decode one contour into a closed path, scaled and then shifted by the offset.
///
/// Returns `None` for degenerate contours with fewer than two points.
pub fn decode(contour: &[ContourPoint], scale: f64, offset_x: f64, offset_y: f64) -> Option<Path2D> {
    let len = contour.len();
    if len < MIN_CONTOUR_POINTS {
        return None;
    }

    let coord = |x: f64, y: f64| Point::new(x * scale + offset_x, y * scale + offset_y);
    let at = |p: &ContourPoint| coord(p.x, p.y);
    let mid = |a: &ContourPoint, b: &ContourPoint| coord((a.x + b.x) * 0.5, (a.y + b.y) * 0.5);

    let first = &contour[0];
    let last = &contour[len - 1];
    let start = if last.on_curve {
        at(last)
    } else if first.on_curve {
        at(first)
    } else {
        mid(last, first)
    };

    let mut path = Path2D::new(start, winding(contour));

    for i in 0..len {
        let prev = &contour[(i + len - 1) % len];
        let curr = &contour[i];
        let next = &contour[(i + 1) % len];

        if curr.on_curve {
            path.push(Segment::Line { to: at(curr) });
            continue;
        }

        // Two off-curve points in a row imply an on-curve point between them.
        let from = if prev.on_curve { at(prev) } else { mid(prev, curr) };
        let to = if next.on_curve { at(next) } else { mid(curr, next) };

        path.push(Segment::Line { to: from });
        path.push(Segment::Quadratic { ctrl: at(curr), to });
    }

    path.close();
    Some(path)
}

/// Decode every contour of a glyph, sorting the paths into outers and holes.
pub fn decode_glyph(glyph: &FontGlyph, scale: f64, offset_x: f64, offset_y: f64) -> GlyphOutline {
    let mut outline = GlyphOutline::default();

    for contour in &glyph.contours {
        let Some(path) = decode(contour, scale, offset_x, offset_y) else {
            tracing::trace!(points = contour.len(), "dropping degenerate contour");
            continue;
        };

        match path.kind {
            PathKind::Outer => outline.outers.push(path),
            PathKind::Hole => outline.holes.push(path),
        }
    }

    outline
}
