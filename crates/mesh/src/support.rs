//! Rounded-rectangle support plate outline.

use extruded_text_core::{Path2D, PathKind, Point, Segment};

/// Outline of a support plate.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportShape {
    pub path: Path2D,
    pub width: f64,
    pub height: f64,
    /// Corner radius after clamping.
    pub radius: f64,
}

/// Limit a corner radius to `[0, min(width, height) / 2]`.
pub fn clamp_radius(width: f64, height: f64, radius: f64) -> f64 {
    let max = width.min(height) / 2.0;
    radius.min(max).max(0.0)
}

/// Build a rounded rectangle from `(0, 0)` to `(width, height)`.
///
/// The outline runs counter-clockwise starting on the bottom edge. With a zero
/// radius the corner arcs are left out and the result is a plain rectangle.
pub fn build_rounded_rect(width: f64, height: f64, radius: f64) -> SupportShape {
    let r = clamp_radius(width, height, radius);
    let mut path = Path2D::new(Point::new(r, 0.0), PathKind::Outer);

    let corner = |path: &mut Path2D, center: Point, to: Point| {
        if r > 0.0 {
            path.push(Segment::Arc { center, to });
        }
    };

    path.push(Segment::Line {
        to: Point::new(width - r, 0.0),
    });
    corner(&mut path, Point::new(width - r, r), Point::new(width, r));

    path.push(Segment::Line {
        to: Point::new(width, height - r),
    });
    corner(
        &mut path,
        Point::new(width - r, height - r),
        Point::new(width - r, height),
    );

    path.push(Segment::Line {
        to: Point::new(r, height),
    });
    corner(&mut path, Point::new(r, height - r), Point::new(0.0, height - r));

    path.push(Segment::Line {
        to: Point::new(0.0, r),
    });
    corner(&mut path, Point::new(r, r), Point::new(r, 0.0));

    path.close();

    SupportShape {
        path,
        width,
        height,
        radius: r,
    }
}
