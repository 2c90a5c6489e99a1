//! Linear extrusion of 2D outlines into closed solids.

use std::collections::HashSet;
use std::f64::consts::TAU;

use extruded_text_core::{Path2D, Point, Segment};
use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use lyon_tessellation::math::point;
use lyon_tessellation::path::Path as LyonPath;
use lyon_tessellation::{BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers};

use crate::error::{MeshError, Result};
use crate::solid::Solid3D;

/// A flattened closed loop. The closing edge back to the first point is implicit.
type Ring = Vec<Point>;

/// A directed cap edge, keyed by the exact bits of its end points.
type Edge = ((u32, u32), (u32, u32));

/// Caps are tessellated in single precision, so ring points are rounded the
/// same way to keep cap and wall edges on identical coordinates.
fn snap(p: Point) -> Point {
    Point::new(p.x as f32 as f64, p.y as f32 as f64)
}

/// Snap points and drop repeats, including a repeated closing point.
fn tidy(points: impl IntoIterator<Item = Point>) -> Ring {
    let mut ring: Ring = Vec::new();
    for p in points.into_iter().map(snap) {
        if ring.last() != Some(&p) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Approximate a path by straight pieces, each curve split into `segments` steps.
pub fn flatten(path: &Path2D, segments: u32) -> Ring {
    let steps = segments.max(1);
    let mut points = vec![path.start];
    let mut pen = path.start;

    for segment in &path.segments {
        match *segment {
            Segment::Line { to } => points.push(to),
            Segment::Quadratic { ctrl, to } => {
                for i in 1..=steps {
                    let t = f64::from(i) / f64::from(steps);
                    let (a, b, c) = ((1.0 - t) * (1.0 - t), 2.0 * (1.0 - t) * t, t * t);
                    points.push(Point::new(
                        a * pen.x + b * ctrl.x + c * to.x,
                        a * pen.y + b * ctrl.y + c * to.y,
                    ));
                }
            }
            Segment::Arc { center, to } => {
                let radius = (pen.x - center.x).hypot(pen.y - center.y);
                let from_angle = (pen.y - center.y).atan2(pen.x - center.x);
                let mut sweep = (to.y - center.y).atan2(to.x - center.x) - from_angle;
                while sweep <= 0.0 {
                    sweep += TAU;
                }
                for i in 1..steps {
                    let angle = from_angle + sweep * f64::from(i) / f64::from(steps);
                    points.push(Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }
                points.push(to);
            }
        }
        pen = segment.end();
    }

    tidy(points)
}

/// Twice the signed area of a ring, positive when counter-clockwise.
fn signed_area2(ring: &[Point]) -> f64 {
    let Some(mut prev) = ring.last() else {
        return 0.0;
    };
    let mut sum = 0.0;
    for p in ring {
        sum += prev.x * p.y - p.x * prev.y;
        prev = p;
    }
    sum
}

/// Wind a ring the requested way, or drop it when it encloses nothing.
fn oriented(mut ring: Ring, counter_clockwise: bool) -> Option<Ring> {
    let area = signed_area2(&ring);
    if ring.len() < 3 || area == 0.0 {
        return None;
    }
    if (area > 0.0) != counter_clockwise {
        ring.reverse();
    }
    Some(ring)
}

/// Union of the areas enclosed by `paths`, whatever their winding.
fn region(paths: &[Path2D], segments: u32) -> MultiPolygon<f64> {
    let mut polygons = paths
        .iter()
        .filter_map(|path| oriented(flatten(path, segments), true))
        .map(|ring| {
            let exterior: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
            Polygon::new(LineString::from(exterior), Vec::new())
        });

    let Some(first) = polygons.next() else {
        return MultiPolygon::new(Vec::new());
    };
    polygons.fold(MultiPolygon::new(vec![first]), |acc, polygon| {
        acc.union(&MultiPolygon::new(vec![polygon]))
    })
}

/// Boundary loops of a region: exteriors counter-clockwise, interiors clockwise.
fn boundary(region: &MultiPolygon<f64>) -> Vec<Ring> {
    let ring = |line: &LineString<f64>, counter_clockwise: bool| {
        oriented(tidy(line.coords().map(|c| Point::new(c.x, c.y))), counter_clockwise)
    };

    let mut rings = Vec::new();
    for polygon in &region.0 {
        let Some(exterior) = ring(polygon.exterior(), true) else {
            continue;
        };
        rings.push(exterior);
        rings.extend(polygon.interiors().iter().filter_map(|line| ring(line, false)));
    }
    rings
}

/// Triangulate the area enclosed by non-overlapping boundary loops.
fn tessellate(rings: &[Ring]) -> Result<VertexBuffers<[f32; 2], u32>> {
    let mut builder = LyonPath::builder();
    for ring in rings {
        let mut iter = ring.iter();
        if let Some(first) = iter.next() {
            builder.begin(point(first.x as f32, first.y as f32));
            for p in iter {
                builder.line_to(point(p.x as f32, p.y as f32));
            }
            builder.end(true);
        }
    }
    let path = builder.build();

    let options = FillOptions::default().with_fill_rule(FillRule::NonZero);
    let mut geometry: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &options,
            &mut BuffersBuilder::new(&mut geometry, |v: FillVertex| {
                let p = v.position();
                [p.x, p.y]
            }),
        )
        .map_err(|e| MeshError::Tessellation(format!("{e:?}")))?;

    Ok(geometry)
}

/// Wind every cap triangle counter-clockwise.
///
/// Zero-area triangles are kept: they can carry the only copy of an edge
/// that the neighbouring triangles and walls close against. Each one takes
/// the winding that runs its edges against edges already placed.
fn orient_cap(vertices: &[[f32; 2]], indices: &[u32]) -> Vec<[u32; 3]> {
    let key = |i: u32| {
        let [x, y] = vertices[i as usize];
        (x.to_bits(), y.to_bits())
    };
    let edges_of = |[a, b, c]: [u32; 3]| -> [Edge; 3] {
        [(key(a), key(b)), (key(b), key(c)), (key(c), key(a))]
    };

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    let mut flat = Vec::new();
    for t in indices.chunks_exact(3) {
        let [a, b, c] = [t[0], t[1], t[2]];
        let [pa, pb, pc] = [a, b, c].map(|i| vertices[i as usize]);
        let cross = (pb[0] - pa[0]) * (pc[1] - pa[1]) - (pb[1] - pa[1]) * (pc[0] - pa[0]);
        if cross > 0.0 {
            triangles.push([a, b, c]);
        } else if cross < 0.0 {
            triangles.push([a, c, b]);
        } else {
            flat.push([a, b, c]);
        }
    }
    if flat.is_empty() {
        return triangles;
    }

    let mut edges: HashSet<Edge> = triangles.iter().flat_map(|&t| edges_of(t)).collect();
    let fits = |edges: &HashSet<Edge>, t: [u32; 3]| {
        edges_of(t)
            .iter()
            .any(|&(from, to)| edges.contains(&(to, from)))
    };

    while !flat.is_empty() {
        let before = flat.len();
        for [a, b, c] in std::mem::take(&mut flat) {
            let placed = [[a, b, c], [a, c, b]]
                .into_iter()
                .find(|&t| fits(&edges, t));
            match placed {
                Some(t) => {
                    edges.extend(edges_of(t));
                    triangles.push(t);
                }
                None => flat.push([a, b, c]),
            }
        }
        if flat.len() == before {
            // Nothing left touches a placed edge, so either winding closes.
            triangles.append(&mut flat);
        }
    }

    triangles
}

/// Extrude the area of `outers` minus `holes` along +Z from `z = 0` to `z = depth`.
///
/// Every path is used as a closed boundary regardless of its own tag; the
/// arguments decide which loops add area and which remove it. Overlapping
/// outers are merged and overlapping holes are cut once. A non-positive
/// depth or no usable outer loop gives an empty solid.
pub fn extrude(outers: &[Path2D], holes: &[Path2D], depth: f64, segments: u32) -> Result<Solid3D> {
    let mut solid = Solid3D::new();
    if depth <= 0.0 {
        return Ok(solid);
    }

    let mut area = region(outers, segments);
    if area.0.is_empty() {
        return Ok(solid);
    }
    let cut = region(holes, segments);
    if !cut.0.is_empty() {
        area = area.difference(&cut);
    }

    let rings = boundary(&area);
    if rings.is_empty() {
        return Ok(solid);
    }

    let cap = tessellate(&rings)?;
    let triangles = orient_cap(&cap.vertices, &cap.indices);

    // Bottom cap faces down, top cap faces up.
    for (z, flip) in [(0.0, true), (depth, false)] {
        let base = solid.vertices.len() as u32;
        for v in &cap.vertices {
            solid.push_vertex(f64::from(v[0]), f64::from(v[1]), z);
        }
        solid.faces.extend(triangles.iter().map(|&[a, b, c]| {
            if flip {
                [base + a, base + c, base + b]
            } else {
                [base + a, base + b, base + c]
            }
        }));
    }

    // Side walls. Exteriors run counter-clockwise and interiors clockwise, so
    // material is always on the left of each edge.
    for ring in &rings {
        let base = solid.vertices.len() as u32;
        for p in ring {
            solid.push_vertex(p.x, p.y, 0.0);
            solid.push_vertex(p.x, p.y, depth);
        }
        let n = ring.len() as u32;
        for i in 0..n {
            let j = (i + 1) % n;
            let (a0, a1) = (base + 2 * i, base + 2 * i + 1);
            let (b0, b1) = (base + 2 * j, base + 2 * j + 1);
            solid.faces.push([a0, b0, b1]);
            solid.faces.push([a0, b1, a1]);
        }
    }

    Ok(solid)
}
