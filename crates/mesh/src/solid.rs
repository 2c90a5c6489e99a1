//! Triangle-mesh solids.

use std::collections::HashMap;

use nalgebra::{Point3, Rotation3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Edge lengths along each axis.
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    fn expand(&mut self, p: &Point3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }
}

/// A closed triangle mesh produced by extrusion.
///
/// Faces use counter-clockwise winding seen from outside, so normals point
/// outward by the right-hand rule. Vertices are not shared between a cap and
/// the side walls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid3D {
    pub vertices: Vec<Point3<f64>>,
    /// Triangles as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl Solid3D {
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Add a vertex, returning its index.
    pub(crate) fn push_vertex(&mut self, x: f64, y: f64, z: f64) -> u32 {
        self.vertices.push(Point3::new(x, y, z));
        (self.vertices.len() - 1) as u32
    }

    /// Move every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Rotate every vertex about the X axis by `angle` radians.
    pub fn rotate_x(&mut self, angle: f64) {
        let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), angle);
        for v in &mut self.vertices {
            *v = rotation * *v;
        }
    }

    /// Append the triangles of `other` to this solid.
    pub fn append(&mut self, other: Solid3D) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.faces
            .extend(other.faces.into_iter().map(|[a, b, c]| [a + base, b + base, c + base]));
    }

    /// Combine several solids into one by concatenating their triangles.
    ///
    /// Nothing is re-triangulated, overlapping parts stay overlapping.
    pub fn merge(solids: impl IntoIterator<Item = Solid3D>) -> Solid3D {
        solids.into_iter().fold(Solid3D::new(), |mut acc, s| {
            acc.append(s);
            acc
        })
    }

    /// Bounding box of all vertices, `None` for an empty solid.
    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.vertices.split_first()?;
        let mut aabb = Aabb {
            min: *first,
            max: *first,
        };
        for v in rest {
            aabb.expand(v);
        }
        Some(aabb)
    }

    /// Enclosed volume, positive when faces wind outward.
    pub fn volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (
                    self.vertices[a as usize].coords,
                    self.vertices[b as usize].coords,
                    self.vertices[c as usize].coords,
                );
                a.dot(&b.cross(&c))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Does every edge meet exactly one edge running the opposite way?
    ///
    /// Vertices are matched by position, since caps and walls do not share
    /// vertex indices.
    pub fn is_watertight(&self) -> bool {
        let key = |i: u32| {
            let p = self.vertices[i as usize];
            [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]
        };

        let mut edges: HashMap<_, i32> = HashMap::new();
        for &[a, b, c] in &self.faces {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                let (from, to) = (key(from), key(to));
                if from < to {
                    *edges.entry((from, to)).or_default() += 1;
                } else {
                    *edges.entry((to, from)).or_default() -= 1;
                }
            }
        }

        !self.is_empty() && edges.values().all(|&count| count == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    /// Unit tetrahedron with outward faces.
    fn tetrahedron() -> Solid3D {
        Solid3D {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            faces: vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        }
    }

    #[test]
    fn tetrahedron_is_closed() {
        let solid = tetrahedron();
        assert!(solid.is_watertight());
        assert_relative_eq!(solid.volume(), 1.0 / 6.0);
    }

    #[test]
    fn open_mesh_is_not_watertight() {
        let mut solid = tetrahedron();
        solid.faces.pop();
        assert!(!solid.is_watertight());
        assert!(!Solid3D::new().is_watertight());
    }

    #[test]
    fn merge_rebases_indices() {
        let mut moved = tetrahedron();
        moved.translate(Vector3::new(5.0, 0.0, 0.0));

        let merged = Solid3D::merge([tetrahedron(), moved]);
        assert_eq!(merged.vertex_count(), 8);
        assert_eq!(merged.face_count(), 8);
        assert_eq!(merged.faces[4], [4, 6, 5]);
        assert!(merged.is_watertight());
        assert_relative_eq!(merged.volume(), 2.0 / 6.0);

        let bounds = merged.bounds().unwrap();
        assert_relative_eq!(bounds.size().x, 6.0);
    }

    #[test]
    fn rotation_about_x() {
        let mut solid = tetrahedron();
        solid.rotate_x(FRAC_PI_2);

        // +Z swings to -Y, +Y swings to +Z.
        assert_relative_eq!(solid.vertices[3].y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(solid.vertices[2].z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(solid.volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_solid_has_no_bounds() {
        assert!(Solid3D::new().bounds().is_none());
        assert!(Solid3D::merge(Vec::new()).is_empty());
    }
}
