/// A point on the unit sphere.
pub type Vertex = glam::Vec3;
/// Three vertices, counter-clockwise when viewed from outside the sphere.
pub type Triangle = [Vertex; 3];

/// Faces of the base icosahedron.
pub const BASE_TRIANGLES: usize = 20;
/// Deepest subdivision a session may request.
pub const MAX_SUBDIVISIONS: u32 = 8;

/// Number of triangles produced by [`generate_level`], saturating at
/// `usize::MAX` for levels that cannot be represented.
pub fn triangle_count(level: u32) -> usize {
    4usize
        .checked_pow(level)
        .and_then(|n| n.checked_mul(BASE_TRIANGLES))
        .unwrap_or(usize::MAX)
}

pub struct Icosahedron {
    pub vertices: [Vertex; 12],
    pub triangles: [[u16; 3]; 20],
}

impl Icosahedron {
    pub fn new(radius: f32) -> Self {
        // three mutually orthogonal golden rectangles, rounded to f32 once
        let phi = (1.0 + 5.0f64.sqrt()) / 2.0;
        let k = radius as f64 / ((5.0 + 5.0f64.sqrt()) / 2.0).sqrt();
        let s = k as f32;
        let t = (k * phi) as f32;

        let mut vertices = [Vertex::ZERO; 12];
        let signs = [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)];
        for (corner, (p, q)) in vertices.chunks_exact_mut(3).zip(signs) {
            corner[0] = Vertex::new(0.0, p * s, q * t);
            corner[1] = Vertex::new(p * s, q * t, 0.0);
            corner[2] = Vertex::new(p * t, 0.0, q * s);
        }

        Self {
            vertices,
            triangles: [
                // 5 faces around vertex 0
                [0, 1, 7],
                [0, 7, 8],
                [0, 8, 6],
                [0, 6, 2],
                [0, 2, 1],
                // 5 faces around vertex 9
                [9, 3, 5],
                [9, 5, 4],
                [9, 4, 10],
                [9, 10, 11],
                [9, 11, 3],
                // middle band
                [1, 3, 7],
                [7, 3, 11],
                [7, 11, 8],
                [8, 11, 10],
                [8, 10, 6],
                [6, 10, 4],
                [6, 4, 2],
                [2, 4, 5],
                [2, 5, 1],
                [1, 5, 3],
            ],
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        let triangles = self
            .triangles
            .iter()
            .map(|tri| tri.map(|index| self.vertices[index as usize]))
            .collect();
        Mesh { triangles }
    }
}

/// Unindexed triangle soup; every triangle owns its vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Tightly packed `xyz` positions, three vertices per triangle.
    pub fn vertex_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.triangles.len() == other.triangles.len()
            && self
                .triangles
                .iter()
                .zip(&other.triangles)
                .all(|(a, b)| {
                    a.iter()
                        .zip(b)
                        .all(|(va, vb)| va.abs_diff_eq(*vb, max_abs_diff))
                })
    }
}

/// The unit icosahedron.
pub fn generate_base() -> Mesh {
    Icosahedron::new(1.0).to_mesh()
}

fn midpoint(a: Vertex, b: Vertex) -> Vertex {
    ((a + b) * 0.5).normalize()
}

/// Splits every triangle into four, pushing the new edge midpoints out onto the
/// unit sphere. Winding of the children follows the parent.
pub fn subdivide(mesh: &Mesh) -> Mesh {
    let mut triangles = Vec::with_capacity(mesh.triangles.len() * 4);
    for &[a, b, c] in mesh.triangles.iter() {
        let p = midpoint(a, b);
        let q = midpoint(b, c);
        let r = midpoint(a, c);
        triangles.push([a, p, r]);
        triangles.push([b, q, p]);
        triangles.push([c, r, q]);
        triangles.push([p, q, r]);
    }
    Mesh { triangles }
}

/// Icosphere after `level` rounds of subdivision.
pub fn generate_level(level: u32) -> Mesh {
    (0..level).fold(generate_base(), |mesh, _| subdivide(&mesh))
}
