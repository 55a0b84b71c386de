//! Procedural mesh generation for the mascot body and its attachments.
//!
//! Geometry is immutable once built and shared across bodies behind an
//! `Arc`; per-body animation lives entirely in the shader parameters.

use fnv::FnvHashMap;
use glam::Vec3;

/// Position + normal mesh with triangle indices.
#[derive(Clone, Debug)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Interleave as `[px py pz nx ny nz]` per vertex for a GPU vertex buffer.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.positions.len() * 6);
        for (p, n) in self.positions.iter().zip(self.normals.iter()) {
            out.extend_from_slice(p);
            out.extend_from_slice(n);
        }
        out
    }
}

/// Polyhedral sphere approximation: subdivided icosahedron projected onto
/// the sphere. Each subdivision level quadruples the triangle count.
pub fn icosphere(radius: f32, subdivisions: u32) -> MeshData {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut positions: Vec<Vec3> = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|v| Vec3::from_array(*v).normalize() * radius)
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    // Midpoint cache keyed by the unordered edge so shared edges reuse the
    // same vertex.
    let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
    for _ in 0..subdivisions {
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(&mut positions, &mut midpoints, a, b, radius);
            let bc = midpoint(&mut positions, &mut midpoints, b, c, radius);
            let ca = midpoint(&mut positions, &mut midpoints, c, a, radius);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        faces = next;
    }

    let normals = positions.iter().map(|p| p.normalize().to_array()).collect();
    MeshData {
        positions: positions.iter().map(|p| p.to_array()).collect(),
        normals,
        indices: faces.iter().flatten().copied().collect(),
    }
}

fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut FnvHashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
    radius: f32,
) -> u32 {
    let key = (a.min(b), a.max(b));
    if let Some(&i) = cache.get(&key) {
        return i;
    }
    let mid = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize() * radius;
    let i = positions.len() as u32;
    positions.push(mid);
    cache.insert(key, i);
    i
}

/// Latitude/longitude sphere used for the eye spheres, where the smooth
/// silhouette matters less than the tiny vertex count.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let theta = v * std::f32::consts::PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let phi = u * std::f32::consts::TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            let n = Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            positions.push((n * radius).to_array());
            normals.push(n.to_array());
        }
    }
    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    MeshData {
        positions,
        normals,
        indices,
    }
}

/// Lower half of a torus in the XY plane: the mouth. The arc spans the
/// bottom semicircle so the opening faces up.
pub fn half_ring(radius: f32, tube: f32, segments: u32, tube_segments: u32) -> MeshData {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for seg in 0..=segments {
        let theta = std::f32::consts::PI + (seg as f32 / segments as f32) * std::f32::consts::PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for ts in 0..=tube_segments {
            let phi = (ts as f32 / tube_segments as f32) * std::f32::consts::TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            let n = Vec3::new(cos_p * cos_t, cos_p * sin_t, sin_p);
            positions.push(
                [
                    (radius + tube * cos_p) * cos_t,
                    (radius + tube * cos_p) * sin_t,
                    tube * sin_p,
                ],
            );
            normals.push(n.to_array());
        }
    }
    let stride = tube_segments + 1;
    for seg in 0..segments {
        for ts in 0..tube_segments {
            let a = seg * stride + ts;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    MeshData {
        positions,
        normals,
        indices,
    }
}
