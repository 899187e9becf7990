//! Procedural mesh generation.
//!
//! Every generator emits the same interleaved vertex stream: 3 floats
//! position, 2 floats UV, 3 floats normal, 3 floats tangent (11 floats per
//! vertex), enough for normal-mapped shading. Indexed kinds additionally
//! fill the index list; an empty index list means non-indexed draws.

pub mod bezier;
pub mod catmull_rom;
pub mod frustum;
pub mod shapes;
pub mod sphere;

use glam::{Vec2, Vec3};

pub const FLOATS_PER_VERTEX: usize = 11;

/// Primitive assembly for a generated mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    TriangleList,
    LineList,
    PointList,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl MeshData {
    pub fn with_topology(topology: Topology) -> Self {
        Self {
            topology,
            ..Self::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn push_vertex(&mut self, position: Vec3, uv: Vec2, normal: Vec3, tangent: Vec3) {
        self.vertices.extend_from_slice(&[
            position.x, position.y, position.z, uv.x, uv.y, normal.x, normal.y, normal.z,
            tangent.x, tangent.y, tangent.z,
        ]);
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }

    pub fn normals(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(|v| Vec3::new(v[5], v[6], v[7]))
    }

    /// Running min/max over emitted positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.positions();
        let first = positions.next()?;
        let mut min = first;
        let mut max = first;
        for p in positions {
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}

/// Tangent from the standard UV-edge linear system of one triangle.
pub fn triangle_tangent(edge1: Vec3, edge2: Vec3, delta_uv1: Vec2, delta_uv2: Vec2) -> Vec3 {
    let f = 1.0 / (delta_uv1.x * delta_uv2.y - delta_uv2.x * delta_uv1.y);
    let tangent = Vec3::new(
        f * (delta_uv2.y * edge1.x - delta_uv1.y * edge2.x),
        f * (delta_uv2.y * edge1.y - delta_uv1.y * edge2.y),
        f * (delta_uv2.y * edge1.z - delta_uv1.y * edge2.z),
    );
    tangent.normalize_or(Vec3::X)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_vertex_lays_out_eleven_floats() {
        let mut mesh = MeshData::default();
        mesh.push_vertex(
            Vec3::new(1.0, 2.0, 3.0),
            Vec2::new(0.25, 0.75),
            Vec3::Y,
            Vec3::X,
        );
        assert_eq!(mesh.vertices.len(), FLOATS_PER_VERTEX);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(&mesh.vertices[0..3], &[1.0, 2.0, 3.0]);
        assert_eq!(&mesh.vertices[3..5], &[0.25, 0.75]);
        assert_eq!(&mesh.vertices[5..8], &[0.0, 1.0, 0.0]);
        assert_eq!(&mesh.vertices[8..11], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn bounds_track_emitted_positions() {
        let mut mesh = MeshData::default();
        mesh.push_vertex(Vec3::new(-2.0, 0.5, 1.0), Vec2::ZERO, Vec3::Y, Vec3::X);
        mesh.push_vertex(Vec3::new(3.0, -1.0, 0.0), Vec2::ZERO, Vec3::Y, Vec3::X);
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(max, Vec3::new(3.0, 0.5, 1.0));
        assert!(MeshData::default().bounds().is_none());
    }

    #[test]
    fn triangle_tangent_follows_u_axis_for_axis_aligned_uvs() {
        // Quad edge along +X maps to +U, edge along +Y maps to +V.
        let tangent = triangle_tangent(
            Vec3::X,
            Vec3::Y,
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        );
        assert!((tangent - Vec3::X).length() < 1e-6);
    }
}
