//! Fixed, non-parametric meshes: the solid cube/plane/rectangle/triangle
//! and the vectorial point/line/square kinds that draw as points or
//! line lists instead of triangles.

use glam::{Vec2, Vec3};

use super::{MeshData, Topology};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Plane,
    Rectangle,
    Triangle,
    Point,
    Line,
    Square,
}

impl ShapeKind {
    /// Fixed object-space bounds. Flat and vectorial kinds keep a
    /// zero-thickness extent on their degenerate axis.
    pub fn local_bounds(self) -> (Vec3, Vec3) {
        match self {
            ShapeKind::Cube => (Vec3::splat(-1.0), Vec3::splat(1.0)),
            ShapeKind::Plane => (Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0)),
            ShapeKind::Rectangle => (Vec3::new(-1.0, -0.5, 0.0), Vec3::new(1.0, 0.5, 0.0)),
            ShapeKind::Triangle => (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)),
            ShapeKind::Point => (Vec3::ZERO, Vec3::ZERO),
            ShapeKind::Line => (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            ShapeKind::Square => (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)),
        }
    }

    pub fn generate(self) -> MeshData {
        match self {
            ShapeKind::Cube => cube(),
            ShapeKind::Plane => plane(),
            ShapeKind::Rectangle => rectangle(),
            ShapeKind::Triangle => triangle(),
            ShapeKind::Point => point(),
            ShapeKind::Line => line(),
            ShapeKind::Square => square(),
        }
    }
}

fn push_quad(mesh: &mut MeshData, corners: [Vec3; 4], normal: Vec3, tangent: Vec3) {
    let [a, b, c, d] = corners;
    let uvs = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    mesh.push_vertex(a, uvs[0], normal, tangent);
    mesh.push_vertex(b, uvs[1], normal, tangent);
    mesh.push_vertex(c, uvs[2], normal, tangent);
    mesh.push_vertex(a, uvs[0], normal, tangent);
    mesh.push_vertex(c, uvs[2], normal, tangent);
    mesh.push_vertex(d, uvs[3], normal, tangent);
}

fn cube() -> MeshData {
    let mut mesh = MeshData::default();
    let p = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);
    // +Z
    push_quad(
        &mut mesh,
        [p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0)],
        Vec3::Z,
        Vec3::X,
    );
    // -Z
    push_quad(
        &mut mesh,
        [p(1.0, -1.0, -1.0), p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0)],
        Vec3::NEG_Z,
        Vec3::NEG_X,
    );
    // +X
    push_quad(
        &mut mesh,
        [p(1.0, -1.0, 1.0), p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0)],
        Vec3::X,
        Vec3::NEG_Z,
    );
    // -X
    push_quad(
        &mut mesh,
        [p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0)],
        Vec3::NEG_X,
        Vec3::Z,
    );
    // +Y
    push_quad(
        &mut mesh,
        [p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0), p(-1.0, 1.0, -1.0)],
        Vec3::Y,
        Vec3::X,
    );
    // -Y
    push_quad(
        &mut mesh,
        [p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(-1.0, -1.0, 1.0)],
        Vec3::NEG_Y,
        Vec3::X,
    );
    mesh
}

fn plane() -> MeshData {
    let mut mesh = MeshData::default();
    push_quad(
        &mut mesh,
        [
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, -1.0),
        ],
        Vec3::Y,
        Vec3::X,
    );
    mesh
}

fn rectangle() -> MeshData {
    let mut mesh = MeshData::default();
    push_quad(
        &mut mesh,
        [
            Vec3::new(-1.0, -0.5, 0.0),
            Vec3::new(1.0, -0.5, 0.0),
            Vec3::new(1.0, 0.5, 0.0),
            Vec3::new(-1.0, 0.5, 0.0),
        ],
        Vec3::Z,
        Vec3::X,
    );
    mesh
}

fn triangle() -> MeshData {
    let mut mesh = MeshData::default();
    mesh.push_vertex(
        Vec3::new(-1.0, -1.0, 0.0),
        Vec2::new(0.0, 0.0),
        Vec3::Z,
        Vec3::X,
    );
    mesh.push_vertex(
        Vec3::new(1.0, -1.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec3::Z,
        Vec3::X,
    );
    mesh.push_vertex(
        Vec3::new(0.0, 1.0, 0.0),
        Vec2::new(0.5, 1.0),
        Vec3::Z,
        Vec3::X,
    );
    mesh
}

fn point() -> MeshData {
    let mut mesh = MeshData::with_topology(Topology::PointList);
    mesh.push_vertex(Vec3::ZERO, Vec2::ZERO, Vec3::Z, Vec3::X);
    mesh
}

fn line() -> MeshData {
    let mut mesh = MeshData::with_topology(Topology::LineList);
    mesh.push_vertex(Vec3::new(-1.0, 0.0, 0.0), Vec2::ZERO, Vec3::Z, Vec3::X);
    mesh.push_vertex(Vec3::new(1.0, 0.0, 0.0), Vec2::new(1.0, 0.0), Vec3::Z, Vec3::X);
    mesh
}

fn square() -> MeshData {
    let mut mesh = MeshData::with_topology(Topology::LineList);
    let corners = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
    ];
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        mesh.push_vertex(a, Vec2::ZERO, Vec3::Z, Vec3::X);
        mesh.push_vertex(b, Vec2::ZERO, Vec3::Z, Vec3::X);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_vertices_within_its_bounds() {
        let mesh = ShapeKind::Cube.generate();
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.topology, Topology::TriangleList);
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!((min, max), ShapeKind::Cube.local_bounds());
    }

    #[test]
    fn flat_kinds_report_zero_thickness_bounds() {
        for kind in [ShapeKind::Plane, ShapeKind::Rectangle, ShapeKind::Triangle] {
            let mesh = kind.generate();
            let (min, max) = mesh.bounds().unwrap();
            assert_eq!((min, max), kind.local_bounds(), "{kind:?}");
        }
    }

    #[test]
    fn vectorial_kinds_use_non_triangle_topologies() {
        assert_eq!(ShapeKind::Point.generate().topology, Topology::PointList);
        assert_eq!(ShapeKind::Line.generate().topology, Topology::LineList);
        assert_eq!(ShapeKind::Square.generate().topology, Topology::LineList);
        assert_eq!(ShapeKind::Point.generate().vertex_count(), 1);
        assert_eq!(ShapeKind::Line.generate().vertex_count(), 2);
        // Four edges, two vertices each.
        assert_eq!(ShapeKind::Square.generate().vertex_count(), 8);
    }

    #[test]
    fn cube_normals_are_axis_aligned_and_outward() {
        let mesh = ShapeKind::Cube.generate();
        for (p, n) in mesh.positions().zip(mesh.normals()) {
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert!(n.dot(p) > 0.0, "p={p:?} n={n:?}");
        }
    }
}
