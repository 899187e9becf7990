//! Tube swept along a Catmull-Rom spline. Each run of four consecutive
//! control points contributes one curve segment; every sample gets a ring
//! of vertices in the plane perpendicular to the curve tangent, and
//! neighbouring rings are stitched with indexed quads.

use glam::{Vec2, Vec3};

use super::MeshData;

pub const MIN_RESOLUTION: u32 = 1;
pub const TUBE_RADIUS: f32 = 0.05;
const RING_SEGMENTS: u32 = 12;
// One duplicated seam vertex closes the ring.
const RING_VERTICES: u32 = RING_SEGMENTS + 1;

/// Position on the segment spanned by `p1..p2` with `p0`/`p3` as the
/// neighbouring controls, `t` in [0, 1].
pub fn point_on_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

fn tangent_on_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    0.5 * ((-p0 + p2)
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * 2.0 * t
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * 3.0 * t2)
}

/// Curve frame: tangent plus a normal/binormal pair spanning the ring
/// plane. The world up vector seeds the normal; a near-vertical tangent
/// falls back to the X axis to avoid a degenerate cross product.
fn frame(tangent: Vec3) -> (Vec3, Vec3) {
    let mut normal = tangent.cross(Vec3::Y);
    if normal.length() < 0.001 {
        normal = tangent.cross(Vec3::X);
    }
    let normal = normal.normalize();
    let binormal = tangent.cross(normal).normalize();
    (normal, binormal)
}

pub fn generate(points: &[Vec3], resolution: u32) -> MeshData {
    let mut mesh = MeshData::default();
    if points.len() < 4 {
        return mesh;
    }
    let resolution = resolution.max(MIN_RESOLUTION);

    for window in points.windows(4) {
        let [p0, p1, p2, p3] = [window[0], window[1], window[2], window[3]];
        for step in 0..=resolution {
            let t = step as f32 / resolution as f32;
            let center = point_on_segment(p0, p1, p2, p3, t);
            let tangent = tangent_on_segment(p0, p1, p2, p3, t).normalize_or(Vec3::Z);
            let (normal, binormal) = frame(tangent);

            for j in 0..RING_VERTICES {
                let angle =
                    (j % RING_SEGMENTS) as f32 * 2.0 * std::f32::consts::PI / RING_SEGMENTS as f32;
                let offset = (normal * angle.cos() + binormal * angle.sin()) * TUBE_RADIUS;
                let out = offset.normalize_or(Vec3::Y);
                mesh.push_vertex(center + offset, Vec2::ZERO, out, out);
            }
        }
    }

    let rings = (mesh.vertex_count() as u32) / RING_VERTICES;
    for ring in 0..rings.saturating_sub(1) {
        for j in 0..RING_SEGMENTS {
            let a = ring * RING_VERTICES + j;
            let b = (ring + 1) * RING_VERTICES + j;
            let c = a + 1;
            let d = b + 1;
            mesh.indices.extend_from_slice(&[a, b, c, c, b, d]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag(n: usize) -> Vec<Vec3> {
        (0..n)
            .map(|i| Vec3::new(i as f32, (i as f32).sin(), 0.0))
            .collect()
    }

    #[test]
    fn fewer_than_four_points_yields_an_empty_mesh() {
        for n in 0..4 {
            let mesh = generate(&zigzag(n), 8);
            assert!(mesh.is_empty());
            assert!(mesh.indices.is_empty());
        }
    }

    #[test]
    fn segment_interpolates_its_inner_control_points() {
        let pts = zigzag(4);
        let start = point_on_segment(pts[0], pts[1], pts[2], pts[3], 0.0);
        let end = point_on_segment(pts[0], pts[1], pts[2], pts[3], 1.0);
        assert!((start - pts[1]).length() < 1e-6);
        assert!((end - pts[2]).length() < 1e-6);
    }

    #[test]
    fn ring_layout_matches_the_control_point_count() {
        let resolution = 10;
        let pts = zigzag(6);
        let mesh = generate(&pts, resolution);
        let segments = (pts.len() - 3) as u32;
        let rings = segments * (resolution + 1);
        assert_eq!(mesh.vertex_count() as u32, rings * RING_VERTICES);
        assert_eq!(mesh.indices.len() as u32, (rings - 1) * RING_SEGMENTS * 6);
        let max_index = *mesh.indices.iter().max().unwrap();
        assert!((max_index as usize) < mesh.vertex_count());
    }

    #[test]
    fn ring_vertices_sit_on_the_tube_radius() {
        let pts = zigzag(5);
        let resolution = 4;
        let mesh = generate(&pts, resolution);
        // Reconstruct each ring center as the mean of its 12 distinct
        // vertices and check the offset length.
        let positions: Vec<Vec3> = mesh.positions().collect();
        for ring in positions.chunks_exact(RING_VERTICES as usize) {
            let center =
                ring[..RING_SEGMENTS as usize].iter().sum::<Vec3>() / RING_SEGMENTS as f32;
            for p in ring {
                assert!(((*p - center).length() - TUBE_RADIUS).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn straight_vertical_curve_uses_the_fallback_frame() {
        let pts: Vec<Vec3> = (0..4).map(|i| Vec3::new(0.0, i as f32, 0.0)).collect();
        let mesh = generate(&pts, 2);
        assert!(!mesh.is_empty());
        for n in mesh.normals() {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}
