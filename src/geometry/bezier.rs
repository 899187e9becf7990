//! Bicubic Bezier patch over a 4×4 control grid, evaluated with the
//! nested Bernstein form: collapse the rows along v first, then the
//! resulting column along u.

use glam::{Vec2, Vec3};

use super::MeshData;

pub const MIN_RESOLUTION: u32 = 2;

fn bernstein(t: f32, points: &[Vec3; 4]) -> Vec3 {
    let it = 1.0 - t;
    points[0] * (it * it * it)
        + points[1] * (3.0 * it * it * t)
        + points[2] * (3.0 * it * t * t)
        + points[3] * (t * t * t)
}

pub fn evaluate(control: &[[Vec3; 4]; 4], u: f32, v: f32) -> Vec3 {
    let collapsed = [
        bernstein(v, &control[0]),
        bernstein(v, &control[1]),
        bernstein(v, &control[2]),
        bernstein(v, &control[3]),
    ];
    bernstein(u, &collapsed)
}

/// Default saddle-like control grid matching the stock editor surface.
pub fn default_control_grid() -> [[Vec3; 4]; 4] {
    let mut control = [[Vec3::ZERO; 4]; 4];
    for (i, row) in control.iter_mut().enumerate() {
        for (j, point) in row.iter_mut().enumerate() {
            *point = Vec3::new(
                i as f32 - 1.5,
                ((i + j) as f32).sin(),
                j as f32 - 1.5,
            );
        }
    }
    control
}

pub fn generate(control: &[[Vec3; 4]; 4], resolution_u: u32, resolution_v: u32) -> MeshData {
    let resolution_u = resolution_u.max(MIN_RESOLUTION);
    let resolution_v = resolution_v.max(MIN_RESOLUTION);

    let mut mesh = MeshData::default();
    for i in 0..resolution_u {
        let u = i as f32 / (resolution_u - 1) as f32;
        let next_u = (i + 1) as f32 / (resolution_u - 1) as f32;

        for j in 0..resolution_v {
            let v = j as f32 / (resolution_v - 1) as f32;
            let next_v = (j + 1) as f32 / (resolution_v - 1) as f32;

            let p1 = evaluate(control, u, v);
            let p2 = evaluate(control, next_u, v);
            let p3 = evaluate(control, u, next_v);
            let p4 = evaluate(control, next_u, next_v);

            let n1 = (p2 - p1).cross(p3 - p1).normalize_or(Vec3::Y);
            let n2 = (p4 - p2).cross(p1 - p2).normalize_or(Vec3::Y);
            let tangent = (p2 - p1).normalize_or(Vec3::X);

            mesh.push_vertex(p1, Vec2::new(u, v), n1, tangent);
            mesh.push_vertex(p2, Vec2::new(next_u, v), n1, tangent);
            mesh.push_vertex(p3, Vec2::new(u, next_v), n1, tangent);

            mesh.push_vertex(p2, Vec2::new(next_u, v), n2, tangent);
            mesh.push_vertex(p4, Vec2::new(next_u, next_v), n2, tangent);
            mesh.push_vertex(p3, Vec2::new(u, next_v), n2, tangent);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_evaluation_hits_the_control_corners() {
        let control = default_control_grid();
        assert!((evaluate(&control, 0.0, 0.0) - control[0][0]).length() < 1e-6);
        assert!((evaluate(&control, 1.0, 0.0) - control[3][0]).length() < 1e-6);
        assert!((evaluate(&control, 0.0, 1.0) - control[0][3]).length() < 1e-6);
        assert!((evaluate(&control, 1.0, 1.0) - control[3][3]).length() < 1e-6);
    }

    #[test]
    fn flat_grid_evaluates_in_plane() {
        // All control points at y=0 must keep the whole surface at y=0.
        let mut control = default_control_grid();
        for row in &mut control {
            for point in row {
                point.y = 0.0;
            }
        }
        let mesh = generate(&control, 10, 10);
        for p in mesh.positions() {
            assert!(p.y.abs() < 1e-5, "position {p:?}");
        }
    }

    #[test]
    fn cell_count_matches_resolution() {
        let control = default_control_grid();
        let mesh = generate(&control, 5, 7);
        assert_eq!(mesh.vertex_count(), (5 * 7 * 6) as usize);
    }

    #[test]
    fn resolution_is_clamped_to_minimum() {
        let control = default_control_grid();
        let mesh = generate(&control, 0, 1);
        assert_eq!(
            mesh.vertex_count(),
            (MIN_RESOLUTION * MIN_RESOLUTION * 6) as usize
        );
    }

    #[test]
    fn regeneration_is_bit_identical() {
        let control = default_control_grid();
        let a = generate(&control, 12, 9);
        let b = generate(&control, 12, 9);
        assert_eq!(a.vertices, b.vertices);
    }
}
