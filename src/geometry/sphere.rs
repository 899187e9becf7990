//! UV sphere built by stepping stack angle over [0, π] and sector angle
//! over [0, 2π). Each quad is split into two triangles; normals are the
//! normalized positions, tangents come from the quad edges.

use glam::{Vec2, Vec3};

use super::MeshData;

pub const MIN_SECTORS: u32 = 3;
pub const MIN_STACKS: u32 = 1;

pub fn generate(radius: f32, sectors: u32, stacks: u32) -> MeshData {
    let sectors = sectors.max(MIN_SECTORS);
    let stacks = stacks.max(MIN_STACKS);
    let sector_step = 2.0 * std::f32::consts::PI / sectors as f32;
    let stack_step = std::f32::consts::PI / stacks as f32;

    let mut mesh = MeshData::default();
    for stack in 0..stacks {
        let theta1 = stack as f32 * stack_step;
        let theta2 = (stack + 1) as f32 * stack_step;

        for sector in 0..sectors {
            let phi1 = sector as f32 * sector_step;
            let phi2 = (sector + 1) as f32 * sector_step;

            let at = |theta: f32, phi: f32| {
                Vec3::new(
                    radius * theta.sin() * phi.cos(),
                    radius * theta.cos(),
                    radius * theta.sin() * phi.sin(),
                )
            };
            let p1 = at(theta1, phi1);
            let p2 = at(theta2, phi1);
            let p3 = at(theta1, phi2);
            let p4 = at(theta2, phi2);

            let u0 = sector as f32 / sectors as f32;
            let u1 = (sector + 1) as f32 / sectors as f32;
            let v0 = stack as f32 / stacks as f32;
            let v1 = (stack + 1) as f32 / stacks as f32;

            let n1 = p1.normalize_or(Vec3::Y);
            let n2 = p2.normalize_or(Vec3::Y);
            let n3 = p3.normalize_or(Vec3::Y);
            let n4 = p4.normalize_or(Vec3::Y);
            let tangent1 = (p2 - p1).normalize_or(Vec3::X);
            let tangent2 = (p3 - p1).normalize_or(Vec3::X);

            mesh.push_vertex(p1, Vec2::new(u0, v0), n1, tangent1);
            mesh.push_vertex(p2, Vec2::new(u0, v1), n2, tangent1);
            mesh.push_vertex(p3, Vec2::new(u1, v0), n3, tangent1);

            mesh.push_vertex(p2, Vec2::new(u0, v1), n2, tangent1);
            mesh.push_vertex(p4, Vec2::new(u1, v1), n4, tangent2);
            mesh.push_vertex(p3, Vec2::new(u1, v0), n3, tangent2);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_matches_tessellation() {
        for (sectors, stacks) in [(3, 1), (8, 4), (16, 16)] {
            let mesh = generate(1.0, sectors, stacks);
            assert_eq!(
                mesh.vertex_count(),
                (sectors * stacks * 6) as usize,
                "sectors={sectors} stacks={stacks}"
            );
            assert!(mesh.indices.is_empty());
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let mesh = generate(1.0, 12, 7);
        for n in mesh.normals() {
            assert!((n.length() - 1.0).abs() < 1e-5, "normal {n:?}");
        }
    }

    #[test]
    fn positions_stay_on_the_radius() {
        let mesh = generate(2.5, 9, 5);
        for p in mesh.positions() {
            assert!((p.length() - 2.5).abs() < 1e-4, "position {p:?}");
        }
    }

    #[test]
    fn regeneration_is_bit_identical() {
        let a = generate(1.0, 24, 13);
        let b = generate(1.0, 24, 13);
        assert_eq!(a.vertices, b.vertices);
    }

    #[test]
    fn degenerate_counts_are_clamped() {
        let mesh = generate(1.0, 0, 0);
        assert_eq!(mesh.vertex_count(), (MIN_SECTORS * MIN_STACKS * 6) as usize);
    }
}
