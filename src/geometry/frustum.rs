//! Conical frustum (cylinder when the radii match, cone when the top
//! radius is zero). Side quads step height and sector angle; both ends are
//! closed with triangle fans when their radius is nonzero.

use glam::{Vec2, Vec3};

use super::{triangle_tangent, MeshData};

pub const MIN_SECTORS: u32 = 3;
pub const MIN_STACKS: u32 = 1;

pub fn generate(
    base_radius: f32,
    top_radius: f32,
    height: f32,
    sectors: u32,
    stacks: u32,
) -> MeshData {
    let sectors = sectors.max(MIN_SECTORS);
    let stacks = stacks.max(MIN_STACKS);
    let sector_step = 2.0 * std::f32::consts::PI / sectors as f32;
    let stack_height = height / stacks as f32;

    let mut mesh = MeshData::default();
    for stack in 0..stacks {
        let y0 = -height / 2.0 + stack as f32 * stack_height;
        let y1 = y0 + stack_height;
        let r0 = base_radius + (top_radius - base_radius) * (stack as f32 / stacks as f32);
        let r1 = base_radius + (top_radius - base_radius) * ((stack + 1) as f32 / stacks as f32);

        for sector in 0..sectors {
            let angle0 = sector as f32 * sector_step;
            let angle1 = (sector + 1) as f32 * sector_step;

            let p0 = Vec3::new(r0 * angle0.cos(), y0, r0 * angle0.sin());
            let p1 = Vec3::new(r1 * angle0.cos(), y1, r1 * angle0.sin());
            let p2 = Vec3::new(r0 * angle1.cos(), y0, r0 * angle1.sin());
            let p3 = Vec3::new(r1 * angle1.cos(), y1, r1 * angle1.sin());

            let u0 = sector as f32 / sectors as f32;
            let u1 = (sector + 1) as f32 / sectors as f32;
            let v0 = stack as f32 / stacks as f32;
            let v1 = (stack + 1) as f32 / stacks as f32;
            let uv0 = Vec2::new(u0, v0);
            let uv1 = Vec2::new(u0, v1);
            let uv2 = Vec2::new(u1, v0);
            let uv3 = Vec2::new(u1, v1);

            let normal = (p1 - p0).cross(p2 - p0).normalize_or(Vec3::Y);
            let tangent = triangle_tangent(p1 - p0, p2 - p0, uv1 - uv0, uv2 - uv0);
            mesh.push_vertex(p0, uv0, normal, tangent);
            mesh.push_vertex(p1, uv1, normal, tangent);
            mesh.push_vertex(p2, uv2, normal, tangent);

            let normal = (p3 - p1).cross(p2 - p1).normalize_or(Vec3::Y);
            let tangent = triangle_tangent(p3 - p1, p2 - p1, uv3 - uv1, uv2 - uv1);
            mesh.push_vertex(p1, uv1, normal, tangent);
            mesh.push_vertex(p3, uv3, normal, tangent);
            mesh.push_vertex(p2, uv2, normal, tangent);
        }
    }

    generate_cap(&mut mesh, top_radius, sectors, sector_step, height / 2.0);
    generate_cap(&mut mesh, base_radius, sectors, sector_step, -height / 2.0);
    mesh
}

/// Triangle fan closing one end. A zero radius would only produce
/// zero-area triangles, so it is skipped outright.
fn generate_cap(mesh: &mut MeshData, radius: f32, sectors: u32, sector_step: f32, y: f32) {
    if radius == 0.0 {
        return;
    }
    let normal = Vec3::new(0.0, if y > 0.0 { 1.0 } else { -1.0 }, 0.0);
    let tangent = Vec3::X;
    let center = Vec3::new(0.0, y, 0.0);
    let uv_center = Vec2::new(0.5, 0.5);

    for sector in 0..sectors {
        let angle0 = sector as f32 * sector_step;
        let angle1 = (sector + 1) as f32 * sector_step;
        let p0 = Vec3::new(radius * angle0.cos(), y, radius * angle0.sin());
        let p1 = Vec3::new(radius * angle1.cos(), y, radius * angle1.sin());
        let uv0 = Vec2::new(p0.x / (radius * 2.0) + 0.5, p0.z / (radius * 2.0) + 0.5);
        let uv1 = Vec2::new(p1.x / (radius * 2.0) + 0.5, p1.z / (radius * 2.0) + 0.5);

        mesh.push_vertex(center, uv_center, normal, tangent);
        mesh.push_vertex(p0, uv0, normal, tangent);
        mesh.push_vertex(p1, uv1, normal, tangent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_vertex_count_includes_both_caps() {
        let sectors = 8;
        let stacks = 4;
        let mesh = generate(1.0, 1.0, 2.0, sectors, stacks);
        let expected = sectors * stacks * 6 + 2 * sectors * 3;
        assert_eq!(mesh.vertex_count(), expected as usize);
    }

    #[test]
    fn cone_tip_emits_no_degenerate_cap() {
        // baseRadius=1, topRadius=0, 3 sectors, 1 stack: 2 side triangles
        // per sector plus one base-cap fan triangle per sector.
        let mesh = generate(1.0, 0.0, 2.0, 3, 1);
        assert_eq!(mesh.vertex_count(), (3 * 6 + 3 * 3) as usize);
    }

    #[test]
    fn normals_are_unit_length() {
        let mesh = generate(1.0, 0.3, 2.0, 16, 4);
        for n in mesh.normals() {
            assert!((n.length() - 1.0).abs() < 1e-5, "normal {n:?}");
        }
    }

    #[test]
    fn side_normals_point_outward_for_a_cylinder() {
        let mesh = generate(1.0, 1.0, 2.0, 16, 1);
        // Side vertices come first; their normal should have a positive
        // dot product with the radial direction.
        for (p, n) in mesh.positions().zip(mesh.normals()).take(16 * 6) {
            let radial = Vec3::new(p.x, 0.0, p.z);
            if radial.length() > 1e-3 {
                assert!(n.dot(radial.normalize()) > 0.5, "p={p:?} n={n:?}");
            }
        }
    }

    #[test]
    fn regeneration_is_bit_identical() {
        let a = generate(1.0, 0.5, 2.0, 24, 6);
        let b = generate(1.0, 0.5, 2.0, 24, 6);
        assert_eq!(a.vertices, b.vertices);
    }
}
