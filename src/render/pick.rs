//! Cursor picking.
//!
//! A click is unprojected into a world-space ray for the active
//! projection mode and tested against every primitive's world-space
//! bounding box with the slab method. The nearest entry distance wins;
//! on exact ties the earliest primitive in scene order keeps the hit.

use glam::{Mat4, Vec3, Vec4, Vec4Swizzles};

use super::camera::{CameraController, ProjectionMode};
use crate::scene::Primitive;

/// Axis-aligned box, object or world space depending on context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// World-space envelope of all eight transformed corners.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            let world = matrix.transform_point3(corner);
            min = min.min(world);
            max = max.max(world);
        }
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Slab test. Returns the entry distance along the ray; negative when
/// the origin is inside the box. `None` when the ray misses or the box
/// is entirely behind the origin.
pub fn ray_distance(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv = ray.direction.recip();
    let t1 = (aabb.min - ray.origin) * inv;
    let t2 = (aabb.max - ray.origin) * inv;
    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();
    if t_near <= t_far && t_far > 0.0 {
        Some(t_near)
    } else {
        None
    }
}

/// Unproject a cursor position (top-left origin, physical pixels) into a
/// world-space ray.
pub fn cursor_ray(
    camera: &CameraController,
    width: f32,
    height: f32,
    cursor_x: f32,
    cursor_y: f32,
) -> Ray {
    let ndc_x = 2.0 * cursor_x / width - 1.0;
    let ndc_y = 1.0 - 2.0 * cursor_y / height;
    let inv_view = camera.view_matrix().inverse();

    match camera.projection {
        ProjectionMode::Perspective => {
            let tan_half_fov = (camera.fov_degrees.to_radians() / 2.0).tan();
            let aspect = width / height;
            let eye_dir = Vec4::new(
                ndc_x * tan_half_fov * aspect,
                ndc_y * tan_half_fov,
                -1.0,
                0.0,
            );
            Ray {
                origin: inv_view.w_axis.xyz(),
                direction: (inv_view * eye_dir).xyz().normalize(),
            }
        }
        ProjectionMode::Orthographic => {
            // The origin slides across the near plane; the direction is
            // the fixed view axis.
            let inv_proj = camera.projection_matrix(width / height).inverse();
            let eye = inv_proj * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
            let eye = eye / eye.w;
            Ray {
                origin: (inv_view * Vec4::new(eye.x, eye.y, eye.z, 1.0)).xyz(),
                direction: (inv_view * Vec4::new(0.0, 0.0, -1.0, 0.0)).xyz().normalize(),
            }
        }
    }
}

/// Cast the cursor ray against the whole scene and return the id of the
/// nearest hit, if any.
pub fn find_nearest(
    primitives: &[Primitive],
    camera: &CameraController,
    width: f32,
    height: f32,
    cursor_x: f32,
    cursor_y: f32,
) -> Option<u64> {
    let ray = cursor_ray(camera, width, height, cursor_x, cursor_y);
    let mut nearest: Option<(u64, f32)> = None;
    for primitive in primitives {
        if let Some(distance) = ray_distance(&ray, &primitive.collision_box()) {
            let closer = match nearest {
                Some((_, best)) => distance < best,
                None => true,
            };
            if closer {
                nearest = Some((primitive.id, distance));
            }
        }
    }
    nearest.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{PrimitiveKind, SceneState};

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb::new(center - Vec3::ONE, center + Vec3::ONE)
    }

    #[test]
    fn axis_ray_reports_the_entry_distance() {
        let ray = Ray {
            origin: Vec3::new(-5.0, 0.0, 0.0),
            direction: Vec3::X,
        };
        let d = ray_distance(&ray, &unit_box_at(Vec3::ZERO)).unwrap();
        assert!((d - 4.0).abs() < 1e-6);
    }

    #[test]
    fn offset_ray_misses_the_box() {
        let ray = Ray {
            origin: Vec3::new(-5.0, 2.5, 0.0),
            direction: Vec3::X,
        };
        assert!(ray_distance(&ray, &unit_box_at(Vec3::ZERO)).is_none());
    }

    #[test]
    fn box_behind_the_origin_is_rejected() {
        let ray = Ray {
            origin: Vec3::new(5.0, 0.0, 0.0),
            direction: Vec3::X,
        };
        assert!(ray_distance(&ray, &unit_box_at(Vec3::ZERO)).is_none());
    }

    #[test]
    fn origin_inside_the_box_yields_a_negative_distance() {
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        let d = ray_distance(&ray, &unit_box_at(Vec3::ZERO)).unwrap();
        assert!(d < 0.0);
    }

    #[test]
    fn zero_direction_components_are_handled() {
        // Direction has zero y and z; the reciprocal slabs must still
        // resolve for an on-axis hit.
        let ray = Ray {
            origin: Vec3::new(-3.0, 0.5, -0.5),
            direction: Vec3::X,
        };
        assert!(ray_distance(&ray, &unit_box_at(Vec3::ZERO)).is_some());
    }

    #[test]
    fn transformed_box_envelopes_rotation() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let rotated = aabb.transformed(&Mat4::from_rotation_y(45f32.to_radians()));
        assert!((rotated.max.x - std::f32::consts::SQRT_2).abs() < 1e-5);
        assert!((rotated.max.y - 1.0).abs() < 1e-6);
    }

    fn looking_down_negative_z() -> CameraController {
        // Yaw -π/2 turns the forward vector (cos yaw, 0, sin yaw) onto -Z.
        CameraController::new(Vec3::new(0.0, 0.0, 10.0), -std::f32::consts::FRAC_PI_2, 0.0)
    }

    #[test]
    fn center_cursor_ray_matches_the_view_axis() {
        let camera = looking_down_negative_z();
        let ray = cursor_ray(&camera, 800.0, 600.0, 400.0, 300.0);
        assert!((ray.origin - camera.position).length() < 1e-4);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn orthographic_rays_stay_parallel() {
        let mut camera = looking_down_negative_z();
        camera.projection = ProjectionMode::Orthographic;
        let center = cursor_ray(&camera, 800.0, 600.0, 400.0, 300.0);
        let corner = cursor_ray(&camera, 800.0, 600.0, 10.0, 10.0);
        assert!((center.direction - corner.direction).length() < 1e-5);
        // Offset cursors shift the origin sideways instead of bending
        // the direction.
        assert!((center.origin - corner.origin).length() > 1.0);
    }

    #[test]
    fn find_nearest_prefers_the_closer_primitive() {
        let mut scene = SceneState::new();
        let near = scene.spawn(PrimitiveKind::Cube);
        let far = scene.spawn(PrimitiveKind::Cube);
        scene
            .get_mut(near)
            .unwrap()
            .set_transformation(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::ONE);
        scene
            .get_mut(far)
            .unwrap()
            .set_transformation(Vec3::new(0.0, 0.0, -4.0), Vec3::ZERO, Vec3::ONE);
        let camera = looking_down_negative_z();
        let hit = find_nearest(scene.primitives(), &camera, 800.0, 600.0, 400.0, 300.0);
        assert_eq!(hit, Some(near));
    }

    #[test]
    fn exact_ties_keep_the_first_primitive() {
        let mut scene = SceneState::new();
        let first = scene.spawn(PrimitiveKind::Cube);
        let _second = scene.spawn(PrimitiveKind::Cube);
        // Both cubes sit at the origin with identical boxes.
        let camera = looking_down_negative_z();
        let hit = find_nearest(scene.primitives(), &camera, 800.0, 600.0, 400.0, 300.0);
        assert_eq!(hit, Some(first));
    }

    #[test]
    fn empty_space_returns_no_hit() {
        let mut scene = SceneState::new();
        scene.spawn(PrimitiveKind::Cube);
        let camera = looking_down_negative_z();
        let hit = find_nearest(scene.primitives(), &camera, 800.0, 600.0, 10.0, 10.0);
        assert_eq!(hit, None);
    }

    #[test]
    fn orthographic_center_pick_still_hits() {
        let mut scene = SceneState::new();
        let id = scene.spawn(PrimitiveKind::Sphere);
        let mut camera = looking_down_negative_z();
        camera.projection = ProjectionMode::Orthographic;
        let hit = find_nearest(scene.primitives(), &camera, 800.0, 600.0, 400.0, 300.0);
        assert_eq!(hit, Some(id));
    }
}
