//! Scene lighting rig: one shadow-casting directional light, a flat
//! ambient term, a camera-following spot, and a small set of point
//! lights. The directional light orbits the scene over time and drives
//! the shadow pass through `light_space_matrix`.

use glam::{Mat4, Vec3};

pub const MAX_POINT_LIGHTS: usize = 8;

const ORBIT_RADIUS: f32 = 10.0;
const ORBIT_HEIGHT: f32 = 10.0;
const SHADOW_EXTENT: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub directional: Light,
    pub ambient: Vec3,
    pub spot: Light,
    pub point_lights: Vec<Light>,
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new()
    }
}

impl LightRig {
    pub fn new() -> Self {
        Self {
            directional: Light {
                position: Vec3::new(0.0, 10.0, 10.0),
                direction: Vec3::new(0.0, 1.0, 0.0),
                color: Vec3::new(1.0, 0.95, 0.9),
            },
            ambient: Vec3::splat(0.2),
            spot: Light {
                position: Vec3::new(0.0, 0.0, -3.0),
                direction: Vec3::new(0.0, 0.0, 1.0),
                color: Vec3::ONE,
            },
            point_lights: vec![Light {
                position: Vec3::new(11.5, 1.5, 0.0),
                direction: Vec3::ZERO,
                color: Vec3::new(1.0, 1.0, 0.0),
            }],
        }
    }

    /// Circle the directional light around the scene, always aiming at
    /// the origin.
    pub fn orbit_directional(&mut self, seconds: f32) {
        let position = Vec3::new(
            ORBIT_RADIUS * seconds.cos(),
            ORBIT_HEIGHT,
            ORBIT_RADIUS * seconds.sin(),
        );
        self.directional.position = position;
        self.directional.direction = (-position).normalize();
    }

    /// Pin the spot light to the camera: eye position, view direction.
    pub fn follow_spot(&mut self, view: &Mat4) {
        let inv_view = view.inverse();
        self.spot.position = inv_view.w_axis.truncate();
        // Third row of the view matrix is the back axis; the camera
        // looks along its negation.
        self.spot.direction =
            -Vec3::new(view.x_axis.z, view.y_axis.z, view.z_axis.z).normalize_or(Vec3::Z);
    }

    pub fn add_point_light(&mut self, position: Vec3, color: Vec3) -> bool {
        if self.point_lights.len() >= MAX_POINT_LIGHTS {
            return false;
        }
        self.point_lights.push(Light {
            position,
            direction: Vec3::ZERO,
            color,
        });
        true
    }

    pub fn remove_point_light(&mut self, index: usize) {
        if index < self.point_lights.len() {
            self.point_lights.remove(index);
        }
    }

    /// Orthographic depth projection from the directional light, used by
    /// both the shadow pass and the shadow lookup in the object shader.
    pub fn light_space_matrix(&self) -> Mat4 {
        let position = self.directional.position;
        let target = position + self.directional.direction;
        let projection = Mat4::orthographic_rh(
            -SHADOW_EXTENT,
            SHADOW_EXTENT,
            -SHADOW_EXTENT,
            SHADOW_EXTENT,
            0.1,
            100.0,
        );
        projection * Mat4::look_at_rh(position, target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_keeps_the_light_aimed_at_the_origin() {
        let mut rig = LightRig::new();
        for t in [0.0, 1.3, 4.7, 9.2] {
            rig.orbit_directional(t);
            assert!((rig.directional.position.y - ORBIT_HEIGHT).abs() < 1e-6);
            let to_origin = (-rig.directional.position).normalize();
            assert!((rig.directional.direction - to_origin).length() < 1e-5);
        }
    }

    #[test]
    fn spot_follows_the_camera_eye_and_forward() {
        let eye = Vec3::new(3.0, 2.0, 5.0);
        let target = Vec3::new(0.0, 0.0, 0.0);
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let mut rig = LightRig::new();
        rig.follow_spot(&view);
        assert!((rig.spot.position - eye).length() < 1e-4);
        let forward = (target - eye).normalize();
        assert!((rig.spot.direction - forward).length() < 1e-4);
    }

    #[test]
    fn point_light_count_is_capped() {
        let mut rig = LightRig::new();
        while rig.point_lights.len() < MAX_POINT_LIGHTS {
            assert!(rig.add_point_light(Vec3::ZERO, Vec3::ONE));
        }
        assert!(!rig.add_point_light(Vec3::ZERO, Vec3::ONE));
        assert_eq!(rig.point_lights.len(), MAX_POINT_LIGHTS);
    }

    #[test]
    fn light_space_matrix_contains_the_scene_center() {
        let rig = LightRig::new();
        let clip = rig.light_space_matrix().project_point3(Vec3::ZERO);
        assert!(clip.x.abs() <= 1.0);
        assert!(clip.y.abs() <= 1.0);
        assert!((0.0..=1.0).contains(&clip.z));
    }
}
