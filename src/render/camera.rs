use glam::{Mat4, Vec3};

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;
/// Half-height of the orthographic view volume.
const ORTHO_EXTENT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CameraMovement {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub aim_left: bool,
    pub aim_right: bool,
    pub aim_up: bool,
    pub aim_down: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_degrees: f32,
    pub projection: ProjectionMode,
}

impl CameraController {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            fov_degrees: 45.0,
            projection: ProjectionMode::Perspective,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let (forward, _right, up) = self.basis();
        Mat4::look_at_rh(self.position, self.position + forward, up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            ProjectionMode::Perspective => Mat4::perspective_rh(
                self.fov_degrees.to_radians(),
                aspect,
                NEAR_PLANE,
                FAR_PLANE,
            ),
            ProjectionMode::Orthographic => Mat4::orthographic_rh(
                -ORTHO_EXTENT * aspect,
                ORTHO_EXTENT * aspect,
                -ORTHO_EXTENT,
                ORTHO_EXTENT,
                NEAR_PLANE,
                FAR_PLANE,
            ),
        }
    }

    pub fn nudge(&mut self, yaw_delta: f32, pitch_delta: f32, zoom_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        wrap_angles(&mut self.yaw, &mut self.pitch);
        if zoom_delta != 0.0 {
            let (forward, _, _) = self.basis();
            self.position += forward * zoom_delta;
        }
    }

    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        camera_basis(self.yaw, self.pitch)
    }

    pub fn move_horizontal(&mut self, right: f32, up: f32, forward: f32) {
        let forward_dir = Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin());
        let right_dir = Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos());
        self.position += right_dir * right + Vec3::Y * up + forward_dir * forward;
    }

    pub fn update_movement(&mut self, input: &CameraMovement, frame_dt: f32) -> bool {
        let move_speed = 3.0 * frame_dt;
        let aim_speed = 1.8 * frame_dt;
        let mut changed = false;

        if input.aim_left {
            self.yaw -= aim_speed;
            changed = true;
        }
        if input.aim_right {
            self.yaw += aim_speed;
            changed = true;
        }
        if input.aim_up {
            self.pitch += aim_speed;
            changed = true;
        }
        if input.aim_down {
            self.pitch -= aim_speed;
            changed = true;
        }
        wrap_angles(&mut self.yaw, &mut self.pitch);

        let mut forward = 0.0;
        let mut right = 0.0;
        let mut up = 0.0;
        if input.move_forward {
            forward += move_speed;
        }
        if input.move_backward {
            forward -= move_speed;
        }
        if input.move_left {
            right -= move_speed;
        }
        if input.move_right {
            right += move_speed;
        }
        if input.move_up {
            up += move_speed;
        }
        if input.move_down {
            up -= move_speed;
        }

        if forward != 0.0 || right != 0.0 || up != 0.0 {
            self.move_horizontal(right, up, forward);
            changed = true;
        }

        changed
    }
}

fn camera_basis(yaw: f32, pitch: f32) -> (Vec3, Vec3, Vec3) {
    let cos_pitch = pitch.cos();
    let forward = Vec3::new(yaw.cos() * cos_pitch, pitch.sin(), yaw.sin() * cos_pitch);
    let right = Vec3::new(-yaw.sin(), 0.0, yaw.cos());
    let up = right.cross(forward).normalize_or(Vec3::Y);
    (forward, right, up)
}

fn wrap_angles(yaw: &mut f32, pitch: &mut f32) {
    const TWO_PI: f32 = std::f32::consts::PI * 2.0;
    if yaw.is_finite() {
        *yaw = (*yaw + std::f32::consts::PI).rem_euclid(TWO_PI) - std::f32::consts::PI;
    }
    if pitch.is_finite() {
        *pitch = pitch.clamp(-1.55, 1.55);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_update_keeps_finite_values() {
        let mut camera = CameraController::new(Vec3::new(0.0, 0.0, 5.0), 0.0, 0.0);
        let movement = CameraMovement {
            move_forward: true,
            move_right: true,
            move_up: true,
            aim_right: true,
            aim_up: true,
            ..CameraMovement::default()
        };
        let changed = camera.update_movement(&movement, 1.0 / 60.0);
        assert!(changed);
        assert!(camera.position.is_finite());
        assert!(camera.yaw.is_finite());
        assert!(camera.pitch.is_finite());
    }

    #[test]
    fn view_matrix_maps_a_point_ahead_onto_the_view_axis() {
        // Yaw 0 looks down +X; a point ahead of the camera must land in
        // front of the eye (negative view-space z).
        let camera = CameraController::new(Vec3::ZERO, 0.0, 0.0);
        let view = camera.view_matrix();
        let ahead = view.transform_point3(Vec3::new(3.0, 0.0, 0.0));
        assert!(ahead.z < 0.0);
        assert!(ahead.x.abs() < 1e-5);
        assert!(ahead.y.abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_poles() {
        let mut camera = CameraController::new(Vec3::ZERO, 0.0, 0.0);
        for _ in 0..300 {
            camera.nudge(0.0, 0.1, 0.0);
        }
        assert!(camera.pitch <= 1.55);
    }

    #[test]
    fn projection_modes_produce_different_matrices() {
        let mut camera = CameraController::new(Vec3::ZERO, 0.0, 0.0);
        let perspective = camera.projection_matrix(16.0 / 9.0);
        camera.projection = ProjectionMode::Orthographic;
        let orthographic = camera.projection_matrix(16.0 / 9.0);
        assert_ne!(perspective, orthographic);
        // Orthographic rows have no w-coupling.
        assert_eq!(orthographic.x_axis.w, 0.0);
        assert_eq!(orthographic.w_axis.w, 1.0);
    }
}
