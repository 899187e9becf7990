use winit::keyboard::{KeyCode, PhysicalKey};

use crate::render::CameraMovement;

/// Held-key state for the fly camera. WASD strafes, Q/E moves down and
/// up, the arrow keys aim.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputState {
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

impl InputState {
    pub fn handle_key(&mut self, key: PhysicalKey, pressed: bool) {
        match key {
            PhysicalKey::Code(KeyCode::KeyW) => self.move_forward = pressed,
            PhysicalKey::Code(KeyCode::KeyS) => self.move_backward = pressed,
            PhysicalKey::Code(KeyCode::KeyA) => self.move_left = pressed,
            PhysicalKey::Code(KeyCode::KeyD) => self.move_right = pressed,
            PhysicalKey::Code(KeyCode::KeyE) => self.move_up = pressed,
            PhysicalKey::Code(KeyCode::KeyQ) => self.move_down = pressed,
            PhysicalKey::Code(KeyCode::ArrowLeft) => self.aim_left = pressed,
            PhysicalKey::Code(KeyCode::ArrowRight) => self.aim_right = pressed,
            PhysicalKey::Code(KeyCode::ArrowUp) => self.aim_up = pressed,
            PhysicalKey::Code(KeyCode::ArrowDown) => self.aim_down = pressed,
            _ => {}
        }
    }

    pub fn movement(&self) -> CameraMovement {
        CameraMovement {
            move_forward: self.move_forward,
            move_backward: self.move_backward,
            move_left: self.move_left,
            move_right: self.move_right,
            move_up: self.move_up,
            move_down: self.move_down,
            aim_left: self.aim_left,
            aim_right: self.aim_right,
            aim_up: self.aim_up,
            aim_down: self.aim_down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_toggle_their_movement_flags() {
        let mut input = InputState::default();
        input.handle_key(PhysicalKey::Code(KeyCode::KeyW), true);
        input.handle_key(PhysicalKey::Code(KeyCode::KeyQ), true);
        assert!(input.movement().move_forward);
        assert!(input.movement().move_down);

        input.handle_key(PhysicalKey::Code(KeyCode::KeyW), false);
        assert!(!input.movement().move_forward);
        assert!(input.movement().move_down);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut input = InputState::default();
        input.handle_key(PhysicalKey::Code(KeyCode::KeyZ), true);
        let movement = input.movement();
        assert!(!movement.move_forward && !movement.move_backward);
        assert!(!movement.aim_left && !movement.aim_right);
    }
}
