use std::time::Instant;
use winit::window::Window;

/// Per-frame clock: delta time for camera movement, wall-clock seconds
/// since startup for the orbiting light, and an fps readout in the
/// window title.
pub struct FrameTiming {
    start: Instant,
    last_frame_time: Option<Instant>,
    last_fps_time: Instant,
    frame_count: u32,
    pub frame_dt: f32,
    pub elapsed: f32,
    base_title: String,
}

impl FrameTiming {
    pub fn new(base_title: String) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame_time: None,
            last_fps_time: now,
            frame_count: 0,
            frame_dt: 1.0 / 60.0,
            elapsed: 0.0,
            base_title,
        }
    }

    pub fn update(&mut self, window: Option<&Window>, now: Instant) {
        let dt_duration = if let Some(last) = self.last_frame_time {
            now.saturating_duration_since(last)
        } else {
            std::time::Duration::from_millis(16)
        };
        self.last_frame_time = Some(now);
        self.frame_dt = dt_duration.as_secs_f32().max(0.0);
        self.elapsed = now.saturating_duration_since(self.start).as_secs_f32();

        self.frame_count = self.frame_count.saturating_add(1);
        let since_report = now.saturating_duration_since(self.last_fps_time);
        if since_report.as_secs_f32() >= 0.5 {
            let fps = self.frame_count as f32 / since_report.as_secs_f32();
            if let Some(window) = window {
                window.set_title(&format!("{} - {:.1} fps", self.base_title, fps));
            }
            self.frame_count = 0;
            self.last_fps_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn delta_and_elapsed_track_successive_updates() {
        let mut timing = FrameTiming::new("test".to_string());
        let start = timing.start;
        timing.update(None, start + Duration::from_millis(100));
        timing.update(None, start + Duration::from_millis(150));
        assert!((timing.frame_dt - 0.05).abs() < 1e-3);
        assert!((timing.elapsed - 0.15).abs() < 1e-3);
    }

    #[test]
    fn time_running_backwards_clamps_to_zero() {
        let mut timing = FrameTiming::new("test".to_string());
        let start = timing.start;
        timing.update(None, start + Duration::from_millis(100));
        timing.update(None, start + Duration::from_millis(50));
        assert_eq!(timing.frame_dt, 0.0);
    }
}
