mod egui_host;
mod input;
mod timing;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec3;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::assets::{self, TextureCache, TextureImage};
use crate::render::{pick, CameraController, LightRig, RenderContext, RenderError};
use crate::scene::{PrimitiveKind, SceneState};
use crate::ui::{UiAction, UiState};
use egui_host::EguiHost;
use input::InputState;
use timing::FrameTiming;

const WINDOW_TITLE: &str = "Forma Scene Editor";
const SKYBOX_DIR: &str = "assets/skybox";
// Cubemap face order: +X, -X, +Y, -Y, +Z, -Z.
const SKYBOX_FACES: [&str; 6] = ["right", "left", "top", "bottom", "front", "back"];

pub struct App {
    window: Option<Arc<Window>>,
    render: Option<RenderContext>,
    egui: Option<EguiHost>,
    scene: SceneState,
    textures: TextureCache,
    lights: LightRig,
    camera: CameraController,
    ui: UiState,
    input: InputState,
    cursor: Option<(f32, f32)>,
    timing: FrameTiming,
    target_frame_duration: Duration,
    next_frame_time: Instant,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            render: None,
            egui: None,
            scene: SceneState::new(),
            textures: TextureCache::new(),
            lights: LightRig::new(),
            camera: CameraController::new(
                Vec3::new(0.0, 2.0, 10.0),
                -std::f32::consts::FRAC_PI_2,
                -0.15,
            ),
            ui: UiState::new(),
            input: InputState::default(),
            cursor: None,
            timing: FrameTiming::new(WINDOW_TITLE.to_string()),
            target_frame_duration: Duration::from_millis(16),
            next_frame_time: Instant::now(),
        }
    }

    fn update_target_frame_duration(&mut self, window: &Window) {
        let mut target = Duration::from_millis(16);
        if let Some(monitor) = window.current_monitor() {
            if let Some(millihz) = monitor.refresh_rate_millihertz() {
                let hz = millihz as f32 / 1000.0;
                if hz > 1.0 {
                    target = Duration::from_secs_f32(1.0 / hz);
                }
            }
        }
        self.target_frame_duration = target;
        self.next_frame_time = Instant::now() + self.target_frame_duration;
    }

    fn populate_default_scene(&mut self) {
        let ground = self.scene.spawn(PrimitiveKind::Plane);
        if let Some(p) = self.scene.get_mut(ground) {
            p.name = "Ground".to_string();
            p.set_transformation(
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::ZERO,
                Vec3::new(12.0, 1.0, 12.0),
            );
            p.material.color = Vec3::new(0.55, 0.55, 0.58);
        }

        let cube = self.scene.spawn(PrimitiveKind::Cube);
        if let Some(p) = self.scene.get_mut(cube) {
            p.set_transformation(Vec3::new(-3.0, 0.0, 0.0), Vec3::ZERO, Vec3::ONE);
            p.material.color = Vec3::new(0.85, 0.35, 0.3);
        }

        let sphere = self.scene.spawn(PrimitiveKind::Sphere);
        if let Some(p) = self.scene.get_mut(sphere) {
            p.material.color = Vec3::new(0.3, 0.55, 0.9);
            p.material.roughness = 0.2;
            p.material.metallic = 0.8;
        }

        let cylinder = self.scene.spawn(PrimitiveKind::Cylinder);
        if let Some(p) = self.scene.get_mut(cylinder) {
            p.set_transformation(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO, Vec3::splat(0.7));
            p.material.color = Vec3::new(0.4, 0.8, 0.45);
        }

        let cone = self.scene.spawn(PrimitiveKind::Cone);
        if let Some(p) = self.scene.get_mut(cone) {
            p.set_transformation(Vec3::new(5.5, 0.0, 0.0), Vec3::ZERO, Vec3::splat(0.7));
            p.material.color = Vec3::new(0.9, 0.75, 0.3);
        }

        let surface = self.scene.spawn(PrimitiveKind::BezierSurface);
        if let Some(p) = self.scene.get_mut(surface) {
            p.set_transformation(Vec3::new(0.0, -0.5, -5.0), Vec3::ZERO, Vec3::ONE);
            p.material.color = Vec3::new(0.7, 0.5, 0.85);
        }

        let curve = self.scene.spawn(PrimitiveKind::CatmullRomCurve);
        if let Some(p) = self.scene.get_mut(curve) {
            p.set_transformation(Vec3::new(0.0, 1.5, 4.0), Vec3::ZERO, Vec3::ONE);
            p.material.color = Vec3::new(0.95, 0.9, 0.85);
        }

        // Marker cube at the default point light.
        if let Some(light) = self.lights.point_lights.first() {
            let marker = self.scene.spawn(PrimitiveKind::Cube);
            if let Some(p) = self.scene.get_mut(marker) {
                p.name = "Light marker".to_string();
                p.set_transformation(light.position, Vec3::ZERO, Vec3::splat(0.2));
                p.material.color = light.color;
            }
        }
    }

    fn load_model(&mut self, path: &str) {
        match assets::load_obj_model(path) {
            Ok(mesh) => {
                let name = assets::model_display_name(path);
                let id = self.scene.spawn_model(name, path, mesh);
                self.scene.set_selected(Some(id));
                self.ui.set_status(format!("Loaded {path}"));
                log::info!("imported OBJ model from {path}");
            }
            Err(err) => {
                log::warn!("model import failed: {err}");
                self.ui.set_status(err.to_string());
            }
        }
    }

    fn pick_at_cursor(&mut self) {
        let Some((x, y)) = self.cursor else {
            return;
        };
        let Some(render) = self.render.as_ref() else {
            return;
        };
        let (width, height) = render.size();
        let hit = pick::find_nearest(
            self.scene.primitives(),
            &self.camera,
            width as f32,
            height as f32,
            x,
            y,
        );
        self.scene.set_selected(hit);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };
        self.timing.update(Some(window.as_ref()), Instant::now());
        self.camera
            .update_movement(&self.input.movement(), self.timing.frame_dt);
        self.lights.orbit_directional(self.timing.elapsed * 0.5);
        let view = self.camera.view_matrix();
        self.lights.follow_spot(&view);

        let Some(egui) = self.egui.as_mut() else {
            return;
        };
        let mut actions = Vec::new();
        let output = egui.run_ui(&window, |ctx| {
            actions = self.ui.draw(
                ctx,
                &mut self.scene,
                &mut self.lights,
                &mut self.camera,
                &mut self.textures,
            );
        });

        for action in actions {
            match action {
                UiAction::LoadModel(path) => self.load_model(&path),
                UiAction::Screenshot(path) => {
                    if let Some(render) = self.render.as_mut() {
                        render.request_screenshot(path);
                    }
                }
            }
        }

        let (Some(render), Some(egui)) = (self.render.as_mut(), self.egui.as_ref()) else {
            return;
        };
        render.sync_scene(&self.scene, &self.textures);
        match render.render(
            &self.scene,
            &self.camera,
            &self.lights,
            egui.context(),
            output,
        ) {
            Ok(()) => {}
            Err(RenderError::Surface(
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
            )) => {
                render.resize(window.inner_size());
            }
            Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(err) => log::warn!("frame failed: {err}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(1280u32, 720u32))
            .with_resizable(true);
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let mut render = match RenderContext::new(window.clone()) {
            Ok(render) => render,
            Err(err) => {
                log::error!("renderer setup failed: {err}");
                event_loop.exit();
                return;
            }
        };
        if let Some(faces) = load_skybox_faces(Path::new(SKYBOX_DIR)) {
            render.set_skybox_faces(&faces);
        }

        self.egui = Some(EguiHost::new(&window));
        self.render = Some(render);
        self.populate_default_scene();
        self.update_target_frame_duration(&window);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match (self.window.as_ref(), self.egui.as_mut()) {
            (Some(window), Some(egui)) => egui.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if consumed {
                    return;
                }
                let pressed = event.state == ElementState::Pressed;
                if pressed && event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    self.scene.set_selected(None);
                    return;
                }
                self.input.handle_key(event.physical_key, pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                if !consumed {
                    self.pick_at_cursor();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if !consumed {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                    };
                    self.camera.nudge(0.0, 0.0, scroll * 0.5);
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(render) = self.render.as_mut() {
                    render.resize(new_size);
                }
                if let Some(window) = self.window.clone() {
                    self.update_target_frame_duration(&window);
                }
            }
            WindowEvent::Moved(_) => {
                if let Some(window) = self.window.clone() {
                    self.update_target_frame_duration(&window);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame_time {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame_time = now + self.target_frame_duration;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame_time));
    }
}

/// Optional image-backed skybox; the renderer keeps its flat-color
/// fallback when the faces are missing or broken.
fn load_skybox_faces(dir: &Path) -> Option<[TextureImage; 6]> {
    let mut faces = Vec::with_capacity(6);
    for name in SKYBOX_FACES {
        let path = ["png", "jpg"]
            .iter()
            .map(|ext| dir.join(format!("{name}.{ext}")))
            .find(|candidate| candidate.exists())?;
        match image::open(&path) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                faces.push(TextureImage {
                    width: rgba.width(),
                    height: rgba.height(),
                    pixels: rgba.into_raw(),
                });
            }
            Err(err) => {
                log::warn!("skybox face {} failed to decode: {err}", path.display());
                return None;
            }
        }
    }
    faces.try_into().ok()
}

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("starting {WINDOW_TITLE}");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
