//! egui editor panel: scene tree, property inspector, light and camera
//! controls. The panel edits the scene directly; anything that needs
//! file or GPU work comes back to the caller as a `UiAction`.

use std::path::PathBuf;

use glam::Vec3;

use crate::assets::TextureCache;
use crate::render::lights::MAX_POINT_LIGHTS;
use crate::render::{CameraController, LightRig, ProjectionMode};
use crate::scene::properties::{PropertyChange, PropertyId, PropertyRow, PropertyValue};
use crate::scene::{Primitive, PrimitiveKind, SceneState};

const FILTER_LABELS: [&str; 4] = ["None", "Grayscale", "Invert", "Sepia"];

/// Requests the panel cannot satisfy itself.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    LoadModel(String),
    Screenshot(PathBuf),
}

pub struct UiState {
    model_path: String,
    texture_path: String,
    /// Primitive the texture path buffer was filled from; the buffer is
    /// reloaded when the selection moves.
    texture_owner: Option<u64>,
    status: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            model_path: String::new(),
            texture_path: String::new(),
            texture_owner: None,
            status: String::new(),
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn draw(
        &mut self,
        ctx: &egui::Context,
        scene: &mut SceneState,
        lights: &mut LightRig,
        camera: &mut CameraController,
        textures: &mut TextureCache,
    ) -> Vec<UiAction> {
        let mut actions = Vec::new();
        egui::SidePanel::left("editor_panel")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_scene_tree(ui, scene);
                    ui.separator();
                    self.draw_inspector(ui, scene, textures);
                    ui.separator();
                    self.draw_lights(ui, lights);
                    ui.separator();
                    self.draw_camera(ui, camera);
                    ui.separator();
                    self.draw_io(ui, &mut actions);
                    if !self.status.is_empty() {
                        ui.separator();
                        ui.label(&self.status);
                    }
                });
            });
        actions
    }

    fn draw_scene_tree(&mut self, ui: &mut egui::Ui, scene: &mut SceneState) {
        ui.heading("Scene");
        ui.horizontal(|ui| {
            ui.menu_button("Add", |ui| {
                for kind in PrimitiveKind::SPAWNABLE {
                    if ui.button(kind.label()).clicked() {
                        let id = scene.spawn(*kind);
                        scene.set_selected(Some(id));
                        ui.close_menu();
                    }
                }
            });
            if let Some(id) = scene.selected() {
                if ui.button("Delete").clicked() {
                    scene.remove(id);
                }
            }
        });

        let groups = group_by_kind(scene.primitives());
        let mut clicked = None;
        for (label, entries) in groups {
            egui::CollapsingHeader::new(label)
                .default_open(true)
                .show(ui, |ui| {
                    for (id, name) in entries {
                        let selected = scene.selected() == Some(id);
                        if ui.selectable_label(selected, &name).clicked() {
                            clicked = Some(id);
                        }
                    }
                });
        }
        if let Some(id) = clicked {
            scene.set_selected(Some(id));
        }
    }

    fn draw_inspector(
        &mut self,
        ui: &mut egui::Ui,
        scene: &mut SceneState,
        textures: &mut TextureCache,
    ) {
        ui.heading("Inspector");
        let Some(id) = scene.selected() else {
            ui.label("Nothing selected");
            return;
        };
        let Some(primitive) = scene.get(id) else {
            return;
        };
        if self.texture_owner != Some(id) {
            self.texture_path = primitive.material.texture_path.clone();
            self.texture_owner = Some(id);
        }

        let rows = primitive.properties();
        let mut changes = Vec::new();
        for row in rows {
            match row {
                PropertyRow::Category(name) => {
                    ui.add_space(4.0);
                    ui.strong(name);
                }
                PropertyRow::Value(property) => {
                    self.draw_property(ui, property.id, property.label, property.value, &mut changes);
                }
            }
        }
        if let Some(primitive) = scene.get_mut(id) {
            for change in &changes {
                primitive.apply_change(change, textures);
            }
        }
    }

    fn draw_property(
        &mut self,
        ui: &mut egui::Ui,
        id: PropertyId,
        label: &str,
        value: PropertyValue,
        changes: &mut Vec<PropertyChange>,
    ) {
        match value {
            PropertyValue::Float(mut v) => {
                let widget_changed = ui
                    .horizontal(|ui| {
                        ui.label(label);
                        match id {
                            PropertyId::ColorR
                            | PropertyId::ColorG
                            | PropertyId::ColorB
                            | PropertyId::Roughness
                            | PropertyId::Metallic => {
                                ui.add(egui::Slider::new(&mut v, 0.0..=1.0)).changed()
                            }
                            _ => ui
                                .add(egui::DragValue::new(&mut v).speed(0.05))
                                .changed(),
                        }
                    })
                    .inner;
                if widget_changed {
                    changes.push(PropertyChange::new(id, PropertyValue::Float(v)));
                }
            }
            PropertyValue::Int(mut v) => {
                if id == PropertyId::Filter {
                    let mut mode = v.clamp(0, 3) as usize;
                    let before = mode;
                    ui.horizontal(|ui| {
                        ui.label(label);
                        egui::ComboBox::from_id_salt("filter_mode")
                            .selected_text(FILTER_LABELS[mode])
                            .show_ui(ui, |ui| {
                                for (i, name) in FILTER_LABELS.iter().enumerate() {
                                    ui.selectable_value(&mut mode, i, *name);
                                }
                            });
                    });
                    if mode != before {
                        changes.push(PropertyChange::new(id, PropertyValue::Int(mode as i32)));
                    }
                } else {
                    let widget_changed = ui
                        .horizontal(|ui| {
                            ui.label(label);
                            ui.add(egui::DragValue::new(&mut v)).changed()
                        })
                        .inner;
                    if widget_changed {
                        changes.push(PropertyChange::new(id, PropertyValue::Int(v)));
                    }
                }
            }
            PropertyValue::Bool(mut v) => {
                if ui.checkbox(&mut v, label).changed() {
                    changes.push(PropertyChange::new(id, PropertyValue::Bool(v)));
                }
            }
            PropertyValue::Text(_) => {
                // The only text property is the texture path; it goes
                // through a buffer so typing does not reload per key.
                ui.horizontal(|ui| {
                    ui.label(label);
                    ui.text_edit_singleline(&mut self.texture_path);
                });
                ui.horizontal(|ui| {
                    if ui.button("Browse").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "tga"])
                            .pick_file()
                        {
                            self.texture_path = path.display().to_string();
                        }
                    }
                    if ui.button("Apply").clicked() {
                        changes.push(PropertyChange::new(
                            id,
                            PropertyValue::Text(self.texture_path.clone()),
                        ));
                    }
                    if ui.button("Clear").clicked() {
                        self.texture_path.clear();
                        changes.push(PropertyChange::new(id, PropertyValue::Text(String::new())));
                    }
                });
            }
        }
    }

    fn draw_lights(&mut self, ui: &mut egui::Ui, lights: &mut LightRig) {
        ui.heading("Lights");
        ui.horizontal(|ui| {
            ui.label("Ambient");
            color_edit(ui, &mut lights.ambient);
        });
        ui.horizontal(|ui| {
            ui.label("Directional");
            color_edit(ui, &mut lights.directional.color);
        });
        ui.horizontal(|ui| {
            ui.label("Spot");
            color_edit(ui, &mut lights.spot.color);
        });

        ui.add_space(4.0);
        ui.strong("Point lights");
        let mut remove = None;
        for (index, light) in lights.point_lights.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                color_edit(ui, &mut light.color);
                ui.add(egui::DragValue::new(&mut light.position.x).speed(0.1));
                ui.add(egui::DragValue::new(&mut light.position.y).speed(0.1));
                ui.add(egui::DragValue::new(&mut light.position.z).speed(0.1));
                if ui.button("Remove").clicked() {
                    remove = Some(index);
                }
            });
        }
        if let Some(index) = remove {
            lights.remove_point_light(index);
        }
        if lights.point_lights.len() < MAX_POINT_LIGHTS && ui.button("Add point light").clicked() {
            lights.add_point_light(Vec3::new(0.0, 2.0, 0.0), Vec3::ONE);
        }
    }

    fn draw_camera(&mut self, ui: &mut egui::Ui, camera: &mut CameraController) {
        ui.heading("Camera");
        ui.horizontal(|ui| {
            ui.radio_value(
                &mut camera.projection,
                ProjectionMode::Perspective,
                "Perspective",
            );
            ui.radio_value(
                &mut camera.projection,
                ProjectionMode::Orthographic,
                "Orthographic",
            );
        });
        if camera.projection == ProjectionMode::Perspective {
            ui.horizontal(|ui| {
                ui.label("FOV");
                ui.add(egui::Slider::new(&mut camera.fov_degrees, 20.0..=90.0));
            });
        }
    }

    fn draw_io(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.heading("Import");
        ui.horizontal(|ui| {
            ui.label("OBJ");
            ui.text_edit_singleline(&mut self.model_path);
        });
        ui.horizontal(|ui| {
            if ui.button("Browse").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Wavefront OBJ", &["obj"])
                    .pick_file()
                {
                    self.model_path = path.display().to_string();
                }
            }
            if ui.button("Load").clicked() && !self.model_path.is_empty() {
                actions.push(UiAction::LoadModel(self.model_path.clone()));
            }
        });

        ui.add_space(4.0);
        if ui.button("Save screenshot").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("PNG", &["png"])
                .set_file_name("screenshot.png")
                .save_file()
            {
                actions.push(UiAction::Screenshot(path));
            }
        }
    }
}

fn color_edit(ui: &mut egui::Ui, color: &mut Vec3) {
    let mut rgb = color.to_array();
    if ui.color_edit_button_rgb(&mut rgb).changed() {
        *color = Vec3::from_array(rgb);
    }
}

/// Scene-tree folders: one per kind in order of first appearance,
/// display-only, keeping scene order inside each folder.
fn group_by_kind(primitives: &[Primitive]) -> Vec<(&'static str, Vec<(u64, String)>)> {
    let mut groups: Vec<(&'static str, Vec<(u64, String)>)> = Vec::new();
    for p in primitives {
        let label = p.kind.label();
        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, entries)) => entries.push((p.id, p.name.clone())),
            None => groups.push((label, vec![(p.id, p.name.clone())])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_tree_folders_group_by_kind_in_scene_order() {
        let mut scene = SceneState::new();
        let a = scene.spawn(PrimitiveKind::Cube);
        let b = scene.spawn(PrimitiveKind::Sphere);
        let c = scene.spawn(PrimitiveKind::Cube);
        let groups = group_by_kind(scene.primitives());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Cube");
        let cube_ids: Vec<u64> = groups[0].1.iter().map(|(id, _)| *id).collect();
        assert_eq!(cube_ids, vec![a, c]);
        assert_eq!(groups[1].0, "Sphere");
        assert_eq!(groups[1].1, vec![(b, "Sphere 2".to_string())]);
    }

    #[test]
    fn empty_scene_produces_no_folders() {
        let scene = SceneState::new();
        assert!(group_by_kind(scene.primitives()).is_empty());
    }
}
