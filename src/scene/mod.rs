pub mod properties;

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

use crate::assets::{TextureCache, TextureHandle};
use crate::geometry::{bezier, catmull_rom, frustum, shapes::ShapeKind, sphere, MeshData};
use crate::render::pick::Aabb;
use properties::{Property, PropertyChange, PropertyId, PropertyRow};

/// What a primitive is, for spawning and scene-tree grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Cylinder,
    Cone,
    Plane,
    Rectangle,
    Triangle,
    Point,
    Line,
    Square,
    BezierSurface,
    CatmullRomCurve,
    Model,
}

impl PrimitiveKind {
    pub fn label(self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "Cube",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Cylinder => "Cylinder",
            PrimitiveKind::Cone => "Cone",
            PrimitiveKind::Plane => "Plane",
            PrimitiveKind::Rectangle => "Rectangle",
            PrimitiveKind::Triangle => "Triangle",
            PrimitiveKind::Point => "Point",
            PrimitiveKind::Line => "Line",
            PrimitiveKind::Square => "Square",
            PrimitiveKind::BezierSurface => "Bezier Surface",
            PrimitiveKind::CatmullRomCurve => "Catmull-Rom Curve",
            PrimitiveKind::Model => "Model",
        }
    }

    /// Every spawnable kind, in menu order.
    pub const SPAWNABLE: &'static [PrimitiveKind] = &[
        PrimitiveKind::Cube,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Cone,
        PrimitiveKind::Plane,
        PrimitiveKind::Rectangle,
        PrimitiveKind::Triangle,
        PrimitiveKind::Point,
        PrimitiveKind::Line,
        PrimitiveKind::Square,
        PrimitiveKind::BezierSurface,
        PrimitiveKind::CatmullRomCurve,
    ];
}

/// Generator parameters. Rebuilding the mesh after an edit re-runs the
/// matching generator with these values.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Sphere {
        radius: f32,
        sectors: u32,
        stacks: u32,
    },
    Frustum {
        base_radius: f32,
        top_radius: f32,
        height: f32,
        sectors: u32,
        stacks: u32,
    },
    Bezier {
        control: [[Vec3; 4]; 4],
        resolution_u: u32,
        resolution_v: u32,
    },
    CatmullRom {
        points: Vec<Vec3>,
        resolution: u32,
    },
    Shape(ShapeKind),
    /// Imported mesh; kept verbatim, never regenerated.
    Model { mesh: MeshData, path: String },
}

impl Geometry {
    fn build(&self) -> MeshData {
        match self {
            Geometry::Sphere {
                radius,
                sectors,
                stacks,
            } => sphere::generate(*radius, *sectors, *stacks),
            Geometry::Frustum {
                base_radius,
                top_radius,
                height,
                sectors,
                stacks,
            } => frustum::generate(*base_radius, *top_radius, *height, *sectors, *stacks),
            Geometry::Bezier {
                control,
                resolution_u,
                resolution_v,
            } => bezier::generate(control, *resolution_u, *resolution_v),
            Geometry::CatmullRom { points, resolution } => {
                catmull_rom::generate(points, *resolution)
            }
            Geometry::Shape(kind) => kind.generate(),
            Geometry::Model { mesh, .. } => mesh.clone(),
        }
    }

    /// Analytic object-space bounds where the parameters give them
    /// exactly; generated bounds otherwise.
    fn bounds(&self, mesh: &MeshData) -> Aabb {
        match self {
            Geometry::Sphere { radius, .. } => {
                Aabb::new(Vec3::splat(-radius), Vec3::splat(*radius))
            }
            Geometry::Frustum {
                base_radius,
                top_radius,
                height,
                ..
            } => {
                let r = base_radius.max(*top_radius);
                Aabb::new(
                    Vec3::new(-r, -height / 2.0, -r),
                    Vec3::new(r, height / 2.0, r),
                )
            }
            Geometry::Shape(kind) => {
                let (min, max) = kind.local_bounds();
                Aabb::new(min, max)
            }
            Geometry::Bezier { .. } | Geometry::CatmullRom { .. } | Geometry::Model { .. } => {
                match mesh.bounds() {
                    Some((min, max)) => Aabb::new(min, max),
                    None => Aabb::new(Vec3::ZERO, Vec3::ZERO),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub roughness: f32,
    pub metallic: f32,
    /// Post-sample color filter: 0 none, 1 grayscale, 2 invert, 3 sepia.
    pub filter: i32,
    pub texture: Option<TextureHandle>,
    pub texture_path: String,
    pub texture_enabled: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            roughness: 0.99,
            metallic: 0.2,
            filter: 0,
            texture: None,
            texture_path: String::new(),
            texture_enabled: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Primitive {
    pub id: u64,
    pub name: String,
    pub kind: PrimitiveKind,
    pub transform: Mat4,
    pub material: Material,
    geometry: Geometry,
    mesh: MeshData,
    local_box: Aabb,
    /// Bumped whenever the mesh changes so the renderer re-uploads it.
    revision: u64,
}

impl Primitive {
    fn new(id: u64, name: String, kind: PrimitiveKind, geometry: Geometry) -> Self {
        let mesh = geometry.build();
        let local_box = geometry.bounds(&mesh);
        Self {
            id,
            name,
            kind,
            transform: Mat4::IDENTITY,
            material: Material::default(),
            geometry,
            mesh,
            local_box,
            revision: 0,
        }
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn local_box(&self) -> Aabb {
        self.local_box
    }

    /// World-space envelope of the transformed local box.
    pub fn collision_box(&self) -> Aabb {
        self.local_box.transformed(&self.transform)
    }

    fn rebuild(&mut self) {
        self.mesh = self.geometry.build();
        self.local_box = self.geometry.bounds(&self.mesh);
        self.revision += 1;
    }

    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            self.transform.x_axis.truncate().length(),
            self.transform.y_axis.truncate().length(),
            self.transform.z_axis.truncate().length(),
        )
    }

    /// Euler XYZ angles in degrees, recovered from the scale-normalized
    /// rotation part.
    pub fn rotation_degrees(&self) -> Vec3 {
        let scale = self.scale();
        let safe = scale.max(Vec3::splat(1e-8));
        let rotation = Mat3::from_cols(
            self.transform.x_axis.truncate() / safe.x,
            self.transform.y_axis.truncate() / safe.y,
            self.transform.z_axis.truncate() / safe.z,
        );
        let (x, y, z) = Quat::from_mat3(&rotation).to_euler(EulerRot::XYZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    pub fn set_transformation(&mut self, position: Vec3, rotation_degrees: Vec3, scale: Vec3) {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            rotation_degrees.x.to_radians(),
            rotation_degrees.y.to_radians(),
            rotation_degrees.z.to_radians(),
        );
        self.transform = Mat4::from_scale_rotation_translation(scale, rotation, position);
    }

    /// Inspector rows: transform and material for every kind, plus the
    /// tessellation controls of the parametric kinds.
    pub fn properties(&self) -> Vec<PropertyRow> {
        let position = self.position();
        let rotation = self.rotation_degrees();
        let scale = self.scale();
        let mut rows = vec![
            PropertyRow::Category("Transform"),
            PropertyRow::Value(Property::float(PropertyId::PositionX, "Position X", position.x)),
            PropertyRow::Value(Property::float(PropertyId::PositionY, "Position Y", position.y)),
            PropertyRow::Value(Property::float(PropertyId::PositionZ, "Position Z", position.z)),
            PropertyRow::Value(Property::float(PropertyId::RotationX, "Rotation X", rotation.x)),
            PropertyRow::Value(Property::float(PropertyId::RotationY, "Rotation Y", rotation.y)),
            PropertyRow::Value(Property::float(PropertyId::RotationZ, "Rotation Z", rotation.z)),
            PropertyRow::Value(Property::float(PropertyId::ScaleX, "Scale X", scale.x)),
            PropertyRow::Value(Property::float(PropertyId::ScaleY, "Scale Y", scale.y)),
            PropertyRow::Value(Property::float(PropertyId::ScaleZ, "Scale Z", scale.z)),
            PropertyRow::Category("Material"),
            PropertyRow::Value(Property::float(PropertyId::ColorR, "Color R", self.material.color.x)),
            PropertyRow::Value(Property::float(PropertyId::ColorG, "Color G", self.material.color.y)),
            PropertyRow::Value(Property::float(PropertyId::ColorB, "Color B", self.material.color.z)),
            PropertyRow::Value(Property::float(
                PropertyId::Roughness,
                "Roughness",
                self.material.roughness,
            )),
            PropertyRow::Value(Property::float(
                PropertyId::Metallic,
                "Metallic",
                self.material.metallic,
            )),
            PropertyRow::Value(Property::int(PropertyId::Filter, "Filter", self.material.filter)),
            PropertyRow::Value(Property::text(
                PropertyId::TexturePath,
                "Texture",
                self.material.texture_path.clone(),
            )),
            PropertyRow::Value(Property::bool(
                PropertyId::TextureEnabled,
                "Textured",
                self.material.texture_enabled,
            )),
        ];

        match &self.geometry {
            Geometry::Sphere { sectors, stacks, .. }
            | Geometry::Frustum { sectors, stacks, .. } => {
                rows.push(PropertyRow::Category("Tessellation"));
                rows.push(PropertyRow::Value(Property::int(
                    PropertyId::SectorCount,
                    "Sectors",
                    *sectors as i32,
                )));
                rows.push(PropertyRow::Value(Property::int(
                    PropertyId::StackCount,
                    "Stacks",
                    *stacks as i32,
                )));
            }
            Geometry::Bezier {
                resolution_u,
                resolution_v,
                ..
            } => {
                rows.push(PropertyRow::Category("Tessellation"));
                rows.push(PropertyRow::Value(Property::int(
                    PropertyId::ResolutionU,
                    "Resolution U",
                    *resolution_u as i32,
                )));
                rows.push(PropertyRow::Value(Property::int(
                    PropertyId::ResolutionV,
                    "Resolution V",
                    *resolution_v as i32,
                )));
            }
            Geometry::CatmullRom { resolution, .. } => {
                rows.push(PropertyRow::Category("Tessellation"));
                rows.push(PropertyRow::Value(Property::int(
                    PropertyId::CurveResolution,
                    "Resolution",
                    *resolution as i32,
                )));
            }
            Geometry::Shape(_) | Geometry::Model { .. } => {}
        }
        rows
    }

    /// Apply one inspector edit. Mismatched value types are ignored
    /// rather than treated as errors; the panel always sends the type it
    /// was shown.
    pub fn apply_change(&mut self, change: &PropertyChange, textures: &mut TextureCache) {
        use PropertyId::*;

        let mut position = self.position();
        let mut rotation = self.rotation_degrees();
        let mut scale = self.scale();
        match change.id {
            PositionX | PositionY | PositionZ | RotationX | RotationY | RotationZ | ScaleX
            | ScaleY | ScaleZ => {
                let Some(v) = change.value.as_float() else {
                    return;
                };
                match change.id {
                    PositionX => position.x = v,
                    PositionY => position.y = v,
                    PositionZ => position.z = v,
                    RotationX => rotation.x = v,
                    RotationY => rotation.y = v,
                    RotationZ => rotation.z = v,
                    ScaleX => scale.x = v,
                    ScaleY => scale.y = v,
                    ScaleZ => scale.z = v,
                    _ => unreachable!(),
                }
                self.set_transformation(position, rotation, scale);
            }
            ColorR | ColorG | ColorB => {
                let Some(v) = change.value.as_float() else {
                    return;
                };
                let v = v.clamp(0.0, 1.0);
                match change.id {
                    ColorR => self.material.color.x = v,
                    ColorG => self.material.color.y = v,
                    ColorB => self.material.color.z = v,
                    _ => unreachable!(),
                }
            }
            Roughness => {
                if let Some(v) = change.value.as_float() {
                    self.material.roughness = v.clamp(0.0, 1.0);
                }
            }
            Metallic => {
                if let Some(v) = change.value.as_float() {
                    self.material.metallic = v.clamp(0.0, 1.0);
                }
            }
            Filter => {
                if let Some(v) = change.value.as_int() {
                    self.material.filter = v.clamp(0, 3);
                }
            }
            TexturePath => {
                if let Some(path) = change.value.as_text() {
                    self.material.texture_path = path.to_string();
                    if path.is_empty() {
                        self.material.texture = None;
                        self.material.texture_enabled = false;
                    } else {
                        self.material.texture = Some(textures.load_or_default(path));
                        self.material.texture_enabled = true;
                    }
                }
            }
            TextureEnabled => {
                if let Some(v) = change.value.as_bool() {
                    self.material.texture_enabled = v && self.material.texture.is_some();
                }
            }
            SectorCount => {
                if let Some(v) = change.value.as_int() {
                    let v = v.max(3) as u32;
                    match &mut self.geometry {
                        Geometry::Sphere { sectors, .. } | Geometry::Frustum { sectors, .. } => {
                            *sectors = v;
                            self.rebuild();
                        }
                        _ => {}
                    }
                }
            }
            StackCount => {
                if let Some(v) = change.value.as_int() {
                    let v = v.max(1) as u32;
                    match &mut self.geometry {
                        Geometry::Sphere { stacks, .. } | Geometry::Frustum { stacks, .. } => {
                            *stacks = v;
                            self.rebuild();
                        }
                        _ => {}
                    }
                }
            }
            ResolutionU => {
                if let Some(v) = change.value.as_int() {
                    if let Geometry::Bezier { resolution_u, .. } = &mut self.geometry {
                        *resolution_u = v.max(2) as u32;
                        self.rebuild();
                    }
                }
            }
            ResolutionV => {
                if let Some(v) = change.value.as_int() {
                    if let Geometry::Bezier { resolution_v, .. } = &mut self.geometry {
                        *resolution_v = v.max(2) as u32;
                        self.rebuild();
                    }
                }
            }
            CurveResolution => {
                if let Some(v) = change.value.as_int() {
                    if let Geometry::CatmullRom { resolution, .. } = &mut self.geometry {
                        *resolution = v.max(1) as u32;
                        self.rebuild();
                    }
                }
            }
        }
    }
}

fn default_geometry(kind: PrimitiveKind) -> Geometry {
    match kind {
        PrimitiveKind::Sphere => Geometry::Sphere {
            radius: 1.0,
            sectors: 36,
            stacks: 18,
        },
        PrimitiveKind::Cylinder => Geometry::Frustum {
            base_radius: 1.0,
            top_radius: 1.0,
            height: 2.0,
            sectors: 36,
            stacks: 1,
        },
        PrimitiveKind::Cone => Geometry::Frustum {
            base_radius: 1.0,
            top_radius: 0.0,
            height: 2.0,
            sectors: 36,
            stacks: 1,
        },
        PrimitiveKind::BezierSurface => Geometry::Bezier {
            control: bezier::default_control_grid(),
            resolution_u: 16,
            resolution_v: 16,
        },
        PrimitiveKind::CatmullRomCurve => Geometry::CatmullRom {
            points: vec![
                Vec3::new(-3.0, 0.0, 0.0),
                Vec3::new(-1.5, 1.0, 0.5),
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::new(1.5, 1.0, -0.5),
                Vec3::new(3.0, 0.0, 0.0),
                Vec3::new(4.5, 1.0, 0.5),
            ],
            resolution: 12,
        },
        PrimitiveKind::Cube => Geometry::Shape(ShapeKind::Cube),
        PrimitiveKind::Plane => Geometry::Shape(ShapeKind::Plane),
        PrimitiveKind::Rectangle => Geometry::Shape(ShapeKind::Rectangle),
        PrimitiveKind::Triangle => Geometry::Shape(ShapeKind::Triangle),
        PrimitiveKind::Point => Geometry::Shape(ShapeKind::Point),
        PrimitiveKind::Line => Geometry::Shape(ShapeKind::Line),
        PrimitiveKind::Square => Geometry::Shape(ShapeKind::Square),
        PrimitiveKind::Model => Geometry::Model {
            mesh: MeshData::default(),
            path: String::new(),
        },
    }
}

#[derive(Default)]
pub struct SceneState {
    primitives: Vec<Primitive>,
    next_id: u64,
    selected: Option<u64>,
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            next_id: 1,
            selected: None,
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn set_selected(&mut self, id: Option<u64>) {
        self.selected = id;
    }

    pub fn get(&self, id: u64) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Primitive> {
        self.primitives.iter_mut().find(|p| p.id == id)
    }

    pub fn spawn(&mut self, kind: PrimitiveKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let name = format!("{} {}", kind.label(), id);
        self.primitives
            .push(Primitive::new(id, name, kind, default_geometry(kind)));
        id
    }

    /// Spawn an imported mesh under its file name.
    pub fn spawn_model(&mut self, name: impl Into<String>, path: impl Into<String>, mesh: MeshData) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.primitives.push(Primitive::new(
            id,
            name.into(),
            PrimitiveKind::Model,
            Geometry::Model {
                mesh,
                path: path.into(),
            },
        ));
        id
    }

    /// Remove the first primitive with this id; a removed selection is
    /// cleared.
    pub fn remove(&mut self, id: u64) {
        if let Some(index) = self.primitives.iter().position(|p| p.id == id) {
            self.primitives.remove(index);
            if self.selected == Some(id) {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use properties::{PropertyChange, PropertyId, PropertyValue};

    #[test]
    fn spawn_assigns_unique_ids_and_builds_meshes() {
        let mut scene = SceneState::new();
        let a = scene.spawn(PrimitiveKind::Cube);
        let b = scene.spawn(PrimitiveKind::Sphere);
        assert_ne!(a, b);
        assert!(!scene.get(a).unwrap().mesh().is_empty());
        assert!(!scene.get(b).unwrap().mesh().is_empty());
    }

    #[test]
    fn remove_clears_a_removed_selection() {
        let mut scene = SceneState::new();
        let a = scene.spawn(PrimitiveKind::Cube);
        let b = scene.spawn(PrimitiveKind::Cone);
        scene.set_selected(Some(a));
        scene.remove(a);
        assert_eq!(scene.selected(), None);
        assert!(scene.get(a).is_none());
        assert!(scene.get(b).is_some());
    }

    #[test]
    fn transform_roundtrips_through_decompose() {
        let mut scene = SceneState::new();
        let id = scene.spawn(PrimitiveKind::Cube);
        let p = scene.get_mut(id).unwrap();
        p.set_transformation(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(10.0, 20.0, 30.0),
            Vec3::new(2.0, 3.0, 4.0),
        );
        assert!((p.position() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        assert!((p.scale() - Vec3::new(2.0, 3.0, 4.0)).length() < 1e-4);
        assert!((p.rotation_degrees() - Vec3::new(10.0, 20.0, 30.0)).length() < 1e-2);
    }

    #[test]
    fn zero_scale_keeps_rotation_recovery_finite() {
        let mut scene = SceneState::new();
        let id = scene.spawn(PrimitiveKind::Cube);
        let p = scene.get_mut(id).unwrap();
        p.set_transformation(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(10.0, 20.0, 30.0),
            Vec3::ZERO,
        );
        assert!(p.rotation_degrees().is_finite());

        // A single collapsed axis must not poison the recovery either.
        p.set_transformation(Vec3::ZERO, Vec3::new(0.0, 45.0, 0.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(p.rotation_degrees().is_finite());
        for row in p.properties() {
            if let PropertyRow::Value(property) = row {
                if let PropertyValue::Float(v) = property.value {
                    assert!(v.is_finite());
                }
            }
        }
    }

    #[test]
    fn sphere_local_box_ignores_tessellation() {
        let mut scene = SceneState::new();
        let id = scene.spawn(PrimitiveKind::Sphere);
        let mut textures = TextureCache::new();
        let before = scene.get(id).unwrap().local_box();
        scene.get_mut(id).unwrap().apply_change(
            &PropertyChange::new(PropertyId::SectorCount, PropertyValue::Int(5)),
            &mut textures,
        );
        let p = scene.get(id).unwrap();
        assert_eq!(p.local_box(), before);
        assert_eq!(p.local_box().min, Vec3::splat(-1.0));
        assert_eq!(p.local_box().max, Vec3::splat(1.0));
    }

    #[test]
    fn tessellation_edit_bumps_the_revision() {
        let mut scene = SceneState::new();
        let id = scene.spawn(PrimitiveKind::Sphere);
        let mut textures = TextureCache::new();
        let p = scene.get_mut(id).unwrap();
        let before = p.revision();
        let count_before = p.mesh().vertex_count();
        p.apply_change(
            &PropertyChange::new(PropertyId::SectorCount, PropertyValue::Int(8)),
            &mut textures,
        );
        assert_eq!(p.revision(), before + 1);
        assert_ne!(p.mesh().vertex_count(), count_before);
    }

    #[test]
    fn material_edit_leaves_the_mesh_alone() {
        let mut scene = SceneState::new();
        let id = scene.spawn(PrimitiveKind::Cube);
        let mut textures = TextureCache::new();
        let p = scene.get_mut(id).unwrap();
        let before = p.revision();
        p.apply_change(
            &PropertyChange::new(PropertyId::Roughness, PropertyValue::Float(0.5)),
            &mut textures,
        );
        assert_eq!(p.revision(), before);
        assert_eq!(p.material.roughness, 0.5);
    }

    #[test]
    fn mismatched_value_types_are_ignored() {
        let mut scene = SceneState::new();
        let id = scene.spawn(PrimitiveKind::Cube);
        let mut textures = TextureCache::new();
        let p = scene.get_mut(id).unwrap();
        let before = p.transform;
        p.apply_change(
            &PropertyChange::new(PropertyId::PositionX, PropertyValue::Bool(true)),
            &mut textures,
        );
        assert_eq!(p.transform, before);
    }

    #[test]
    fn collision_box_envelopes_a_rotated_cube() {
        let mut scene = SceneState::new();
        let id = scene.spawn(PrimitiveKind::Cube);
        let p = scene.get_mut(id).unwrap();
        p.set_transformation(Vec3::ZERO, Vec3::new(0.0, 45.0, 0.0), Vec3::ONE);
        let world = p.collision_box();
        let expected = std::f32::consts::SQRT_2;
        assert!((world.max.x - expected).abs() < 1e-4);
        assert!((world.max.z - expected).abs() < 1e-4);
        assert!((world.max.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn filter_values_clamp_to_the_known_modes() {
        let mut scene = SceneState::new();
        let id = scene.spawn(PrimitiveKind::Cube);
        let mut textures = TextureCache::new();
        let p = scene.get_mut(id).unwrap();
        p.apply_change(
            &PropertyChange::new(PropertyId::Filter, PropertyValue::Int(9)),
            &mut textures,
        );
        assert_eq!(p.material.filter, 3);
    }
}
