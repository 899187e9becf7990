//! Typed property rows for the inspector panel.
//!
//! A primitive describes itself as a flat list of rows; edits come back
//! as `PropertyChange` values keyed by `PropertyId`, so the panel never
//! needs to know which primitive kind it is editing.

/// Stable identifier for every editable field across all primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    ColorR,
    ColorG,
    ColorB,
    Roughness,
    Metallic,
    Filter,
    TexturePath,
    TextureEnabled,
    // Kind-specific tessellation controls.
    SectorCount,
    StackCount,
    ResolutionU,
    ResolutionV,
    CurveResolution,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Text(String),
}

impl PropertyValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub label: &'static str,
    pub value: PropertyValue,
}

impl Property {
    pub fn float(id: PropertyId, label: &'static str, value: f32) -> Self {
        Self {
            id,
            label,
            value: PropertyValue::Float(value),
        }
    }

    pub fn int(id: PropertyId, label: &'static str, value: i32) -> Self {
        Self {
            id,
            label,
            value: PropertyValue::Int(value),
        }
    }

    pub fn bool(id: PropertyId, label: &'static str, value: bool) -> Self {
        Self {
            id,
            label,
            value: PropertyValue::Bool(value),
        }
    }

    pub fn text(id: PropertyId, label: &'static str, value: String) -> Self {
        Self {
            id,
            label,
            value: PropertyValue::Text(value),
        }
    }
}

/// One inspector row: either a section header or an editable value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyRow {
    Category(&'static str),
    Value(Property),
}

/// An edit emitted by the inspector, applied by the owning primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    pub id: PropertyId,
    pub value: PropertyValue,
}

impl PropertyChange {
    pub fn new(id: PropertyId, value: PropertyValue) -> Self {
        Self { id, value }
    }
}
