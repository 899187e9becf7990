//! CPU-side asset handling: texture decode with caching, Wavefront OBJ
//! import, and screenshot encoding. GPU upload happens in the renderer;
//! this module only produces pixel buffers and vertex streams.

use std::collections::HashMap;
use std::path::Path;

use glam::{Vec2, Vec3};

use crate::geometry::{triangle_tangent, MeshData};

/// Index into the texture cache; stable for the lifetime of the cache.
pub type TextureHandle = u32;

/// Handle of the built-in 1×1 white texture.
pub const DEFAULT_TEXTURE: TextureHandle = 0;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode texture at {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to load OBJ at {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
    #[error("OBJ at {path} contains no geometry")]
    Empty { path: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows.
    pub pixels: Vec<u8>,
}

impl TextureImage {
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![255, 255, 255, 255],
        }
    }
}

/// Path-keyed texture cache. Slot 0 is always the white fallback, so a
/// handle is usable even when the decode behind it failed.
pub struct TextureCache {
    by_path: HashMap<String, TextureHandle>,
    images: Vec<TextureImage>,
    decodes: u32,
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            by_path: HashMap::new(),
            images: vec![TextureImage::white()],
            decodes: 0,
        }
    }

    pub fn image(&self, handle: TextureHandle) -> &TextureImage {
        self.images
            .get(handle as usize)
            .unwrap_or(&self.images[DEFAULT_TEXTURE as usize])
    }

    /// Number of decodes performed so far; cache hits do not count.
    pub fn decode_count(&self) -> u32 {
        self.decodes
    }

    pub fn load(&mut self, path: &str) -> Result<TextureHandle, TextureError> {
        if let Some(handle) = self.by_path.get(path) {
            return Ok(*handle);
        }
        let bytes = std::fs::read(path).map_err(|source| TextureError::Read {
            path: path.to_string(),
            source,
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
            path: path.to_string(),
            source,
        })?;
        // Flip so row 0 is the bottom of the image, matching the UV
        // convention of the generators.
        let rgba = decoded.flipv().to_rgba8();
        let handle = self.images.len() as TextureHandle;
        self.images.push(TextureImage {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        });
        self.by_path.insert(path.to_string(), handle);
        self.decodes += 1;
        Ok(handle)
    }

    /// Load, or log and fall back to the white texture on failure.
    pub fn load_or_default(&mut self, path: &str) -> TextureHandle {
        match self.load(path) {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!("texture load failed: {err}");
                DEFAULT_TEXTURE
            }
        }
    }
}

/// Import a Wavefront OBJ as one non-indexed triangle soup in the
/// standard interleaved layout. Tangents are derived per triangle from
/// the UV edges; triangles without UVs fall back to the X axis.
pub fn load_obj_model(path: &str) -> Result<MeshData, ModelError> {
    let (models, _materials) =
        tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(|source| ModelError::Load {
            path: path.to_string(),
            source,
        })?;

    let mut mesh = MeshData::default();
    for model in &models {
        let m = &model.mesh;
        let position = |i: u32| {
            let i = i as usize * 3;
            Vec3::new(m.positions[i], m.positions[i + 1], m.positions[i + 2])
        };
        let normal = |i: u32| {
            let i = i as usize * 3;
            if m.normals.len() > i + 2 {
                Vec3::new(m.normals[i], m.normals[i + 1], m.normals[i + 2])
            } else {
                Vec3::Y
            }
        };
        let uv = |i: u32| {
            let i = i as usize * 2;
            if m.texcoords.len() > i + 1 {
                Vec2::new(m.texcoords[i], m.texcoords[i + 1])
            } else {
                Vec2::ZERO
            }
        };

        for triangle in m.indices.chunks_exact(3) {
            let [i0, i1, i2] = [triangle[0], triangle[1], triangle[2]];
            let (p0, p1, p2) = (position(i0), position(i1), position(i2));
            let (uv0, uv1, uv2) = (uv(i0), uv(i1), uv(i2));
            let duv1 = uv1 - uv0;
            let duv2 = uv2 - uv0;
            let denom = duv1.x * duv2.y - duv2.x * duv1.y;
            let tangent = if denom.abs() > 1e-8 {
                triangle_tangent(p1 - p0, p2 - p0, duv1, duv2)
            } else {
                Vec3::X
            };
            mesh.push_vertex(p0, uv0, normal(i0), tangent);
            mesh.push_vertex(p1, uv1, normal(i1), tangent);
            mesh.push_vertex(p2, uv2, normal(i2), tangent);
        }
    }

    if mesh.is_empty() {
        return Err(ModelError::Empty {
            path: path.to_string(),
        });
    }
    Ok(mesh)
}

/// Short display name for a loaded model, from its file name.
pub fn model_display_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("model")
        .to_string()
}

/// Encode a top-down 4-byte-per-pixel frame readback as an RGB PNG,
/// dropping alpha and unswizzling BGRA surfaces.
pub fn encode_screenshot(
    path: &Path,
    width: u32,
    height: u32,
    data: &[u8],
    bgra: bool,
) -> Result<(), image::ImageError> {
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in data.chunks_exact(4) {
        if bgra {
            rgb.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
        } else {
            rgb.extend_from_slice(&pixel[..3]);
        }
    }
    let buffer = image::RgbImage::from_raw(width, height, rgb).ok_or_else(|| {
        image::ImageError::Parameter(image::error::ParameterError::from_kind(
            image::error::ParameterErrorKind::DimensionMismatch,
        ))
    })?;
    buffer.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cache_returns_the_same_handle_without_redecoding() {
        let dir = std::env::temp_dir().join("forma-texture-cache-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("checker.png");
        let img = image::RgbaImage::from_fn(2, 2, |x, y| {
            image::Rgba(if (x + y) % 2 == 0 {
                [255, 255, 255, 255]
            } else {
                [0, 0, 0, 255]
            })
        });
        img.save(&path).unwrap();

        let mut cache = TextureCache::new();
        let path_str = path.to_str().unwrap();
        let a = cache.load(path_str).unwrap();
        let b = cache.load(path_str).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, DEFAULT_TEXTURE);
        assert_eq!(cache.decode_count(), 1);
    }

    #[test]
    fn missing_texture_falls_back_to_the_white_slot() {
        let mut cache = TextureCache::new();
        let handle = cache.load_or_default("/definitely/not/here.png");
        assert_eq!(handle, DEFAULT_TEXTURE);
        assert_eq!(cache.image(handle), &TextureImage::white());
        assert_eq!(cache.decode_count(), 0);
    }

    #[test]
    fn obj_import_produces_the_interleaved_layout() {
        let dir = std::env::temp_dir().join("forma-obj-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tri.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0").unwrap();
        writeln!(file, "vt 0 0\nvt 1 0\nvt 0 1").unwrap();
        writeln!(file, "vn 0 0 1\nvn 0 0 1\nvn 0 0 1").unwrap();
        writeln!(file, "f 1/1/1 2/2/2 3/3/3").unwrap();
        drop(file);

        let mesh = load_obj_model(path.to_str().unwrap()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        for n in mesh.normals() {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn missing_obj_reports_a_load_error() {
        let err = load_obj_model("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, ModelError::Load { .. }));
    }

    #[test]
    fn screenshot_drops_alpha_and_unswizzles_bgra() {
        let dir = std::env::temp_dir().join("forma-screenshot-test");
        std::fs::create_dir_all(&dir).unwrap();

        // 1×2 readback: top row red, bottom row blue.
        let rgba = [255, 0, 0, 255, 0, 0, 255, 255];
        let rgba_path = dir.join("shot-rgba.png");
        encode_screenshot(&rgba_path, 1, 2, &rgba, false).unwrap();
        let saved = image::open(&rgba_path).unwrap().to_rgb8();
        assert_eq!(saved.get_pixel(0, 0), &image::Rgb([255, 0, 0]));
        assert_eq!(saved.get_pixel(0, 1), &image::Rgb([0, 0, 255]));

        // Same frame as BGRA bytes should decode identically.
        let bgra = [0, 0, 255, 255, 255, 0, 0, 255];
        let bgra_path = dir.join("shot-bgra.png");
        encode_screenshot(&bgra_path, 1, 2, &bgra, true).unwrap();
        let saved = image::open(&bgra_path).unwrap().to_rgb8();
        assert_eq!(saved.get_pixel(0, 0), &image::Rgb([255, 0, 0]));
        assert_eq!(saved.get_pixel(0, 1), &image::Rgb([0, 0, 255]));
    }

    #[test]
    fn screenshot_with_a_short_buffer_reports_an_error() {
        let dir = std::env::temp_dir().join("forma-screenshot-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("short.png");
        // One pixel of data for a claimed 2x2 frame.
        let rgba = [255, 0, 0, 255];
        assert!(encode_screenshot(&path, 2, 2, &rgba, false).is_err());
    }

    #[test]
    fn model_names_come_from_the_file_stem() {
        assert_eq!(model_display_name("/tmp/assets/teapot.obj"), "teapot");
        assert_eq!(model_display_name(""), "model");
    }
}
