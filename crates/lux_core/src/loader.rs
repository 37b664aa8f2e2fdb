//! JSON scene files.
//!
//! A scene file lists primitives and lights together with camera and
//! render settings. Image-based lights reference an image path that is
//! resolved relative to the scene file's directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lux_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentMap;
use crate::error::{SceneError, SceneResult};
use crate::light::Light;
use crate::material::Color;
use crate::primitive::Primitive;
use crate::scene::{GeometryMode, Scene};

/// Camera placement as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            look_from: Vec3::new(0.0, 0.0, -5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov: 60.0,
        }
    }
}

/// Dispatch settings as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Worker threads (0 = one per core)
    pub workers: usize,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
    /// Primary rays per pixel, rounded down to a square sub-pixel grid
    pub samples_per_pixel: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            workers: 0,
            bucket_size: 64,
            samples_per_pixel: 1,
        }
    }
}

/// A light as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDesc {
    Point {
        position: Vec3,
        #[serde(default = "default_color")]
        color: Color,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
    Area {
        position: Vec3,
        #[serde(default = "default_color")]
        color: Color,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
    Directional {
        direction: Vec3,
        #[serde(default = "default_color")]
        color: Color,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
    Spot {
        position: Vec3,
        direction: Vec3,
        /// Half-angle in degrees
        cutoff: f32,
        #[serde(default = "default_color")]
        color: Color,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
    Environment {
        #[serde(default = "default_color")]
        color: Color,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
    ImageBased {
        image: PathBuf,
        #[serde(default = "default_color")]
        color: Color,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
}

fn default_color() -> Color {
    Color::ONE
}

fn default_intensity() -> f32 {
    1.0
}

fn default_max_depth() -> u32 {
    3
}

/// The contents of a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default)]
    pub geometry: GeometryMode,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

/// A scene ready for rendering, plus the settings that came with it.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: CameraSettings,
    pub render: RenderSettings,
}

impl SceneFile {
    /// Resolve lights and validate, producing a renderable scene.
    ///
    /// Relative image paths are resolved against `base_dir` when given.
    pub fn into_loaded(self, base_dir: Option<&Path>) -> SceneResult<LoadedScene> {
        let mut maps = MapCache::new(base_dir);

        let lights = self
            .lights
            .into_iter()
            .map(|desc| resolve_light(desc, &mut maps))
            .collect::<SceneResult<Vec<_>>>()?;

        let scene = Scene {
            primitives: self.primitives,
            lights,
            max_depth: self.max_depth,
            geometry: self.geometry,
        };
        scene.validate()?;

        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(SceneError::Invalid(format!(
                "camera resolution must be non-zero, got {}x{}",
                self.camera.width, self.camera.height
            )));
        }

        Ok(LoadedScene {
            scene,
            camera: self.camera,
            render: self.render,
        })
    }
}

fn resolve_light(desc: LightDesc, maps: &mut MapCache) -> SceneResult<Light> {
    let light = match desc {
        LightDesc::Point {
            position,
            color,
            intensity,
        } => Light::point(position, color, intensity),
        LightDesc::Area {
            position,
            color,
            intensity,
        } => Light::area(position, color, intensity),
        LightDesc::Directional {
            direction,
            color,
            intensity,
        } => {
            if direction.length_squared() == 0.0 {
                return Err(SceneError::Invalid(
                    "directional light needs a non-zero direction".to_string(),
                ));
            }
            Light::directional(direction, color, intensity)
        }
        LightDesc::Spot {
            position,
            direction,
            cutoff,
            color,
            intensity,
        } => {
            if direction.length_squared() == 0.0 {
                return Err(SceneError::Invalid(
                    "spot light needs a non-zero direction".to_string(),
                ));
            }
            Light::spot(position, direction, cutoff.to_radians(), color, intensity)
        }
        LightDesc::Environment { color, intensity } => Light::environment(color, intensity),
        LightDesc::ImageBased {
            image,
            color,
            intensity,
        } => Light::image_based(maps.load(&image)?, color, intensity),
    };
    Ok(light)
}

/// Environment maps loaded so far, keyed by the path written in the file.
struct MapCache {
    maps: HashMap<PathBuf, Arc<EnvironmentMap>>,
    base_dir: Option<PathBuf>,
}

impl MapCache {
    fn new(base_dir: Option<&Path>) -> Self {
        Self {
            maps: HashMap::new(),
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    fn load(&mut self, path: &Path) -> SceneResult<Arc<EnvironmentMap>> {
        if let Some(map) = self.maps.get(path) {
            return Ok(map.clone());
        }

        let map = Arc::new(EnvironmentMap::load(self.resolve_path(path))?);
        self.maps.insert(path.to_path_buf(), map.clone());
        Ok(map)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Parse a scene from a JSON string.
pub fn load_scene_from_str(json: &str, base_dir: Option<&Path>) -> SceneResult<LoadedScene> {
    let file: SceneFile = serde_json::from_str(json)?;
    file.into_loaded(base_dir)
}

/// Load a scene file from disk.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<LoadedScene> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let loaded = load_scene_from_str(&json, path.parent())?;

    log::info!(
        "Loaded scene {}: {} primitives, {} lights, max depth {}",
        path.display(),
        loaded.scene.primitive_count(),
        loaded.scene.light_count(),
        loaded.scene.max_depth
    );

    Ok(loaded)
}
