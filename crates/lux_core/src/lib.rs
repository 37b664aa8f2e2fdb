//! Lux Core - Scene description for the Lux ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Primitive`, `Shape`, `Material`, `Light`
//! - **Environment images** for image-based lights
//! - **Scene files**: JSON loading with camera and render settings
//!
//! # Example
//!
//! ```ignore
//! use lux_core::load_scene;
//!
//! let loaded = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} primitives, {} lights",
//!     loaded.scene.primitive_count(),
//!     loaded.scene.light_count());
//! ```

pub mod environment;
pub mod error;
pub mod light;
pub mod loader;
pub mod material;
pub mod primitive;
pub mod scene;

// Re-export commonly used types
pub use environment::EnvironmentMap;
pub use error::{SceneError, SceneResult};
pub use light::{Light, LightKind};
pub use loader::{load_scene, load_scene_from_str, CameraSettings, LoadedScene, RenderSettings, SceneFile};
pub use material::{Color, Material, MaterialKind};
pub use primitive::{Primitive, Shape, ShapeKind};
pub use scene::{GeometryMode, Scene};
