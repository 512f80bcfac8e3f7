//! Bezier-patch teapot tessellation with analytic normals, plus the small scene around it:
//! transform animation, an orbit camera and a diffuse point light.

pub mod bezier;
pub mod camera;
pub mod error;
pub mod light;
pub mod mesh;
pub mod raster;
pub mod scene;
pub mod spline;
pub mod teapot;
pub mod transform;

pub use error::{Error, Result};
