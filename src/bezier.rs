pub mod curve;
pub mod patch;

pub use patch::{BezierPatch, ControlGrid};
