use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Patch index {index} out of range (patch count: {count})")]
    InvalidIndex { index: usize, count: usize },

    #[error("Tessellation resolution must be at least {min}, got {0}", min = crate::bezier::patch::MIN_RESOLUTION)]
    InvalidResolution(u32),

    #[error("A patch needs 16 control points, got {0}")]
    ControlPointCount(usize),

    #[error("Cannot encode image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
