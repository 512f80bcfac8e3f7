use glam::{vec3, Vec3};

use crate::bezier::patch::ControlGrid;
use crate::error::Result;
use crate::spline::SplineSurface;
use crate::transform::Transform;

pub const PATCH_COUNT: usize = 28;

/// Resolution used by the demo scene.
pub const DEFAULT_RESOLUTION: u32 = 10;

/// Teapot control points, 16 per patch, row by row. Neighbouring patches repeat their
/// shared edge rows so the surface is closed without seams.
///
/// Source: <http://www.holmes3d.net/graphics/teapot/teapotCGA.bpt>
#[rustfmt::skip]
pub const TEAPOT_PATCHES: [[[f32; 3]; 16]; PATCH_COUNT] = [
    [
        [1.4, 2.25, 0.], [1.3375, 2.38125, 0.], [1.4375, 2.38125, 0.], [1.5, 2.25, 0.],
        [1.4, 2.25, 0.784], [1.3375, 2.38125, 0.749], [1.4375, 2.38125, 0.805], [1.5, 2.25, 0.84],
        [0.784, 2.25, 1.4], [0.749, 2.38125, 1.3375], [0.805, 2.38125, 1.4375], [0.84, 2.25, 1.5],
        [0., 2.25, 1.4], [0., 2.38125, 1.3375], [0., 2.38125, 1.4375], [0., 2.25, 1.5],
    ],
    [
        [0., 2.25, 1.4], [0., 2.38125, 1.3375], [0., 2.38125, 1.4375], [0., 2.25, 1.5],
        [-0.784, 2.25, 1.4], [-0.749, 2.38125, 1.3375], [-0.805, 2.38125, 1.4375], [-0.84, 2.25, 1.5],
        [-1.4, 2.25, 0.784], [-1.3375, 2.38125, 0.749], [-1.4375, 2.38125, 0.805], [-1.5, 2.25, 0.84],
        [-1.4, 2.25, 0.], [-1.3375, 2.38125, 0.], [-1.4375, 2.38125, 0.], [-1.5, 2.25, 0.],
    ],
    [
        [-1.4, 2.25, 0.], [-1.3375, 2.38125, 0.], [-1.4375, 2.38125, 0.], [-1.5, 2.25, 0.],
        [-1.4, 2.25, -0.784], [-1.3375, 2.38125, -0.749], [-1.4375, 2.38125, -0.805], [-1.5, 2.25, -0.84],
        [-0.784, 2.25, -1.4], [-0.749, 2.38125, -1.3375], [-0.805, 2.38125, -1.4375], [-0.84, 2.25, -1.5],
        [0., 2.25, -1.4], [0., 2.38125, -1.3375], [0., 2.38125, -1.4375], [0., 2.25, -1.5],
    ],
    [
        [0., 2.25, -1.4], [0., 2.38125, -1.3375], [0., 2.38125, -1.4375], [0., 2.25, -1.5],
        [0.784, 2.25, -1.4], [0.749, 2.38125, -1.3375], [0.805, 2.38125, -1.4375], [0.84, 2.25, -1.5],
        [1.4, 2.25, -0.784], [1.3375, 2.38125, -0.749], [1.4375, 2.38125, -0.805], [1.5, 2.25, -0.84],
        [1.4, 2.25, 0.], [1.3375, 2.38125, 0.], [1.4375, 2.38125, 0.], [1.5, 2.25, 0.],
    ],
    [
        [1.5, 2.25, 0.], [1.75, 1.725, 0.], [2., 1.2, 0.], [2., 0.75, 0.],
        [1.5, 2.25, 0.84], [1.75, 1.725, 0.98], [2., 1.2, 1.12], [2., 0.75, 1.12],
        [0.84, 2.25, 1.5], [0.98, 1.725, 1.75], [1.12, 1.2, 2.], [1.12, 0.75, 2.],
        [0., 2.25, 1.5], [0., 1.725, 1.75], [0., 1.2, 2.], [0., 0.75, 2.],
    ],
    [
        [0., 2.25, 1.5], [0., 1.725, 1.75], [0., 1.2, 2.], [0., 0.75, 2.],
        [-0.84, 2.25, 1.5], [-0.98, 1.725, 1.75], [-1.12, 1.2, 2.], [-1.12, 0.75, 2.],
        [-1.5, 2.25, 0.84], [-1.75, 1.725, 0.98], [-2., 1.2, 1.12], [-2., 0.75, 1.12],
        [-1.5, 2.25, 0.], [-1.75, 1.725, 0.], [-2., 1.2, 0.], [-2., 0.75, 0.],
    ],
    [
        [-1.5, 2.25, 0.], [-1.75, 1.725, 0.], [-2., 1.2, 0.], [-2., 0.75, 0.],
        [-1.5, 2.25, -0.84], [-1.75, 1.725, -0.98], [-2., 1.2, -1.12], [-2., 0.75, -1.12],
        [-0.84, 2.25, -1.5], [-0.98, 1.725, -1.75], [-1.12, 1.2, -2.], [-1.12, 0.75, -2.],
        [0., 2.25, -1.5], [0., 1.725, -1.75], [0., 1.2, -2.], [0., 0.75, -2.],
    ],
    [
        [0., 2.25, -1.5], [0., 1.725, -1.75], [0., 1.2, -2.], [0., 0.75, -2.],
        [0.84, 2.25, -1.5], [0.98, 1.725, -1.75], [1.12, 1.2, -2.], [1.12, 0.75, -2.],
        [1.5, 2.25, -0.84], [1.75, 1.725, -0.98], [2., 1.2, -1.12], [2., 0.75, -1.12],
        [1.5, 2.25, 0.], [1.75, 1.725, 0.], [2., 1.2, 0.], [2., 0.75, 0.],
    ],
    [
        [2., 0.75, 0.], [2., 0.3, 0.], [1.5, 0.075, 0.], [1.5, 0., 0.],
        [2., 0.75, 1.12], [2., 0.3, 1.12], [1.5, 0.075, 0.84], [1.5, 0., 0.84],
        [1.12, 0.75, 2.], [1.12, 0.3, 2.], [0.84, 0.075, 1.5], [0.84, 0., 1.5],
        [0., 0.75, 2.], [0., 0.3, 2.], [0., 0.075, 1.5], [0., 0., 1.5],
    ],
    [
        [0., 0.75, 2.], [0., 0.3, 2.], [0., 0.075, 1.5], [0., 0., 1.5],
        [-1.12, 0.75, 2.], [-1.12, 0.3, 2.], [-0.84, 0.075, 1.5], [-0.84, 0., 1.5],
        [-2., 0.75, 1.12], [-2., 0.3, 1.12], [-1.5, 0.075, 0.84], [-1.5, 0., 0.84],
        [-2., 0.75, 0.], [-2., 0.3, 0.], [-1.5, 0.075, 0.], [-1.5, 0., 0.],
    ],
    [
        [-2., 0.75, 0.], [-2., 0.3, 0.], [-1.5, 0.075, 0.], [-1.5, 0., 0.],
        [-2., 0.75, -1.12], [-2., 0.3, -1.12], [-1.5, 0.075, -0.84], [-1.5, 0., -0.84],
        [-1.12, 0.75, -2.], [-1.12, 0.3, -2.], [-0.84, 0.075, -1.5], [-0.84, 0., -1.5],
        [0., 0.75, -2.], [0., 0.3, -2.], [0., 0.075, -1.5], [0., 0., -1.5],
    ],
    [
        [0., 0.75, -2.], [0., 0.3, -2.], [0., 0.075, -1.5], [0., 0., -1.5],
        [1.12, 0.75, -2.], [1.12, 0.3, -2.], [0.84, 0.075, -1.5], [0.84, 0., -1.5],
        [2., 0.75, -1.12], [2., 0.3, -1.12], [1.5, 0.075, -0.84], [1.5, 0., -0.84],
        [2., 0.75, 0.], [2., 0.3, 0.], [1.5, 0.075, 0.], [1.5, 0., 0.],
    ],
    [
        [-1.6, 1.875, 0.], [-2.3, 1.875, 0.], [-2.7, 1.875, 0.], [-2.7, 1.65, 0.],
        [-1.6, 1.875, 0.3], [-2.3, 1.875, 0.3], [-2.7, 1.875, 0.3], [-2.7, 1.65, 0.3],
        [-1.5, 2.1, 0.3], [-2.5, 2.1, 0.3], [-3., 2.1, 0.3], [-3., 1.65, 0.3],
        [-1.5, 2.1, 0.], [-2.5, 2.1, 0.], [-3., 2.1, 0.], [-3., 1.65, 0.],
    ],
    [
        [-1.5, 2.1, 0.], [-2.5, 2.1, 0.], [-3., 2.1, 0.], [-3., 1.65, 0.],
        [-1.5, 2.1, -0.3], [-2.5, 2.1, -0.3], [-3., 2.1, -0.3], [-3., 1.65, -0.3],
        [-1.6, 1.875, -0.3], [-2.3, 1.875, -0.3], [-2.7, 1.875, -0.3], [-2.7, 1.65, -0.3],
        [-1.6, 1.875, 0.], [-2.3, 1.875, 0.], [-2.7, 1.875, 0.], [-2.7, 1.65, 0.],
    ],
    [
        [-2.7, 1.65, 0.], [-2.7, 1.425, 0.], [-2.5, 0.975, 0.], [-2., 0.75, 0.],
        [-2.7, 1.65, 0.3], [-2.7, 1.425, 0.3], [-2.5, 0.975, 0.3], [-2., 0.75, 0.3],
        [-3., 1.65, 0.3], [-3., 1.2, 0.3], [-2.65, 0.7875, 0.3], [-1.9, 0.45, 0.3],
        [-3., 1.65, 0.], [-3., 1.2, 0.], [-2.65, 0.7875, 0.], [-1.9, 0.45, 0.],
    ],
    [
        [-3., 1.65, 0.], [-3., 1.2, 0.], [-2.65, 0.7875, 0.], [-1.9, 0.45, 0.],
        [-3., 1.65, -0.3], [-3., 1.2, -0.3], [-2.65, 0.7875, -0.3], [-1.9, 0.45, -0.3],
        [-2.7, 1.65, -0.3], [-2.7, 1.425, -0.3], [-2.5, 0.975, -0.3], [-2., 0.75, -0.3],
        [-2.7, 1.65, 0.], [-2.7, 1.425, 0.], [-2.5, 0.975, 0.], [-2., 0.75, 0.],
    ],
    [
        [1.7, 1.275, 0.], [2.6, 1.275, 0.], [2.3, 1.95, 0.], [2.7, 2.25, 0.],
        [1.7, 1.275, 0.66], [2.6, 1.275, 0.66], [2.3, 1.95, 0.25], [2.7, 2.25, 0.25],
        [1.7, 0.45, 0.66], [3.1, 0.675, 0.66], [2.4, 1.875, 0.25], [3.3, 2.25, 0.25],
        [1.7, 0.45, 0.], [3.1, 0.675, 0.], [2.4, 1.875, 0.], [3.3, 2.25, 0.],
    ],
    [
        [1.7, 0.45, 0.], [3.1, 0.675, 0.], [2.4, 1.875, 0.], [3.3, 2.25, 0.],
        [1.7, 0.45, -0.66], [3.1, 0.675, -0.66], [2.4, 1.875, -0.25], [3.3, 2.25, -0.25],
        [1.7, 1.275, -0.66], [2.6, 1.275, -0.66], [2.3, 1.95, -0.25], [2.7, 2.25, -0.25],
        [1.7, 1.275, 0.], [2.6, 1.275, 0.], [2.3, 1.95, 0.], [2.7, 2.25, 0.],
    ],
    [
        [2.7, 2.25, 0.], [2.8, 2.325, 0.], [2.9, 2.325, 0.], [2.8, 2.25, 0.],
        [2.7, 2.25, 0.25], [2.8, 2.325, 0.25], [2.9, 2.325, 0.15], [2.8, 2.25, 0.15],
        [3.3, 2.25, 0.25], [3.525, 2.34375, 0.25], [3.45, 2.3625, 0.15], [3.2, 2.25, 0.15],
        [3.3, 2.25, 0.], [3.525, 2.34375, 0.], [3.45, 2.3625, 0.], [3.2, 2.25, 0.],
    ],
    [
        [3.3, 2.25, 0.], [3.525, 2.34375, 0.], [3.45, 2.3625, 0.], [3.2, 2.25, 0.],
        [3.3, 2.25, -0.25], [3.525, 2.34375, -0.25], [3.45, 2.3625, -0.15], [3.2, 2.25, -0.15],
        [2.7, 2.25, -0.25], [2.8, 2.325, -0.25], [2.9, 2.325, -0.15], [2.8, 2.25, -0.15],
        [2.7, 2.25, 0.], [2.8, 2.325, 0.], [2.9, 2.325, 0.], [2.8, 2.25, 0.],
    ],
    [
        [0., 3., 0.], [0.8, 3., 0.], [0., 2.7, 0.], [0.2, 2.55, 0.],
        [0., 3., 0.002], [0.8, 3., 0.45], [0., 2.7, 0.], [0.2, 2.55, 0.112],
        [0.002, 3., 0.], [0.45, 3., 0.8], [0., 2.7, 0.], [0.112, 2.55, 0.2],
        [0., 3., 0.], [0., 3., 0.8], [0., 2.7, 0.], [0., 2.55, 0.2],
    ],
    [
        [0., 3., 0.], [0., 3., 0.8], [0., 2.7, 0.], [0., 2.55, 0.2],
        [-0.002, 3., 0.], [-0.45, 3., 0.8], [0., 2.7, 0.], [-0.112, 2.55, 0.2],
        [0., 3., 0.002], [-0.8, 3., 0.45], [0., 2.7, 0.], [-0.2, 2.55, 0.112],
        [0., 3., 0.], [-0.8, 3., 0.], [0., 2.7, 0.], [-0.2, 2.55, 0.],
    ],
    [
        [0., 3., 0.], [-0.8, 3., 0.], [0., 2.7, 0.], [-0.2, 2.55, 0.],
        [0., 3., -0.002], [-0.8, 3., -0.45], [0., 2.7, 0.], [-0.2, 2.55, -0.112],
        [-0.002, 3., 0.], [-0.45, 3., -0.8], [0., 2.7, 0.], [-0.112, 2.55, -0.2],
        [0., 3., 0.], [0., 3., -0.8], [0., 2.7, 0.], [0., 2.55, -0.2],
    ],
    [
        [0., 3., 0.], [0., 3., -0.8], [0., 2.7, 0.], [0., 2.55, -0.2],
        [0.002, 3., 0.], [0.45, 3., -0.8], [0., 2.7, 0.], [0.112, 2.55, -0.2],
        [0., 3., -0.002], [0.8, 3., -0.45], [0., 2.7, 0.], [0.2, 2.55, -0.112],
        [0., 3., 0.], [0.8, 3., 0.], [0., 2.7, 0.], [0.2, 2.55, 0.],
    ],
    [
        [0.2, 2.55, 0.], [0.4, 2.4, 0.], [1.3, 2.4, 0.], [1.3, 2.25, 0.],
        [0.2, 2.55, 0.112], [0.4, 2.4, 0.224], [1.3, 2.4, 0.728], [1.3, 2.25, 0.728],
        [0.112, 2.55, 0.2], [0.224, 2.4, 0.4], [0.728, 2.4, 1.3], [0.728, 2.25, 1.3],
        [0., 2.55, 0.2], [0., 2.4, 0.4], [0., 2.4, 1.3], [0., 2.25, 1.3],
    ],
    [
        [0., 2.55, 0.2], [0., 2.4, 0.4], [0., 2.4, 1.3], [0., 2.25, 1.3],
        [-0.112, 2.55, 0.2], [-0.224, 2.4, 0.4], [-0.728, 2.4, 1.3], [-0.728, 2.25, 1.3],
        [-0.2, 2.55, 0.112], [-0.4, 2.4, 0.224], [-1.3, 2.4, 0.728], [-1.3, 2.25, 0.728],
        [-0.2, 2.55, 0.], [-0.4, 2.4, 0.], [-1.3, 2.4, 0.], [-1.3, 2.25, 0.],
    ],
    [
        [-0.2, 2.55, 0.], [-0.4, 2.4, 0.], [-1.3, 2.4, 0.], [-1.3, 2.25, 0.],
        [-0.2, 2.55, -0.112], [-0.4, 2.4, -0.224], [-1.3, 2.4, -0.728], [-1.3, 2.25, -0.728],
        [-0.112, 2.55, -0.2], [-0.224, 2.4, -0.4], [-0.728, 2.4, -1.3], [-0.728, 2.25, -1.3],
        [0., 2.55, -0.2], [0., 2.4, -0.4], [0., 2.4, -1.3], [0., 2.25, -1.3],
    ],
    [
        [0., 2.55, -0.2], [0., 2.4, -0.4], [0., 2.4, -1.3], [0., 2.25, -1.3],
        [0.112, 2.55, -0.2], [0.224, 2.4, -0.4], [0.728, 2.4, -1.3], [0.728, 2.25, -1.3],
        [0.2, 2.55, -0.112], [0.4, 2.4, -0.224], [1.3, 2.4, -0.728], [1.3, 2.25, -0.728],
        [0.2, 2.55, 0.], [0.4, 2.4, 0.], [1.3, 2.4, 0.], [1.3, 2.25, 0.],
    ],
];

fn to_grid(points: &[[f32; 3]; 16]) -> ControlGrid {
    let mut grid = [[Vec3::ZERO; 4]; 4];
    for (row, chunk) in grid.iter_mut().zip(points.chunks_exact(4)) {
        for (p, &xyz) in row.iter_mut().zip(chunk) {
            *p = Vec3::from(xyz);
        }
    }
    grid
}

pub fn control_grid(index: usize) -> Option<ControlGrid> {
    TEAPOT_PATCHES.get(index).map(to_grid)
}

pub fn control_grids() -> impl ExactSizeIterator<Item = ControlGrid> {
    TEAPOT_PATCHES.iter().map(to_grid)
}

/// The teapot as a spline surface, sitting with its base 1.5 units below the origin.
pub fn teapot(resolution: u32) -> Result<SplineSurface> {
    let mut surface = SplineSurface::from_grids(control_grids(), resolution)?;
    surface.transform = Transform::translation(vec3(0., -1.5, 0.));
    Ok(surface)
}
