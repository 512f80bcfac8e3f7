use glam::{vec2, Vec3};

use crate::bezier::curve::CubicCurve;
use crate::error::{Error, Result};
use crate::mesh::{SurfaceMesh, Vertex};

pub const MIN_RESOLUTION: u32 = 2;

/// Tangents or normals shorter than this are treated as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// A tangent shorter than this fraction of the other one is treated as degenerate. Rows that
/// are collapsed up to a few thousandths of a unit (the teapot lid apex) only carry the
/// direction of that offset, not of the surface.
pub const RELATIVE_EPSILON: f32 = 5e-3;

/// Parameter offsets towards the patch center tried in turn to resample degenerate tangents.
pub const NEIGHBOUR_STEPS: [f32; 3] = [1e-3, 1e-2, 1e-1];

/// 4×4 control points, `grid[i][j]`. Rows (`i`) are blended by `u`, columns (`j`) by `v`.
pub type ControlGrid = [[Vec3; 4]; 4];

/// Builds a control grid from 16 points given row by row.
pub fn grid_from_points(points: &[Vec3]) -> Result<ControlGrid> {
    if points.len() != 16 {
        return Err(Error::ControlPointCount(points.len()));
    }
    let mut grid = [[Vec3::ZERO; 4]; 4];
    for (row, chunk) in grid.iter_mut().zip(points.chunks_exact(4)) {
        row.copy_from_slice(chunk);
    }
    Ok(grid)
}

#[derive(Debug, Clone)]
pub struct BezierPatch {
    grid: ControlGrid,
    resolution: u32,
    mesh: SurfaceMesh,
}

impl BezierPatch {
    pub fn new(grid: ControlGrid, resolution: u32) -> Result<Self> {
        check_resolution(resolution)?;
        let mut patch = Self {
            grid,
            resolution,
            mesh: SurfaceMesh::default(),
        };
        patch.mesh = patch.build_mesh(resolution);
        Ok(patch)
    }

    pub fn from_points(points: &[Vec3], resolution: u32) -> Result<Self> {
        Self::new(grid_from_points(points)?, resolution)
    }

    pub fn control_points(&self) -> &ControlGrid {
        &self.grid
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Mesh at the patch's resolution, always in sync with the control points.
    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    /// Replaces the whole control grid and rebuilds the mesh before returning.
    pub fn set_control_points(&mut self, grid: ControlGrid) {
        self.grid = grid;
        self.mesh = self.build_mesh(self.resolution);
    }

    pub fn set_resolution(&mut self, resolution: u32) -> Result<()> {
        check_resolution(resolution)?;
        self.resolution = resolution;
        self.mesh = self.build_mesh(resolution);
        Ok(())
    }

    fn rows_at(&self, v: f32) -> CubicCurve {
        CubicCurve::new(self.grid.map(|row| CubicCurve::new(row).get_point(v)))
    }

    fn columns_at(&self, u: f32) -> CubicCurve {
        let column = |j: usize| CubicCurve::new(self.grid.map(|row| row[j]));
        CubicCurve::new([0, 1, 2, 3].map(|j| column(j).get_point(u)))
    }

    pub fn position(&self, u: f32, v: f32) -> Vec3 {
        self.rows_at(clamp_param(v)).get_point(clamp_param(u))
    }

    /// Partial derivative along `u`.
    pub fn tangent_u(&self, u: f32, v: f32) -> Vec3 {
        self.rows_at(clamp_param(v)).tangent(clamp_param(u))
    }

    /// Partial derivative along `v`.
    pub fn tangent_v(&self, u: f32, v: f32) -> Vec3 {
        self.columns_at(clamp_param(u)).tangent(clamp_param(v))
    }

    /// Unit normal `T_u × T_v`.
    ///
    /// Where a tangent vanishes or is negligible next to the other one (collapsed rows or
    /// columns, e.g. at the lid apex), the tangents are resampled closer to the patch center
    /// at each of [`NEIGHBOUR_STEPS`]. If all of them are degenerate, any vector perpendicular
    /// to the longest tangent is returned, and `+Y` for a patch collapsed to a single point.
    pub fn normal(&self, u: f32, v: f32) -> Vec3 {
        let (u, v) = (clamp_param(u), clamp_param(v));
        let (tu, tv) = (self.tangent_u(u, v), self.tangent_v(u, v));
        if let Some(normal) = surface_normal(tu, tv) {
            return normal;
        }
        tracing::trace!(u, v, %tu, %tv, "degenerate tangent, resampling");
        let (mut tu, mut tv) = (tu, tv);
        for step in NEIGHBOUR_STEPS {
            let (nu, nv) = (towards_center(u, step), towards_center(v, step));
            tu = self.tangent_u(nu, nv);
            tv = self.tangent_v(nu, nv);
            if let Some(normal) = surface_normal(tu, tv) {
                return normal;
            }
        }
        tracing::trace!(u, v, "degenerate neighbourhood, using perpendicular");
        any_perpendicular(if tu.length() >= tv.length() { tu } else { tv })
    }

    pub fn evaluate(&self, u: f32, v: f32) -> (Vec3, Vec3) {
        (self.position(u, v), self.normal(u, v))
    }

    /// Samples `(resolution + 1)²` points uniformly over the parameter square and emits two
    /// triangles per cell, counter-clockwise when seen from the normal side.
    ///
    /// Vertices are laid out row by row along `v`: vertex `(i, j)` sits at `j * (resolution + 1) + i`
    /// with `u = i / resolution`.
    #[tracing::instrument(skip(self))]
    pub fn tessellate(&self, resolution: u32) -> Result<SurfaceMesh> {
        check_resolution(resolution)?;
        Ok(self.build_mesh(resolution))
    }

    fn build_mesh(&self, resolution: u32) -> SurfaceMesh {
        let side = resolution as usize + 1;
        let step = |k: usize| k as f32 / resolution as f32;
        let mut vertices = Vec::with_capacity(side * side);
        for v in (0..side).map(step) {
            for u in (0..side).map(step) {
                let (position, normal) = self.evaluate(u, v);
                vertices.push(Vertex {
                    position,
                    normal,
                    uv: vec2(u, v),
                });
            }
        }

        let cells = side - 1;
        let mut indices = Vec::with_capacity(cells * cells * 6);
        for j in 0..cells {
            for i in 0..cells {
                let idx = j * side + i;
                let idx_next = idx + side;
                indices.extend([
                    /* face 1 */ idx,
                    idx + 1,
                    idx_next,
                    /* face 2 */ idx + 1,
                    idx_next + 1,
                    idx_next,
                ]);
            }
        }
        tracing::debug!(resolution, vertices = vertices.len(), "tessellated patch");

        SurfaceMesh::new(vertices, indices.into_iter().map(|i| i as u32))
    }
}

fn check_resolution(resolution: u32) -> Result<()> {
    if resolution < MIN_RESOLUTION {
        return Err(Error::InvalidResolution(resolution));
    }
    Ok(())
}

fn clamp_param(t: f32) -> f32 {
    if (0. ..=1.).contains(&t) {
        return t;
    }
    tracing::trace!(t, "parameter outside [0, 1], clamping");
    if t.is_nan() {
        0.
    } else {
        t.clamp(0., 1.)
    }
}

fn towards_center(t: f32, step: f32) -> f32 {
    t + (0.5 - t).signum() * step
}

fn surface_normal(tu: Vec3, tv: Vec3) -> Option<Vec3> {
    let (short, long) = {
        let (lu, lv) = (tu.length(), tv.length());
        (lu.min(lv), lu.max(lv))
    };
    if short < DEGENERATE_EPSILON.max(RELATIVE_EPSILON * long) {
        return None;
    }
    let normal = tu.cross(tv);
    (normal.length() >= DEGENERATE_EPSILON).then(|| normal.normalize())
}

fn any_perpendicular(t: Vec3) -> Vec3 {
    let len = t.length();
    if len < DEGENERATE_EPSILON {
        return Vec3::Y;
    }
    let axis = if t.x.abs() < 0.9 * len { Vec3::X } else { Vec3::Y };
    t.cross(axis).normalize()
}
