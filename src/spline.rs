#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::bezier::patch::{BezierPatch, ControlGrid};
use crate::error::{Error, Result};
use crate::light::Shading;
use crate::mesh::SurfaceMesh;
use crate::transform::Transform;

/// Ordered set of Bezier patches drawn as a single object.
#[derive(Debug, Clone)]
pub struct SplineSurface {
    patches: Vec<BezierPatch>,
    resolution: u32,
    pub transform: Transform,
    pub shading: Shading,
}

impl SplineSurface {
    /// `patch_count` patches collapsed onto the origin, to be filled in with
    /// [`Self::set_control_points`].
    pub fn new(patch_count: usize, resolution: u32) -> Result<Self> {
        let collapsed = [[glam::Vec3::ZERO; 4]; 4];
        Self::from_grids(std::iter::repeat(collapsed).take(patch_count), resolution)
    }

    #[tracing::instrument(skip(grids))]
    pub fn from_grids(
        grids: impl IntoIterator<Item = ControlGrid>,
        resolution: u32,
    ) -> Result<Self> {
        let grids = grids.into_iter().collect::<Vec<_>>();

        #[cfg(feature = "rayon")]
        let patches = grids
            .into_par_iter()
            .map(|grid| BezierPatch::new(grid, resolution))
            .collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "rayon"))]
        let patches = grids
            .into_iter()
            .map(|grid| BezierPatch::new(grid, resolution))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(patches = patches.len(), resolution, "created spline surface");
        Ok(Self {
            patches,
            resolution,
            transform: Transform::default(),
            shading: Shading::default(),
        })
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn patches(&self) -> &[BezierPatch] {
        &self.patches
    }

    pub fn patch(&self, index: usize) -> Result<&BezierPatch> {
        self.patches.get(index).ok_or(Error::InvalidIndex {
            index,
            count: self.patches.len(),
        })
    }

    pub fn mesh(&self, index: usize) -> Result<&SurfaceMesh> {
        self.patch(index).map(BezierPatch::mesh)
    }

    pub fn meshes(&self) -> impl ExactSizeIterator<Item = &SurfaceMesh> + '_ {
        self.patches.iter().map(BezierPatch::mesh)
    }

    /// Replaces the control points of one patch. Only that patch is re-tessellated.
    #[tracing::instrument(skip(self, grid))]
    pub fn set_control_points(&mut self, index: usize, grid: ControlGrid) -> Result<()> {
        let count = self.patches.len();
        let patch = self
            .patches
            .get_mut(index)
            .ok_or(Error::InvalidIndex { index, count })?;
        patch.set_control_points(grid);
        Ok(())
    }

    /// Re-tessellates every patch at `resolution`.
    #[tracing::instrument(skip(self))]
    pub fn set_resolution(&mut self, resolution: u32) -> Result<()> {
        #[cfg(feature = "rayon")]
        self.patches
            .par_iter_mut()
            .try_for_each(|patch| patch.set_resolution(resolution))?;
        #[cfg(not(feature = "rayon"))]
        self.patches
            .iter_mut()
            .try_for_each(|patch| patch.set_resolution(resolution))?;
        self.resolution = resolution;
        Ok(())
    }

    /// Advances the shared transform by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.transform.update(dt);
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes().map(SurfaceMesh::triangle_count).sum()
    }

    /// Every patch mesh concatenated in patch order, in object space.
    pub fn aggregate(&self) -> SurfaceMesh {
        self.meshes().fold(SurfaceMesh::default(), |mut acc, mesh| {
            acc.append(mesh);
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};
    use test_log::test;

    use super::SplineSurface;
    use crate::bezier::patch::ControlGrid;
    use crate::error::Error;

    fn lifted(height: f32) -> ControlGrid {
        let mut grid = [[Vec3::ZERO; 4]; 4];
        for (i, row) in grid.iter_mut().enumerate() {
            for (j, p) in row.iter_mut().enumerate() {
                *p = vec3(i as f32, j as f32, height);
            }
        }
        grid
    }

    #[test]
    fn set_control_points_touches_one_patch() {
        let mut surface =
            SplineSurface::from_grids([lifted(0.), lifted(1.), lifted(2.)], 3).unwrap();
        let before = surface.meshes().cloned().collect::<Vec<_>>();
        surface.set_control_points(1, lifted(5.)).unwrap();
        assert_eq!(surface.mesh(0).unwrap(), &before[0]);
        assert_eq!(surface.mesh(2).unwrap(), &before[2]);
        assert_ne!(surface.mesh(1).unwrap(), &before[1]);
        assert!(surface.mesh(1).unwrap().positions().all(|p| (p.z - 5.).abs() < 1e-5));
    }

    #[test]
    fn invalid_index_leaves_meshes_alone() {
        let mut surface = SplineSurface::new(2, 2).unwrap();
        surface.set_control_points(0, lifted(1.)).unwrap();
        let before = surface.meshes().cloned().collect::<Vec<_>>();
        let err = surface.set_control_points(2, lifted(3.)).unwrap_err();
        assert!(matches!(err, Error::InvalidIndex { index: 2, count: 2 }));
        assert!(matches!(surface.patch(7), Err(Error::InvalidIndex { index: 7, .. })));
        assert!(surface.meshes().eq(before.iter()));
    }

    #[test]
    fn aggregate_concatenates_patches() {
        let surface = SplineSurface::from_grids([lifted(0.), lifted(1.)], 4).unwrap();
        let mesh = surface.aggregate();
        assert_eq!(mesh.vertices().len(), 2 * 25);
        assert_eq!(mesh.triangle_count(), surface.triangle_count());
        assert_eq!(mesh.triangle_count(), 2 * 32);
        assert_eq!(mesh.indices()[96], 25);
    }

    #[test]
    fn set_resolution_rebuilds_every_patch() {
        let mut surface = SplineSurface::from_grids([lifted(0.), lifted(1.)], 2).unwrap();
        surface.set_resolution(5).unwrap();
        assert_eq!(surface.resolution(), 5);
        assert!(surface.meshes().all(|m| m.triangle_count() == 50));
        assert!(matches!(surface.set_resolution(1), Err(Error::InvalidResolution(1))));
        assert_eq!(surface.resolution(), 5);
    }

    #[test]
    fn update_advances_transform() {
        let mut surface = SplineSurface::new(1, 2).unwrap();
        surface.transform.angular_velocity = Vec3::Y;
        surface.update(0.5);
        assert!((surface.transform.rotation.to_axis_angle().1 - 0.5).abs() < 1e-5);
    }
}
