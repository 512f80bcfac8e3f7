//! Headless stand-in for the GPU pass: z-buffered triangle rasterization with per-fragment
//! diffuse lighting.

use std::path::Path;

use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};

use crate::camera::Camera;
use crate::error::Result;
use crate::light::LightConfig;
use crate::spline::SplineSurface;

struct ScreenVertex {
    screen: Vec2,
    depth: f32,
    inv_w: f32,
    world: Vec3,
    normal: Vec3,
}

pub struct Framebuffer {
    color: RgbImage,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color: RgbImage::new(width, height),
            depth: vec![f32::INFINITY; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    pub fn clear(&mut self, color: [u8; 3]) {
        self.color.pixels_mut().for_each(|px| *px = Rgb(color));
        self.depth.fill(f32::INFINITY);
    }

    pub fn image(&self) -> &RgbImage {
        &self.color
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.color.save(path)?;
        Ok(())
    }

    /// Draws every patch of `surface`, culling back faces. Returns the number of fragments
    /// that passed the depth test.
    ///
    /// There is no near-plane clipping: a triangle with any vertex at or behind the near
    /// plane is skipped whole, so geometry crossing the camera leaves holes instead of
    /// being cut.
    #[tracing::instrument(skip_all)]
    pub fn draw(
        &mut self,
        surface: &SplineSurface,
        camera: &Camera,
        light: &LightConfig,
    ) -> usize {
        let model = surface.transform.matrix();
        let normal_matrix = surface.transform.normal_matrix();
        let view_projection = camera.view_projection();
        let size = Vec2::new(self.width() as f32, self.height() as f32);

        let project = |position: Vec3, normal: Vec3| -> Option<ScreenVertex> {
            let world = model.transform_point3(position);
            let clip = view_projection * world.extend(1.);
            if clip.w <= camera.projection.zrange.start {
                return None;
            }
            let ndc = clip.truncate() / clip.w;
            Some(ScreenVertex {
                screen: Vec2::new((ndc.x + 1.) * 0.5, (1. - ndc.y) * 0.5) * size,
                depth: ndc.z,
                inv_w: clip.w.recip(),
                world,
                normal: (normal_matrix * normal).normalize(),
            })
        };

        let mut fragments = 0;
        for mesh in surface.meshes() {
            for [a, b, c] in mesh.triangles() {
                let (a, b, c) = match (
                    project(a.position, a.normal),
                    project(b.position, b.normal),
                    project(c.position, c.normal),
                ) {
                    (Some(a), Some(b), Some(c)) => (a, b, c),
                    _ => continue,
                };
                fragments += self.fill(surface, light, [&a, &b, &c]);
            }
        }
        tracing::debug!(fragments, "rasterized surface");
        fragments
    }

    fn fill(
        &mut self,
        surface: &SplineSurface,
        light: &LightConfig,
        [a, b, c]: [&ScreenVertex; 3],
    ) -> usize {
        // Screen space has y pointing down, so front faces wind clockwise here.
        let area = edge(a.screen, b.screen, c.screen);
        if area >= 0. {
            return 0;
        }

        let (width, height) = (self.width() as f32, self.height() as f32);
        let min = a.screen.min(b.screen).min(c.screen).max(Vec2::ZERO);
        let max = a.screen.max(b.screen).max(c.screen).min(Vec2::new(width, height));
        if min.x >= max.x || min.y >= max.y {
            return 0;
        }

        let mut written = 0;
        for y in min.y as u32..max.y.ceil() as u32 {
            for x in min.x as u32..max.x.ceil() as u32 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b.screen, c.screen, p) / area;
                let w1 = edge(c.screen, a.screen, p) / area;
                let w2 = edge(a.screen, b.screen, p) / area;
                if w0 < 0. || w1 < 0. || w2 < 0. {
                    continue;
                }

                let depth = w0 * a.depth + w1 * b.depth + w2 * c.depth;
                let slot = (y * self.width() + x) as usize;
                if depth >= self.depth[slot] {
                    continue;
                }

                let (p0, p1, p2) = (w0 * a.inv_w, w1 * b.inv_w, w2 * c.inv_w);
                let norm = (p0 + p1 + p2).recip();
                let world = (a.world * p0 + b.world * p1 + c.world * p2) * norm;
                let normal = (a.normal * p0 + b.normal * p1 + c.normal * p2).normalize_or_zero();
                let color = surface.shading.shade(light, world, normal);

                self.depth[slot] = depth;
                self.color.put_pixel(x, y, to_rgb(color));
                written += 1;
            }
        }
        written
    }
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn to_rgb(color: Vec3) -> Rgb<u8> {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.;
    Rgb([c.x as u8, c.y as u8, c.z as u8])
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_3, PI};

    use glam::{vec3, Quat, Vec3};
    use test_log::test;

    use super::Framebuffer;
    use crate::bezier::patch::ControlGrid;
    use crate::camera::Camera;
    use crate::light::{LightConfig, Shading};
    use crate::spline::SplineSurface;

    fn square(z: f32, color: Vec3) -> SplineSurface {
        let mut grid: ControlGrid = [[Vec3::ZERO; 4]; 4];
        for (i, row) in grid.iter_mut().enumerate() {
            for (j, p) in row.iter_mut().enumerate() {
                *p = vec3(i as f32 - 1.5, j as f32 - 1.5, z);
            }
        }
        let mut surface = SplineSurface::from_grids([grid], 4).unwrap();
        surface.shading = Shading { color };
        surface
    }

    fn front_camera() -> Camera {
        let mut camera = Camera {
            pitch: 0.,
            ..Default::default()
        };
        camera.projection.width = 64.;
        camera.projection.height = 48.;
        camera
    }

    #[test]
    fn front_faces_are_drawn() {
        let mut fb = Framebuffer::new(64, 48);
        let light = LightConfig::default();
        let written = fb.draw(&square(0., Vec3::ONE), &front_camera(), &light);
        assert!(written > 0);
        assert_ne!(fb.image().get_pixel(32, 24).0, [0, 0, 0]);
    }

    #[test]
    fn back_faces_are_culled() {
        let mut fb = Framebuffer::new(64, 48);
        let mut surface = square(0., Vec3::ONE);
        surface.transform.rotation = Quat::from_rotation_y(PI);
        assert_eq!(fb.draw(&surface, &front_camera(), &LightConfig::default()), 0);
        assert_eq!(fb.image().get_pixel(32, 24).0, [0, 0, 0]);
    }

    #[test]
    fn nearest_surface_wins() {
        let mut fb = Framebuffer::new(64, 48);
        let camera = front_camera();
        let light = LightConfig::default();
        fb.draw(&square(1., vec3(1., 0., 0.)), &camera, &light);
        fb.draw(&square(0., vec3(0., 1., 0.)), &camera, &light);
        let [r, g, _] = fb.image().get_pixel(32, 24).0;
        assert!(r > 0);
        assert_eq!(g, 0);

        fb.clear([10, 20, 30]);
        assert_eq!(fb.image().get_pixel(32, 24).0, [10, 20, 30]);
    }

    #[test]
    fn triangles_crossing_near_plane_are_skipped() {
        let light = LightConfig::default();
        let mut camera = front_camera();
        camera.distance = 0.05;
        let mut fb = Framebuffer::new(64, 48);
        assert_eq!(fb.draw(&square(0., Vec3::ONE), &camera, &light), 0);
        assert!(fb.image().pixels().all(|p| p.0 == [0, 0, 0]));

        // Half of the square swings behind the eye; the far half is still drawn.
        camera.distance = 1.;
        let mut surface = square(0., Vec3::ONE);
        surface.transform.rotation = Quat::from_rotation_y(FRAC_PI_3);
        let written = fb.draw(&surface, &camera, &light);
        assert!(written > 0);
        assert!(written < 64 * 48);
        assert!(fb.depth.iter().all(|d| !d.is_nan()));
        assert_ne!(fb.image().get_pixel(32, 24).0, [0, 0, 0]);
    }
}
