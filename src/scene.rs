use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::light::LightConfig;
use crate::raster::Framebuffer;
use crate::spline::SplineSurface;

/// Yaw speed applied to the surface while an arrow key is held, in radians per second.
pub const TURN_SPEED: f32 = std::f32::consts::FRAC_PI_4;
pub const MOUSE_SENSITIVITY: f32 = 0.01;
pub const ZOOM_SPEED: f32 = 0.5;

/// Input gathered since the last update. Deltas are consumed by [`Scene::update`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub dragging: bool,
    pub mouse_delta: Vec2,
    pub scroll: f32,
}

impl InputState {
    pub fn turn_axis(&self) -> f32 {
        self.right as i32 as f32 - self.left as i32 as f32
    }

    fn end_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.scroll = 0.;
    }
}

pub struct Scene {
    pub surface: SplineSurface,
    pub camera: Camera,
    pub light: LightConfig,
    pub input: InputState,
}

impl Scene {
    pub fn new(surface: SplineSurface) -> Self {
        Self {
            surface,
            camera: Camera::default(),
            light: LightConfig::default(),
            input: InputState::default(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, dt: f32) {
        self.surface.transform.angular_velocity = Vec3::Y * (TURN_SPEED * self.input.turn_axis());
        if self.input.dragging {
            let delta = self.input.mouse_delta * MOUSE_SENSITIVITY;
            self.camera.orbit(-delta.x, delta.y);
        }
        if self.input.scroll != 0. {
            self.camera.zoom(self.input.scroll * ZOOM_SPEED);
        }
        self.surface.update(dt);
        self.input.end_frame();
    }

    #[tracing::instrument(skip_all)]
    pub fn render(&self, framebuffer: &mut Framebuffer) -> usize {
        framebuffer.clear([0, 0, 0]);
        framebuffer.draw(&self.surface, &self.camera, &self.light)
    }
}
