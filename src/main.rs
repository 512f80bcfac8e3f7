use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use glam::{vec2, Vec3};
use tracing_flame::FlameLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use geometric_lighting::light::LightConfig;
use geometric_lighting::raster::Framebuffer;
use geometric_lighting::scene::Scene;
use geometric_lighting::teapot;

/// Spins the Bezier teapot for a number of frames and renders the last one to an image.
#[derive(Debug, Parser)]
struct Args {
    /// Subdivisions per patch edge
    #[arg(long, default_value_t = teapot::DEFAULT_RESOLUTION)]
    resolution: u32,
    /// Number of simulated frames
    #[arg(long, default_value_t = 120)]
    frames: u32,
    /// Seconds per frame
    #[arg(long, default_value_t = 1. / 60.)]
    dt: f32,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    #[arg(long, short, default_value = "teapot.png")]
    output: PathBuf,
    /// Write folded tracing stacks to this file
    #[arg(long)]
    flame: Option<PathBuf>,
    /// Also log as JSON lines to this file
    #[arg(long)]
    log_json: Option<PathBuf>,
    /// Light position as `x,y,z`
    #[arg(long, value_delimiter = ',', num_args = 3)]
    light: Option<Vec<f32>>,
    #[arg(long)]
    light_power: Option<f32>,
}

impl Args {
    fn light(&self) -> LightConfig {
        let mut light = LightConfig::default();
        let position = self.light.as_deref().map(<[f32; 3]>::try_from);
        if let Some(Ok([x, y, z])) = position {
            light = light.with_position(Vec3::new(x, y, z));
        }
        if let Some(power) = self.light_power {
            light = light.with_power(power);
        }
        light
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (flame_layer, _guard) = match &args.flame {
        Some(path) => {
            let (layer, guard) =
                FlameLayer::with_file(path).context("Cannot create flame graph output")?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let json_layer = match &args.log_json {
        Some(path) => Some(
            tracing_subscriber::fmt::Layer::default()
                .json()
                .with_file(true)
                .with_level(true)
                .with_line_number(true)
                .with_writer(Mutex::new(
                    File::create(path).context("Cannot create JSON log")?,
                )),
        ),
        None => None,
    };
    let fmt_layer = tracing_subscriber::fmt::Layer::default().pretty();
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(EnvFilter::from_default_env())
        .with(json_layer)
        .with(flame_layer)
        .init();

    let surface = teapot::teapot(args.resolution).context("Cannot build teapot")?;
    tracing::info!(triangles = surface.triangle_count(), "teapot ready");
    if let Some((min, max)) = surface.aggregate().bounds() {
        tracing::debug!(%min, %max, "object-space bounds");
    }
    let mut scene = Scene::new(surface);
    scene.light = args.light();
    scene.camera.projection.width = args.width as f32;
    scene.camera.projection.height = args.height as f32;

    // Spin with the right arrow for the first half, then drag the camera around.
    for frame in 0..args.frames {
        let tick_start = Instant::now();
        let first_half = frame < args.frames / 2;
        scene.input.right = first_half;
        scene.input.dragging = !first_half;
        scene.input.mouse_delta = if first_half { vec2(0., 0.) } else { vec2(-2., 0.5) };
        scene.update(args.dt);
        let tick_duration = tick_start.elapsed().as_secs_f32();
        tracing::debug!(frame, %tick_duration);
    }

    let mut framebuffer = Framebuffer::new(args.width, args.height);
    let frame_start = Instant::now();
    let fragments = scene.render(&mut framebuffer);
    let frame_time = frame_start.elapsed().as_secs_f32();
    tracing::info!(fragments, %frame_time, "rendered frame");

    framebuffer
        .save(&args.output)
        .with_context(|| format!("Cannot write {}", args.output.display()))?;
    tracing::info!(output = %args.output.display(), "saved image");
    Ok(())
}
