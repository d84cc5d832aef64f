use std::path::PathBuf;

use anyhow::Context;
use eddy_fluids::stable::{StableFluid, StableFluidParams};
use eddy_io::encode::FluidDataEncoder;
use glam::{IVec2, Vec2};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};

use crate::brush::Brush;

pub struct RunConfig {
    pub width: usize,
    pub height: usize,
    pub frames: u64,
    pub fps: u32,
    pub params: StableFluidParams,
    pub brush: Brush,
    pub output: PathBuf,
}

/// Stirs a fresh fluid along a circle for the first half of the run and records every frame.
///
/// `palette` maps the normalized stroke time to the density added by the brush.
pub fn run<const C: usize>(config: &RunConfig, palette: impl Fn(f32) -> [f32; C]) -> anyhow::Result<()> {
    let mut fluid = StableFluid::<C>::with_params(config.width, config.height, config.params)?;

    if let Some(parent) = config.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut encoder = FluidDataEncoder::new(config.output.clone(), config.frames, config.fps)
        .with_context(|| format!("cannot record into {}", config.output.display()))?;
    encoder.encode_metadata(&fluid)?;

    let size = fluid.size().as_vec2();
    let center = size / 2.0;
    let radius = 0.3 * size.min_element();
    let stir_frames = config.frames / 2;

    let pointer = |frame: u64| {
        let theta = frame as f32 / config.fps as f32 * std::f32::consts::TAU;
        (center + radius * Vec2::new(theta.cos(), theta.sin())).floor().as_ivec2()
    };

    log::info!(
        "running {}x{} fluid for {} frames ({:?})",
        config.width, config.height, config.frames, config.params,
    );

    let bar_template = "Running Simulation {spinner:.green} [{elapsed}] [{bar:50.white/white}] {pos}/{len} ({eta})";
    let style = ProgressStyle::with_template(bar_template)?
        .progress_chars("=> ").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress = ProgressBar::new(config.frames).with_style(style);

    let mut last: IVec2 = pointer(0);
    for frame in (0..config.frames).progress_with(progress) {
        if frame < stir_frames {
            let t = frame as f32 / stir_frames as f32;
            let next = pointer(frame);
            config.brush.stroke(&mut fluid, last, next, palette(t));
            last = next;
        }

        fluid.step();
        encoder.encode_frame(&fluid)?;
    }

    log::info!(
        "recorded {} frames into {}, final density {:?}",
        encoder.current_frame(), config.output.display(), fluid.total_density(),
    );

    Ok(())
}

/// Single-channel dye of constant strength.
pub fn mono_palette(_t: f32) -> [f32; 1] {
    [100.0]
}

/// Dye whose hue cycles once over the stroke.
pub fn rgb_palette(t: f32) -> [f32; 3] {
    let phase = t * std::f32::consts::TAU;
    [0.0, 1.0, 2.0].map(|k| {
        let offset = k * std::f32::consts::TAU / 3.0;
        127.5 * (1.0 + (phase + offset).cos())
    })
}
