use std::path::PathBuf;

use brush::Brush;
use clap::{Parser, Subcommand};
use eddy_fluids::stable::StableFluidParams;
use run::{mono_palette, rgb_palette, RunConfig};

mod brush;
mod inspect;
mod run;

#[derive(Parser)]
#[command(version, about = "Headless stable fluids driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stir a fluid with a scripted brush and record every frame.
    Run {
        /// Interior cells in the X direction.
        #[arg(long, default_value_t = 120)]
        width: usize,
        /// Interior cells in the Y direction.
        #[arg(long, default_value_t = 80)]
        height: usize,
        #[arg(long, default_value_t = 600)]
        frames: u64,
        #[arg(long, default_value_t = 60)]
        fps: u32,
        #[arg(long, default_value_t = 0.0001)]
        viscosity: f32,
        #[arg(long, default_value_t = 0.0001)]
        diffusion: f32,
        /// Density multiplier applied every step.
        #[arg(long, default_value_t = 1.0)]
        decay: f32,
        /// Carry red, green and blue dye instead of a single density.
        #[arg(long)]
        rgb: bool,
        /// Use the wider, stronger touch brush.
        #[arg(long)]
        touch: bool,
        /// Directory to create for the recording.
        #[arg(short, long, default_value = "output/fluid")]
        output: PathBuf,
    },
    /// Summarise a recording.
    Inspect {
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Run { width, height, frames, fps, viscosity, diffusion, decay, rgb, touch, output } => {
            let config = RunConfig {
                width,
                height,
                frames,
                fps,
                params: StableFluidParams { viscosity, diffusion, decay },
                brush: if touch { Brush::TOUCH } else { Brush::MOUSE },
                output,
            };

            if rgb {
                run::run(&config, rgb_palette)
            } else {
                run::run(&config, mono_palette)
            }
        }
        Command::Inspect { input } => inspect::inspect(input),
    }
}
