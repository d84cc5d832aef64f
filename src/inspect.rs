use std::path::PathBuf;

use anyhow::Context;
use eddy_io::decode::FluidDataDecoder;

/// Logs per-frame density totals and peak speed of a recording.
pub fn inspect(input: PathBuf) -> anyhow::Result<()> {
    let mut decoder = FluidDataDecoder::new(input.clone());
    let metadata = decoder
        .decode_metadata()
        .with_context(|| format!("cannot read recording in {}", input.display()))?;

    log::info!(
        "{} frames of {}x{} cells, {} channel(s) at {} fps",
        metadata.num_frames, metadata.size.x, metadata.size.y, metadata.channels, metadata.fps,
    );

    let mut frame = 0;
    while let Some(data) = decoder.decode_frame()? {
        log::info!(
            "frame {frame}: density {:?}, peak speed {:.4}",
            data.total_density().as_slice(), data.peak_speed(),
        );
        frame += 1;
    }

    Ok(())
}
