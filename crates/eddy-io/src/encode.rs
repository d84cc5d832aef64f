use std::{fs::File, io::{BufWriter, Write}, path::PathBuf};

use thiserror::Error;

use crate::EncodeFluid;

use super::as_bytes::AsBytes;

pub struct FluidDataEncoder {
    /// The path to the directory into which the fluid data will be placed.
    path: PathBuf,
    num_frames: u64,
    fps: u32,
    current_frame: u64,
}

impl FluidDataEncoder {
    /// Creates the output directory, which must not exist yet.
    pub fn new(path: PathBuf, num_frames: u64, fps: u32) -> Result<FluidDataEncoder, EncodingError> {
        std::fs::create_dir(&path)?;
        log::debug!("recording {num_frames} frames into {}", path.display());

        Ok(Self {
            path,
            num_frames,
            fps,
            current_frame: 0,
        })
    }

    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    pub fn encode_metadata<F: EncodeFluid>(&mut self, fluid: &F) -> Result<(), EncodingError> {
        let channels = u8::try_from(fluid.channels())
            .map_err(|_| EncodingError::TooManyChannels(fluid.channels()))?;
        let size = fluid.size();

        let path = self.path.join("_meta");
        let mut writer = BufWriter::new(File::create(path)?);

        writer.write_all(&channels.to_bytes())?;
        writer.write_all(&self.fps.to_bytes())?;
        writer.write_all(&self.num_frames.to_bytes())?;
        writer.write_all(&size.x.to_bytes())?;
        writer.write_all(&size.y.to_bytes())?;
        writer.flush()?;

        Ok(())
    }

    pub fn encode_frame<F: EncodeFluid>(&mut self, fluid: &F) -> Result<(), EncodingError> {
        if self.current_frame >= self.num_frames {
            return Err(EncodingError::FrameLimit(self.num_frames));
        }

        let path = frame_path(&self.path, self.num_frames, self.current_frame);
        let writer = BufWriter::new(File::create(&path)?);

        let mut encoder = FluidFrameEncoder { writer };
        let encoded = fluid.encode_state(&mut encoder)
            .and_then(|()| encoder.writer.flush().map_err(EncodingError::from));
        if let Err(err) = encoded {
            drop(encoder);
            let _ = std::fs::remove_file(&path);
            return Err(err);
        }

        self.current_frame += 1;

        Ok(())
    }
}

/// Frame files are named by index, zero-padded to the width of the last index.
pub(crate) fn frame_path(dir: &std::path::Path, num_frames: u64, frame: u64) -> PathBuf {
    let max_digits = num_frames.saturating_sub(1).checked_ilog10().unwrap_or(0) + 1;
    let digits = frame.checked_ilog10().unwrap_or(0) + 1;
    let zeros = max_digits.saturating_sub(digits);

    dir.join(format!("{}{frame}.dat", "0".repeat(zeros as usize)))
}

pub struct FluidFrameEncoder<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> FluidFrameEncoder<W> {
    /// Writes `len` followed by `len` values.
    pub fn encode_section<const N: usize, T, I>(&mut self, len: usize, values: I) -> Result<(), EncodingError>
    where
        I: Iterator<Item = T>,
        T: AsBytes<N>,
    {
        let bytes: Vec<_> = values.flat_map(|v| v.to_bytes()).collect();
        if bytes.len() != len * N {
            return Err(EncodingError::SectionLength { expected: len, found: bytes.len() / N });
        }

        self.writer.write_all(&(len as u64).to_bytes())?;
        self.writer.write_all(&bytes)?;

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("cannot record {0} density channels")]
    TooManyChannels(usize),
    #[error("recording already holds all {0} frames")]
    FrameLimit(u64),
    #[error("section declared {expected} values but produced {found}")]
    SectionLength {
        expected: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn short_section_writes_nothing() {
        let mut encoder = FluidFrameEncoder { writer: BufWriter::new(Vec::new()) };

        let result = encoder.encode_section(4, [1.0f32, 2.0].into_iter());
        assert!(matches!(result, Err(EncodingError::SectionLength { expected: 4, found: 2 })));

        encoder.encode_section(1, [3.0f32].into_iter()).unwrap();
        let bytes = encoder.writer.into_inner().unwrap();
        assert_eq!(bytes.len(), 8 + 4);
        assert_eq!(bytes[..8], 1u64.to_ne_bytes());
        assert_eq!(bytes[8..], 3.0f32.to_ne_bytes());
    }

    #[test]
    fn frame_names_are_zero_padded() {
        let dir = Path::new("out");
        assert_eq!(frame_path(dir, 1000, 7), dir.join("007.dat"));
        assert_eq!(frame_path(dir, 1000, 42), dir.join("042.dat"));
        assert_eq!(frame_path(dir, 1000, 999), dir.join("999.dat"));
        assert_eq!(frame_path(dir, 100, 7), dir.join("07.dat"));
        assert_eq!(frame_path(dir, 1, 0), dir.join("0.dat"));
        assert_eq!(frame_path(dir, 0, 0), dir.join("0.dat"));
    }
}
