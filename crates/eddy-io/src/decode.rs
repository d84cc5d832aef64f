use std::{fs::File, io::{BufReader, Read}, path::PathBuf};

use glam::{UVec2, Vec2};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{as_bytes::AsBytes, encode::frame_path};

pub struct FluidDataDecoder {
    /// The path to the directory in which the fluid data resides.
    path: PathBuf,
    metadata: Option<FluidMetadata>,
    current_frame: u64,
}

impl FluidDataDecoder {
    pub fn new(path: PathBuf) -> FluidDataDecoder {
        Self {
            path,
            metadata: None,
            current_frame: 0,
        }
    }

    fn read_value<const N: usize, T: AsBytes<N>, R: Read>(reader: &mut R) -> Result<T, DecodingError> {
        let mut bytes = [0; N];
        reader.read_exact(&mut bytes)?;
        Ok(T::from_bytes(bytes))
    }

    fn read_section<const N: usize, T: AsBytes<N>, R: Read>(reader: &mut R, expected: usize) -> Result<Vec<T>, DecodingError> {
        let len = Self::read_value::<8, u64, _>(reader)?;
        if len != expected as u64 {
            return Err(DecodingError::Format(format!("section holds {len} values, expected {expected}")));
        }

        let byte_len = N * expected;
        let mut bytes = Vec::new();
        reader.by_ref().take(byte_len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != byte_len {
            return Err(DecodingError::Format(format!("section truncated after {} of {byte_len} bytes", bytes.len())));
        }

        Ok(bytes.chunks_exact(N).map(|b| {
            let mut chunk = [0; N];
            chunk.copy_from_slice(b);
            T::from_bytes(chunk)
        }).collect())
    }

    pub fn decode_metadata(&mut self) -> Result<FluidMetadata, DecodingError> {
        let path = self.path.join("_meta");
        let mut reader = BufReader::new(File::open(path)?);

        let channels = Self::read_value::<1, u8, _>(&mut reader)?;
        let fps = Self::read_value::<4, u32, _>(&mut reader)?;
        let num_frames = Self::read_value::<8, u64, _>(&mut reader)?;
        let width = Self::read_value::<4, u32, _>(&mut reader)?;
        let height = Self::read_value::<4, u32, _>(&mut reader)?;

        if channels == 0 || width == 0 || height == 0 {
            return Err(DecodingError::Format(format!(
                "recording of {width}x{height} cells with {channels} channels is empty",
            )));
        }

        let metadata = FluidMetadata {
            channels,
            fps,
            num_frames,
            size: UVec2::new(width, height),
        };
        metadata.section_len()?;
        self.metadata = Some(metadata);

        Ok(metadata)
    }

    pub fn decode_frame(&mut self) -> Result<Option<FluidFrameData>, DecodingError> {
        let metadata = match self.metadata {
            Some(metadata) => metadata,
            None => self.decode_metadata()?,
        };

        if self.current_frame >= metadata.num_frames {
            return Ok(None)
        }

        let path = frame_path(&self.path, metadata.num_frames, self.current_frame);
        let mut reader = BufReader::new(File::open(path)?);

        let len = metadata.section_len()?;
        let mut densities = SmallVec::new();
        for _ in 0..metadata.channels {
            densities.push(FluidDataArray(Self::read_section::<4, f32, _>(&mut reader, len)?));
        }
        let velocities = Self::read_section::<8, Vec2, _>(&mut reader, len)?;

        self.current_frame += 1;

        Ok(Some(FluidFrameData {
            size: metadata.size,
            densities,
            velocities,
        }))
    }

    /// Decodes the metadata and every remaining frame.
    pub fn decode_all(&mut self) -> Result<FluidData, DecodingError> {
        let metadata = self.decode_metadata()?;

        let mut frames = Vec::new();
        while let Some(frame) = self.decode_frame()? {
            frames.push(frame);
        }

        Ok(FluidData { metadata, frames })
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidMetadata {
    pub channels: u8,
    pub fps: u32,
    pub num_frames: u64,
    /// Interior size of the grid, in cells.
    pub size: UVec2,
}

impl FluidMetadata {
    /// Values per padded buffer, or `None` if the buffer is not addressable.
    pub fn padded_len(&self) -> Option<usize> {
        let stride = (self.size.x as usize).checked_add(2)?;
        let rows = (self.size.y as usize).checked_add(2)?;
        stride.checked_mul(rows)
    }

    /// Padded length, checked so that the widest section still fits in memory.
    fn section_len(&self) -> Result<usize, DecodingError> {
        self.padded_len()
            .filter(|len| len.checked_mul(std::mem::size_of::<Vec2>()).is_some())
            .ok_or_else(|| DecodingError::Format(format!(
                "{}x{} cells do not fit in memory",
                self.size.x, self.size.y,
            )))
    }
}

pub struct FluidData {
    pub metadata: FluidMetadata,
    pub frames: Vec<FluidFrameData>,
}

pub struct FluidFrameData {
    size: UVec2,
    /// One padded buffer per density channel.
    pub densities: SmallVec<[FluidDataArray; 3]>,
    /// Padded velocity buffer.
    pub velocities: Vec<Vec2>,
}

impl FluidFrameData {
    /// Sum of each density channel over the interior.
    pub fn total_density(&self) -> SmallVec<[f32; 3]> {
        self.densities.iter().map(|d| d.interior_sum(self.size)).collect()
    }

    pub fn peak_speed(&self) -> f32 {
        self.velocities.iter().map(|v| v.length()).fold(0.0, f32::max)
    }
}

pub struct FluidDataArray(Vec<f32>);

impl FluidDataArray {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Value at padded coordinates `(i, j)`.
    pub fn get(&self, size: UVec2, i: usize, j: usize) -> Option<f32> {
        let stride = size.x as usize + 2;
        if i >= stride {
            return None;
        }
        self.0.get(i + stride * j).copied()
    }

    fn interior_sum(&self, size: UVec2) -> f32 {
        let stride = size.x as usize + 2;
        self.0
            .chunks_exact(stride)
            .skip(1)
            .take(size.y as usize)
            .map(|row| row[1..=size.x as usize].iter().sum::<f32>())
            .sum()
    }
}

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed recording: {0}")]
    Format(String),
}
