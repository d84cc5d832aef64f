use std::io::Write;

use encode::{EncodingError, FluidFrameEncoder};
use eddy_fluids::stable::StableFluid;
use glam::{UVec2, Vec2};

pub mod encode;
pub mod decode;
pub mod as_bytes;

/// A fluid whose per-frame state can be recorded.
pub trait EncodeFluid {
    /// Number of density channels written per frame.
    fn channels(&self) -> usize;

    /// Interior size of the grid, in cells.
    fn size(&self) -> UVec2;

    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError>;
}

impl<const C: usize> EncodeFluid for StableFluid<C> {
    fn channels(&self) -> usize {
        C
    }

    fn size(&self) -> UVec2 {
        StableFluid::size(self)
    }

    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError> {
        for density in self.density_fields() {
            encoder.encode_section(density.len(), density.iter().copied())?;
        }

        let (u, v) = self.velocity_field();
        encoder.encode_section(u.len(), u.iter().zip(v).map(|(&x, &y)| Vec2::new(x, y)))?;

        Ok(())
    }
}
