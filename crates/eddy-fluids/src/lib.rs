pub use error::FluidError;

pub mod error;
pub mod stable;

/// A fluid that advances by a fixed internal timestep.
pub trait Fluid {
    type Params;

    fn params(&self) -> &Self::Params;

    fn step(&mut self);

    fn advance(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Resets every field to zero, leaving parameters and dimensions untouched.
    fn clear(&mut self);
}
