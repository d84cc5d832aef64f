//! Grid-based incompressible flow after Stam's "Stable Fluids".
//!
//! Every field is a flat buffer with a one-cell ghost border, indexed as
//! `x + (width + 2) * y`. The solver is split into the same stages it runs in:
//! boundary enforcement, relaxation, diffusion, projection and advection, tied
//! together by [`d2::StableFluid`].

pub mod advect;
pub mod boundary;
pub mod d2;
pub mod grid;
pub mod project;
pub mod solver;

pub use boundary::Boundary;
pub use d2::{MonoFluid, RgbFluid, StableFluid, StableFluidParams};
pub use grid::{Field, Grid};

/// Fixed simulation timestep.
pub const TIMESTEP: f32 = 0.1;

/// Number of Gauss-Seidel sweeps performed by every linear solve.
pub const SOLVER_ITERATIONS: usize = 20;
