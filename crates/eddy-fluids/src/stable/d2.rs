use glam::{UVec2, Vec2, Vec3};

use crate::{Fluid, FluidError};

use super::{
    advect::{advect, bilerp},
    boundary::Boundary,
    grid::{Field, Grid},
    project::project,
    solver::diffuse,
};

/// A single-channel fluid, e.g. smoke density.
pub type MonoFluid = StableFluid<1>;
/// A fluid carrying red, green and blue dye independently.
pub type RgbFluid = StableFluid<3>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StableFluidParams {
    /// Diffusion rate of the velocity field.
    pub viscosity: f32,
    /// Diffusion rate of every density channel.
    pub diffusion: f32,
    /// Multiplier applied to density after each step, in `(0, 1]`.
    pub decay: f32,
}

impl Default for StableFluidParams {
    fn default() -> Self {
        Self {
            viscosity: 0.0001,
            diffusion: 0.0001,
            decay: 1.0,
        }
    }
}

impl StableFluidParams {
    /// Returns a copy with negative or NaN rates zeroed and decay clamped into `(0, 1]`,
    /// a NaN decay meaning no decay.
    pub fn sanitized(self) -> Self {
        Self {
            viscosity: sanitize_rate(self.viscosity),
            diffusion: sanitize_rate(self.diffusion),
            decay: sanitize_decay(self.decay),
        }
    }
}

fn sanitize_rate(rate: f32) -> f32 {
    if rate >= 0.0 {
        rate
    } else {
        log::warn!("diffusion rate {rate} is not a non-negative number, using 0");
        0.0
    }
}

fn sanitize_decay(decay: f32) -> f32 {
    if decay > 0.0 && decay <= 1.0 {
        decay
    } else {
        let clamped = if decay > 1.0 || decay.is_nan() { 1.0 } else { f32::MIN_POSITIVE };
        log::warn!("decay {decay} is outside (0, 1], using {clamped}");
        clamped
    }
}

/// Incompressible fluid on a fixed `width x height` grid with `C` density channels.
///
/// Coordinates taken by the accessors are in padded space: the interior spans
/// `1..=width` by `1..=height` and the ghost border sits at `0` and `width + 1`
/// (`height + 1`). Writes outside `[0, width + 1] x [0, height + 1]` are ignored
/// and reads there return zero.
#[derive(Debug, Clone)]
pub struct StableFluid<const C: usize> {
    grid: Grid,
    params: StableFluidParams,

    /// Grid velocities in the X direction.
    u: Field,
    /// Grid velocities in the Y direction.
    v: Field,
    /// Scratch velocities in the X direction.
    u_prev: Field,
    /// Scratch velocities in the Y direction.
    v_prev: Field,
    /// Density channels.
    densities: [Field; C],
    /// Scratch density, one per channel.
    densities_prev: [Field; C],
}

impl<const C: usize> StableFluid<C> {
    pub fn new(width: usize, height: usize) -> Result<Self, FluidError> {
        Self::with_params(width, height, StableFluidParams::default())
    }

    pub fn with_params(width: usize, height: usize, params: StableFluidParams) -> Result<Self, FluidError> {
        if C == 0 {
            return Err(FluidError::NoChannels);
        }

        let grid = Grid::new(width, height)?;
        log::debug!("allocating {width}x{height} fluid with {C} density channel(s)");

        Ok(Self {
            grid,
            params: params.sanitized(),
            u: Field::zeros(grid),
            v: Field::zeros(grid),
            u_prev: Field::zeros(grid),
            v_prev: Field::zeros(grid),
            densities: std::array::from_fn(|_| Field::zeros(grid)),
            densities_prev: std::array::from_fn(|_| Field::zeros(grid)),
        })
    }

    /// Interior size of the grid, in cells.
    pub fn size(&self) -> UVec2 {
        self.grid.size()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Length of every field buffer, `(width + 2) * (height + 2)`.
    pub fn padded_len(&self) -> usize {
        self.grid.padded_len()
    }

    /// Adds `amount[c]` to density channel `c` at `(x, y)`.
    pub fn add_density(&mut self, x: usize, y: usize, amount: [f32; C]) {
        if !self.grid.contains(x, y) {
            log::debug!("ignoring density added outside the grid at ({x}, {y})");
            return;
        }

        for (density, amount) in self.densities.iter_mut().zip(amount) {
            density[(x, y)] += amount;
        }
    }

    /// Adds `(dx, dy)` to the velocity at `(x, y)`.
    pub fn add_velocity(&mut self, x: usize, y: usize, dx: f32, dy: f32) {
        if !self.grid.contains(x, y) {
            log::debug!("ignoring velocity added outside the grid at ({x}, {y})");
            return;
        }

        self.u[(x, y)] += dx;
        self.v[(x, y)] += dy;
    }

    pub fn density(&self, x: usize, y: usize) -> [f32; C] {
        std::array::from_fn(|c| self.densities[c].get(x, y).unwrap_or(0.0))
    }

    pub fn velocity(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(
            self.u.get(x, y).unwrap_or(0.0),
            self.v.get(x, y).unwrap_or(0.0),
        )
    }

    /// Bilinearly interpolated density at a fractional padded-space position.
    pub fn sample_density(&self, pos: Vec2) -> [f32; C] {
        std::array::from_fn(|c| bilerp(&self.densities[c], pos.x, pos.y))
    }

    /// Bilinearly interpolated velocity at a fractional padded-space position.
    pub fn sample_velocity(&self, pos: Vec2) -> Vec2 {
        Vec2::new(bilerp(&self.u, pos.x, pos.y), bilerp(&self.v, pos.x, pos.y))
    }

    /// Sum of each density channel over the interior.
    pub fn total_density(&self) -> [f32; C] {
        std::array::from_fn(|c| self.densities[c].interior().sum())
    }

    /// The padded buffer of one density channel, or `None` if `channel >= C`.
    pub fn density_field(&self, channel: usize) -> Option<&[f32]> {
        self.densities.get(channel).map(Field::as_slice)
    }

    pub fn density_fields(&self) -> [&[f32]; C] {
        std::array::from_fn(|c| self.densities[c].as_slice())
    }

    /// The padded X and Y velocity buffers.
    pub fn velocity_field(&self) -> (&[f32], &[f32]) {
        (self.u.as_slice(), self.v.as_slice())
    }

    pub fn densities(&self) -> &[Field; C] {
        &self.densities
    }

    pub fn velocities(&self) -> (&Field, &Field) {
        (&self.u, &self.v)
    }

    pub fn params(&self) -> &StableFluidParams {
        &self.params
    }

    pub fn set_viscosity(&mut self, viscosity: f32) {
        self.params.viscosity = sanitize_rate(viscosity);
    }

    pub fn set_diffusion(&mut self, diffusion: f32) {
        self.params.diffusion = sanitize_rate(diffusion);
    }

    pub fn set_decay(&mut self, decay: f32) {
        self.params.decay = sanitize_decay(decay);
    }

    pub fn set_params(&mut self, params: StableFluidParams) {
        self.params = params.sanitized();
    }

    /// Advances the fluid by one fixed timestep.
    ///
    /// Velocity is diffused, projected, advected through itself and projected
    /// again; each density channel is then diffused, advected through the
    /// divergence-free velocity and decayed.
    pub fn step(&mut self) {
        let StableFluidParams { viscosity, diffusion, decay } = self.params;

        diffuse(Boundary::VelocityX, &mut self.u_prev, &self.u, viscosity);
        diffuse(Boundary::VelocityY, &mut self.v_prev, &self.v, viscosity);

        project(&mut self.u_prev, &mut self.v_prev, &mut self.u, &mut self.v);

        advect(Boundary::VelocityX, &mut self.u, &self.u_prev, &self.u_prev, &self.v_prev);
        advect(Boundary::VelocityY, &mut self.v, &self.v_prev, &self.u_prev, &self.v_prev);

        project(&mut self.u, &mut self.v, &mut self.u_prev, &mut self.v_prev);

        for (density, density_prev) in self.densities.iter_mut().zip(self.densities_prev.iter_mut()) {
            step_density(density, density_prev, &self.u, &self.v, diffusion, decay);
        }

        log::trace!("stepped {}x{} fluid", self.grid.nx, self.grid.ny);
    }

    pub fn clear(&mut self) {
        self.u.fill(0.0);
        self.v.fill(0.0);
        self.u_prev.fill(0.0);
        self.v_prev.fill(0.0);

        for field in self.densities.iter_mut().chain(self.densities_prev.iter_mut()) {
            field.fill(0.0);
        }

        log::debug!("cleared {}x{} fluid", self.grid.nx, self.grid.ny);
    }
}

fn step_density(density: &mut Field, density_prev: &mut Field, u: &Field, v: &Field, diffusion: f32, decay: f32) {
    diffuse(Boundary::Scalar, density_prev, density, diffusion);
    advect(Boundary::Scalar, density, density_prev, u, v);

    if decay < 1.0 {
        density.scale(decay);
    }
}

impl StableFluid<1> {
    pub fn add_scalar_density(&mut self, x: usize, y: usize, amount: f32) {
        self.add_density(x, y, [amount]);
    }

    pub fn scalar_density(&self, x: usize, y: usize) -> f32 {
        let [d] = self.density(x, y);
        d
    }
}

impl StableFluid<3> {
    pub fn add_rgb_density(&mut self, x: usize, y: usize, color: Vec3) {
        self.add_density(x, y, color.to_array());
    }

    pub fn rgb_density(&self, x: usize, y: usize) -> Vec3 {
        Vec3::from_array(self.density(x, y))
    }
}

impl<const C: usize> Fluid for StableFluid<C> {
    type Params = StableFluidParams;

    fn params(&self) -> &StableFluidParams {
        StableFluid::params(self)
    }

    fn step(&mut self) {
        StableFluid::step(self);
    }

    fn clear(&mut self) {
        StableFluid::clear(self);
    }
}
