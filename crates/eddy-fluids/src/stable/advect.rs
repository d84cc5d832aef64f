use super::{boundary::Boundary, grid::{Field, Grid}, TIMESTEP};

/// Bilinearly samples `field` at a fractional padded-space position.
///
/// The position is clamped into `[0.5, nx + 0.5] x [0.5, ny + 0.5]`, so the four
/// lattice samples are always inside the padded grid.
#[inline]
pub fn bilerp(field: &Field, x: f32, y: f32) -> f32 {
    let Grid { nx, ny } = field.grid();

    let x = x.clamp(0.5, nx as f32 + 0.5);
    let y = y.clamp(0.5, ny as f32 + 0.5);

    let x0 = x.floor();
    let y0 = y.floor();

    let s1 = x - x0;
    let s0 = 1.0 - s1;
    let t1 = y - y0;
    let t0 = 1.0 - t1;

    let i0 = x0 as usize;
    let i1 = i0 + 1;
    let j0 = y0 as usize;
    let j1 = j0 + 1;

    s0 * (t0 * field[(i0, j0)] + t1 * field[(i0, j1)])
        + s1 * (t0 * field[(i1, j0)] + t1 * field[(i1, j1)])
}

/// Semi-Lagrangian transport of `d0` through `(u, v)` into `d`.
///
/// Each interior cell traces back one timestep along its own velocity and takes
/// the interpolated value of `d0` found there. Traces leaving the grid are
/// clamped to the ghost layer rather than wrapped.
pub fn advect(boundary: Boundary, d: &mut Field, d0: &Field, u: &Field, v: &Field) {
    let Grid { nx, ny } = d.grid();
    let dtx = TIMESTEP * nx as f32;
    let dty = TIMESTEP * ny as f32;

    for j in 1..=ny {
        for i in 1..=nx {
            let x = i as f32 - dtx * u[(i, j)];
            let y = j as f32 - dty * v[(i, j)];

            d[(i, j)] = bilerp(d0, x, y);
        }
    }

    boundary.apply(d);
}
