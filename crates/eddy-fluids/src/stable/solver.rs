use super::{boundary::Boundary, grid::{Field, Grid}, SOLVER_ITERATIONS, TIMESTEP};

/// Relaxes `x[i, j] = (x0[i, j] + a * (sum of 4 neighbours of x)) / c` over the interior.
///
/// Runs exactly [`SOLVER_ITERATIONS`] sweeps with no convergence test. Each sweep
/// updates `x` in place (Gauss-Seidel), so cells later in a sweep already see
/// their updated left and upper neighbours. The boundary is rewritten after every sweep.
pub fn lin_solve(boundary: Boundary, x: &mut Field, x0: &Field, a: f32, c: f32) {
    let Grid { nx, ny } = x.grid();
    let stride = x.grid().stride();
    let c_recip = 1.0 / c;

    for _iter in 0..SOLVER_ITERATIONS {
        let xs = x.as_mut_slice();
        let x0s = x0.as_slice();

        for j in 1..=ny {
            for i in 1..=nx {
                let idx = i + stride * j;
                let right = xs[idx + 1];
                let left = xs[idx - 1];
                let down = xs[idx + stride];
                let up = xs[idx - stride];

                xs[idx] = (x0s[idx] + a * (right + left + down + up)) * c_recip;
            }
        }

        boundary.apply(x);
    }
}

/// Implicit (backward Euler) diffusion of `x0` into `x` at the given rate.
///
/// The current contents of `x` seed the relaxation.
pub fn diffuse(boundary: Boundary, x: &mut Field, x0: &Field, rate: f32) {
    let Grid { nx, ny } = x.grid();
    let a = TIMESTEP * rate * nx as f32 * ny as f32;
    lin_solve(boundary, x, x0, a, 1.0 + 4.0 * a);
}
