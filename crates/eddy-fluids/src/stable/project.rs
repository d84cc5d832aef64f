use super::{boundary::Boundary, grid::{Field, Grid}, solver::lin_solve};

/// Writes the scaled discrete divergence `-0.5 * (du/dx + dv/dy) / nx` of the
/// velocity field into the interior of `div`.
pub fn divergence(u: &Field, v: &Field, div: &mut Field) {
    let Grid { nx, ny } = u.grid();
    let stride = u.grid().stride();
    let w = nx as f32;

    let us = u.as_slice();
    let vs = v.as_slice();
    let ds = div.as_mut_slice();

    for j in 1..=ny {
        for i in 1..=nx {
            let idx = i + stride * j;
            ds[idx] = (-0.5 * (us[idx + 1] - us[idx - 1] + vs[idx + stride] - vs[idx - stride])) / w;
        }
    }
}

/// Removes the divergent part of `(u, v)`.
///
/// Solves the pressure Poisson equation into `p` against the divergence stored in
/// `div`, then subtracts the pressure gradient from the velocity. `p` and `div`
/// are scratch: their previous contents are discarded.
pub fn project(u: &mut Field, v: &mut Field, p: &mut Field, div: &mut Field) {
    let Grid { nx, ny } = u.grid();
    let stride = u.grid().stride();
    let w = nx as f32;
    let h = ny as f32;

    divergence(u, v, div);
    p.fill(0.0);

    Boundary::Scalar.apply(div);
    Boundary::Scalar.apply(p);
    lin_solve(Boundary::Scalar, p, div, 1.0, 4.0);

    let ps = p.as_slice();
    let us = u.as_mut_slice();
    for j in 1..=ny {
        for i in 1..=nx {
            let idx = i + stride * j;
            us[idx] -= 0.5 * (ps[idx + 1] - ps[idx - 1]) * w;
        }
    }

    let vs = v.as_mut_slice();
    for j in 1..=ny {
        for i in 1..=nx {
            let idx = i + stride * j;
            vs[idx] -= 0.5 * (ps[idx + stride] - ps[idx - stride]) * h;
        }
    }

    Boundary::VelocityX.apply(u);
    Boundary::VelocityY.apply(v);
}
