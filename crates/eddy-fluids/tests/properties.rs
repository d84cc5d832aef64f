use eddy_fluids::{
    stable::{project::{divergence, project}, Boundary, Field, Grid, MonoFluid, RgbFluid, StableFluidParams},
    Fluid, FluidError,
};
use glam::Vec2;

fn interior_sum(fluid: &MonoFluid) -> f32 {
    fluid.total_density()[0]
}

#[test]
fn construction_rejects_empty_grids() {
    assert!(matches!(MonoFluid::new(0, 0), Err(FluidError::InvalidDimensions { .. })));
    assert!(matches!(MonoFluid::new(0, 10), Err(FluidError::InvalidDimensions { .. })));
    assert!(matches!(RgbFluid::new(10, 0), Err(FluidError::InvalidDimensions { .. })));
}

#[test]
fn walls_reflect_velocity_and_copy_scalars() {
    let grid = Grid::new(7, 5).unwrap();
    let mut u = Field::zeros(grid);
    let mut s = Field::zeros(grid);
    for j in 1..=5 {
        for i in 1..=7 {
            u[(i, j)] = (i * j) as f32 - 3.0;
            s[(i, j)] = (i + j) as f32;
        }
    }

    Boundary::VelocityX.apply(&mut u);
    Boundary::Scalar.apply(&mut s);

    for j in 1..=5 {
        assert_eq!(u[(0, j)], -u[(1, j)]);
        assert_eq!(u[(8, j)], -u[(7, j)]);
        assert_eq!(s[(0, j)], s[(1, j)]);
        assert_eq!(s[(8, j)], s[(7, j)]);
    }
}

#[test]
fn added_density_is_visible_before_step() {
    let mut fluid = MonoFluid::new(20, 10).unwrap();
    fluid.add_scalar_density(4, 7, 5.0);
    assert_eq!(fluid.scalar_density(4, 7), 5.0);
}

#[test]
fn clear_zeroes_everything() {
    let mut fluid = MonoFluid::new(12, 9).unwrap();
    fluid.add_scalar_density(6, 4, 50.0);
    fluid.add_velocity(6, 4, 3.0, -1.0);
    fluid.add_velocity(2, 2, -2.0, 4.0);
    fluid.advance(3);

    fluid.clear();

    for j in 1..=9 {
        for i in 1..=12 {
            assert_eq!(fluid.scalar_density(i, j), 0.0);
            assert_eq!(fluid.velocity(i, j), Vec2::ZERO);
        }
    }
}

#[test]
fn still_fluid_stays_still() {
    let mut fluid = RgbFluid::new(10, 10).unwrap();
    fluid.advance(3);

    for field in fluid.density_fields() {
        assert!(field.iter().all(|&d| d == 0.0));
    }
    let (u, v) = fluid.velocity_field();
    assert!(u.iter().chain(v).all(|&x| x == 0.0));
}

#[test]
fn diffusion_spreads_and_drains_origin() {
    let mut fluid = MonoFluid::new(16, 16).unwrap();
    fluid.set_diffusion(0.001);
    fluid.add_scalar_density(8, 8, 100.0);

    let mut origin = fluid.scalar_density(8, 8);
    for _ in 0..5 {
        fluid.step();

        let next = fluid.scalar_density(8, 8);
        assert!(next < origin, "origin density rose from {origin} to {next}");
        origin = next;

        for (i, j) in [(7, 8), (9, 8), (8, 7), (8, 9)] {
            let d = fluid.scalar_density(i, j);
            assert!(d > 0.0 && d < origin);
        }
    }
}

#[test]
fn decay_scales_total_density() {
    let params = StableFluidParams { viscosity: 0.0, diffusion: 0.0, decay: 0.9 };
    let mut fluid = MonoFluid::with_params(12, 12, params).unwrap();
    fluid.add_scalar_density(5, 5, 10.0);
    fluid.add_scalar_density(9, 2, 4.0);

    for _ in 0..4 {
        let before = interior_sum(&fluid);
        fluid.step();
        let after = interior_sum(&fluid);

        assert!(after < before);
        assert!((after / before - 0.9).abs() < 1e-5);
    }
}

#[test]
fn projection_reduces_divergence_of_stimulus() {
    let mut fluid = MonoFluid::new(8, 8).unwrap();
    for j in 2..=4 {
        for i in 2..=4 {
            fluid.add_velocity(i, j, 1.0, 0.5);
        }
    }

    let grid = fluid.grid();
    let rms = |u: &Field, v: &Field| {
        let mut div = Field::zeros(grid);
        divergence(u, v, &mut div);
        let interior = div.interior();
        (interior.mapv(|d| d * d).sum() / interior.len() as f32).sqrt()
    };

    let (u, v) = fluid.velocities();
    let (mut u, mut v) = (u.clone(), v.clone());
    let before = rms(&u, &v);

    let mut p = Field::zeros(grid);
    let mut div = Field::zeros(grid);
    project(&mut u, &mut v, &mut p, &mut div);

    assert!(rms(&u, &v) < before);
}
