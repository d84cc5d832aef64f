use super::grid::{Field, Grid};

/// Which wall condition a field obeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Density and pressure: ghost cells copy their interior neighbour.
    Scalar,
    /// Horizontal velocity: negated at the left and right walls.
    VelocityX,
    /// Vertical velocity: negated at the top and bottom walls.
    VelocityY,
}

impl Boundary {
    /// Rewrites the ghost border of `x` from its interior.
    ///
    /// Corners take the mean of their two edge neighbours, so edges are written first.
    pub fn apply(self, x: &mut Field) {
        let Grid { nx, ny } = x.grid();

        let sx = if self == Boundary::VelocityX { -1.0 } else { 1.0 };
        let sy = if self == Boundary::VelocityY { -1.0 } else { 1.0 };

        for i in 1..=nx {
            x[(i, 0)] = sy * x[(i, 1)];
            x[(i, ny + 1)] = sy * x[(i, ny)];
        }

        for j in 1..=ny {
            x[(0, j)] = sx * x[(1, j)];
            x[(nx + 1, j)] = sx * x[(nx, j)];
        }

        x[(0, 0)] = 0.5 * (x[(1, 0)] + x[(0, 1)]);
        x[(0, ny + 1)] = 0.5 * (x[(1, ny + 1)] + x[(0, ny)]);
        x[(nx + 1, 0)] = 0.5 * (x[(nx, 0)] + x[(nx + 1, 1)]);
        x[(nx + 1, ny + 1)] = 0.5 * (x[(nx, ny + 1)] + x[(nx + 1, ny)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(nx: usize, ny: usize) -> Field {
        let mut field = Field::zeros(Grid::new(nx, ny).unwrap());
        for j in 1..=ny {
            for i in 1..=nx {
                field[(i, j)] = (i + 10 * j) as f32;
            }
        }
        field
    }

    #[test]
    fn scalar_copies_edges() {
        let mut x = ramp(4, 3);
        Boundary::Scalar.apply(&mut x);

        for j in 1..=3 {
            assert_eq!(x[(0, j)], x[(1, j)]);
            assert_eq!(x[(5, j)], x[(4, j)]);
        }
        for i in 1..=4 {
            assert_eq!(x[(i, 0)], x[(i, 1)]);
            assert_eq!(x[(i, 4)], x[(i, 3)]);
        }
    }

    #[test]
    fn velocity_x_flips_vertical_walls() {
        let mut x = ramp(4, 3);
        Boundary::VelocityX.apply(&mut x);

        for j in 1..=3 {
            assert_eq!(x[(0, j)], -x[(1, j)]);
            assert_eq!(x[(5, j)], -x[(4, j)]);
        }
        for i in 1..=4 {
            assert_eq!(x[(i, 0)], x[(i, 1)]);
            assert_eq!(x[(i, 4)], x[(i, 3)]);
        }
    }

    #[test]
    fn velocity_y_flips_horizontal_walls() {
        let mut x = ramp(4, 3);
        Boundary::VelocityY.apply(&mut x);

        for j in 1..=3 {
            assert_eq!(x[(0, j)], x[(1, j)]);
            assert_eq!(x[(5, j)], x[(4, j)]);
        }
        for i in 1..=4 {
            assert_eq!(x[(i, 0)], -x[(i, 1)]);
            assert_eq!(x[(i, 4)], -x[(i, 3)]);
        }
    }

    #[test]
    fn corners_average_edge_neighbours() {
        let mut x = ramp(4, 3);
        Boundary::Scalar.apply(&mut x);

        assert_eq!(x[(0, 0)], 0.5 * (x[(1, 0)] + x[(0, 1)]));
        assert_eq!(x[(0, 4)], 0.5 * (x[(1, 4)] + x[(0, 3)]));
        assert_eq!(x[(5, 0)], 0.5 * (x[(4, 0)] + x[(5, 1)]));
        assert_eq!(x[(5, 4)], 0.5 * (x[(4, 4)] + x[(5, 3)]));
    }

    #[test]
    fn opposing_corners_cancel_for_velocity() {
        let mut x = ramp(4, 3);
        Boundary::VelocityX.apply(&mut x);

        // (1, 0) copies 11 while (0, 1) holds -11.
        assert_eq!(x[(0, 0)], 0.0);
    }
}
