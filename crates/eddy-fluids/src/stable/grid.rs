use std::ops::{Index, IndexMut};

use glam::UVec2;
use ndarray::{s, ArrayView2};

use crate::FluidError;

/// Interior dimensions of a padded grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Number of interior cells in the X direction.
    pub nx: usize,
    /// Number of interior cells in the Y direction.
    pub ny: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, FluidError> {
        if width == 0 || height == 0 {
            return Err(FluidError::InvalidDimensions { width, height });
        }

        let too_large = FluidError::TooLarge { width, height };
        if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
            return Err(too_large);
        }
        width.checked_add(2)
            .zip(height.checked_add(2))
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or(too_large)?;

        Ok(Self { nx: width, ny: height })
    }

    /// Distance in the flat buffer between two vertically adjacent cells.
    #[inline]
    pub fn stride(&self) -> usize {
        self.nx + 2
    }

    /// Length of a padded buffer, ghost cells included.
    #[inline]
    pub fn padded_len(&self) -> usize {
        (self.nx + 2) * (self.ny + 2)
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        i + (self.nx + 2) * j
    }

    /// Whether `(i, j)` lies in `[0, nx + 1] x [0, ny + 1]`.
    #[inline]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i <= self.nx + 1 && j <= self.ny + 1
    }

    /// Interior size. Both dimensions fit in `u32`, as checked by [`Grid::new`].
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.nx as u32, self.ny as u32)
    }
}

/// A padded scalar field.
///
/// Indexing with `field[(i, j)]` addresses cell `(i, j)` in padded space, so the
/// interior is `1..=nx` by `1..=ny`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    grid: Grid,
    data: Vec<f32>,
}

impl Field {
    pub fn zeros(grid: Grid) -> Self {
        Self {
            grid,
            data: vec![0.0; grid.padded_len()],
        }
    }

    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Value at `(i, j)`, or `None` outside the padded grid.
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.grid.contains(i, j).then(|| self.data[self.grid.idx(i, j)])
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut f32> {
        if self.grid.contains(i, j) {
            let idx = self.grid.idx(i, j);
            Some(&mut self.data[idx])
        } else {
            None
        }
    }

    pub fn fill(&mut self, v: f32) {
        self.data.fill(v);
    }

    /// Multiplies every sample, ghost cells included, by `k`.
    pub fn scale(&mut self, k: f32) {
        self.data.iter_mut().for_each(|x| *x *= k);
    }

    /// The whole padded buffer as a `(ny + 2, nx + 2)` array, rows along Y.
    pub fn view(&self) -> ArrayView2<'_, f32> {
        ArrayView2::from_shape((self.grid.ny + 2, self.grid.nx + 2), &self.data)
            .expect("padded buffer length always matches its grid")
    }

    /// The interior window of [`Field::view`].
    pub fn interior(&self) -> ArrayView2<'_, f32> {
        self.view().slice_move(s![1..=self.grid.ny, 1..=self.grid.nx])
    }
}

impl Index<(usize, usize)> for Field {
    type Output = f32;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        debug_assert!(self.grid.contains(i, j));
        &self.data[self.grid.idx(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Field {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        debug_assert!(self.grid.contains(i, j));
        let idx = self.grid.idx(i, j);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_grids() {
        assert_eq!(Grid::new(0, 4), Err(FluidError::InvalidDimensions { width: 0, height: 4 }));
        assert_eq!(Grid::new(4, 0), Err(FluidError::InvalidDimensions { width: 4, height: 0 }));
    }

    #[test]
    fn rejects_overflowing_grids() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(FluidError::TooLarge { width: usize::MAX, height: 2 }),
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn rejects_dimensions_beyond_u32() {
        let wide = u32::MAX as usize + 1;
        assert_eq!(Grid::new(wide, 1), Err(FluidError::TooLarge { width: wide, height: 1 }));
        assert_eq!(Grid::new(1, wide), Err(FluidError::TooLarge { width: 1, height: wide }));
    }

    #[test]
    fn padded_indexing() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.padded_len(), 20);
        assert_eq!(grid.idx(0, 0), 0);
        assert_eq!(grid.idx(4, 0), 4);
        assert_eq!(grid.idx(0, 1), 5);
        assert_eq!(grid.idx(2, 3), 17);
        assert!(grid.contains(4, 3));
        assert!(!grid.contains(5, 0));
        assert!(!grid.contains(0, 4));
    }

    #[test]
    fn out_of_range_access_is_none() {
        let mut field = Field::zeros(Grid::new(2, 2).unwrap());
        assert_eq!(field.get(4, 0), None);
        assert!(field.get_mut(0, 4).is_none());
        assert_eq!(field.get(3, 3), Some(0.0));
    }

    #[test]
    fn views_follow_flat_layout() {
        let mut field = Field::zeros(Grid::new(3, 2).unwrap());
        field[(2, 1)] = 7.0;

        let view = field.view();
        assert_eq!(view.dim(), (4, 5));
        assert_eq!(view[(1, 2)], 7.0);

        let interior = field.interior();
        assert_eq!(interior.dim(), (2, 3));
        assert_eq!(interior[(0, 1)], 7.0);
        assert_eq!(interior.sum(), 7.0);
    }
}
