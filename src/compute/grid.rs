//! Ghost-bordered cell grid.
//!
//! The grid stores an `n x n` interior surrounded by a one-cell ring of
//! permanently dead cells. Neighbor sums for interior cells can then read all
//! eight offsets without bounds checks, including on the interior edges.
//!
//! Data is stored as flat row-major arrays with stride `n + 2`:
//! `idx = row * (n + 2) + col`.

/// Error type for grid construction and access.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid interior size must be non-zero")]
    EmptyGrid,
    #[error("Failed to allocate grid of {cells} cells")]
    Allocation { cells: usize },
    #[error("Cell ({row}, {col}) is outside the padded {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[error("Border cell ({row}, {col}) cannot be set alive")]
    BorderCell { row: usize, col: usize },
}

/// Square life grid with a dead border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Interior side length.
    n: usize,
    /// Cell status, 1 = alive, 0 = dead.
    status: Vec<u8>,
    /// Neighbor counts from the most recent counting pass.
    neighbors: Vec<u8>,
}

/// Allocate a zeroed buffer, reporting failure instead of aborting.
pub(crate) fn try_zeroed(cells: usize) -> Result<Vec<u8>, GridError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(cells)
        .map_err(|_| GridError::Allocation { cells })?;
    buf.resize(cells, 0);
    Ok(buf)
}

/// Number of cells in a padded grid with interior side `n`.
pub(crate) fn padded_cells(n: usize) -> Result<usize, GridError> {
    n.checked_add(2)
        .and_then(|stride| stride.checked_mul(stride))
        .ok_or(GridError::Allocation { cells: usize::MAX })
}

impl Grid {
    /// Create an all-dead grid with an `n x n` interior.
    pub fn new(n: usize) -> Result<Self, GridError> {
        if n == 0 {
            return Err(GridError::EmptyGrid);
        }
        let cells = padded_cells(n)?;
        Ok(Self {
            n,
            status: try_zeroed(cells)?,
            neighbors: try_zeroed(cells)?,
        })
    }

    /// Interior side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Row stride of the padded buffers (`n + 2`).
    #[inline]
    pub fn stride(&self) -> usize {
        self.n + 2
    }

    /// Convert (row, col) to flat index, checking the padded bounds.
    #[inline]
    fn idx(&self, row: usize, col: usize) -> Result<usize, GridError> {
        let stride = self.stride();
        if row >= stride || col >= stride {
            return Err(GridError::OutOfBounds {
                row,
                col,
                size: stride,
            });
        }
        Ok(row * stride + col)
    }

    #[inline]
    fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row == self.n + 1 || col == self.n + 1
    }

    /// Get status at (row, col). Border cells always read dead.
    pub fn get_status(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let i = self.idx(row, col)?;
        Ok(self.status[i] != 0)
    }

    /// Set status at (row, col).
    ///
    /// Writing `false` to a border cell is accepted and changes nothing;
    /// writing `true` fails with [`GridError::BorderCell`].
    pub fn set_status(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let i = self.idx(row, col)?;
        if self.is_border(row, col) {
            if alive {
                return Err(GridError::BorderCell { row, col });
            }
            return Ok(());
        }
        self.status[i] = alive as u8;
        Ok(())
    }

    /// Check that (row, col) is an interior cell, i.e. one that
    /// [`set_status`](Self::set_status) would accept as alive.
    pub fn check_interior(&self, row: usize, col: usize) -> Result<(), GridError> {
        self.idx(row, col)?;
        if self.is_border(row, col) {
            return Err(GridError::BorderCell { row, col });
        }
        Ok(())
    }

    /// Neighbor count recorded by the last counting pass.
    pub fn neighbor_count(&self, row: usize, col: usize) -> Result<u8, GridError> {
        let i = self.idx(row, col)?;
        Ok(self.neighbors[i])
    }

    /// Lazy iterator over interior coordinates, row by row.
    ///
    /// Restartable: call again each step.
    pub fn interior_cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let n = self.n;
        (1..=n).flat_map(move |row| (1..=n).map(move |col| (row, col)))
    }

    /// Interior row indices, the unit of parallel dispatch.
    pub fn interior_rows(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.n
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.status.iter().map(|&s| s as usize).sum()
    }

    /// Interior statuses in row-major order (`n * n` entries).
    pub fn interior_status(&self) -> Vec<bool> {
        self.interior_cells()
            .map(|(row, col)| self.status[row * self.stride() + col] != 0)
            .collect()
    }

    /// Deep copy of the grid. Steps mutate in place, so this is the only way
    /// to keep an earlier generation around.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// True when every border cell is dead.
    pub fn border_is_dead(&self) -> bool {
        let stride = self.stride();
        (0..stride).all(|i| {
            self.status[i] == 0
                && self.status[(stride - 1) * stride + i] == 0
                && self.status[i * stride] == 0
                && self.status[i * stride + stride - 1] == 0
        })
    }

    /// Raw status buffer.
    #[inline]
    pub(crate) fn status(&self) -> &[u8] {
        &self.status
    }

    /// Split borrow for the counting pass: status read-only, counts writable.
    #[inline]
    pub(crate) fn count_buffers(&mut self) -> (&[u8], &mut [u8]) {
        (&self.status, &mut self.neighbors)
    }

    /// Split borrow for the apply pass: status writable, counts read-only.
    #[inline]
    pub(crate) fn apply_buffers(&mut self) -> (&mut [u8], &[u8]) {
        (&mut self.status, &self.neighbors)
    }

    /// Exchange the status buffer with a same-sized buffer holding the next
    /// generation.
    #[inline]
    pub(crate) fn swap_status(&mut self, next: &mut Vec<u8>) {
        debug_assert_eq!(next.len(), self.status.len());
        std::mem::swap(&mut self.status, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(4).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.stride(), 6);
        assert_eq!(grid.population(), 0);
        for row in 0..6 {
            for col in 0..6 {
                assert!(!grid.get_status(row, col).unwrap());
                assert_eq!(grid.neighbor_count(row, col).unwrap(), 0);
            }
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Grid::new(0), Err(GridError::EmptyGrid));
    }

    #[test]
    fn test_overflowing_size_is_allocation_error() {
        assert!(matches!(
            Grid::new(usize::MAX),
            Err(GridError::Allocation { .. })
        ));
    }

    #[test]
    fn test_set_get_interior() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_status(1, 1, true).unwrap();
        grid.set_status(3, 2, true).unwrap();
        assert!(grid.get_status(1, 1).unwrap());
        assert!(grid.get_status(3, 2).unwrap());
        assert!(!grid.get_status(2, 2).unwrap());
        assert_eq!(grid.population(), 2);

        grid.set_status(1, 1, false).unwrap();
        assert!(!grid.get_status(1, 1).unwrap());
    }

    #[test]
    fn test_out_of_bounds_does_not_wrap() {
        let mut grid = Grid::new(3).unwrap();
        assert_eq!(
            grid.get_status(5, 0),
            Err(GridError::OutOfBounds {
                row: 5,
                col: 0,
                size: 5
            })
        );
        assert!(grid.set_status(0, 5, false).is_err());
        assert!(grid.neighbor_count(9, 9).is_err());
    }

    #[test]
    fn test_border_cannot_be_set_alive() {
        let mut grid = Grid::new(3).unwrap();
        assert_eq!(
            grid.set_status(0, 2, true),
            Err(GridError::BorderCell { row: 0, col: 2 })
        );
        assert_eq!(
            grid.set_status(2, 4, true),
            Err(GridError::BorderCell { row: 2, col: 4 })
        );
        assert!(grid.set_status(4, 4, false).is_ok());
        assert!(grid.border_is_dead());
    }

    #[test]
    fn test_check_interior() {
        let grid = Grid::new(3).unwrap();
        assert!(grid.check_interior(1, 1).is_ok());
        assert!(grid.check_interior(3, 3).is_ok());
        assert_eq!(
            grid.check_interior(0, 2),
            Err(GridError::BorderCell { row: 0, col: 2 })
        );
        assert_eq!(
            grid.check_interior(2, 7),
            Err(GridError::OutOfBounds {
                row: 2,
                col: 7,
                size: 5
            })
        );
    }

    #[test]
    fn test_interior_cells_cover_interior_once() {
        let grid = Grid::new(5).unwrap();
        let cells: Vec<_> = grid.interior_cells().collect();
        assert_eq!(cells.len(), 25);
        assert_eq!(cells.first(), Some(&(1, 1)));
        assert_eq!(cells.last(), Some(&(5, 5)));
        assert!(
            cells
                .iter()
                .all(|&(r, c)| (1..=5).contains(&r) && (1..=5).contains(&c))
        );

        // Restartable
        assert_eq!(grid.interior_cells().count(), 25);
        assert_eq!(grid.interior_rows(), 1..=5);
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_status(2, 2, true).unwrap();
        let snap = grid.snapshot();
        grid.set_status(2, 2, false).unwrap();
        assert!(snap.get_status(2, 2).unwrap());
        assert!(!grid.get_status(2, 2).unwrap());
    }

    #[test]
    fn test_interior_status_row_major() {
        let mut grid = Grid::new(2).unwrap();
        grid.set_status(1, 2, true).unwrap();
        grid.set_status(2, 1, true).unwrap();
        assert_eq!(grid.interior_status(), vec![false, true, true, false]);
    }
}
