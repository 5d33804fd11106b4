use crate::error::{invalid, GfResult};
use std::ops::{Index, IndexMut};

/// Dense square table indexed by a point pair `(j, k)`.
///
/// Rows are flattened into one buffer so a lookup is a single multiply-add.
/// No symmetry is assumed: `m[(j, k)]` and `m[(k, j)]` are independent cells.
#[derive(Debug, Clone, PartialEq)]
pub struct PairMatrix<T> {
    n: usize,
    cells: Vec<T>,
}

impl<T: Clone> PairMatrix<T> {
    pub fn filled(n: usize, value: T) -> Self {
        Self {
            n,
            cells: vec![value; n * n],
        }
    }

    /// Flattens nested rows, rejecting anything that is not exactly `n` x `n`.
    pub fn from_rows(name: &str, rows: Vec<Vec<T>>, n: usize) -> GfResult<Self> {
        if rows.len() != n {
            return Err(invalid!(
                "matrix '{}' has {} rows, expected {}",
                name,
                rows.len(),
                n
            ));
        }
        let mut cells = Vec::with_capacity(n * n);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(invalid!(
                    "matrix '{}' row {} has {} columns, expected {}",
                    name,
                    r,
                    row.len(),
                    n
                ));
            }
            cells.extend(row);
        }
        Ok(Self { n, cells })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.n == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.n).map(|c| c.to_vec()).collect()
    }
}

impl<T> PairMatrix<T> {
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.n && col < self.n);
        row * self.n + col
    }
}

impl<T> Index<(usize, usize)> for PairMatrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.cells[self.idx(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for PairMatrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let i = self.idx(row, col);
        &mut self.cells[i]
    }
}
