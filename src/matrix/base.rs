//! Matrix storage and row access.

use crate::Float;

/// Dense matrix stored contiguously in row-major order.
///
/// Stage vectors of the integrators are stored one per row, so a row is a
/// contiguous slice that can be handed to the right-hand side directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    pub(super) nrows: usize,
    pub(super) ncols: usize,
    pub(super) data: Vec<Float>,
}

impl Matrix {
    /// `nrows x ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            data: vec![0.0; nrows * ncols],
        }
    }

    /// `n x n` matrix of zeros.
    pub fn square(n: usize) -> Self {
        Self::zeros(n, n)
    }

    /// `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::square(n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Build a matrix from equally long rows.
    ///
    /// # Panics
    /// If the rows have different lengths.
    pub fn from_rows<R: AsRef<[Float]>>(rows: &[R]) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), ncols, "rows of unequal length");
            data.extend_from_slice(row);
        }
        Self { nrows, ncols, data }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn row(&self, i: usize) -> &[Float] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [Float] {
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Float]> {
        self.data.chunks_exact(self.ncols.max(1)).take(self.nrows)
    }

    /// Copy row `src` over row `dst`.
    pub fn copy_row(&mut self, src: usize, dst: usize) {
        if src != dst {
            self.data
                .copy_within(src * self.ncols..(src + 1) * self.ncols, dst * self.ncols);
        }
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Float] {
        &mut self.data
    }

    /// Matrix product `self * rhs`.
    ///
    /// # Panics
    /// If the inner dimensions differ.
    pub fn matmul(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch in matmul: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols
        );
        let mut out = Matrix::zeros(self.nrows, rhs.ncols);
        for i in 0..self.nrows {
            for k in 0..self.ncols {
                let a = self.data[i * self.ncols + k];
                for j in 0..rhs.ncols {
                    out.data[i * rhs.ncols + j] += a * rhs.data[k * rhs.ncols + j];
                }
            }
        }
        out
    }
}
