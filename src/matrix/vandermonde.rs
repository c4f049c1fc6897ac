//! Vandermonde solves: X V = P via divided differences.

use crate::Float;

use super::base::Matrix;

impl Matrix {
    /// In-place solve of `X * V(nodes) = self`, overwriting `self` with `X`.
    ///
    /// `V(nodes)` is the square Vandermonde matrix with
    /// `V[i][j] = nodes[i]^j`. Every row of `self` is solved independently
    /// with Newton's divided differences, without forming `V` or its inverse.
    ///
    /// The nodes must be pairwise distinct; coinciding nodes silently produce
    /// NaN or infinite entries.
    pub fn vandermonde_solve(&mut self, nodes: &[Float]) {
        let n = nodes.len();
        assert_eq!(
            (self.nrows, self.ncols),
            (n, n),
            "dimension mismatch in vandermonde_solve: matrix is {}x{}, {} nodes",
            self.nrows,
            self.ncols,
            n
        );
        if n < 2 {
            return;
        }

        for k in 0..n - 1 {
            for j in (k + 1..n).rev() {
                for i in 0..n {
                    self[(i, j)] -= self[(i, j - 1)] * nodes[k];
                }
            }
        }

        for k in (0..n - 1).rev() {
            for j in k + 1..n {
                let d = nodes[j] - nodes[j - k - 1];
                for i in 0..n {
                    self[(i, j)] /= d;
                }
            }
            for j in k..n - 1 {
                for i in 0..n {
                    self[(i, j)] -= self[(i, j + 1)];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Float, matrix::Matrix};

    fn vandermonde(nodes: &[Float]) -> Matrix {
        let n = nodes.len();
        let mut v = Matrix::square(n);
        for i in 0..n {
            for j in 0..n {
                v[(i, j)] = nodes[i].powi(j as i32);
            }
        }
        v
    }

    #[test]
    fn solve_2x2_by_hand() {
        // x V = p with V = [[1, c0], [1, c1]]
        let nodes = [-1.0, 1.0];
        let mut pm = Matrix::from_rows(&[[1.0, 0.0], [2.0, 4.0]]);
        pm.vandermonde_solve(&nodes);
        assert_eq!(pm, Matrix::from_rows(&[[0.5, 0.5], [-1.0, 3.0]]));
    }

    #[test]
    fn solution_reproduces_right_hand_side() {
        let nodes = [0.2604, 0.5292, 1.5465, 1.7751, 0.0901, 0.1999, 1.3261, 1.0];
        let n = nodes.len();
        let mut rhs = Matrix::square(n);
        for i in 0..n {
            for j in 0..n {
                rhs[(i, j)] = ((i * n + j) as Float).sin() + 0.1 * j as Float;
            }
        }

        let mut x = rhs.clone();
        x.vandermonde_solve(&nodes);
        let back = x.matmul(&vandermonde(&nodes));

        for i in 0..n {
            for j in 0..n {
                assert!(
                    (back[(i, j)] - rhs[(i, j)]).abs() < 1e-8,
                    "entry ({i}, {j}): {} vs {}",
                    back[(i, j)],
                    rhs[(i, j)]
                );
            }
        }
    }

    #[test]
    fn unsorted_negative_nodes() {
        let nodes = [-1.0, -0.4, 0.55, 1.0];
        let v = vandermonde(&nodes);
        let mut x = Matrix::identity(4).matmul(&v);
        x.vandermonde_solve(&nodes);
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((x[(i, j)] - expected).abs() < 1e-12);
            }
        }
    }
}
