//! Coefficient tables of a peer method, built once from a catalog entry.

use crate::{Float, matrix::Matrix};

use super::method::PeerMethod;

/// Immutable coefficient set of an explicit peer method.
///
/// With nodes `c`, a step `h = sigma * hp` computes the new stage values as
///
/// ```text
/// Y_new[i] = sum_k B[i][k] Y_old[k] + hp * sum_k A(sigma)[i][k] F_old[k]
/// A(sigma) = A0 + CV * diag(sigma, sigma^2, ..., sigma^S) * PV
/// ```
///
/// so only the stage extrapolation depends on the step ratio. The local error
/// is estimated from the new stage derivatives weighted by the last row of
/// `PV`, which annihilates polynomials up to degree `S - 2` at the nodes.
#[derive(Clone, Debug)]
pub struct PeerCoefficients {
    method: PeerMethod,
    stages: usize,
    order: usize,
    nodes: Vec<Float>,
    b: Matrix,
    a0: Matrix,
    cv: Matrix,
    pv: Matrix,
    error_weights: Vec<Float>,
    step_ratio_max: Float,
    error_model_a: Float,
    error_model_a0: Float,
    index_min_node: usize,
    index_max_node: usize,
}

impl PeerCoefficients {
    /// Build the coefficients of `method` with error-model blending disabled
    /// (`a = 0`).
    pub fn new(method: PeerMethod) -> Self {
        Self::build(method, 0.0)
    }

    /// Build the coefficients of `method` with the blending parameter of the
    /// local error model tuned for it.
    pub fn with_error_model_blending(method: PeerMethod) -> Self {
        Self::build(method, method.table().error_model_a)
    }

    fn build(method: PeerMethod, error_model_a: Float) -> Self {
        let table = method.table();
        let s = table.stages;
        let nodes = table.nodes.to_vec();

        let mut b = Matrix::from_rows(table.weights);
        for i in 0..s {
            let sum: Float = b.row(i).iter().sum();
            b[(i, s - 1)] += 1.0 - sum;
        }

        let (index_min_node, index_max_node) = extreme_nodes(&nodes);
        let error_model_a0 = error_model_a.powf(table.order as Float / 2.0);

        // CV = diag(c) * V
        let mut cv = Matrix::square(s);
        for i in 0..s {
            cv[(i, 0)] = nodes[i];
            for j in 1..s {
                cv[(i, j)] = nodes[i] * cv[(i, j - 1)];
            }
        }

        // A0 = (1 e_S^T - B) * CV * D^-1 * V^-1
        let mut shifted = Matrix::square(s);
        for i in 0..s {
            for j in 0..s {
                shifted[(i, j)] = -b[(i, j)];
            }
            shifted[(i, s - 1)] += 1.0;
        }
        let mut a0 = shifted.matmul(&cv);
        for i in 0..s {
            for j in 1..s {
                a0[(i, j)] /= (j + 1) as Float;
            }
        }
        a0.vandermonde_solve(&nodes);

        // PV = D^-1 * P * V^-1
        let mut pv = Matrix::square(s);
        pv.row_mut(0).fill(1.0);
        for i in 1..s {
            pv[(i, 0)] = 0.0;
            for j in 0..s - 1 {
                pv[(i, j + 1)] = pv[(i, j)] + pv[(i - 1, j)];
            }
        }
        for i in 0..s {
            let scale = (i + 1) as Float;
            pv.row_mut(i).iter_mut().for_each(|v| *v /= scale);
        }
        pv.vandermonde_solve(&nodes);

        let error_weights = pv.row(s - 1).to_vec();

        Self {
            method,
            stages: s,
            order: table.order,
            nodes,
            b,
            a0,
            cv,
            pv,
            error_weights,
            step_ratio_max: table.step_ratio_max,
            error_model_a,
            error_model_a0,
            index_min_node,
            index_max_node,
        }
    }

    pub fn method(&self) -> PeerMethod {
        self.method
    }

    pub fn stages(&self) -> usize {
        self.stages
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn nodes(&self) -> &[Float] {
        &self.nodes
    }

    /// Weights of the old stage values; every row sums to one.
    pub fn b(&self) -> &Matrix {
        &self.b
    }

    pub fn a0(&self) -> &Matrix {
        &self.a0
    }

    pub fn cv(&self) -> &Matrix {
        &self.cv
    }

    pub fn pv(&self) -> &Matrix {
        &self.pv
    }

    pub fn error_weights(&self) -> &[Float] {
        &self.error_weights
    }

    /// Largest ratio between consecutive step sizes.
    pub fn step_ratio_max(&self) -> Float {
        self.step_ratio_max
    }

    pub fn error_model_a(&self) -> Float {
        self.error_model_a
    }

    /// `a^(order / 2)`.
    pub fn error_model_a0(&self) -> Float {
        self.error_model_a0
    }

    /// Index of the smallest node. Ties resolve to the first index.
    pub fn index_min_node(&self) -> usize {
        self.index_min_node
    }

    /// Index of the largest node. Ties resolve to the last stage, then to the
    /// first index found.
    pub fn index_max_node(&self) -> usize {
        self.index_max_node
    }
}

fn extreme_nodes(nodes: &[Float]) -> (usize, usize) {
    let mut min = 0;
    let mut max = nodes.len() - 1;
    for (i, &c) in nodes.iter().enumerate() {
        if c < nodes[min] {
            min = i;
        }
        if c > nodes[max] {
            max = i;
        }
    }
    (min, max)
}
