//! Softened gravitational N-body problem.

use std::f64::consts::PI;

use crate::{Float, ODE};

use super::Problem;

/// Softening added to squared distances.
const SOFTENING: Float = 1e-4;

/// Gravitational motion of `bodies` point masses in three dimensions.
///
/// Body `i` occupies the components `6i..6i + 6` of the state: position
/// `(x, y, z)` followed by velocity `(vx, vy, vz)`. The attraction uses the
/// softened distance `r^2 + 1e-4`, so close encounters stay smooth.
#[derive(Clone, Debug)]
pub struct MBody {
    masses: Vec<Float>,
}

impl MBody {
    pub fn new(bodies: usize) -> Self {
        let nb = bodies as Float;
        let masses = (1..=bodies)
            .map(|i| (0.3 + 0.1 * ((i as Float * PI / 2.0).cos() + 1.0)) / nb)
            .collect();
        Self { masses }
    }

    pub fn bodies(&self) -> usize {
        self.masses.len()
    }

    pub fn masses(&self) -> &[Float] {
        &self.masses
    }

    /// Total energy, kinetic plus softened potential. Conserved by the flow.
    pub fn energy(&self, y: &[Float]) -> Float {
        let mut energy = 0.0;
        for (i, &mi) in self.masses.iter().enumerate() {
            let bi = &y[6 * i..6 * i + 6];
            energy += 0.5 * mi * (bi[3] * bi[3] + bi[4] * bi[4] + bi[5] * bi[5]);

            for (j, &mj) in self.masses.iter().enumerate().skip(i + 1) {
                let bj = &y[6 * j..6 * j + 6];
                let dist = SOFTENING + squared_distance(bi, bj);
                energy -= mi * mj / dist.sqrt();
            }
        }
        energy
    }
}

fn squared_distance(a: &[Float], b: &[Float]) -> Float {
    (0..3).map(|k| (a[k] - b[k]) * (a[k] - b[k])).sum()
}

impl ODE for MBody {
    fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
        for i in 0..self.bodies() {
            let bi = &y[6 * i..6 * i + 6];
            let mut acc = [0.0; 3];

            for (j, &mj) in self.masses.iter().enumerate() {
                if i == j {
                    continue;
                }
                let bj = &y[6 * j..6 * j + 6];
                let dist = SOFTENING + squared_distance(bi, bj);
                let scale = mj / (dist * dist.sqrt());
                for k in 0..3 {
                    acc[k] += (bj[k] - bi[k]) * scale;
                }
            }

            let di = &mut dydx[6 * i..6 * i + 6];
            di[..3].copy_from_slice(&bi[3..]);
            di[3..].copy_from_slice(&acc);
        }
    }
}

impl Problem for MBody {
    fn description(&self) -> String {
        format!("{} body problem, {} components", self.bodies(), 6 * self.bodies())
    }

    fn initialize(&self) -> Vec<Float> {
        let nb = self.bodies();
        let mut y = vec![0.0; 6 * nb];
        for (i, body) in y.chunks_exact_mut(6).enumerate() {
            let i1 = (i + 1) as Float;
            let rad = 1.7 + (0.75 * i1).cos();
            let v = 0.22 * rad.sqrt();
            let (si, ci) = (2.0 * PI * i1 / nb as Float).sin_cos();

            body.copy_from_slice(&[rad * ci, rad * si, 0.4 * si, -v * si, v * ci, 0.0]);
        }
        y
    }
}
