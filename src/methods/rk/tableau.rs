//! Butcher tableaux of the embedded Runge-Kutta pairs.

use crate::Float;

/// Butcher tableau of an explicit embedded pair.
///
/// `e` holds the difference of the two weight vectors, so that
/// `h * sum_s e_s k_s` estimates the local error of the propagated solution.
pub(super) struct Tableau {
    pub name: &'static str,
    pub order: usize,
    /// The last stage is evaluated at the new solution and can be reused as
    /// the first stage of the next step.
    pub fsal: bool,
    pub c: &'static [Float],
    /// Strictly lower triangular rows of `A`; row `i` holds `i` entries.
    pub a: &'static [&'static [Float]],
    pub b: &'static [Float],
    pub e: &'static [Float],
}

impl Tableau {
    pub fn stages(&self) -> usize {
        self.c.len()
    }
}

/// RK2(3): a third order solution with an embedded second order one.
pub(super) const RK2: Tableau = Tableau {
    name: "RK2",
    order: 3,
    fsal: false,
    c: &[0.0, 1.0, 0.5],
    a: &[&[], &[1.0], &[1.0 / 4.0, 1.0 / 4.0]],
    b: &[1.0 / 6.0, 1.0 / 6.0, 2.0 / 3.0],
    e: &[-1.0 / 3.0, -1.0 / 3.0, 2.0 / 3.0],
};

// Runge-Kutta-Fehlberg 4(5)
const B4: [Float; 6] = [
    25.0 / 216.0,
    0.0,
    1408.0 / 2565.0,
    2197.0 / 4104.0,
    -1.0 / 5.0,
    0.0,
];
const B5: [Float; 6] = [
    16.0 / 135.0,
    0.0,
    6656.0 / 12825.0,
    28561.0 / 56430.0,
    -9.0 / 50.0,
    2.0 / 55.0,
];

pub(super) const RKFB4: Tableau = Tableau {
    name: "RKFB4",
    order: 4,
    fsal: false,
    c: &[0.0, 1.0 / 4.0, 3.0 / 8.0, 12.0 / 13.0, 1.0, 1.0 / 2.0],
    a: &[
        &[],
        &[1.0 / 4.0],
        &[3.0 / 32.0, 9.0 / 32.0],
        &[1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0],
        &[439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0],
        &[-8.0 / 27.0, 2.0, -3544.0 / 2565.0, 1859.0 / 4104.0, -11.0 / 40.0],
    ],
    b: &B4,
    e: &[
        B4[0] - B5[0],
        B4[1] - B5[1],
        B4[2] - B5[2],
        B4[3] - B5[3],
        B4[4] - B5[4],
        B4[5] - B5[5],
    ],
};

// Dormand-Prince 5(4)
const DP_B: [Float; 7] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];

pub(super) const DOPRI5: Tableau = Tableau {
    name: "DoPri5",
    order: 5,
    fsal: true,
    c: &[0.0, 0.2, 0.3, 0.8, 8.0 / 9.0, 1.0, 1.0],
    a: &[
        &[],
        &[0.2],
        &[3.0 / 40.0, 9.0 / 40.0],
        &[44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0],
        &[19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0],
        &[
            9017.0 / 3168.0,
            -355.0 / 33.0,
            46732.0 / 5247.0,
            49.0 / 176.0,
            -5103.0 / 18656.0,
        ],
        &[
            DP_B[0], DP_B[1], DP_B[2], DP_B[3], DP_B[4], DP_B[5],
        ],
    ],
    b: &DP_B,
    e: &[
        71.0 / 57600.0,
        0.0,
        -71.0 / 16695.0,
        71.0 / 1920.0,
        -17253.0 / 339200.0,
        22.0 / 525.0,
        -1.0 / 40.0,
    ],
};

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{DOPRI5, RK2, RKFB4};
    use crate::Float;

    #[test]
    fn tableaux_are_consistent() {
        for tab in [&RK2, &RKFB4, &DOPRI5] {
            let s = tab.stages();
            assert_eq!(tab.a.len(), s, "{}", tab.name);
            assert_eq!(tab.b.len(), s, "{}", tab.name);
            assert_eq!(tab.e.len(), s, "{}", tab.name);

            for (i, row) in tab.a.iter().enumerate() {
                assert_eq!(row.len(), i, "{}", tab.name);
                let sum: Float = row.iter().sum();
                assert_abs_diff_eq!(sum, tab.c[i], epsilon = 1e-14);
            }

            let sum_b: Float = tab.b.iter().sum();
            assert_abs_diff_eq!(sum_b, 1.0, epsilon = 1e-14);
            let sum_e: Float = tab.e.iter().sum();
            assert_abs_diff_eq!(sum_e, 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn dopri5_last_stage_is_the_solution() {
        let last = DOPRI5.a[DOPRI5.stages() - 1];
        assert_eq!(last, &DOPRI5.b[..DOPRI5.stages() - 1]);
        assert_eq!(DOPRI5.b[DOPRI5.stages() - 1], 0.0);
        assert!(DOPRI5.fsal);
    }
}
