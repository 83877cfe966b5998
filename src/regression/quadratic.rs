use serde::Serialize;

use crate::error::{ForecastError, Result};
use crate::forecast::ForecastPoint;
use crate::series::{indices, power_sum, weighted_power_sum};

pub const QUADRATIC_MIN_SAMPLES: usize = 3;

type Matrix3 = [[f64; 3]; 3];

/// `y = c0 + c1 * x + c2 * x²` over the sample index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadraticFit {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub n: usize,
}

impl QuadraticFit {
    /// Solves the 3x3 normal equations with Cramer's rule.
    pub fn fit(values: &[f64]) -> Result<Self> {
        let n = values.len();
        if n < QUADRATIC_MIN_SAMPLES {
            return Err(ForecastError::insufficient(QUADRATIC_MIN_SAMPLES, n));
        }
        let x = indices(n);
        let s: Vec<f64> = (0..=4).map(|k| power_sum(&x, k)).collect();
        let t: Vec<f64> = (0..=2).map(|k| weighted_power_sum(&x, values, k)).collect();

        let a: Matrix3 = [
            [s[0], s[1], s[2]],
            [s[1], s[2], s[3]],
            [s[2], s[3], s[4]],
        ];
        let b = [t[0], t[1], t[2]];

        let d = det3(&a);
        if d == 0.0 || !d.is_finite() {
            return Err(ForecastError::DegenerateFit("quadratic"));
        }
        let solve = |col: usize| det3(&replace_column(&a, col, &b)) / d;

        Ok(Self {
            c0: solve(0),
            c1: solve(1),
            c2: solve(2),
            n,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.c0 + self.c1 * x + self.c2 * x * x
    }

    pub fn fitted(&self) -> Vec<f64> {
        indices(self.n).into_iter().map(|x| self.predict(x)).collect()
    }

    pub fn forecast(&self, horizon: usize) -> Vec<ForecastPoint> {
        (1..=horizon)
            .map(|h| ForecastPoint::new(h, self.predict((self.n - 1) as f64 + h as f64)))
            .collect()
    }
}

fn det3(m: &Matrix3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn replace_column(m: &Matrix3, col: usize, v: &[f64; 3]) -> Matrix3 {
    let mut out = *m;
    for (row, value) in out.iter_mut().zip(v) {
        row[col] = *value;
    }
    out
}
