//! One-dimensional B-spline in `(knots, coefficients, degree)` form.
//!
//! Evaluation follows the usual `splev` convention: outside the base interval
//! the first or last polynomial piece is extended, so extrapolation is smooth.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BSpline {
    pub knots: Vec<f64>,
    /// May be longer than `knots.len() - degree - 1` (zero padded); the tail is ignored.
    pub coefficients: Vec<f64>,
    pub degree: usize,
}

impl BSpline {
    pub fn new(knots: Vec<f64>, coefficients: Vec<f64>, degree: usize) -> Result<Self, String> {
        let spline = Self {
            knots,
            coefficients,
            degree,
        };
        spline.validate()?;
        Ok(spline)
    }

    /// Number of active basis functions.
    pub fn n_basis(&self) -> usize {
        self.knots.len().saturating_sub(self.degree + 1)
    }

    pub fn validate(&self) -> Result<(), String> {
        let k = self.degree;
        if self.knots.len() < 2 * (k + 1) {
            return Err(format!(
                "spline of degree {k} needs at least {} knots, got {}",
                2 * (k + 1),
                self.knots.len()
            ));
        }
        if self.coefficients.len() < self.n_basis() {
            return Err(format!(
                "spline has {} coefficients, needs {}",
                self.coefficients.len(),
                self.n_basis()
            ));
        }
        if self.knots.windows(2).any(|w| w[1] < w[0]) {
            return Err("spline knots must be non-decreasing".to_string());
        }
        if self.knots[k] >= self.knots[self.n_basis()] {
            return Err("spline base interval is empty".to_string());
        }
        Ok(())
    }

    /// Knot span `s` with `knots[s] <= x < knots[s + 1]`, clamped to the base interval.
    fn span(&self, x: f64) -> usize {
        let k = self.degree;
        let n = self.n_basis();
        // Largest s in [k, n-1] with knots[s] <= x.
        let upper = &self.knots[k + 1..n];
        k + upper.partition_point(|&t| t <= x)
    }

    /// Evaluate at `x` with de Boor's recursion.
    pub fn evaluate(&self, x: f64) -> f64 {
        let k = self.degree;
        let s = self.span(x);
        let t = &self.knots;
        let mut d: Vec<f64> = (0..=k).map(|j| self.coefficients[j + s - k]).collect();

        for r in 1..=k {
            for j in (r..=k).rev() {
                let i = j + s - k;
                let denom = t[i + 1 + k - r] - t[i];
                let alpha = if denom == 0.0 { 0.0 } else { (x - t[i]) / denom };
                d[j] = (1.0 - alpha) * d[j - 1] + alpha * d[j];
            }
        }
        d[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linear_spline_interpolates_nodes() {
        // Piecewise linear through (0,0), (1,1), (2,4).
        let s = BSpline::new(vec![0.0, 0.0, 1.0, 2.0, 2.0], vec![0.0, 1.0, 4.0], 1).unwrap();
        assert_abs_diff_eq!(s.evaluate(0.0), 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(s.evaluate(0.5), 0.5, epsilon = 1e-14);
        assert_abs_diff_eq!(s.evaluate(1.0), 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(s.evaluate(1.5), 2.5, epsilon = 1e-14);
        assert_abs_diff_eq!(s.evaluate(2.0), 4.0, epsilon = 1e-14);
    }

    #[test]
    fn test_linear_spline_extrapolates_end_pieces() {
        let s = BSpline::new(vec![0.0, 0.0, 1.0, 2.0, 2.0], vec![0.0, 1.0, 4.0], 1).unwrap();
        assert_abs_diff_eq!(s.evaluate(-1.0), -1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(s.evaluate(3.0), 7.0, epsilon = 1e-14);
    }

    #[test]
    fn test_cubic_reproduces_identity() {
        // Clamped cubic with Greville-spaced coefficients reproduces f(x) = x.
        let s = BSpline::new(
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0],
            3,
        )
        .unwrap();
        for &x in &[0.0, 0.1, 0.37, 0.5, 0.99, 1.0] {
            assert_abs_diff_eq!(s.evaluate(x), x, epsilon = 1e-13);
        }
    }

    #[test]
    fn test_cubic_interior_knot_quadratic() {
        // x² on [0, 2] with one interior knot: coefficients from blossoming.
        let s = BSpline::new(
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 2.0],
            vec![0.0, 0.0, 2.0 / 3.0, 8.0 / 3.0, 4.0],
            3,
        )
        .unwrap();
        for &x in &[0.0, 0.25, 0.8, 1.0, 1.4, 2.0] {
            assert_abs_diff_eq!(s.evaluate(x), x * x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_padded_coefficients_are_accepted() {
        let s = BSpline::new(
            vec![0.0, 0.0, 1.0, 2.0, 2.0],
            vec![0.0, 1.0, 4.0, 0.0, 0.0],
            1,
        )
        .unwrap();
        assert_abs_diff_eq!(s.evaluate(1.5), 2.5, epsilon = 1e-14);
    }

    #[test]
    fn test_rejects_short_knots() {
        assert!(BSpline::new(vec![0.0, 1.0], vec![1.0], 1).is_err());
        assert!(BSpline::new(vec![0.0, 0.0, 1.0, 1.0], vec![1.0], 1).is_err());
    }
}
