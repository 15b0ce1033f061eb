//! Gaussian-process regression posterior mean.
//!
//! The kernel is a constant times an anisotropic squared exponential. Any
//! white-noise term only touches the training diagonal, so it drops out of
//! the prediction at a new point. Targets were standardized before training
//! and an optional linear trend was subtracted; both are undone here.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LinearTrend {
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.intercept + self.coef.iter().zip(x).map(|(c, v)| c * v).sum::<f64>()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GprFit {
    pub x_train: Vec<Vec<f64>>,
    /// Dual coefficients `K⁻¹ y` from training.
    pub alpha: Vec<f64>,
    pub constant: f64,
    pub length_scales: Vec<f64>,
    #[serde(default)]
    pub y_train_mean: f64,
    #[serde(default)]
    pub data_mean: f64,
    #[serde(default = "one")]
    pub data_std: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linear: Option<LinearTrend>,
}

fn one() -> f64 {
    1.0
}

impl GprFit {
    pub fn dim(&self) -> usize {
        self.length_scales.len()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.x_train.len() != self.alpha.len() {
            return Err(format!(
                "GPR has {} training points but {} dual coefficients",
                self.x_train.len(),
                self.alpha.len()
            ));
        }
        let d = self.dim();
        if d == 0 {
            return Err("GPR needs at least one length scale".to_string());
        }
        if self.length_scales.iter().any(|l| *l <= 0.0) {
            return Err("GPR length scales must be positive".to_string());
        }
        if self.x_train.iter().any(|x| x.len() != d) {
            return Err(format!("GPR training points must have dimension {d}"));
        }
        if let Some(linear) = &self.linear
            && linear.coef.len() != d
        {
            return Err(format!(
                "GPR linear trend has {} coefficients, expected {d}",
                linear.coef.len()
            ));
        }
        Ok(())
    }

    fn kernel(&self, a: &[f64], b: &[f64]) -> f64 {
        let r2: f64 = a
            .iter()
            .zip(b)
            .zip(&self.length_scales)
            .map(|((x, y), l)| {
                let u = (x - y) / l;
                u * u
            })
            .sum();
        self.constant * (-0.5 * r2).exp()
    }

    /// Posterior mean at `x`.
    pub fn predict(&self, x: &[f64]) -> f64 {
        let k_star = DVector::from_iterator(
            self.x_train.len(),
            self.x_train.iter().map(|xi| self.kernel(x, xi)),
        );
        let alpha = DVector::from_column_slice(&self.alpha);
        let standardized = k_star.dot(&alpha) + self.y_train_mean;
        let trend = self.linear.as_ref().map_or(0.0, |l| l.evaluate(x));
        standardized * self.data_std + self.data_mean + trend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn single_point() -> GprFit {
        GprFit {
            x_train: vec![vec![0.0, 0.0]],
            alpha: vec![2.0],
            constant: 1.5,
            length_scales: vec![1.0, 0.5],
            y_train_mean: 0.0,
            data_mean: 0.0,
            data_std: 1.0,
            linear: None,
        }
    }

    #[test]
    fn test_predict_at_training_point() {
        let fit = single_point();
        fit.validate().unwrap();
        assert_abs_diff_eq!(fit.predict(&[0.0, 0.0]), 3.0, epsilon = 1e-14);
    }

    #[test]
    fn test_predict_respects_length_scales() {
        let fit = single_point();
        // Unit step along the short axis is two length scales away.
        let along_short = fit.predict(&[0.0, 1.0]);
        let along_long = fit.predict(&[1.0, 0.0]);
        assert_abs_diff_eq!(along_short, 3.0 * (-2.0f64).exp(), epsilon = 1e-14);
        assert_abs_diff_eq!(along_long, 3.0 * (-0.5f64).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_destandardize_and_trend() {
        let mut fit = single_point();
        fit.y_train_mean = 0.5;
        fit.data_mean = 10.0;
        fit.data_std = 2.0;
        fit.linear = Some(LinearTrend {
            coef: vec![1.0, -1.0],
            intercept: 0.25,
        });
        fit.validate().unwrap();
        // (3 + 0.5) * 2 + 10 + 0.25
        assert_abs_diff_eq!(fit.predict(&[0.0, 0.0]), 17.25, epsilon = 1e-14);
    }

    #[test]
    fn test_far_point_reverts_to_mean() {
        let mut fit = single_point();
        fit.data_mean = -4.0;
        assert_abs_diff_eq!(fit.predict(&[100.0, 100.0]), -4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validate_shapes() {
        let mut fit = single_point();
        fit.alpha.push(1.0);
        assert!(fit.validate().is_err());

        let mut fit = single_point();
        fit.x_train[0].push(0.0);
        assert!(fit.validate().is_err());

        let mut fit = single_point();
        fit.length_scales[1] = 0.0;
        assert!(fit.validate().is_err());
    }
}
