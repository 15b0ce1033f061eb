//! Spin-weighted spherical harmonics and sky projection.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use num_complex::Complex64;

use crate::mode::ModeIndex;
use crate::waveform::WaveformModeSet;

/// Spin weight of the gravitational-wave strain.
pub const STRAIN_SPIN_WEIGHT: i32 = -2;

fn factorial(n: i32) -> f64 {
    (1..=n).map(f64::from).product()
}

fn binomial(n: i32, k: i32) -> f64 {
    if k < 0 || k > n {
        return 0.0;
    }
    factorial(n) / (factorial(k) * factorial(n - k))
}

/// ₛY_lm(θ, φ) from Goldberg's closed form.
///
/// Written in powers of sin(θ/2) and cos(θ/2), so the poles need no special
/// casing. Returns zero when |m| > l or |s| > l.
pub fn spin_weighted_ylm(s: i32, l: u32, m: i32, theta: f64, phi: f64) -> Complex64 {
    let l = l as i32;
    if m.abs() > l || s.abs() > l {
        return Complex64::new(0.0, 0.0);
    }

    let sign_m = if m % 2 == 0 { 1.0 } else { -1.0 };
    let norm = sign_m
        * (factorial(l + m) * factorial(l - m) * f64::from(2 * l + 1)
            / (4.0 * PI * factorial(l + s) * factorial(l - s)))
            .sqrt();

    let (sin_half, cos_half) = (theta / 2.0).sin_cos();
    let mut total = 0.0;
    for r in 0..=(l - s) {
        let k = r + s - m;
        if k < 0 || k > l + s {
            continue;
        }
        let p = 2 * r + s - m;
        let sign = if (l - r - s) % 2 == 0 { 1.0 } else { -1.0 };
        total += binomial(l - s, r)
            * binomial(l + s, k)
            * sign
            * sin_half.powi(2 * l - p)
            * cos_half.powi(p);
    }

    Complex64::from_polar(norm * total, f64::from(m) * phi)
}

/// Multiply every mode by its ₋₂Y_lm at (inclination, orbital phase).
pub fn project_modes(
    set: &WaveformModeSet,
    inclination: f64,
    orbital_phase: f64,
) -> BTreeMap<ModeIndex, Vec<Complex64>> {
    set.modes
        .iter()
        .map(|(mode, series)| {
            let y = spin_weighted_ylm(STRAIN_SPIN_WEIGHT, mode.l, mode.m, inclination, orbital_phase);
            (*mode, series.iter().map(|h| h * y).collect())
        })
        .collect()
}

/// Add projected modes into one detector-frame series h₊ − i h×.
pub fn sum_projected(projected: &BTreeMap<ModeIndex, Vec<Complex64>>, len: usize) -> Vec<Complex64> {
    let mut strain = vec![Complex64::new(0.0, 0.0); len];
    for series in projected.values() {
        for (acc, h) in strain.iter_mut().zip(series) {
            *acc += h;
        }
    }
    strain
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn close(a: Complex64, b: Complex64) {
        assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-13);
        assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-13);
    }

    #[test]
    fn test_quadrupole_closed_forms() {
        let (theta, phi) = (0.7, 0.3);
        let c = (5.0 / (64.0 * PI)).sqrt();
        close(
            spin_weighted_ylm(-2, 2, 2, theta, phi),
            Complex64::from_polar(c * (1.0 + theta.cos()).powi(2), 2.0 * phi),
        );
        close(
            spin_weighted_ylm(-2, 2, -2, theta, phi),
            Complex64::from_polar(c * (1.0 - theta.cos()).powi(2), -2.0 * phi),
        );
        close(
            spin_weighted_ylm(-2, 2, 1, theta, phi),
            Complex64::from_polar(
                (5.0 / (16.0 * PI)).sqrt() * theta.sin() * (1.0 + theta.cos()),
                phi,
            ),
        );
    }

    #[test]
    fn test_l3_reference_value() {
        close(
            spin_weighted_ylm(-2, 3, 3, 0.7, 0.3),
            Complex64::new(-0.285_030_998_553_484_85, -0.359_184_155_083_752_73),
        );
    }

    #[test]
    fn test_poles() {
        let face_on = spin_weighted_ylm(-2, 2, 2, 0.0, 0.0);
        assert_abs_diff_eq!(face_on.re, (5.0 / PI).sqrt() / 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(spin_weighted_ylm(-2, 2, 2, PI, 0.0).norm(), 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(spin_weighted_ylm(-2, 2, 1, 0.0, 0.0).norm(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_out_of_range_is_zero() {
        assert_eq!(spin_weighted_ylm(-2, 2, 3, 0.4, 0.0), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_project_and_sum() {
        let mut set = WaveformModeSet::new(vec![0.0, 1.0]);
        set.insert(ModeIndex::new(2, 2), vec![Complex64::new(1.0, 0.0); 2])
            .unwrap();
        set.insert(ModeIndex::new(2, -2), vec![Complex64::new(1.0, 0.0); 2])
            .unwrap();

        let projected = project_modes(&set, 0.7, 0.3);
        assert_eq!(projected.len(), 2);
        let y22 = spin_weighted_ylm(-2, 2, 2, 0.7, 0.3);
        close(projected[&ModeIndex::new(2, 2)][0], y22);

        let strain = sum_projected(&projected, 2);
        let y2m2 = spin_weighted_ylm(-2, 2, -2, 0.7, 0.3);
        close(strain[1], y22 + y2m2);
    }
}
