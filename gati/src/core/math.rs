//! Numerical primitives shared by the integrators.
//!
//! Everything here is a pure function over slices; no allocation beyond the
//! returned vector.

use crate::error::{GatiError, Result};

/// Cumulative scan over consecutive pairs.
///
/// Returns one value per item: `init` for the first item, then
/// `step(previous_accumulated, current, previous)` for every later item.
/// Empty input yields an empty vector.
///
/// # Example
/// ```
/// use gati::core::math::cumulative_scan;
///
/// let counts = cumulative_scan(&[5, 7, 9], 0, |acc, cur, prev| acc + (cur - prev));
/// assert_eq!(counts, vec![0, 2, 4]);
/// ```
pub fn cumulative_scan<S, T, F>(items: &[S], init: T, mut step: F) -> Vec<T>
where
    F: FnMut(&T, &S, &S) -> T,
{
    let mut out = Vec::with_capacity(items.len());
    if items.is_empty() {
        return out;
    }

    out.push(init);
    for pair in items.windows(2) {
        let next = match out.last() {
            Some(acc) => step(acc, &pair[1], &pair[0]),
            None => break,
        };
        out.push(next);
    }
    out
}

/// Forward rectangular integration of `values` over `stamps`.
///
/// `out[0] = 0`, `out[i] = out[i-1] + values[i] * (stamps[i] - stamps[i-1])`.
/// Non-monotonic stamps yield zero or negative steps; they are not rejected.
///
/// # Example
/// ```
/// use gati::core::math::integrate_rectangular;
///
/// let angle = integrate_rectangular(&[2.0, 2.0, 2.0], &[0.0, 0.5, 1.0]).unwrap();
/// assert_eq!(angle, vec![0.0, 1.0, 2.0]);
/// ```
pub fn integrate_rectangular(values: &[f64], stamps: &[f64]) -> Result<Vec<f64>> {
    check_aligned(stamps, values)?;

    let pairs: Vec<(f64, f64)> = stamps.iter().copied().zip(values.iter().copied()).collect();
    Ok(cumulative_scan(&pairs, 0.0, |acc, &(t, v), &(t_prev, _)| {
        acc + v * (t - t_prev)
    }))
}

/// Fail with `LengthMismatch` unless `channel` has one value per stamp.
pub fn check_aligned(stamps: &[f64], channel: &[f64]) -> Result<()> {
    if stamps.len() != channel.len() {
        return Err(GatiError::LengthMismatch {
            expected: stamps.len(),
            actual: channel.len(),
        });
    }
    Ok(())
}

/// Project a body-frame 2D vector into a frame rotated by `heading_deg`.
///
/// Returns the `(x, y)` components subtracted by the acceleration
/// corrector: `(by·sin θ + bx·cos θ, by·cos θ - bx·sin θ)`.
#[inline]
pub fn rotate_by_heading(bx: f64, by: f64, heading_deg: f64) -> (f64, f64) {
    let (sin, cos) = heading_deg.to_radians().sin_cos();
    (by * sin + bx * cos, by * cos - bx * sin)
}

/// Arithmetic mean, `None` for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
