//! Double integration of corrected acceleration into velocity and position.
//!
//! Velocity always uses the forward rectangular rule:
//!
//! ```text
//! v[0] = 0
//! v[i] = v[i-1] + a[i] × dt        dt = t[i] - t[i-1]
//! ```
//!
//! Position starts at zero and advances according to a [`KinematicModel`]:
//!
//! | Model         | Update                                                   |
//! |---------------|----------------------------------------------------------|
//! | `Rectangular` | `p[i-1] + v[i]·dt`                                       |
//! | `Legacy`      | `p[i-1] + v[i]·dt + 0.5·(a[i] - a[i-1]·dt·dt)`           |
//! | `Kinematic`   | `p[i-1] + v[i-1]·dt + 0.5·a[i-1]·dt²`                    |
//!
//! `Legacy` reproduces the correction term of the old analysis scripts
//! verbatim. It mixes an acceleration with an acceleration·time² term and is
//! only useful for comparing against plots produced by those scripts.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::math::{check_aligned, cumulative_scan, integrate_rectangular};
use crate::core::types::{PositionTrace, Trace3};
use crate::error::Result;

/// Position update rule.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum KinematicModel {
    /// Same rectangular rule as velocity, applied to velocity.
    Rectangular,

    /// Rectangular rule plus the old scripts' `0.5·(a[i] - a[i-1]·dt²)` term.
    Legacy,

    /// Constant-acceleration step from the previous state.
    #[default]
    Kinematic,
}

impl KinematicModel {
    /// Next position from the previous one.
    ///
    /// `cur` and `prev` are `(acceleration, velocity)` at i and i-1.
    #[inline]
    fn step(self, p_prev: f64, cur: (f64, f64), prev: (f64, f64), dt: f64) -> f64 {
        let (a, v) = cur;
        let (a_prev, v_prev) = prev;
        match self {
            KinematicModel::Rectangular => p_prev + v * dt,
            KinematicModel::Legacy => p_prev + v * dt + 0.5 * (a - a_prev * dt * dt),
            KinematicModel::Kinematic => p_prev + v_prev * dt + 0.5 * a_prev * dt * dt,
        }
    }
}

impl std::fmt::Display for KinematicModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KinematicModel::Rectangular => write!(f, "rectangular"),
            KinematicModel::Legacy => write!(f, "legacy"),
            KinematicModel::Kinematic => write!(f, "kinematic"),
        }
    }
}

/// Integrate acceleration into velocity.
pub fn integrate_velocity(accel: &[f64], stamps: &[f64]) -> Result<Vec<f64>> {
    integrate_rectangular(accel, stamps)
}

/// Integrate velocity (and acceleration, for the correction terms) into
/// position.
pub fn integrate_position(
    accel: &[f64],
    velocity: &[f64],
    stamps: &[f64],
    model: KinematicModel,
) -> Result<Vec<f64>> {
    check_aligned(stamps, accel)?;
    check_aligned(stamps, velocity)?;

    let states: Vec<(f64, f64, f64)> = stamps
        .iter()
        .zip(accel)
        .zip(velocity)
        .map(|((&t, &a), &v)| (t, a, v))
        .collect();

    Ok(cumulative_scan(
        &states,
        0.0,
        |&p_prev, &(t, a, v), &(t_prev, a_prev, v_prev)| {
            model.step(p_prev, (a, v), (a_prev, v_prev), t - t_prev)
        },
    ))
}

/// Double integrator over three axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionIntegrator {
    model: KinematicModel,
}

impl PositionIntegrator {
    /// Create an integrator using `model` for the position step.
    pub fn new(model: KinematicModel) -> Self {
        Self { model }
    }

    /// The configured position update rule.
    pub fn model(&self) -> KinematicModel {
        self.model
    }

    /// Integrate one acceleration channel into `(velocity, position)`.
    pub fn integrate_axis(&self, accel: &[f64], stamps: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        let velocity = integrate_velocity(accel, stamps)?;
        let position = integrate_position(accel, &velocity, stamps, self.model)?;
        Ok((velocity, position))
    }

    /// Integrate corrected acceleration on every axis.
    pub fn integrate(&self, accel: &Trace3, stamps: &[f64]) -> Result<PositionTrace> {
        let (vx, px) = self.integrate_axis(&accel.x, stamps)?;
        let (vy, py) = self.integrate_axis(&accel.y, stamps)?;
        let (vz, pz) = self.integrate_axis(&accel.z, stamps)?;

        let trace = PositionTrace {
            velocity: Trace3::from_channels(vx, vy, vz)?,
            position: Trace3::from_channels(px, py, pz)?,
        };

        if let Some([x, y, z]) = trace.final_position() {
            log::debug!(
                "Position ({}) over {} samples: final [{:.4}, {:.4}, {:.4}]",
                self.model,
                trace.len(),
                x,
                y,
                z
            );
        }

        Ok(trace)
    }
}
