//! Dead Reckoning Accuracy Tests
//!
//! Synthetic IMU sequences with known motion, run through the full
//! pipeline:
//! - Stationary log stays at the origin
//! - Constant acceleration matches the closed form
//! - Bias re-projection while yawing in place
//! - Kinematic model selection
//!
//! Run with: `cargo test --test dead_reckoning`

use approx::assert_relative_eq;
use gati::math::rotate_by_heading;
use gati::{
    AccelerationCorrector, BiasEstimate, DeadReckoning, DeadReckoningConfig, GatiError,
    ImuSample, KinematicModel, MovingAverage, SampleSeries, integrate_orientation,
};

// ============================================================================
// Test Configuration
// ============================================================================

const DT: f64 = 0.01;
const BIAS: [f64; 3] = [0.12, -0.07, 9.81];

fn config(filter_window: usize, kinematics: KinematicModel) -> DeadReckoningConfig {
    DeadReckoningConfig {
        bias_window_s: 2.0,
        filter_window,
        kinematics,
    }
}

/// `rest_s` at rest, then `move_s` with `accel` added on top of the bias.
fn start_then_accelerate(rest_s: f64, move_s: f64, accel: [f64; 3]) -> SampleSeries {
    let n_rest = (rest_s / DT).round() as usize;
    let n = n_rest + (move_s / DT).round() as usize;
    (0..n)
        .map(|i| {
            let a = if i >= n_rest { accel } else { [0.0; 3] };
            ImuSample::new(
                i as f64 * DT,
                [BIAS[0] + a[0], BIAS[1] + a[1], BIAS[2] + a[2]],
                [0.0; 3],
            )
        })
        .collect()
}

/// At rest for 2 s, then yawing in place at `rate` deg/s. The accelerometer
/// sees only the bias, re-projected by the integrated heading.
fn yaw_in_place(rate: f64, seconds: f64) -> SampleSeries {
    let n_rest = 200;
    let n = n_rest + (seconds / DT).round() as usize;

    let mut yaw = 0.0;
    (0..n)
        .map(|i| {
            let wz = if i >= n_rest { rate } else { 0.0 };
            if i > 0 {
                yaw += wz * DT;
            }
            let (ax, ay) = rotate_by_heading(BIAS[0], BIAS[1], yaw);
            ImuSample::new(i as f64 * DT, [ax, ay, BIAS[2]], [0.0, 0.0, wz])
        })
        .collect()
}

// ============================================================================
// Stationary
// ============================================================================

#[test]
fn test_stationary_stays_at_origin() {
    let series = start_then_accelerate(10.0, 0.0, [0.0; 3]);
    let result = DeadReckoning::new(config(100, KinematicModel::Kinematic))
        .run(&series)
        .unwrap();

    assert_eq!(result.len(), 1000);
    assert_relative_eq!(result.bias.accel[0], BIAS[0], epsilon = 1e-9);
    assert_relative_eq!(result.bias.accel[1], BIAS[1], epsilon = 1e-9);
    assert_relative_eq!(result.bias.accel[2], BIAS[2], epsilon = 1e-9);

    for value in result.position.final_position().unwrap() {
        assert_relative_eq!(value, 0.0, epsilon = 1e-6);
    }
}

// ============================================================================
// Straight Line
// ============================================================================

#[test]
fn test_constant_acceleration_straight_line() {
    // 2 s at 0.5 m/s² along y: v = 1 m/s, y = 1 m
    let series = start_then_accelerate(2.0, 2.0, [0.0, 0.5, 0.0]);
    let result = DeadReckoning::new(config(0, KinematicModel::Kinematic))
        .run(&series)
        .unwrap();

    let [vx, vy, vz] = result.position.velocity.last().unwrap();
    assert_relative_eq!(vy, 1.0, epsilon = 0.01);
    assert_relative_eq!(vx, 0.0, epsilon = 1e-9);
    assert_relative_eq!(vz, 0.0, epsilon = 1e-9);

    let [x, y, z] = result.position.final_position().unwrap();
    assert_relative_eq!(y, 1.0, epsilon = 0.02);
    assert_relative_eq!(x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(z, 0.0, epsilon = 1e-9);
}

#[test]
fn test_filter_delays_but_preserves_distance() {
    let series = start_then_accelerate(2.0, 4.0, [0.3, 0.0, 0.0]);

    let raw = DeadReckoning::new(config(0, KinematicModel::Kinematic))
        .run(&series)
        .unwrap();
    let smoothed = DeadReckoning::new(config(20, KinematicModel::Kinematic))
        .run(&series)
        .unwrap();

    let raw_x = raw.position.final_position().unwrap()[0];
    let smoothed_x = smoothed.position.final_position().unwrap()[0];

    // Smoothing lags the step by half a window, so it travels slightly less.
    assert!(smoothed_x < raw_x);
    assert_relative_eq!(smoothed_x, raw_x, max_relative = 0.1);
}

// ============================================================================
// Rotation In Place
// ============================================================================

#[test]
fn test_yaw_reprojection_cancels_rotating_bias() {
    let series = yaw_in_place(45.0, 4.0);
    let result = DeadReckoning::new(config(0, KinematicModel::Kinematic))
        .run(&series)
        .unwrap();

    assert_relative_eq!(*result.orientation.yaw().last().unwrap(), 180.0, epsilon = 1e-6);
    for value in result.position.final_position().unwrap() {
        assert_relative_eq!(value, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn test_static_correction_drifts_while_yawing() {
    let series = yaw_in_place(45.0, 4.0);
    let bias = BiasEstimate::from_values(BIAS);
    let corrector = AccelerationCorrector::new(MovingAverage::disabled());

    let yaw = integrate_orientation(&series).unwrap();
    let rotating = corrector.correct(&series, &bias, Some(yaw.yaw())).unwrap();
    let fixed = corrector.correct(&series, &bias, None).unwrap();

    let last = series.len() - 1;
    assert_relative_eq!(rotating.x[last], 0.0, epsilon = 1e-9);
    // At 180° the re-projected bias is the negated bias.
    assert_relative_eq!(fixed.x[last], -2.0 * BIAS[0], epsilon = 1e-6);
    assert_relative_eq!(fixed.y[last], -2.0 * BIAS[1], epsilon = 1e-6);
}

// ============================================================================
// Kinematic Models
// ============================================================================

#[test]
fn test_models_agree_on_velocity_and_differ_on_position() {
    let series = start_then_accelerate(2.0, 1.0, [1.0, 0.0, 0.0]);

    let results: Vec<_> = [
        KinematicModel::Rectangular,
        KinematicModel::Legacy,
        KinematicModel::Kinematic,
    ]
    .into_iter()
    .map(|model| DeadReckoning::new(config(0, model)).run(&series).unwrap())
    .collect();

    for result in &results[1..] {
        assert_eq!(result.position.velocity, results[0].position.velocity);
    }

    let finals: Vec<f64> = results
        .iter()
        .map(|r| r.position.final_position().unwrap()[0])
        .collect();

    // Rectangular leads kinematic by one step; both are near 0.5 m.
    assert!(finals[0] > finals[2]);
    assert_relative_eq!(finals[0], 0.5, epsilon = 0.02);
    assert_relative_eq!(finals[2], 0.5, epsilon = 0.02);

    // The legacy term adds 0.5·a per step once moving.
    assert!(finals[1] > 10.0);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_single_sample_traces() {
    let series = SampleSeries::new(vec![ImuSample::new(7.0, BIAS, [3.0, 2.0, 1.0])]);
    let result = DeadReckoning::default().run(&series).unwrap();

    assert_eq!(result.orientation.len(), 1);
    assert_eq!(result.position.len(), 1);
    assert_eq!(result.orientation.angles.at(0), Some([0.0; 3]));
    assert_eq!(result.position.position.at(0), Some([0.0; 3]));
}

#[test]
fn test_zero_window_is_insufficient() {
    let series = start_then_accelerate(1.0, 0.0, [0.0; 3]);
    let mut params = config(0, KinematicModel::Kinematic);
    params.bias_window_s = 0.0;

    assert!(matches!(
        DeadReckoning::new(params).run(&series),
        Err(GatiError::InsufficientData(_))
    ));
}

#[test]
fn test_non_monotonic_stamps_do_not_panic() {
    let series = SampleSeries::new(vec![
        ImuSample::new(0.0, [0.0; 3], [0.0, 0.0, 10.0]),
        ImuSample::new(1.0, [1.0; 3], [0.0, 0.0, 10.0]),
        ImuSample::new(0.5, [1.0; 3], [0.0, 0.0, 10.0]),
        ImuSample::new(0.5, [1.0; 3], [0.0, 0.0, 10.0]),
    ]);
    let result = DeadReckoning::new(config(2, KinematicModel::Legacy))
        .run(&series)
        .unwrap();

    assert_eq!(result.len(), 4);
    assert_relative_eq!(result.orientation.yaw()[2], 5.0, epsilon = 1e-12);
}
