//! Common test utilities and data generators for integration tests
//!
//! This module provides:
//! - A roast-curve generator with charge drop, turning point and a decelerating rise
//! - Deterministic noise (fixed-seed LCG) so failures reproduce
//! - Channel dropout and spike injection to exercise the absent-vs-zero paths
//! - Assertion helpers shared by the integration tests

#![allow(dead_code)]

use roastline_core::{Seconds, TelemetrySample};

pub mod scenarios;

/// Bean probe reading at charge (°C)
pub const CHARGE_TEMP_C: f32 = 150.0;

/// Time of the turning point after charge (s)
pub const TURNING_POINT_SECS: f64 = 60.0;

/// Bean temperature at the turning point (°C)
pub const TURNING_POINT_TEMP_C: f32 = 92.0;

/// Test data generator for realistic roast telemetry
pub struct RoastGenerator {
    start_time: Seconds,
    seed: u32,
}

impl RoastGenerator {
    /// Create a generator whose first sample is at `start_time`
    pub fn new(start_time: Seconds) -> Self {
        Self { start_time, seed: 42 }
    }

    /// Noise-free bean temperature `elapsed` seconds after charge
    ///
    /// Linear drop to the turning point, then an exponential approach that
    /// crosses dry end around 5.5 min and first crack around 10 min.
    pub fn bean_temp_at(elapsed: Seconds) -> f32 {
        if elapsed < TURNING_POINT_SECS {
            let drop_per_sec = (CHARGE_TEMP_C - TURNING_POINT_TEMP_C) / TURNING_POINT_SECS as f32;
            CHARGE_TEMP_C - drop_per_sec * elapsed as f32
        } else {
            let rise = 1.0 - (-((elapsed - TURNING_POINT_SECS) / 400.0)).exp();
            TURNING_POINT_TEMP_C + 140.0 * rise as f32
        }
    }

    /// Generate a roast of `duration_secs` sampled every `interval_secs`
    ///
    /// Simulates:
    /// - Bean probe noise of ±`noise` °C
    /// - Environment probe running ~40 °C above the beans
    /// - Heater backing off as the roast approaches first crack
    pub fn generate_roast(&mut self, duration_secs: u32, interval_secs: f64, noise: f32) -> Vec<TelemetrySample> {
        let count = (duration_secs as f64 / interval_secs) as usize + 1;

        (0..count)
            .map(|i| {
                let elapsed = i as f64 * interval_secs;
                let bean = Self::bean_temp_at(elapsed) + self.random_noise(noise);
                let env = Self::bean_temp_at(elapsed) + 40.0 + self.random_noise(noise);
                let heater = if elapsed < 600.0 { 80 } else { 55 };

                TelemetrySample::at(self.start_time + elapsed)
                    .with_bean_temp(bean)
                    .with_env_temp(env)
                    .with_setpoint(220.0)
                    .with_duty(180, heater)
                    .with_control(1, true)
                    .with_gains(15.0, 1.0, 25.0)
            })
            .collect()
    }

    /// Clear the bean channel on roughly `fraction` of the samples
    pub fn drop_bean_channel(&mut self, samples: &mut [TelemetrySample], fraction: f32) {
        for sample in samples.iter_mut() {
            if self.random_float() < fraction {
                sample.bean_temp = None;
            }
        }
    }

    /// Add `amplitude` °C to the bean reading at `index` (a probe glitch)
    pub fn inject_spike(samples: &mut [TelemetrySample], index: usize, amplitude: f32) {
        if let Some(bean) = samples.get_mut(index).and_then(|s| s.bean_temp.as_mut()) {
            *bean += amplitude;
        }
    }

    /// Uniform noise in `[-amplitude, amplitude]`
    pub fn random_noise(&mut self, amplitude: f32) -> f32 {
        (self.random_float() - 0.5) * 2.0 * amplitude
    }

    /// Uniform in `[0, 1]`
    pub fn random_float(&mut self) -> f32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.seed as f32) / (u32::MAX as f32)
    }
}

/// Timestamps are non-decreasing
pub fn assert_chronological<T: roastline_core::Timestamped>(items: &[T]) {
    for pair in items.windows(2) {
        assert!(
            pair[0].timestamp() <= pair[1].timestamp(),
            "out of order: {} then {}",
            pair[0].timestamp(),
            pair[1].timestamp()
        );
    }
}

/// Every channel keeps its presence; rounded channels are within half a
/// rounding step of the source and copied channels are identical
pub fn assert_within_precision(original: &[TelemetrySample], decoded: &[TelemetrySample], precision: f64) {
    assert_eq!(original.len(), decoded.len());
    let tolerance = 0.5 / precision + 1e-4;

    for (a, b) in original.iter().zip(decoded) {
        assert!((a.timestamp - b.timestamp).abs() <= tolerance, "timestamp {} vs {}", a.timestamp, b.timestamp);
        assert_channel_close(a.bean_temp, b.bean_temp, tolerance);
        assert_channel_close(a.env_temp, b.env_temp, tolerance);
        assert_channel_close(a.setpoint, b.setpoint, tolerance);
        assert_channel_close(a.rate_of_rise, b.rate_of_rise, tolerance);
        assert_eq!(a.fan_pwm, b.fan_pwm);
        assert_eq!(a.heater_pwm, b.heater_pwm);
        assert_eq!(a.control_mode, b.control_mode);
        assert_eq!(a.heater_enable, b.heater_enable);
        assert_eq!(a.kp, b.kp);
        assert_eq!(a.ki, b.ki);
        assert_eq!(a.kd, b.kd);
    }
}

fn assert_channel_close(a: Option<f32>, b: Option<f32>, tolerance: f64) {
    match (a, b) {
        (Some(x), Some(y)) => assert!(((x - y).abs() as f64) <= tolerance, "{} vs {}", x, y),
        (None, None) => {}
        _ => panic!("channel presence changed: {:?} vs {:?}", a, b),
    }
}
