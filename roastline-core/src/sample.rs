//! Telemetry samples as delivered by the roaster
//!
//! ## Optional Channels
//!
//! Every channel except the timestamp is optional. The device does not sample
//! every channel on every tick, and "not sampled" must never be confused with a
//! reading of zero: a bean temperature of `None` means the probe was not read,
//! while `Some(0.0)` would be a (very cold) measurement. The engine carries that
//! distinction through buffering, thinning and compression unchanged.
//!
//! ## Wire Format
//!
//! The roaster publishes one JSON object per tick on `roaster/<id>/telemetry`:
//!
//! ```json
//! {"timestamp": 1712.0, "beanTemp": 182.4, "envTemp": 231.0, "rateOfRise": 9.8,
//!  "heaterPWM": 50, "fanPWM": 180, "setpoint": 200.0, "controlMode": 1,
//!  "heaterEnable": 1, "Kp": 15.0, "Ki": 1.0, "Kd": 25.0, "rssi": -40}
//! ```
//!
//! Keys the engine does not model (`uptime`, `freeHeap`, `rssi`, `systemStatus`)
//! are ignored. `heaterEnable` arrives as `0`/`1` from the firmware but is also
//! accepted as a JSON boolean.

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{TelemetryError, TelemetryResult};
use crate::traits::{Seconds, Timestamped};

/// One telemetry point from the roaster
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Sample time in seconds
    #[serde(default)]
    pub timestamp: Seconds,

    /// Bean temperature (°C)
    #[serde(rename = "beanTemp", default, skip_serializing_if = "Option::is_none")]
    pub bean_temp: Option<f32>,

    /// Environment (drum air) temperature (°C)
    #[serde(rename = "envTemp", default, skip_serializing_if = "Option::is_none")]
    pub env_temp: Option<f32>,

    /// Controller setpoint (°C)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<f32>,

    /// Fan duty (raw PWM)
    #[serde(rename = "fanPWM", default, skip_serializing_if = "Option::is_none")]
    pub fan_pwm: Option<u16>,

    /// Heater duty (raw PWM)
    #[serde(rename = "heaterPWM", default, skip_serializing_if = "Option::is_none")]
    pub heater_pwm: Option<u16>,

    /// Controller mode as reported by the firmware (0 = manual, 1 = auto)
    #[serde(rename = "controlMode", default, skip_serializing_if = "Option::is_none")]
    pub control_mode: Option<u8>,

    /// Whether the heater output is enabled
    #[serde(
        rename = "heaterEnable",
        default,
        deserialize_with = "flag_from_bool_or_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub heater_enable: Option<bool>,

    /// Rate of rise computed on the device (°C/min)
    #[serde(rename = "rateOfRise", default, skip_serializing_if = "Option::is_none")]
    pub rate_of_rise: Option<f32>,

    /// PID proportional gain
    #[serde(rename = "Kp", default, skip_serializing_if = "Option::is_none")]
    pub kp: Option<f32>,

    /// PID integral gain
    #[serde(rename = "Ki", default, skip_serializing_if = "Option::is_none")]
    pub ki: Option<f32>,

    /// PID derivative gain
    #[serde(rename = "Kd", default, skip_serializing_if = "Option::is_none")]
    pub kd: Option<f32>,
}

impl TelemetrySample {
    /// Create a sample at `timestamp` with no channels present
    pub fn at(timestamp: Seconds) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    /// Decode one device payload
    ///
    /// A payload without a `timestamp` key decodes with timestamp `0.0`; the
    /// ingestion side is expected to restamp it with [`TelemetrySample::restamped`].
    pub fn from_json(payload: &[u8]) -> TelemetryResult<Self> {
        serde_json::from_slice(payload).map_err(|e| TelemetryError::Payload(e.to_string()))
    }

    /// Same sample at a different time
    pub fn restamped(self, timestamp: Seconds) -> Self {
        Self { timestamp, ..self }
    }

    /// Set bean temperature
    pub fn with_bean_temp(mut self, value: f32) -> Self {
        self.bean_temp = Some(value);
        self
    }

    /// Set environment temperature
    pub fn with_env_temp(mut self, value: f32) -> Self {
        self.env_temp = Some(value);
        self
    }

    /// Set controller setpoint
    pub fn with_setpoint(mut self, value: f32) -> Self {
        self.setpoint = Some(value);
        self
    }

    /// Set fan and heater duty
    pub fn with_duty(mut self, fan_pwm: u16, heater_pwm: u16) -> Self {
        self.fan_pwm = Some(fan_pwm);
        self.heater_pwm = Some(heater_pwm);
        self
    }

    /// Set control mode and heater-enable flag
    pub fn with_control(mut self, mode: u8, heater_enable: bool) -> Self {
        self.control_mode = Some(mode);
        self.heater_enable = Some(heater_enable);
        self
    }

    /// Set device-reported rate of rise
    pub fn with_rate_of_rise(mut self, value: f32) -> Self {
        self.rate_of_rise = Some(value);
        self
    }

    /// Set PID gains
    pub fn with_gains(mut self, kp: f32, ki: f32, kd: f32) -> Self {
        self.kp = Some(kp);
        self.ki = Some(ki);
        self.kd = Some(kd);
        self
    }
}

impl Timestamped for TelemetrySample {
    fn timestamp(&self) -> Seconds {
        self.timestamp
    }
}

fn flag_from_bool_or_int<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
        Flag::Float(f) => f != 0.0,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_firmware_payload() {
        let payload = br#"{
            "timestamp": 12.0, "beanTemp": 100.0, "envTemp": 90.0, "rateOfRise": 10.0,
            "heaterPWM": 50, "fanPWM": 180, "setpoint": 200.0, "controlMode": 1,
            "heaterEnable": 1, "uptime": 1, "Kp": 15.0, "Ki": 1.0, "Kd": 25.0,
            "freeHeap": 0, "rssi": -40, "systemStatus": 0
        }"#;

        let sample = TelemetrySample::from_json(payload).unwrap();
        assert_eq!(sample.timestamp, 12.0);
        assert_eq!(sample.bean_temp, Some(100.0));
        assert_eq!(sample.fan_pwm, Some(180));
        assert_eq!(sample.heater_enable, Some(true));
        assert_eq!(sample.kd, Some(25.0));
    }

    #[test]
    fn missing_keys_stay_absent() {
        let sample = TelemetrySample::from_json(br#"{"timestamp": 5, "beanTemp": 0.0}"#).unwrap();
        assert_eq!(sample.bean_temp, Some(0.0));
        assert_eq!(sample.env_temp, None);
        assert_eq!(sample.heater_enable, None);
    }

    #[test]
    fn heater_flag_accepts_bool() {
        let sample = TelemetrySample::from_json(br#"{"heaterEnable": false}"#).unwrap();
        assert_eq!(sample.heater_enable, Some(false));
        assert_eq!(sample.restamped(3.0).timestamp, 3.0);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = TelemetrySample::from_json(b"{not json").unwrap_err();
        assert!(matches!(err, TelemetryError::Payload(_)));
    }

    #[test]
    fn absent_channels_are_not_serialized() {
        let json = serde_json::to_string(&TelemetrySample::at(1.0).with_bean_temp(200.0)).unwrap();
        assert_eq!(json, r#"{"timestamp":1.0,"beanTemp":200.0}"#);
    }
}
