//! Pre-built roast scenarios for integration testing
//!
//! Each scenario bundles a telemetry history with the landmarks it is known to
//! contain, so tests can assert against ground truth instead of re-deriving it.

use roastline_core::{Seconds, TelemetrySample};

use super::RoastGenerator;

/// Roast history with known landmarks (elapsed seconds)
pub struct RoastScenario {
    pub name: &'static str,
    pub samples: Vec<TelemetrySample>,
    pub dry_end: Option<Seconds>,
    pub first_crack: Option<Seconds>,
}

/// Scenario catalogue
pub struct Scenarios;

impl Scenarios {
    /// 14 minute roast at 1 Hz with light probe noise, taken past first crack
    pub fn full_roast() -> RoastScenario {
        let samples = RoastGenerator::new(1_712_000_000.0).generate_roast(840, 1.0, 0.1);
        RoastScenario {
            name: "full_roast",
            dry_end: first_crossing(&samples, 160.0),
            first_crack: first_crossing(&samples, 196.0),
            samples,
        }
    }

    /// Roast aborted at 3 minutes, before dry end
    pub fn aborted_roast() -> RoastScenario {
        let samples = RoastGenerator::new(0.0).generate_roast(180, 1.0, 0.0);
        RoastScenario {
            name: "aborted_roast",
            dry_end: None,
            first_crack: None,
            samples,
        }
    }

    /// Full roast with the bean probe missing on ~20% of ticks
    pub fn flaky_probe() -> RoastScenario {
        let mut generator = RoastGenerator::new(500.0);
        let mut samples = generator.generate_roast(840, 1.0, 0.1);
        generator.drop_bean_channel(&mut samples, 0.2);
        RoastScenario {
            name: "flaky_probe",
            dry_end: None,
            first_crack: None,
            samples,
        }
    }
}

fn first_crossing(samples: &[TelemetrySample], threshold: f32) -> Option<Seconds> {
    let start = samples.first()?.timestamp;
    samples
        .iter()
        .find(|s| s.bean_temp.is_some_and(|t| t >= threshold))
        .map(|s| s.timestamp - start)
}
