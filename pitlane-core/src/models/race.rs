#[cfg(test)]
#[path = "../../tests/unit/models/race_test.rs"]
mod race_test;

use crate::utils::{Float, Random};
use std::fmt;

/// Specifies a time value in milliseconds.
pub type Milliseconds = u64;

/// Represents track conditions on a single lap.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Weather {
    /// A dry track.
    Dry,
    /// A wet track.
    Wet,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Dry => f.write_str("dry"),
            Weather::Wet => f.write_str("wet"),
        }
    }
}

/// Represents static parameters of a race at a specific circuit.
#[derive(Clone, Debug)]
pub struct RaceParameters {
    /// Total amount of laps in the race.
    pub laps: usize,
    /// Time lost for driving through the pit lane and changing tyres, in milliseconds.
    pub pit_stop_time: Milliseconds,
}

/// Samples per lap track conditions: each lap is wet with the given probability.
pub fn sample_weather(laps: usize, wet_probability: Float, random: &(dyn Random + Send + Sync)) -> Vec<Weather> {
    (0..laps).map(|_| if random.is_hit(wet_probability) { Weather::Wet } else { Weather::Dry }).collect()
}

/// Formats a time given in milliseconds as `h:mm:ss.mmm`.
pub fn format_time(time: Float) -> String {
    if !time.is_finite() {
        return "inf".to_string();
    }

    let total = time.round() as u64;
    let millis = total % 1000;
    let seconds = (total / 1000) % 60;
    let minutes = (total / 60_000) % 60;
    let hours = total / 3_600_000;

    format!("{hours}:{minutes:02}:{seconds:02}.{millis:03}")
}
