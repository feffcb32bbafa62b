#[cfg(test)]
#[path = "../../tests/unit/models/strategy_test.rs"]
mod strategy_test;

use crate::models::{format_time, Milliseconds, TyreCompound, TyreInventory, TyreStatus, TyreWear, Weather};
use crate::utils::Float;
use std::fmt;

/// Represents a complete race plan: per lap tyre and pit stop decisions together with
/// quantities derived from them. All per lap vectors have exactly one entry per race lap.
#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    /// A tyre compound mounted on each lap.
    pub compounds: Vec<TyreCompound>,
    /// Tells for each lap whether the mounted set was new or used.
    pub statuses: Vec<TyreStatus>,
    /// An age of the mounted set on each lap, in laps.
    pub ages: Vec<usize>,
    /// Predicted wear of the mounted set on each lap.
    pub wear: Vec<TyreWear>,
    /// Predicted fuel left at each lap.
    pub fuel: Vec<Float>,
    /// Tells for each lap whether the car enters the pit lane. The first lap is never a pit stop.
    pub pit_stops: Vec<bool>,
    /// Predicted lap times including pit stop and race start penalties.
    pub lap_times: Vec<Milliseconds>,
    /// Track conditions on each lap, fixed before the search starts.
    pub weather: Vec<Weather>,
    /// Amount of pit stops, kept in sync with `pit_stops`.
    pub pit_stop_count: usize,
    /// Tyre sets left after this plan consumed its share of the race allocation.
    pub inventory: TyreInventory,
    /// A sum of all lap times or infinity when the plan is not drivable.
    pub total_time: Float,
}

impl Strategy {
    /// Creates a strategy with no laps planned yet.
    pub(crate) fn empty(weather: Vec<Weather>, inventory: TyreInventory) -> Self {
        let laps = weather.len();
        Self {
            compounds: Vec::with_capacity(laps),
            statuses: Vec::with_capacity(laps),
            ages: Vec::with_capacity(laps),
            wear: Vec::with_capacity(laps),
            fuel: Vec::with_capacity(laps),
            pit_stops: Vec::with_capacity(laps),
            lap_times: Vec::with_capacity(laps),
            weather,
            pit_stop_count: 0,
            inventory,
            total_time: Float::INFINITY,
        }
    }

    /// Returns the amount of laps covered by the strategy.
    pub fn laps(&self) -> usize {
        self.compounds.len()
    }

    /// Checks whether the strategy can be driven to the end of the race.
    pub fn is_feasible(&self) -> bool {
        self.total_time.is_finite()
    }

    /// Counts laps flagged as pit stops.
    pub fn count_pit_stops(&self) -> usize {
        self.pit_stops.iter().filter(|&&pit| pit).count()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lap in 0..self.laps() {
            writeln!(
                f,
                "lap {:>2} [{}]: {} {} (age {}), wear {:.2}, fuel {:>5.1}, pit {}, time {}",
                lap + 1,
                self.weather[lap],
                self.compounds[lap],
                self.statuses[lap],
                self.ages[lap],
                self.wear[lap].max(),
                self.fuel[lap],
                if self.pit_stops[lap] { "yes" } else { "no " },
                format_time(self.lap_times[lap] as Float),
            )?;
        }

        write!(f, "total time: {}, pit stops: {}", format_time(self.total_time), self.pit_stop_count)
    }
}
