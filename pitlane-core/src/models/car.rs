use crate::models::{TyreCompound, TyreWear, Weather};
use crate::utils::Float;

/// Predicts car performance under given race conditions.
///
/// Implementations are typically fitted on telemetry upstream and are consumed by the solver
/// as a black box: predictions must be deterministic for the same inputs.
pub trait CarModel: Send + Sync {
    /// Predicts a lap time in milliseconds without pit lane and race start penalties.
    /// Here `weather` covers conditions from the race start up to and including the given lap
    /// and `drs` tells whether the drag reduction system can be used on this lap.
    fn predict_lap_time(
        &self,
        compound: TyreCompound,
        tyre_age: usize,
        lap: usize,
        fuel_load: Float,
        weather: &[Weather],
        drs: bool,
    ) -> Float;

    /// Predicts per wheel wear fractions after `tyre_age` laps on the given compound.
    fn predict_tyre_wear(&self, compound: TyreCompound, tyre_age: usize) -> TyreWear;

    /// Predicts the fuel left after the laps covered by `weather` for the given starting load.
    fn predict_fuel_load(&self, initial_fuel: Float, weather: &[Weather]) -> Float;

    /// Predicts a fuel load sufficient to finish a race under the given conditions.
    fn predict_initial_fuel_load(&self, weather: &[Weather]) -> Float;
}
