use crate::models::{CarModel, TyreCompound, TyreWear, Weather};
use crate::utils::Float;

/// A car performance model with linear effects, handy to predict test outcomes by hand.
pub struct TestCarModel {
    pub base_time: Float,
    pub age_penalty: Float,
    pub fuel_penalty: Float,
    pub wet_penalty: Float,
    pub wear_per_lap: Float,
    pub fuel_per_lap: Float,
    pub initial_fuel: Float,
}

impl Default for TestCarModel {
    fn default() -> Self {
        Self {
            base_time: 90_000.,
            age_penalty: 100.,
            fuel_penalty: 10.,
            wet_penalty: 5_000.,
            wear_per_lap: 0.03,
            fuel_per_lap: 1.5,
            initial_fuel: 60.,
        }
    }
}

impl CarModel for TestCarModel {
    fn predict_lap_time(
        &self,
        _compound: TyreCompound,
        tyre_age: usize,
        _lap: usize,
        fuel_load: Float,
        weather: &[Weather],
        _drs: bool,
    ) -> Float {
        let wet_time = match weather.last() {
            Some(Weather::Wet) => self.wet_penalty,
            _ => 0.,
        };

        self.base_time + tyre_age as Float * self.age_penalty + fuel_load * self.fuel_penalty + wet_time
    }

    fn predict_tyre_wear(&self, _compound: TyreCompound, tyre_age: usize) -> TyreWear {
        let wear = (tyre_age as Float * self.wear_per_lap).min(1.);
        TyreWear::new(wear, wear, wear, wear)
    }

    fn predict_fuel_load(&self, initial_fuel: Float, weather: &[Weather]) -> Float {
        initial_fuel - (weather.len() as Float - 1.) * self.fuel_per_lap
    }

    fn predict_initial_fuel_load(&self, _weather: &[Weather]) -> Float {
        self.initial_fuel
    }
}
