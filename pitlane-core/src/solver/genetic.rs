#[cfg(test)]
#[path = "../../tests/unit/solver/genetic_test.rs"]
mod genetic_test;

use crate::models::{
    sample_weather, CarModel, Milliseconds, RaceParameters, Strategy, TyreCompound, TyreInventory, TyreStatus,
    TyreWear, Weather,
};
use crate::solver::{Telemetry, TelemetryMetrics, TelemetryMode};
use crate::utils::{compare_floats, parallel_into_collect, Environment, Float, GenericResult, Timer};
use std::cmp::Ordering;
use std::sync::Arc;

/// A wear fraction which, once reached on any wheel, forces a tyre change on that lap.
const WEAR_PIT_THRESHOLD: Float = 0.8;
/// A wear fraction below which (on all wheels) a random tyre change is never taken.
const WEAR_NO_PIT_THRESHOLD: Float = 0.4;
/// Minimal fuel amount which must be left after the final lap.
const FUEL_RESERVE: Float = 1.;
/// Extra time lost on the opening lap due to the standing start, in milliseconds.
const WARM_UP_TIME: Milliseconds = 2000;
/// Maximal deviation from the predicted initial fuel load when seeding a random strategy.
const FUEL_VARIATION: i32 = 10;

/// An outcome of the repair pass.
pub(crate) enum Feasibility {
    /// A strategy with all derived quantities rebuilt.
    Feasible(Strategy),
    /// The tyre allocation ran out, the strategy cannot be completed.
    Infeasible,
}

/// Searches for the fastest race strategy using a genetic algorithm over a fixed size
/// population of candidate plans.
pub struct GeneticSolver {
    race: RaceParameters,
    car: Arc<dyn CarModel>,
    weather: Vec<Weather>,
    allocation: TyreInventory,
    population_size: usize,
    generations: usize,
    sigma: Float,
    mu: Float,
    survival_rate: Float,
    telemetry_mode: TelemetryMode,
    pub(crate) environment: Arc<Environment>,
}

/// Provides a way to configure the genetic solver using a fluent interface.
pub struct GeneticSolverBuilder {
    car: Option<Arc<dyn CarModel>>,
    race: Option<RaceParameters>,
    weather: Option<Vec<Weather>>,
    allocation: Option<TyreInventory>,
    population_size: usize,
    generations: usize,
    sigma: Float,
    mu: Float,
    survival_rate: Float,
    wet_probability: Float,
    telemetry_mode: Option<TelemetryMode>,
    environment: Option<Arc<Environment>>,
}

impl Default for GeneticSolverBuilder {
    fn default() -> Self {
        Self {
            car: None,
            race: None,
            weather: None,
            allocation: None,
            population_size: 50,
            generations: 100,
            sigma: 0.5,
            mu: 0.5,
            survival_rate: 0.4,
            wet_probability: 0.1,
            telemetry_mode: None,
            environment: None,
        }
    }
}

impl GeneticSolverBuilder {
    /// Sets a car performance model.
    pub fn with_car_model(mut self, car: Arc<dyn CarModel>) -> Self {
        self.car = Some(car);
        self
    }

    /// Sets race parameters.
    pub fn with_race(mut self, race: RaceParameters) -> Self {
        self.race = Some(race);
        self
    }

    /// Sets per lap track conditions. When not set, conditions are sampled from wet probability.
    pub fn with_weather(mut self, weather: Vec<Weather>) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Sets a probability of a wet lap used to sample track conditions.
    pub fn with_wet_probability(mut self, wet_probability: Float) -> Self {
        self.wet_probability = wet_probability;
        self
    }

    /// Sets tyre sets available for the race.
    pub fn with_tyre_allocation(mut self, allocation: TyreInventory) -> Self {
        self.allocation = Some(allocation);
        self
    }

    /// Sets an amount of strategies kept in the population.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets an amount of generations to run.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets a mutation probability applied to every crossover child.
    pub fn with_mutation_probability(mut self, sigma: Float) -> Self {
        self.sigma = sigma;
        self
    }

    /// Sets a crossover (recombination) probability applied to every pair of survivors.
    pub fn with_crossover_probability(mut self, mu: Float) -> Self {
        self.mu = mu;
        self
    }

    /// Sets a share of the population which survives the selection.
    pub fn with_survival_rate(mut self, survival_rate: Float) -> Self {
        self.survival_rate = survival_rate;
        self
    }

    /// Sets a telemetry mode.
    pub fn with_telemetry_mode(mut self, telemetry_mode: TelemetryMode) -> Self {
        self.telemetry_mode = Some(telemetry_mode);
        self
    }

    /// Sets an environment.
    pub fn with_environment(mut self, environment: Arc<Environment>) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Builds a solver checking all parameters.
    pub fn build(self) -> GenericResult<GeneticSolver> {
        let environment = self.environment.unwrap_or_else(|| Arc::new(Environment::default()));
        let logger = environment.logger.clone();

        let car = self.car.ok_or_else(|| "a car performance model must be set".to_string())?;
        let race = self.race.ok_or_else(|| "race parameters must be set".to_string())?;

        if race.laps < 3 {
            return Err(format!("expected a race of at least 3 laps, got {}", race.laps).into());
        }

        if !(0. ..=1.).contains(&self.sigma) {
            return Err(format!("mutation probability must be in [0., 1.], got {}", self.sigma).into());
        }

        if !(0. ..=1.).contains(&self.mu) {
            return Err(format!("crossover probability must be in [0., 1.], got {}", self.mu).into());
        }

        if !(0. ..=1.).contains(&self.wet_probability) {
            return Err(format!("wet probability must be in [0., 1.], got {}", self.wet_probability).into());
        }

        if self.survival_rate <= 0. || self.survival_rate > 1. {
            return Err(format!("survival rate must be in (0., 1.], got {}", self.survival_rate).into());
        }

        if self.population_size < 2 {
            return Err(format!("population size must be at least 2, got {}", self.population_size).into());
        }

        if self.generations == 0 {
            return Err("expected at least one generation".into());
        }

        let weather = match self.weather {
            Some(weather) => {
                if weather.len() != race.laps {
                    return Err(format!("expected weather for {} laps, got {}", race.laps, weather.len()).into());
                }
                weather
            }
            None => {
                (logger)(
                    format!("configured to use sampled weather with wet probability: {}", self.wet_probability)
                        .as_str(),
                );
                sample_weather(race.laps, self.wet_probability, environment.random.as_ref())
            }
        };

        let allocation = match self.allocation {
            Some(allocation) => allocation,
            None => {
                (logger)("configured to use default tyre allocation: one new and one used set per compound");
                TyreInventory::uniform(1, 1)
            }
        };

        if allocation.family_size(weather[0]) == 0 {
            return Err("no tyre sets available for the starting track conditions".into());
        }

        let telemetry_mode =
            self.telemetry_mode.unwrap_or_else(|| TelemetryMode::All { logger: logger.clone(), log_best: 10 });

        Ok(GeneticSolver {
            race,
            car,
            weather,
            allocation,
            population_size: self.population_size,
            generations: self.generations,
            sigma: self.sigma,
            mu: self.mu,
            survival_rate: self.survival_rate,
            telemetry_mode,
            environment,
        })
    }
}

impl GeneticSolver {
    /// Runs the evolution and returns the best strategy found, its total time in milliseconds
    /// and telemetry metrics when their collection is enabled.
    pub fn solve(&self) -> (Strategy, Float, Option<TelemetryMetrics>) {
        let mut telemetry = Telemetry::new(self.telemetry_mode.clone());

        let init_time = Timer::start();
        let mut population = self.create_initial_population();
        telemetry.on_initial(population.len(), init_time);

        let mut best = population[0].clone();
        let mut completed = 0;

        for generation in 0..self.generations {
            let is_quota_reached = self.environment.quota.as_ref().map_or(false, |quota| quota.is_reached());
            if is_quota_reached {
                telemetry.log("stop requested externally, returning the best strategy found so far");
                break;
            }

            let generation_time = Timer::start();

            let mut generation_best = Float::INFINITY;
            let mut feasible = 0;
            for candidate in population.iter() {
                if candidate.is_feasible() {
                    feasible += 1;
                }
                if compare_floats(candidate.total_time, best.total_time) == Ordering::Less {
                    best = candidate.clone();
                }
                if compare_floats(candidate.total_time, generation_best) == Ordering::Less {
                    generation_best = candidate.total_time;
                }
            }

            let survivors = self.select(population);
            let offspring = self.breed(&survivors);

            let mut next_population = survivors;
            next_population.extend(offspring);
            next_population.truncate(self.population_size);

            let missing = self.population_size - next_population.len();
            if missing > 0 {
                next_population.extend(parallel_into_collect((0..missing).collect(), |_| self.random_child()));
            }

            population = next_population;
            completed = generation + 1;

            telemetry.on_generation(
                generation,
                best.total_time,
                generation_best,
                feasible,
                self.population_size,
                generation_time,
            );
        }

        telemetry.on_result(best.total_time, completed);

        let total_time = best.total_time;
        (best, total_time, telemetry.take_metrics())
    }

    fn create_initial_population(&self) -> Vec<Strategy> {
        parallel_into_collect((0..self.population_size).collect(), |_| self.random_child())
    }

    /// Keeps the fastest feasible strategies, at most a survival rate share of the population.
    fn select(&self, mut population: Vec<Strategy>) -> Vec<Strategy> {
        population.sort_by(|a, b| compare_floats(a.total_time, b.total_time));
        population.retain(|strategy| strategy.is_feasible());

        let survivors = (self.population_size as Float * self.survival_rate).ceil() as usize;
        population.truncate(survivors);

        population
    }

    /// Recombines disjoint pairs of survivors and mutates their children.
    fn breed(&self, survivors: &[Strategy]) -> Vec<Strategy> {
        let pairs = survivors.chunks_exact(2).map(|pair| (pair[0].clone(), pair[1].clone())).collect::<Vec<_>>();

        parallel_into_collect(pairs, |(first, second)| {
            self.crossover(first, second).into_iter().flat_map(|child| self.mutate(child)).collect::<Vec<_>>()
        })
        .into_iter()
        .flatten()
        .collect()
    }

    /// Applies a single point crossover with mu probability, otherwise returns the parents back.
    fn crossover(&self, first: Strategy, second: Strategy) -> Vec<Strategy> {
        if !self.environment.random.is_hit(self.mu) {
            return vec![first, second];
        }

        let cut = self.environment.random.uniform_int(1, first.laps() as i32 - 2) as usize;

        vec![self.splice(&first, &second, cut), self.splice(&second, &first, cut)]
    }

    fn splice(&self, head: &Strategy, tail: &Strategy, cut: usize) -> Strategy {
        let spliced = Strategy {
            compounds: splice_vec(&head.compounds, &tail.compounds, cut),
            statuses: splice_vec(&head.statuses, &tail.statuses, cut),
            ages: splice_vec(&head.ages, &tail.ages, cut),
            wear: splice_vec(&head.wear, &tail.wear, cut),
            fuel: splice_vec(&head.fuel, &tail.fuel, cut),
            pit_stops: splice_vec(&head.pit_stops, &tail.pit_stops, cut),
            lap_times: splice_vec(&head.lap_times, &tail.lap_times, cut),
            weather: head.weather.clone(),
            pit_stop_count: head.pit_stop_count,
            // consumption and totals are rederived by the repair pass
            inventory: self.allocation.clone(),
            total_time: Float::INFINITY,
        };

        self.repair_or_random(spliced)
    }

    /// Applies compound and pit stop mutations, each with sigma probability, and returns
    /// the produced variants. The incoming child itself is not kept.
    fn mutate(&self, child: Strategy) -> Vec<Strategy> {
        let mutate_compound = self.environment.random.is_hit(self.sigma);
        let mutate_pit_stops = self.environment.random.is_hit(self.sigma);

        let mut variants = Vec::with_capacity(2);
        if mutate_compound {
            variants.push(self.mutate_compound(child.clone()));
        }
        if mutate_pit_stops {
            variants.push(self.mutate_pit_stops(child));
        }

        variants
    }

    /// Overwrites the compound on a random lap and on all following laps of the same stint.
    fn mutate_compound(&self, mut child: Strategy) -> Strategy {
        let start = self.environment.random.uniform_int(0, child.laps() as i32 - 1) as usize;

        let mut pool = child.inventory.clone();
        let (compound, _) = match self.draw_compound(&mut pool, child.weather[start]) {
            Some(drawn) => drawn,
            None => return self.random_child(),
        };

        if !child.pit_stops[start] {
            let mut lap = start;
            loop {
                child.compounds[lap] = compound;
                lap += 1;
                if lap == child.laps() || child.pit_stops[lap] {
                    break;
                }
            }
        }

        self.repair_or_random(child)
    }

    /// Drops a random pit stop together with all later ones and extends the stint before it
    /// to the end of the race. Keeping the last pit stop returns the child unchanged.
    fn mutate_pit_stops(&self, mut child: Strategy) -> Strategy {
        if child.pit_stop_count < 1 {
            child.total_time = Float::INFINITY;
            return child;
        }
        if child.pit_stop_count == 1 {
            return child;
        }

        let target = self.environment.random.uniform_int(1, child.pit_stop_count as i32) as usize;
        if target == child.pit_stop_count {
            return child;
        }

        let mut seen = 0;
        let mut start = 0;
        while seen < target {
            if child.pit_stops[start] {
                seen += 1;
            }
            start += 1;
        }

        if start == child.laps() {
            return child;
        }

        let compound = child.compounds[start];
        for lap in start..child.laps() {
            child.pit_stops[lap] = false;
            child.compounds[lap] = compound;
        }

        self.repair_or_random(child)
    }

    /// Builds a new strategy lap by lap with random tyre choices.
    pub(crate) fn random_child(&self) -> Strategy {
        let mut strategy = Strategy::empty(self.weather.clone(), self.allocation.clone());
        let laps = self.race.laps;

        let first_weather = strategy.weather[0];
        let (compound, status) = match self.draw_compound(&mut strategy.inventory, first_weather) {
            Some(drawn) => drawn,
            None => return self.fill_remaining(0, strategy),
        };

        let initial_fuel = self.car.predict_initial_fuel_load(&self.weather)
            + self.environment.random.uniform_int(-FUEL_VARIATION, FUEL_VARIATION) as Float;

        let mut age = status.initial_age();
        strategy.compounds.push(compound);
        strategy.statuses.push(status);
        strategy.ages.push(age);
        strategy.wear.push(self.tyre_wear(compound, age));
        strategy.fuel.push(initial_fuel);
        strategy.pit_stops.push(false);
        strategy.lap_times.push(self.lap_time(compound, age, 0, initial_fuel, &self.weather[..1], false));

        for lap in 1..laps {
            let weather = strategy.weather[lap];
            let fuel = self.car.predict_fuel_load(initial_fuel, &self.weather[..=lap]);
            let pit = self.should_pit(&strategy.wear[lap - 1]);

            let (compound, status) = if pit {
                match self.draw_compound(&mut strategy.inventory, weather) {
                    Some(drawn) => {
                        strategy.pit_stop_count += 1;
                        drawn
                    }
                    None => return self.fill_remaining(lap, strategy),
                }
            } else {
                (strategy.compounds[lap - 1], TyreStatus::Used)
            };

            age = if pit { status.initial_age() } else { age + 1 };

            strategy.compounds.push(compound);
            strategy.statuses.push(status);
            strategy.ages.push(age);
            strategy.wear.push(self.tyre_wear(compound, age));
            strategy.fuel.push(fuel);
            strategy.pit_stops.push(pit);
            strategy.lap_times.push(self.lap_time(compound, age, lap, fuel, &self.weather[..=lap], pit));
        }

        strategy.total_time = if strategy.fuel[laps - 1] >= FUEL_RESERVE {
            strategy.lap_times.iter().sum::<Milliseconds>() as Float
        } else {
            Float::INFINITY
        };

        strategy
    }

    /// Pads a partially built strategy so all vectors keep one entry per lap.
    /// Such strategy is never drivable.
    fn fill_remaining(&self, from: usize, mut strategy: Strategy) -> Strategy {
        let (compound, fuel) = if from == 0 {
            (TyreCompound::family(strategy.weather[0])[0], 0.)
        } else {
            (strategy.compounds[from - 1], strategy.fuel[from - 1])
        };

        for _ in from..strategy.weather.len() {
            strategy.compounds.push(compound);
            strategy.statuses.push(TyreStatus::Used);
            strategy.ages.push(0);
            strategy.wear.push(TyreWear::worn_out());
            strategy.fuel.push(fuel);
            strategy.pit_stops.push(false);
            strategy.lap_times.push(0);
        }

        strategy.total_time = Float::INFINITY;
        strategy
    }

    /// Rebuilds all derived quantities of a strategy after its decisions were changed: fuel,
    /// forced pit stops, tyre state and lap times. Consumption is rederived from the race
    /// allocation, so the pass can be applied to the same strategy repeatedly.
    pub(crate) fn repair(&self, mut strategy: Strategy) -> Feasibility {
        let laps = strategy.laps();

        strategy.inventory = self.allocation.clone();
        // the opening lap can never be a pit stop
        strategy.pit_stops[0] = false;

        let initial_fuel = strategy.fuel[0];

        let status = match strategy.inventory.take(strategy.compounds[0]) {
            Some(status) => status,
            None => return Feasibility::Infeasible,
        };

        let mut age = status.initial_age();
        strategy.statuses[0] = status;
        strategy.ages[0] = age;
        strategy.wear[0] = self.tyre_wear(strategy.compounds[0], age);
        strategy.lap_times[0] =
            self.lap_time(strategy.compounds[0], age, 0, initial_fuel, &strategy.weather[..1], false);

        let mut pit_stop_count = 0;
        for lap in 1..laps {
            let fuel = self.car.predict_fuel_load(initial_fuel, &strategy.weather[..=lap]);
            strategy.fuel[lap] = fuel;

            let mut compound = strategy.compounds[lap];
            let pit = strategy.pit_stops[lap]
                || compound != strategy.compounds[lap - 1]
                || strategy.wear[lap - 1].any_reaches(WEAR_PIT_THRESHOLD);

            let status = if pit {
                strategy.pit_stops[lap] = true;
                pit_stop_count += 1;

                let status = match strategy.inventory.take(compound) {
                    Some(status) => status,
                    None => {
                        let weather = strategy.weather[lap];
                        match self.draw_compound(&mut strategy.inventory, weather) {
                            Some((drawn, status)) => {
                                compound = drawn;
                                strategy.compounds[lap] = drawn;
                                status
                            }
                            None => return Feasibility::Infeasible,
                        }
                    }
                };
                age = status.initial_age();
                status
            } else {
                age += 1;
                TyreStatus::Used
            };

            strategy.statuses[lap] = status;
            strategy.ages[lap] = age;
            strategy.wear[lap] = self.tyre_wear(compound, age);
            strategy.lap_times[lap] = self.lap_time(compound, age, lap, fuel, &strategy.weather[..=lap], pit);
        }

        strategy.pit_stop_count = pit_stop_count;
        strategy.total_time = if strategy.fuel[laps - 1] >= FUEL_RESERVE {
            strategy.lap_times.iter().sum::<Milliseconds>() as Float
        } else {
            Float::INFINITY
        };

        Feasibility::Feasible(strategy)
    }

    /// Repairs a strategy falling back to a fresh random one when the allocation ran out.
    pub(crate) fn repair_or_random(&self, strategy: Strategy) -> Strategy {
        match self.repair(strategy) {
            Feasibility::Feasible(strategy) => strategy,
            Feasibility::Infeasible => self.random_child(),
        }
    }

    /// Draws a random compound suitable for given conditions until an available one is found.
    /// Consumes the drawn set from the inventory.
    fn draw_compound(&self, inventory: &mut TyreInventory, weather: Weather) -> Option<(TyreCompound, TyreStatus)> {
        if inventory.family_size(weather) == 0 {
            return None;
        }

        loop {
            let compound = self.random_compound(weather);
            if let Some(status) = inventory.take(compound) {
                return Some((compound, status));
            }
        }
    }

    /// Picks a random compound suitable for given track conditions.
    pub(crate) fn random_compound(&self, weather: Weather) -> TyreCompound {
        let family = TyreCompound::family(weather);
        let index = self.environment.random.uniform_int(0, family.len() as i32 - 1) as usize;

        family[index]
    }

    /// Decides whether to change tyres given their wear: certain below the lower threshold,
    /// otherwise a random boundary is drawn against the per wheel wear.
    fn should_pit(&self, wear: &TyreWear) -> bool {
        if wear.all_below(WEAR_NO_PIT_THRESHOLD) {
            return false;
        }

        let boundary = self.environment.random.uniform_real(0., 1.);
        wear.values().into_iter().any(|wear| boundary < wear)
    }

    fn tyre_wear(&self, compound: TyreCompound, tyre_age: usize) -> TyreWear {
        // a freshly mounted set has no wear
        if tyre_age == 0 {
            TyreWear::default()
        } else {
            self.car.predict_tyre_wear(compound, tyre_age)
        }
    }

    fn lap_time(
        &self,
        compound: TyreCompound,
        tyre_age: usize,
        lap: usize,
        fuel: Float,
        weather: &[Weather],
        pit: bool,
    ) -> Milliseconds {
        // DRS is not modeled on the strategy level
        let mut time = self.car.predict_lap_time(compound, tyre_age, lap, fuel, weather, false);

        if pit {
            time += self.race.pit_stop_time as Float;
        }
        if lap == 0 {
            time += WARM_UP_TIME as Float;
        }

        time.round() as Milliseconds
    }
}

fn splice_vec<T: Clone>(head: &[T], tail: &[T], cut: usize) -> Vec<T> {
    head[..cut].iter().chain(tail[cut..].iter()).cloned().collect()
}
