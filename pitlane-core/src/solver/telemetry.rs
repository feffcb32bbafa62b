//! A module which provides the logic to collect metrics about the search execution and simple logging.

#[cfg(test)]
#[path = "../../tests/unit/solver/telemetry_test.rs"]
mod telemetry_test;

use crate::models::format_time;
use crate::utils::{Float, InfoLogger, Timer};

/// Encapsulates different measurements regarding algorithm evaluation.
pub struct TelemetryMetrics {
    /// Algorithm duration in seconds.
    pub duration: usize,
    /// Total amount of generations.
    pub generations: usize,
    /// Speed: generations per second.
    pub speed: Float,
    /// Evolution progress.
    pub evolution: Vec<TelemetryGeneration>,
}

/// Represents information about generation.
pub struct TelemetryGeneration {
    /// Generation sequence number, starting from one.
    pub number: usize,
    /// Time since the search started, in seconds.
    pub timestamp: Float,
    /// Total time of the best strategy found so far, in milliseconds.
    pub best_time: Float,
    /// Total time of the best strategy within this generation, in milliseconds.
    pub generation_best: Float,
    /// Amount of feasible strategies in the population.
    pub feasible: usize,
}

/// Specifies a telemetry mode.
#[derive(Clone)]
pub enum TelemetryMode {
    /// No telemetry at all.
    None,
    /// Only logging.
    OnlyLogging {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often the best strategy is logged.
        log_best: usize,
    },
    /// Only metrics collection.
    OnlyMetrics,
    /// Both logging and metrics collection.
    All {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often the best strategy is logged.
        log_best: usize,
    },
}

/// Provides way to collect metrics and write information into log.
pub struct Telemetry {
    metrics: TelemetryMetrics,
    time: Timer,
    mode: TelemetryMode,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(mode: TelemetryMode) -> Self {
        Self {
            time: Timer::start(),
            metrics: TelemetryMetrics { duration: 0, generations: 0, speed: 0.0, evolution: vec![] },
            mode,
        }
    }

    /// Reports initial population statistics.
    pub fn on_initial(&mut self, population_size: usize, item_time: Timer) {
        match &self.mode {
            TelemetryMode::OnlyLogging { .. } | TelemetryMode::All { .. } => self.log(
                format!(
                    "[{}s] created initial population of {} strategies in {}ms",
                    self.time.elapsed_secs(),
                    population_size,
                    item_time.elapsed_millis(),
                )
                .as_str(),
            ),
            _ => {}
        };
    }

    /// Reports generation statistics.
    pub fn on_generation(
        &mut self,
        generation: usize,
        best_time: Float,
        generation_best: Float,
        feasible: usize,
        population_size: usize,
        generation_time: Timer,
    ) {
        let number = generation + 1;
        self.metrics.generations = number;

        let log_best = match &self.mode {
            TelemetryMode::None => return,
            TelemetryMode::OnlyLogging { log_best, .. } => Some(*log_best),
            TelemetryMode::OnlyMetrics => None,
            TelemetryMode::All { log_best, .. } => Some(*log_best),
        };

        if matches!(&self.mode, TelemetryMode::OnlyMetrics | TelemetryMode::All { .. }) {
            self.metrics.evolution.push(TelemetryGeneration {
                number,
                timestamp: self.time.elapsed_secs_as_float(),
                best_time,
                generation_best,
                feasible,
            });
        }

        let should_log_best = log_best.map(|log_best| generation % log_best == 0).unwrap_or(false);
        if should_log_best {
            self.log(
                format!(
                    "[{}s] generation {} took {}ms, best: {}, generation best: {}, feasible: {}/{}",
                    self.time.elapsed_secs(),
                    number,
                    generation_time.elapsed_millis(),
                    format_time(best_time),
                    format_time(generation_best),
                    feasible,
                    population_size,
                )
                .as_str(),
            );
        }
    }

    /// Reports final statistic.
    pub fn on_result(&mut self, best_time: Float, generations: usize) {
        let elapsed = self.time.elapsed_secs() as usize;
        let speed = generations as Float / self.time.elapsed_secs_as_float();

        self.log(format!("[{elapsed}s] total generations: {generations}, speed: {speed:.2} gen/sec").as_str());
        self.log(format!("\tbest total time: {}", format_time(best_time)).as_str());

        self.metrics.duration = elapsed;
        self.metrics.generations = generations;
        self.metrics.speed = speed;
    }

    /// Gets metrics.
    pub fn take_metrics(self) -> Option<TelemetryMetrics> {
        match &self.mode {
            TelemetryMode::OnlyMetrics | TelemetryMode::All { .. } => Some(self.metrics),
            _ => None,
        }
    }

    /// Writes log message.
    pub fn log(&self, message: &str) {
        match &self.mode {
            TelemetryMode::OnlyLogging { logger, .. } => (logger)(message),
            TelemetryMode::All { logger, .. } => (logger)(message),
            _ => {}
        }
    }
}
