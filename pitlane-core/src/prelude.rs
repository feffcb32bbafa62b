//! This module reimports a common used types.

pub use crate::models::CarModel;
pub use crate::models::Milliseconds;
pub use crate::models::RaceParameters;
pub use crate::models::Strategy;
pub use crate::models::Weather;
pub use crate::models::{format_time, sample_weather};
pub use crate::models::{TyreCompound, TyreInventory, TyreStatus, TyreStock, TyreWear};

pub use crate::solver::GeneticSolver;
pub use crate::solver::GeneticSolverBuilder;
pub use crate::solver::LocalSearch;
pub use crate::solver::{TelemetryMetrics, TelemetryMode, DEFAULT_LOCAL_SEARCH_ITERATIONS};

pub use crate::utils::compare_floats;
pub use crate::utils::DefaultRandom;
pub use crate::utils::Environment;
pub use crate::utils::Float;
pub use crate::utils::InfoLogger;
pub use crate::utils::TimeQuota;
pub use crate::utils::{GenericError, GenericResult};
pub use crate::utils::{Quota, Random, RandomGen};
