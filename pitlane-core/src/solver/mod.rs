//! The metaheuristic machinery: a genetic algorithm which evolves a population of race
//! strategies and a local search which refines the winner.

mod genetic;
pub use self::genetic::*;

mod local_search;
pub use self::local_search::*;

mod telemetry;
pub use self::telemetry::*;
