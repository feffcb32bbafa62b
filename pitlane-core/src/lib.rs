//! This crate contains the building blocks to find race strategies minimizing the total race
//! time: a genetic algorithm which evolves per lap tyre and pit stop plans, refined by an
//! iterated local search. Car performance comes from a user supplied prediction model.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod models;
pub mod prelude;
pub mod solver;
pub mod utils;
