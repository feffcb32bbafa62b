#[cfg(test)]
#[path = "../../tests/unit/solver/local_search_test.rs"]
mod local_search_test;

use crate::models::Strategy;
use crate::solver::genetic::GeneticSolver;
use crate::utils::{compare_floats, parallel_collect, Float};
use std::cmp::Ordering;

/// An amount of laps on each side of a pit stop inspected when moving it.
const NEIGHBORHOOD_RADIUS: usize = 5;

/// A default amount of perturbation iterations.
pub const DEFAULT_LOCAL_SEARCH_ITERATIONS: usize = 200;

/// Refines a strategy by iteratively perturbing one stint (shake) and searching for a better
/// pit stop placement around the perturbed laps. A candidate replaces the incumbent only
/// when it is strictly faster.
pub struct LocalSearch<'a> {
    solver: &'a GeneticSolver,
    iterations: usize,
}

struct Shake {
    pivot: usize,
    next: Option<usize>,
    strategy: Strategy,
}

impl<'a> LocalSearch<'a> {
    /// Creates a new instance of `LocalSearch` with the given iteration budget.
    pub fn new(solver: &'a GeneticSolver, iterations: usize) -> Self {
        Self { solver, iterations }
    }

    /// Runs the perturb and refine loop starting from the given strategy and returns the best
    /// strategy found together with its total time.
    pub fn run(&self, seed: Strategy) -> (Strategy, Float) {
        let mut best = seed;

        for _ in 0..self.iterations {
            let is_quota_reached = self.solver.environment.quota.as_ref().map_or(false, |quota| quota.is_reached());
            if is_quota_reached {
                break;
            }

            let shake = self.shake(&best);
            let candidate = self.explore(&shake);

            if compare_floats(candidate.total_time, best.total_time) == Ordering::Less {
                best = candidate;
            }
        }

        let total_time = best.total_time;
        (best, total_time)
    }

    /// Overwrites one random stint with a different compound and repairs the result.
    fn shake(&self, strategy: &Strategy) -> Shake {
        let random = &self.solver.environment.random;

        let ordinal = random.uniform_int(0, strategy.pit_stop_count as i32) as usize;
        let pivot = find_interval(strategy, ordinal).unwrap_or(0);
        let next = find_interval(strategy, ordinal + 1);

        let current = strategy.compounds[pivot];
        let mut compound = self.solver.random_compound(strategy.weather[pivot]);
        while compound == current {
            compound = self.solver.random_compound(strategy.weather[pivot]);
        }

        let mut shaken = strategy.clone();
        let end = next.unwrap_or(strategy.laps());
        shaken.compounds[pivot..end].fill(compound);

        Shake { pivot, next, strategy: self.solver.repair_or_random(shaken) }
    }

    /// Explores pit stop placements around the boundaries of the shaken stint.
    fn explore(&self, shake: &Shake) -> Strategy {
        let mut best = shake.strategy.clone();

        for pivot in [Some(shake.pivot), shake.next].into_iter().flatten() {
            if pivot == 0 || !shake.strategy.pit_stops[pivot] {
                continue;
            }

            if let Some(candidate) = self.explore_around(&shake.strategy, pivot) {
                if compare_floats(candidate.total_time, best.total_time) == Ordering::Less {
                    best = candidate;
                }
            }
        }

        best
    }

    /// Tries every pit stop position within the neighborhood radius and keeps the best candidate.
    fn explore_around(&self, base: &Strategy, pivot: usize) -> Option<Strategy> {
        let window = (pivot.saturating_sub(NEIGHBORHOOD_RADIUS)..=(pivot + NEIGHBORHOOD_RADIUS).min(base.laps() - 1))
            .filter(|&target| target != pivot && target != 0)
            .collect::<Vec<_>>();

        let candidates = parallel_collect(&window, |&target| self.try_move(base, pivot, target));

        candidates.into_iter().fold(None, |best, candidate| match &best {
            Some(current) if compare_floats(candidate.total_time, current.total_time) != Ordering::Less => best,
            _ => Some(candidate),
        })
    }

    /// Moves the pit stop from the pivot lap to the target lap extending the adjacent stint.
    fn try_move(&self, base: &Strategy, pivot: usize, target: usize) -> Strategy {
        let mut candidate = base.clone();

        candidate.pit_stops[pivot] = false;
        candidate.pit_stops[target] = true;

        if target < pivot {
            // the new stint starts earlier
            let compound = base.compounds[pivot];
            candidate.compounds[target..pivot].fill(compound);
        } else {
            // the previous stint lasts longer
            let compound = base.compounds[pivot - 1];
            candidate.compounds[pivot..target].fill(compound);
        }

        self.solver.repair_or_random(candidate)
    }
}

/// Finds the lap index where the given pit stop ordinal happens: ordinal zero addresses
/// the race start, an ordinal above the pit stop count yields `None`.
fn find_interval(strategy: &Strategy, ordinal: usize) -> Option<usize> {
    if ordinal > strategy.pit_stop_count {
        return None;
    }

    let mut count = 0;
    for (lap, &pit) in strategy.pit_stops.iter().enumerate() {
        if pit {
            count += 1;
        }
        if count == ordinal {
            return Some(lap);
        }
    }

    None
}
