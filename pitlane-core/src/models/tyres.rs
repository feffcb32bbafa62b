#[cfg(test)]
#[path = "../../tests/unit/models/tyres_test.rs"]
mod tyres_test;

use crate::models::Weather;
use crate::utils::Float;
use rustc_hash::FxHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasherDefault;

/// Represents a tyre compound type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TyreCompound {
    /// The fastest and least durable dry compound.
    Soft,
    /// A dry compound balancing lap time and durability.
    Medium,
    /// The most durable dry compound.
    Hard,
    /// A treaded compound for a damp track.
    Intermediate,
    /// A full wet compound for a soaked track.
    Wet,
}

const DRY_COMPOUNDS: &[TyreCompound] = &[TyreCompound::Soft, TyreCompound::Medium, TyreCompound::Hard];
const WET_COMPOUNDS: &[TyreCompound] = &[TyreCompound::Intermediate, TyreCompound::Wet];

impl TyreCompound {
    /// Returns all known compounds.
    pub fn all() -> &'static [TyreCompound] {
        const ALL_COMPOUNDS: &[TyreCompound] = &[
            TyreCompound::Soft,
            TyreCompound::Medium,
            TyreCompound::Hard,
            TyreCompound::Intermediate,
            TyreCompound::Wet,
        ];
        ALL_COMPOUNDS
    }

    /// Returns compounds suitable for the given track conditions.
    pub fn family(weather: Weather) -> &'static [TyreCompound] {
        match weather {
            Weather::Dry => DRY_COMPOUNDS,
            Weather::Wet => WET_COMPOUNDS,
        }
    }
}

impl fmt::Display for TyreCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TyreCompound::Soft => f.write_str("soft"),
            TyreCompound::Medium => f.write_str("medium"),
            TyreCompound::Hard => f.write_str("hard"),
            TyreCompound::Intermediate => f.write_str("intermediate"),
            TyreCompound::Wet => f.write_str("wet"),
        }
    }
}

/// Tells whether a tyre set was already driven before being mounted.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TyreStatus {
    /// A fresh set.
    New,
    /// A set which already covered some laps, e.g. in qualifying.
    Used,
}

impl TyreStatus {
    /// Returns the age in laps a set already carries when mounted.
    pub fn initial_age(&self) -> usize {
        match self {
            TyreStatus::New => 0,
            TyreStatus::Used => 2,
        }
    }
}

impl fmt::Display for TyreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TyreStatus::New => f.write_str("new"),
            TyreStatus::Used => f.write_str("used"),
        }
    }
}

/// Represents wear fractions in [0., 1.] per wheel where 1. means a fully worn tyre.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TyreWear {
    /// Front left wheel wear.
    pub front_left: Float,
    /// Front right wheel wear.
    pub front_right: Float,
    /// Rear left wheel wear.
    pub rear_left: Float,
    /// Rear right wheel wear.
    pub rear_right: Float,
}

impl TyreWear {
    /// Creates a new instance of `TyreWear`.
    pub fn new(front_left: Float, front_right: Float, rear_left: Float, rear_right: Float) -> Self {
        Self { front_left, front_right, rear_left, rear_right }
    }

    /// Creates wear of fully worn tyres.
    pub fn worn_out() -> Self {
        Self::new(1., 1., 1., 1.)
    }

    /// Returns wear values in wheel order: front left, front right, rear left, rear right.
    pub fn values(&self) -> [Float; 4] {
        [self.front_left, self.front_right, self.rear_left, self.rear_right]
    }

    /// Returns the highest wear across all wheels.
    pub fn max(&self) -> Float {
        self.values().into_iter().fold(0., Float::max)
    }

    /// Checks whether wear on any wheel reached the given limit.
    pub fn any_reaches(&self, limit: Float) -> bool {
        self.values().into_iter().any(|wear| wear >= limit)
    }

    /// Checks whether wear on every wheel stays below the given limit.
    pub fn all_below(&self, limit: Float) -> bool {
        self.values().into_iter().all(|wear| wear < limit)
    }
}

/// Represents an amount of new and used sets of a single compound.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TyreStock {
    /// Amount of fresh sets.
    pub new: usize,
    /// Amount of already driven sets.
    pub used: usize,
}

impl TyreStock {
    /// Creates a new instance of `TyreStock`.
    pub fn new(new: usize, used: usize) -> Self {
        Self { new, used }
    }

    /// Returns the total amount of sets.
    pub fn total(&self) -> usize {
        self.new + self.used
    }
}

/// Keeps track of tyre sets available for the race, per compound.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TyreInventory {
    stock: HashMap<TyreCompound, TyreStock, BuildHasherDefault<FxHasher>>,
}

impl TyreInventory {
    /// Creates an inventory with the same amount of new and used sets for every compound.
    pub fn uniform(new: usize, used: usize) -> Self {
        TyreCompound::all().iter().map(|&compound| (compound, TyreStock::new(new, used))).collect()
    }

    /// Returns the stock of the given compound.
    pub fn stock(&self, compound: TyreCompound) -> TyreStock {
        self.stock.get(&compound).copied().unwrap_or_default()
    }

    /// Takes one set of the given compound preferring new sets over used ones.
    /// Returns `None` when the compound is out of stock.
    pub fn take(&mut self, compound: TyreCompound) -> Option<TyreStatus> {
        let stock = self.stock.entry(compound).or_default();

        if stock.new > 0 {
            stock.new -= 1;
            Some(TyreStatus::New)
        } else if stock.used > 0 {
            stock.used -= 1;
            Some(TyreStatus::Used)
        } else {
            None
        }
    }

    /// Returns the total amount of sets left for compounds suitable for the given conditions.
    pub fn family_size(&self, weather: Weather) -> usize {
        TyreCompound::family(weather).iter().map(|&compound| self.stock(compound).total()).sum()
    }
}

impl FromIterator<(TyreCompound, TyreStock)> for TyreInventory {
    fn from_iter<T: IntoIterator<Item = (TyreCompound, TyreStock)>>(iter: T) -> Self {
        Self { stock: iter.into_iter().collect() }
    }
}
