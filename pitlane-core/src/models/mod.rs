//! A collection of models to represent a race, a car performance oracle and a race strategy.

mod car;
pub use self::car::*;

mod race;
pub use self::race::*;

mod strategy;
pub use self::strategy::*;

mod tyres;
pub use self::tyres::*;
