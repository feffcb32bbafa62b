mod car;
pub use self::car::*;
