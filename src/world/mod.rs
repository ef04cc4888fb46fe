//! Locations and the weather/time-of-day clock.

pub mod locations;
pub mod weather;

pub use locations::*;
pub use weather::*;
