pub mod delta;
pub mod interval;
pub mod location;
pub mod views;
