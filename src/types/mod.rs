pub mod aggregate;
pub mod cadence;
pub mod sky_condition;
pub mod station;
pub mod units;
