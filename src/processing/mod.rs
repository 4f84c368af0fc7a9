pub mod rolling_series;
pub mod statistics;
