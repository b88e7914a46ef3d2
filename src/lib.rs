pub mod campaign;
pub mod config;
pub mod database;
pub mod error;
pub mod startup;
pub mod telemetry;
