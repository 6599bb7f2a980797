//! Rainfall aggregate feature.
//!
//! `GET /rainfall` returns the summed hourly precipitation for the
//! configured station coordinate, fetched from an Open-Meteo-style API.

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::RainfallService;
