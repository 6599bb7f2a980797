//! Flood report feature.
//!
//! Citizens submit flood reports (coordinates, description, optional photo,
//! optional manual address); every stored report is returned to any client
//! that renders a map.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/submitReport` | Submit a flood report |
//! | GET | `/floodReports` | List all stored reports |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{GeocodingService, ReportService};
