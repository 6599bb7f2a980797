//! Flood-avoidance routing feature.
//!
//! `POST /getMap` buffers every current flood report into a 0.5-mile
//! obstacle disk, computes a shortest path from origin to destination that
//! clears all of them, snaps the path to real roads via an external API,
//! and returns the ordered waypoint list.

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use clients::RoadsClient;
