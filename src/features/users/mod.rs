//! Demo user feature.
//!
//! `GET /addUser` inserts one hardcoded user row. It exists to exercise the
//! database wiring end to end and is kept for parity with the client.

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::UserService;
