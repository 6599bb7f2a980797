//! Brewery listing passthrough.
//!
//! `GET /route` proxies the Open Brewery DB listing. Vestigial demo
//! endpoint kept for parity with the client.

pub mod clients;
pub mod handlers;
pub mod routes;

pub use clients::BreweryClient;
