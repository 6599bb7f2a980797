pub mod constants;
pub mod geo;
pub mod retry;
pub mod types;
