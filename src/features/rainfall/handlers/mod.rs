pub mod rainfall_handler;

pub use rainfall_handler::get_rainfall;
