mod rainfall_service;

pub use rainfall_service::RainfallService;
