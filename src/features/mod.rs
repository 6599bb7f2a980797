pub mod breweries;
pub mod rainfall;
pub mod reports;
pub mod routing;
pub mod users;
