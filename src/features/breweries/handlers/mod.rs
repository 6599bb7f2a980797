pub mod brewery_handler;

pub use brewery_handler::list_breweries;
