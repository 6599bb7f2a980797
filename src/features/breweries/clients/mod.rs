mod brewery_client;

pub use brewery_client::BreweryClient;
