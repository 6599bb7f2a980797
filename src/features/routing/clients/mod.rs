mod roads_client;

pub use roads_client::RoadsClient;
