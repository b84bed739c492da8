pub mod body;
pub mod hal;
pub mod routes;
pub mod routing;
pub mod types;
