pub mod config;
pub mod constants;
pub mod geo;
pub mod map_type;
pub mod region;
