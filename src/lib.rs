pub mod autopilot;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod pickups;
pub mod rng;
pub mod session;
pub mod types;
pub mod world;
