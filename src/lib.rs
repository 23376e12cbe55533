// Library for the binary and integration tests

pub mod config;
pub mod error;
pub mod feeds;
pub mod models;
pub mod network;
pub mod renderer;
pub mod scheduler;
pub mod telemetry;
pub mod version;
pub mod worker;
