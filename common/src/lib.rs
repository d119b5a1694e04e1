// Common library for shared code across the scheduler and API binaries

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod executor;
pub mod models;
pub mod scheduler;
pub mod storage;
pub mod telemetry;
