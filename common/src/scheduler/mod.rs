// Scheduler module for the periodic workload runner

pub mod engine;

pub use engine::{Scheduler, SchedulerConfig, SchedulerEngine};
