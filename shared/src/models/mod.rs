//! Domain models for the Weather Monitoring System

mod weather;

pub use weather::*;
