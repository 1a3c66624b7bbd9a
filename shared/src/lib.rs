//! Shared types and models for the Weather Monitoring System
//!
//! This crate contains types shared between the backend services and any
//! other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
