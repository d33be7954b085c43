//! Schema module - Configuration and seeding types for Life sessions.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
