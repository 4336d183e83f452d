//! service-core: Shared infrastructure for the hospital registry services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
