pub mod config;
pub mod engine;
pub mod errors;
pub mod metrics_api;
pub mod model;
pub mod registry;
pub mod validate;
