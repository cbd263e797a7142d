//! lanpeer application layer
//!
//! Use cases for adapter resolution, local identity, connection
//! reconciliation and peer discovery, written against the ports in `lp-core`.

pub mod app;
pub mod deps;
pub mod usecases;

pub use app::App;
pub use deps::AppDeps;
