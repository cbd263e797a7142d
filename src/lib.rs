//! lanpeer binary support: configuration loading, tracing setup and the
//! wiring that turns an [`lp_core::AppConfig`] into a running [`lp_app::App`].

pub mod bootstrap;
pub mod cli;
