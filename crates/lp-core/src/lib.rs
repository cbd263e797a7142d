//! # lp-core
//!
//! Core domain models and ports for lanpeer.
//!
//! This crate contains the device/connection model, the adapter-resolution
//! heuristic and the identity payload codec. It has no infrastructure
//! dependencies; storage, transport and interface enumeration are reached
//! through the traits in [`ports`].

pub mod codec;
pub mod config;
pub mod device;
pub mod network;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use device::{AdapterName, Device, DeviceConnection, DeviceId, NICKNAME_LENGTH_MAX};
pub use network::{AddressEntry, NetworkInterface};
