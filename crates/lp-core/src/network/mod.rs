//! Local network topology: interface snapshots and adapter resolution.

pub mod adapter;
pub mod interface;

pub use adapter::{candidate_ipv4, inet4_address, inet4_network_prefix, resolve_adapter};
pub use interface::{AddressEntry, NetworkInterface};
