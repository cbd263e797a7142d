//! # Application Dependencies
//!
//! Parameter grouping for [`crate::App`] construction. Not a builder: every
//! field is required and nothing is defaulted.

use std::sync::Arc;
use lp_core::ports::*;

pub struct AppDeps {
    // Storage
    pub device_repo: Arc<dyn DeviceRepositoryPort>,
    pub connection_repo: Arc<dyn ConnectionRepositoryPort>,

    // Settings and identity
    pub settings: Arc<dyn SettingsPort>,
    pub device_identity: Arc<dyn DeviceIdentityPort>,

    // Network
    pub network_interfaces: Arc<dyn NetworkInterfacePort>,
    pub identity_bridge: Arc<dyn IdentityBridgePort>,

    // System
    pub platform: Arc<dyn PlatformInfoPort>,
    pub clock: Arc<dyn ClockPort>,
}
