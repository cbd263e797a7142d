//! # lp-infra
//!
//! SQLite-backed device and connection stores, the JSON settings file, the
//! settings-backed device identity and the system clock.

pub mod db;
pub mod device;
pub mod settings;
pub mod time;

pub use device::SettingsDeviceIdentity;
pub use settings::FileSettingsRepository;
pub use time::SystemClock;
