pub mod model;

pub use model::{DeviceSettings, Settings, CURRENT_SCHEMA_VERSION};
