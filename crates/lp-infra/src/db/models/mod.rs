pub mod device_connection_row;
pub mod device_row;

pub use device_connection_row::{DeviceConnectionRow, NewDeviceConnectionRow};
pub use device_row::DeviceRow;
