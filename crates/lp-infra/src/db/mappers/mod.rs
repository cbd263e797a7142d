pub mod device_connection_mapper;
pub mod device_mapper;

pub use device_connection_mapper::DeviceConnectionRowMapper;
pub use device_mapper::DeviceRowMapper;
