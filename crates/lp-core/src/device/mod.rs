//! Device domain models.

pub mod connection;
pub mod device;
pub mod value_objects;

pub use connection::DeviceConnection;
pub use device::{Device, NICKNAME_LENGTH_MAX};
pub use value_objects::{AdapterName, DeviceId};
