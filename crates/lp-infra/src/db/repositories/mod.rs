mod device_connection_repo;
mod device_repo;

pub use device_connection_repo::*;
pub use device_repo::*;
