mod executor;
mod mapper;

pub use executor::{run_blocking, DbExecutor};
pub use mapper::{InsertMapper, RowMapper};
