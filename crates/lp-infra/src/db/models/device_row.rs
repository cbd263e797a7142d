use crate::db::schema::t_device;
use diesel::prelude::*;

/// Both the query result and the upsert payload for `t_device`.
#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = t_device)]
#[diesel(treat_none_as_null = true)]
pub struct DeviceRow {
    pub device_id: String,
    pub brand: String,
    pub model: String,
    pub nickname: String,
    pub version_name: String,
    pub version_number: i32,
    pub last_usage_time: Option<i64>,
    pub trusted: bool,
    pub restricted: bool,
}
