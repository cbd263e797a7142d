use crate::db::schema::t_device_connection;
use diesel::prelude::*;

#[derive(Debug, Queryable)]
#[diesel(table_name = t_device_connection)]
pub struct DeviceConnectionRow {
    pub id: i32,
    pub device_id: String,
    pub adapter_name: String,
    pub ip_address: String,
    pub last_checked_date: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = t_device_connection)]
pub struct NewDeviceConnectionRow {
    pub device_id: String,
    pub adapter_name: String,
    pub ip_address: String,
    pub last_checked_date: i64,
}
