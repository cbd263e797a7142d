use crate::db::models::DeviceRow;
use crate::db::ports::{InsertMapper, RowMapper};
use anyhow::Result;
use lp_core::device::{Device, DeviceId};

pub struct DeviceRowMapper;

impl InsertMapper<Device, DeviceRow> for DeviceRowMapper {
    fn to_row(&self, domain: &Device) -> Result<DeviceRow> {
        Ok(DeviceRow {
            device_id: domain.device_id.as_str().to_string(),
            brand: domain.brand.clone(),
            model: domain.model.clone(),
            nickname: domain.nickname.clone(),
            version_name: domain.version_name.clone(),
            version_number: domain.version_number,
            last_usage_time: domain.last_usage_time,
            trusted: domain.trusted,
            restricted: domain.restricted,
        })
    }
}

impl RowMapper<DeviceRow, Device> for DeviceRowMapper {
    fn to_domain(&self, row: &DeviceRow) -> Result<Device> {
        Ok(Device {
            device_id: DeviceId::new(row.device_id.as_str()),
            brand: row.brand.clone(),
            model: row.model.clone(),
            nickname: row.nickname.clone(),
            version_name: row.version_name.clone(),
            version_number: row.version_number,
            last_usage_time: row.last_usage_time,
            trusted: row.trusted,
            restricted: row.restricted,
        })
    }
}
