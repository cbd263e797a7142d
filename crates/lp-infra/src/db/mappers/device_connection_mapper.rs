use std::net::IpAddr;

use crate::db::models::{DeviceConnectionRow, NewDeviceConnectionRow};
use crate::db::ports::{InsertMapper, RowMapper};
use anyhow::{anyhow, Result};
use lp_core::device::{AdapterName, DeviceConnection, DeviceId};

pub struct DeviceConnectionRowMapper;

impl InsertMapper<DeviceConnection, NewDeviceConnectionRow> for DeviceConnectionRowMapper {
    fn to_row(&self, domain: &DeviceConnection) -> Result<NewDeviceConnectionRow> {
        Ok(NewDeviceConnectionRow {
            device_id: domain.device_id.as_str().to_string(),
            adapter_name: domain.adapter_name.as_str().to_string(),
            ip_address: domain.ip_address(),
            last_checked_date: domain.last_checked_date,
        })
    }
}

impl RowMapper<DeviceConnectionRow, DeviceConnection> for DeviceConnectionRowMapper {
    fn to_domain(&self, row: &DeviceConnectionRow) -> Result<DeviceConnection> {
        let host_address: IpAddr = row
            .ip_address
            .parse()
            .map_err(|_| anyhow!("invalid ip_address: {}", row.ip_address))?;

        Ok(DeviceConnection {
            host_address,
            adapter_name: AdapterName::new(row.adapter_name.as_str()),
            device_id: DeviceId::new(row.device_id.as_str()),
            last_checked_date: row.last_checked_date,
        })
    }
}
