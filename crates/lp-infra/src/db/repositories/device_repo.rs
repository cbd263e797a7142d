use async_trait::async_trait;
use diesel::prelude::*;

use lp_core::device::{Device, DeviceId};
use lp_core::ports::{DeviceRepositoryError, DeviceRepositoryPort};

use crate::db::models::DeviceRow;
use crate::db::ports::{run_blocking, DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::t_device::dsl::*;

pub struct DieselDeviceRepository<E, M> {
    executor: E,
    mapper: M,
}

impl<E, M> DieselDeviceRepository<E, M> {
    pub fn new(executor: E, mapper: M) -> Self {
        Self { executor, mapper }
    }
}

#[async_trait]
impl<E, M> DeviceRepositoryPort for DieselDeviceRepository<E, M>
where
    E: DbExecutor,
    M: InsertMapper<Device, DeviceRow> + RowMapper<DeviceRow, Device> + Send + Sync,
{
    async fn find_by_id(&self, id: &DeviceId) -> Result<Option<Device>, DeviceRepositoryError> {
        let id_str = id.as_str().to_string();
        let row = run_blocking(&self.executor, move |conn| {
            t_device
                .filter(device_id.eq(&id_str))
                .first::<DeviceRow>(conn)
                .optional()
                .map_err(|e| anyhow::anyhow!(e))
        })
        .await
        .map_err(|e| DeviceRepositoryError::Storage(e.to_string()))?;

        row.map(|r| self.mapper.to_domain(&r))
            .transpose()
            .map_err(|e| DeviceRepositoryError::Storage(e.to_string()))
    }

    async fn publish(&self, device: &Device) -> Result<(), DeviceRepositoryError> {
        let row = self
            .mapper
            .to_row(device)
            .map_err(|e| DeviceRepositoryError::Storage(e.to_string()))?;

        run_blocking(&self.executor, move |conn| {
            diesel::insert_into(t_device)
                .values(&row)
                .on_conflict(device_id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            Ok(())
        })
        .await
        .map_err(|e| DeviceRepositoryError::Storage(e.to_string()))
    }

    async fn delete(&self, id: &DeviceId) -> Result<(), DeviceRepositoryError> {
        let id_str = id.as_str().to_string();
        let affected = run_blocking(&self.executor, move |conn| {
            diesel::delete(t_device.filter(device_id.eq(&id_str)))
                .execute(conn)
                .map_err(|e| anyhow::anyhow!(e))
        })
        .await
        .map_err(|e| DeviceRepositoryError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(DeviceRepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Device>, DeviceRepositoryError> {
        let rows = run_blocking(&self.executor, |conn| {
            t_device
                .order((last_usage_time.desc(), device_id.asc()))
                .load::<DeviceRow>(conn)
                .map_err(|e| anyhow::anyhow!(e))
        })
        .await
        .map_err(|e| DeviceRepositoryError::Storage(e.to_string()))?;

        let mut devices = Vec::with_capacity(rows.len());
        for row in rows {
            let device = self.mapper.to_domain(&row).map_err(|e| {
                DeviceRepositoryError::Storage(format!(
                    "Failed to map t_device {}: {}",
                    row.device_id, e
                ))
            })?;
            devices.push(device);
        }

        Ok(devices)
    }
}
