use async_trait::async_trait;
use diesel::prelude::*;
use tracing::debug;

use lp_core::device::{AdapterName, DeviceConnection, DeviceId};
use lp_core::ports::{ConnectionRepositoryError, ConnectionRepositoryPort};

use crate::db::models::{DeviceConnectionRow, NewDeviceConnectionRow};
use crate::db::ports::{run_blocking, DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::t_device_connection::dsl::*;

pub struct DieselDeviceConnectionRepository<E, M> {
    executor: E,
    mapper: M,
}

impl<E, M> DieselDeviceConnectionRepository<E, M> {
    pub fn new(executor: E, mapper: M) -> Self {
        Self { executor, mapper }
    }
}

#[async_trait]
impl<E, M> ConnectionRepositoryPort for DieselDeviceConnectionRepository<E, M>
where
    E: DbExecutor,
    M: InsertMapper<DeviceConnection, NewDeviceConnectionRow>
        + RowMapper<DeviceConnectionRow, DeviceConnection>
        + Send
        + Sync,
{
    async fn reconstruct(
        &self,
        connection: &mut DeviceConnection,
    ) -> Result<bool, ConnectionRepositoryError> {
        let address = connection.ip_address();
        let owner = (!connection.device_id.is_empty())
            .then(|| connection.device_id.as_str().to_string());

        let adapter = run_blocking(&self.executor, move |conn| {
            let latest = (last_checked_date.desc(), id.desc());
            let at_address = t_device_connection
                .select(adapter_name)
                .filter(ip_address.eq(address));

            match owner {
                Some(owner) => at_address
                    .filter(device_id.eq(owner))
                    .order(latest)
                    .first::<String>(conn),
                None => at_address.order(latest).first::<String>(conn),
            }
            .optional()
            .map_err(|e| anyhow::anyhow!(e))
        })
        .await
        .map_err(|e| ConnectionRepositoryError::Storage(e.to_string()))?;

        match adapter {
            Some(name) => {
                connection.adapter_name = AdapterName::new(name);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace(&self, connection: &DeviceConnection) -> Result<(), ConnectionRepositoryError> {
        let row = self
            .mapper
            .to_row(connection)
            .map_err(|e| ConnectionRepositoryError::Storage(e.to_string()))?;

        let removed = run_blocking(&self.executor, move |conn| {
            conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
                let removed = diesel::delete(
                    t_device_connection.filter(
                        device_id.eq(&row.device_id).and(
                            adapter_name
                                .eq(&row.adapter_name)
                                .or(ip_address.eq(&row.ip_address)),
                        ),
                    ),
                )
                .execute(conn)?;

                diesel::insert_into(t_device_connection)
                    .values(&row)
                    .execute(conn)?;

                Ok(removed)
            })
        })
        .await
        .map_err(|e| ConnectionRepositoryError::Storage(e.to_string()))?;

        debug!(
            device_id = %connection.device_id,
            adapter = %connection.adapter_name,
            removed,
            "connection replaced"
        );
        Ok(())
    }

    async fn list_for_device(
        &self,
        owner: &DeviceId,
    ) -> Result<Vec<DeviceConnection>, ConnectionRepositoryError> {
        let owner = owner.as_str().to_string();
        let rows = run_blocking(&self.executor, move |conn| {
            t_device_connection
                .filter(device_id.eq(owner))
                .order((last_checked_date.desc(), id.desc()))
                .load::<DeviceConnectionRow>(conn)
                .map_err(|e| anyhow::anyhow!(e))
        })
        .await
        .map_err(|e| ConnectionRepositoryError::Storage(e.to_string()))?;

        rows.iter()
            .map(|row| self.mapper.to_domain(row))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ConnectionRepositoryError::Storage(e.to_string()))
    }
}
