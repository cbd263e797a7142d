//! Builds the application graph from configuration.
//!
//! Every store, scanner and bridge is created here once and handed to
//! [`App`] as an `Arc<dyn Port>`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use lp_app::usecases::EncodeLocalDevice;
use lp_app::{App, AppDeps};
use lp_core::config::AppConfig;
use lp_core::ports::{DeviceIdentityPort, SettingsPort};
use lp_infra::db::executor::DieselSqliteExecutor;
use lp_infra::db::mappers::{DeviceConnectionRowMapper, DeviceRowMapper};
use lp_infra::db::pool::init_db_pool;
use lp_infra::db::repositories::{DieselDeviceConnectionRepository, DieselDeviceRepository};
use lp_infra::{FileSettingsRepository, SettingsDeviceIdentity, SystemClock};
use lp_platform::{HostPlatformInfo, IdentityResponder, IdentitySource, NetdevInterfaces, TcpIdentityBridge};
use serde_json::Value;
use tracing::info;

/// A wired application plus the handles the CLI needs besides the use cases.
pub struct Runtime {
    pub app: App,
    pub identity: Arc<dyn DeviceIdentityPort>,
    pub config: AppConfig,
}

impl Runtime {
    /// Bind the identity responder on every interface at the bridge port.
    pub async fn bind_responder(&self) -> anyhow::Result<IdentityResponder> {
        let addr = SocketAddr::new(
            IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            self.config.network.bridge_port,
        );
        let source = Arc::new(LocalIdentitySource(self.app.encode_local_device()));
        IdentityResponder::bind(addr, source)
            .await
            .with_context(|| format!("failed to bind identity responder on {addr}"))
    }
}

/// Answers bridge requests with this machine's encoded identity.
struct LocalIdentitySource(Arc<EncodeLocalDevice>);

#[async_trait]
impl IdentitySource for LocalIdentitySource {
    async fn identity(&self) -> anyhow::Result<Value> {
        self.0.execute().await
    }
}

pub async fn build_runtime(config: AppConfig) -> anyhow::Result<Runtime> {
    if let Some(dir) = config.storage.database_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create data dir: {}", dir.display()))?;
    }
    let database_url = config
        .storage
        .database_path
        .to_str()
        .context("database path is not valid UTF-8")?;
    let pool = init_db_pool(database_url)?;
    let executor = DieselSqliteExecutor::new(pool);

    let settings: Arc<dyn SettingsPort> =
        Arc::new(FileSettingsRepository::new(&config.storage.settings_path));
    let identity: Arc<dyn DeviceIdentityPort> = Arc::new(
        SettingsDeviceIdentity::load_or_create(settings.as_ref())
            .await
            .context("failed to load device identity")?,
    );
    info!(
        device_id = %identity.current_device_id(),
        database = %config.storage.database_path.display(),
        "lanpeer storage ready"
    );

    let deps = AppDeps {
        device_repo: Arc::new(DieselDeviceRepository::new(
            executor.clone(),
            DeviceRowMapper,
        )),
        connection_repo: Arc::new(DieselDeviceConnectionRepository::new(
            executor,
            DeviceConnectionRowMapper,
        )),
        settings,
        device_identity: identity.clone(),
        network_interfaces: Arc::new(NetdevInterfaces::new()),
        identity_bridge: Arc::new(TcpIdentityBridge::new(
            config.network.bridge_port,
            Duration::from_millis(config.network.bridge_timeout_ms),
        )),
        platform: Arc::new(HostPlatformInfo::new()),
        clock: Arc::new(SystemClock),
    };

    Ok(Runtime {
        app: App::new(deps),
        identity,
        config,
    })
}
