//! In-memory port fakes shared by the use case tests.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lp_core::device::{Device, DeviceConnection, DeviceId};
use lp_core::network::NetworkInterface;
use lp_core::ports::*;
use lp_core::settings::Settings;
use serde_json::Value;

pub struct FakeInterfaces {
    interfaces: Vec<NetworkInterface>,
    scans: AtomicUsize,
}

impl FakeInterfaces {
    pub fn new(interfaces: Vec<NetworkInterface>) -> Self {
        Self {
            interfaces,
            scans: AtomicUsize::new(0),
        }
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl NetworkInterfacePort for FakeInterfaces {
    fn active_interfaces(&self) -> Vec<NetworkInterface> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        self.interfaces.clone()
    }
}

pub struct FakeClock(AtomicI64);

impl FakeClock {
    pub fn at(now_ms: i64) -> Self {
        Self(AtomicI64::new(now_ms))
    }

    pub fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl ClockPort for FakeClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct FakePlatform;

impl PlatformInfoPort for FakePlatform {
    fn brand(&self) -> String {
        "Linux".to_string()
    }

    fn model(&self) -> String {
        "test-host".to_string()
    }

    fn host_name(&self) -> String {
        "test-host".to_string()
    }
}

pub struct FixedIdentity(DeviceId);

impl FixedIdentity {
    pub fn new(id: &str) -> Self {
        Self(DeviceId::new(id))
    }
}

impl DeviceIdentityPort for FixedIdentity {
    fn current_device_id(&self) -> DeviceId {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct InMemorySettings {
    settings: Mutex<Settings>,
    saves: AtomicUsize,
}

impl InMemorySettings {
    pub fn with_device_id(id: &str) -> Self {
        let mut settings = Settings::default();
        settings.device.device_id = Some(id.to_string());
        Self {
            settings: Mutex::new(settings),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_nickname(&self, nickname: &str) {
        self.settings.lock().unwrap().device.nickname = Some(nickname.to_string());
    }
}

#[async_trait]
impl SettingsPort for InMemorySettings {
    async fn load(&self) -> anyhow::Result<Settings> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.settings.lock().unwrap() = settings.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryDevices {
    devices: Mutex<HashMap<DeviceId, Device>>,
    publishes: AtomicUsize,
    fail_writes: bool,
}

impl InMemoryDevices {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, device: Device) {
        self.devices
            .lock()
            .unwrap()
            .insert(device.device_id.clone(), device);
    }

    pub fn get(&self, id: &str) -> Option<Device> {
        self.devices.lock().unwrap().get(&DeviceId::new(id)).cloned()
    }

    pub fn publishes(&self) -> usize {
        self.publishes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeviceRepositoryPort for InMemoryDevices {
    async fn find_by_id(&self, id: &DeviceId) -> Result<Option<Device>, DeviceRepositoryError> {
        Ok(self.devices.lock().unwrap().get(id).cloned())
    }

    async fn publish(&self, device: &Device) -> Result<(), DeviceRepositoryError> {
        if self.fail_writes {
            return Err(DeviceRepositoryError::Storage("disk full".to_string()));
        }
        self.publishes.fetch_add(1, Ordering::SeqCst);
        self.insert(device.clone());
        Ok(())
    }

    async fn delete(&self, id: &DeviceId) -> Result<(), DeviceRepositoryError> {
        match self.devices.lock().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DeviceRepositoryError::NotFound),
        }
    }

    async fn list_all(&self) -> Result<Vec<Device>, DeviceRepositoryError> {
        let mut devices: Vec<Device> = self.devices.lock().unwrap().values().cloned().collect();
        devices.sort_by(|a, b| b.last_usage_time.cmp(&a.last_usage_time));
        Ok(devices)
    }
}

#[derive(Default)]
pub struct InMemoryConnections {
    rows: Mutex<Vec<DeviceConnection>>,
    replaces: AtomicUsize,
    fail_writes: bool,
}

impl InMemoryConnections {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, connection: DeviceConnection) {
        self.rows.lock().unwrap().push(connection);
    }

    pub fn rows(&self) -> Vec<DeviceConnection> {
        self.rows.lock().unwrap().clone()
    }

    pub fn replaces(&self) -> usize {
        self.replaces.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionRepositoryPort for InMemoryConnections {
    async fn reconstruct(
        &self,
        connection: &mut DeviceConnection,
    ) -> Result<bool, ConnectionRepositoryError> {
        let rows = self.rows.lock().unwrap();
        let found = rows
            .iter()
            .filter(|row| row.ip_address() == connection.ip_address())
            .filter(|row| connection.device_id.is_empty() || row.device_id == connection.device_id)
            .max_by_key(|row| row.last_checked_date);

        match found {
            Some(row) => {
                connection.adapter_name = row.adapter_name.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace(&self, connection: &DeviceConnection) -> Result<(), ConnectionRepositoryError> {
        if self.fail_writes {
            return Err(ConnectionRepositoryError::Storage("disk full".to_string()));
        }
        self.replaces.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|row| {
            !(row.device_id == connection.device_id
                && (row.adapter_name == connection.adapter_name
                    || row.ip_address() == connection.ip_address()))
        });
        rows.push(connection.clone());
        Ok(())
    }

    async fn list_for_device(
        &self,
        device_id: &DeviceId,
    ) -> Result<Vec<DeviceConnection>, ConnectionRepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| &row.device_id == device_id)
            .cloned()
            .collect())
    }
}

/// Bridge answering from a fixed table of peers.
#[derive(Default)]
pub struct FakeBridge {
    peers: HashMap<IpAddr, Value>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl FakeBridge {
    pub fn with_peer(mut self, address: IpAddr, payload: Value) -> Self {
        self.peers.insert(address, payload);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct FakeSession {
    payload: Option<Value>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl IdentitySession for FakeSession {
    async fn fetch_device_identity(&mut self) -> Result<Value, BridgeError> {
        self.payload
            .take()
            .ok_or_else(|| BridgeError::Malformed("empty response".to_string()))
    }

    async fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityBridgePort for FakeBridge {
    async fn open(&self, address: IpAddr) -> Result<Box<dyn IdentitySession>, BridgeError> {
        match self.peers.get(&address) {
            Some(payload) => {
                self.opened.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(FakeSession {
                    payload: Some(payload.clone()),
                    closed: self.closed.clone(),
                }))
            }
            None => Err(BridgeError::Connect {
                address: address.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}
