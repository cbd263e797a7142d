//! Command line surface.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use lp_app::usecases::{DiscoveryOutcome, KnownDevice};
use lp_core::device::{AdapterName, Device};
use lp_core::network::inet4_network_prefix;
use tokio::sync::mpsc;
use tracing::info;

use crate::bootstrap::Runtime;

#[derive(Debug, Parser)]
#[command(name = "lanpeer", version, about = "Discover and remember peers on the local network")]
pub struct Cli {
    /// Path to config.toml; defaults to the per-user data directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show this machine's device identity.
    Whoami,
    /// Print the local adapter that reaches an address.
    Resolve { address: IpAddr },
    /// Ask peers for their identity and record them.
    Discover {
        #[arg(required = true)]
        addresses: Vec<IpAddr>,
    },
    /// List remembered devices, most recently seen first.
    Devices,
    /// Answer identity requests from peers until interrupted.
    Serve,
}

pub async fn run(command: Command, runtime: Runtime) -> anyhow::Result<()> {
    match command {
        Command::Whoami => whoami(&runtime).await,
        Command::Resolve { address } => {
            let adapter = runtime
                .app
                .resolve_adapter()
                .execute(address)
                .unwrap_or_else(AdapterName::unknown);
            println!("{address} -> {adapter}");
            Ok(())
        }
        Command::Discover { addresses } => discover(&runtime, addresses).await,
        Command::Devices => devices(&runtime).await,
        Command::Serve => serve(&runtime).await,
    }
}

async fn whoami(runtime: &Runtime) -> anyhow::Result<()> {
    let device = runtime.app.get_local_device().execute().await?;
    let payload = runtime.app.encode_local_device().execute().await?;

    println!("{}", describe(&device));
    println!("identity: {}", runtime.identity.current_device_id());
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

async fn discover(runtime: &Runtime, addresses: Vec<IpAddr>) -> anyhow::Result<()> {
    let discover = runtime.app.discover_device();
    let (tx, mut rx) = mpsc::unbounded_channel();

    for address in &addresses {
        let tx = tx.clone();
        let address = *address;
        discover.clone().spawn(address, move |outcome| {
            let _ = tx.send((address, outcome));
        });
    }
    drop(tx);

    while let Some((address, outcome)) = rx.recv().await {
        match outcome {
            DiscoveryOutcome::Found { device, is_local } => {
                let marker = if is_local { " (this device)" } else { "" };
                println!("{address}: {}{marker}", describe(&device));
            }
            DiscoveryOutcome::Unidentified(device) => {
                println!("{address}: answered without an id ({})", device.nickname);
            }
            DiscoveryOutcome::NotFound => println!("{address}: not found"),
        }
    }
    Ok(())
}

async fn devices(runtime: &Runtime) -> anyhow::Result<()> {
    let known = runtime.app.list_known_devices().execute().await?;
    if known.is_empty() {
        println!("no known devices");
    }
    for KnownDevice {
        device,
        connections,
    } in known
    {
        println!("{}", describe(&device));
        for connection in connections {
            let subnet = inet4_network_prefix(connection.host_address)
                .unwrap_or_else(|| "-".to_string());
            println!(
                "    {} via {} (subnet {}, checked {})",
                connection.ip_address(),
                connection.adapter_name,
                subnet,
                format_time(Some(connection.last_checked_date)),
            );
        }
    }
    Ok(())
}

async fn serve(runtime: &Runtime) -> anyhow::Result<()> {
    let responder = runtime.bind_responder().await?;
    info!(addr = %responder.local_addr()?, "serving device identity");

    tokio::select! {
        result = responder.serve() => result,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            info!("shutting down");
            Ok(())
        }
    }
}

fn describe(device: &Device) -> String {
    format!(
        "{} [{}] {} {} v{} ({}) last seen {}",
        device.nickname,
        device.device_id,
        device.brand,
        device.model,
        device.version_name,
        device.version_number,
        format_time(device.last_usage_time),
    )
}

fn format_time(unix_ms: Option<i64>) -> String {
    unix_ms
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string())
}
