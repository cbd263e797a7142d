use lp_core::ports::PlatformInfoPort;

const FALLBACK_HOST_NAME: &str = "lanpeer-device";

/// Describes the running host from the OS family and host name.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatformInfo;

impl HostPlatformInfo {
    pub fn new() -> Self {
        Self
    }
}

fn os_family(os: &str) -> String {
    match os {
        "linux" => "Linux".to_string(),
        "macos" => "macOS".to_string(),
        "windows" => "Windows".to_string(),
        "android" => "Android".to_string(),
        "ios" => "iOS".to_string(),
        other => other.to_string(),
    }
}

impl PlatformInfoPort for HostPlatformInfo {
    fn brand(&self) -> String {
        os_family(std::env::consts::OS)
    }

    fn model(&self) -> String {
        self.host_name()
    }

    fn host_name(&self) -> String {
        let host = gethostname::gethostname();
        match host.to_str() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => FALLBACK_HOST_NAME.to_string(),
        }
    }
}
