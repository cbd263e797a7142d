/// Descriptive attributes of the machine this process runs on.
pub trait PlatformInfoPort: Send + Sync {
    /// Platform family, e.g. `Linux`.
    fn brand(&self) -> String;

    /// Machine description, e.g. the host name.
    fn model(&self) -> String;

    fn host_name(&self) -> String;
}
