use serde::Deserialize;

/// Connection settings for the robot's control API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub slam_ip: String,
    pub slam_port: u16,
    /// Connect timeout for every call.
    pub timeout_ms: u64,
    /// Total time allowed for one request/response exchange.
    pub request_timeout_ms: u64,
    /// Total time allowed for a map binary upload.
    pub upload_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            slam_ip: "127.0.0.1".to_string(),
            slam_port: 1448,
            timeout_ms: 1_000,
            request_timeout_ms: 10_000,
            upload_timeout_ms: 30_000,
        }
    }
}

impl ClientConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.slam_ip, self.slam_port)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.slam_ip.trim().is_empty() {
            return Err("slam_ip must not be empty".into());
        }
        if self.slam_port == 0 {
            return Err("slam_port must be non-zero".into());
        }
        if self.timeout_ms == 0 || self.request_timeout_ms == 0 || self.upload_timeout_ms == 0 {
            return Err("client timeouts must be non-zero".into());
        }
        Ok(())
    }
}
