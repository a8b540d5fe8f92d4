use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;

use padbot_api::ApiConfig;
use padbot_client::ClientConfig;
use padbot_core::ControllerConfig;
use padbot_observe::LoggerConfig;

#[derive(Debug, Parser)]
#[command(name = "padbot-agentd", version, about = "Robot control agent")]
pub struct Cli {
    /// YAML configuration file. A missing file means all defaults.
    #[arg(long, env = "PADBOT_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Override the HTTP listen address.
    #[arg(long)]
    pub listen: Option<SocketAddr>,

    /// Override the log filter, e.g. `debug` or `padbot_core=trace,info`.
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Process configuration, read once at start.
///
/// Robot connection keys (`slam_ip`, `slam_port`, `timeout_ms`, ...) and the
/// six-element `homedock` sit at the top level of the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub client: ClientConfig,
    /// Fallback home dock `[x, y, z, yaw, pitch, roll]`.
    pub homedock: Option<[f64; 6]>,
    pub controller: ControllerConfig,
    pub logger: LoggerConfig,
    pub api: ApiConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        Self::from_yaml(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Command-line flags win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(listen) = cli.listen {
            self.api.listen = listen;
        }
        if let Some(level) = &cli.log_level {
            self.logger.level = level.clone();
        }
    }

    /// Controller settings with the top-level `homedock` folded in.
    pub fn controller_config(&self) -> ControllerConfig {
        let mut cfg = self.controller.clone();
        if let Some(dock) = self.homedock {
            cfg.pipeline.home_dock = Some(dock);
        }
        cfg
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Err(e) = self.client.validate() {
            bail!("invalid robot connection settings: {e}");
        }
        if let Some(dock) = self.homedock
            && dock.iter().any(|v| !v.is_finite())
        {
            bail!("homedock must contain six finite numbers");
        }
        self.controller_config().validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use padbot_observe::LoggerFormat;

    use super::*;

    #[test]
    fn top_level_robot_keys() {
        let cfg = AppConfig::from_yaml(
            r#"
slam_ip: 192.168.11.1
slam_port: 1450
timeout_ms: 2000
homedock: [3.0, 4.0, 0.0, 1.57, 0.0, 0.0]
"#,
        )
        .unwrap();

        assert_eq!(cfg.client.slam_ip, "192.168.11.1");
        assert_eq!(cfg.client.slam_port, 1450);
        assert_eq!(cfg.client.timeout_ms, 2000);
        assert_eq!(cfg.client.upload_timeout_ms, 30_000);
        assert_eq!(
            cfg.controller_config().pipeline.home_dock,
            Some([3.0, 4.0, 0.0, 1.57, 0.0, 0.0])
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn nested_sections() {
        let cfg = AppConfig::from_yaml(
            r#"
controller:
  max_concurrent_operations: 2
  supersede_motion: false
  supervisor:
    timeout_ms: 60000
  seeder:
    waypoints_path: /var/lib/padbot/waypoints.json
logger:
  format: json
  level: debug
api:
  listen: 127.0.0.1:9090
"#,
        )
        .unwrap();

        assert_eq!(cfg.controller.max_concurrent_operations, 2);
        assert!(!cfg.controller.supersede_motion);
        assert_eq!(cfg.controller.supervisor.timeout_ms, 60_000);
        assert_eq!(cfg.controller.supervisor.poll_interval_ms, 500);
        assert_eq!(
            cfg.controller.seeder.waypoints_path,
            PathBuf::from("/var/lib/padbot/waypoints.json")
        );
        assert_eq!(cfg.logger.format, LoggerFormat::Json);
        assert_eq!(cfg.api.listen, "127.0.0.1:9090".parse().unwrap());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = AppConfig::from_yaml("").unwrap();
        assert_eq!(cfg.client.slam_port, 1448);
        assert!(cfg.homedock.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_file_is_all_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/padbot/config.yaml")).unwrap();
        assert_eq!(cfg.client.slam_ip, "127.0.0.1");
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "slam_ip: 10.0.0.5").unwrap();

        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.client.slam_ip, "10.0.0.5");
    }

    #[test]
    fn rejects_zero_values() {
        let zero_port = AppConfig::from_yaml("slam_port: 0").unwrap();
        assert!(zero_port.validate().is_err());

        let zero_timeout = AppConfig::from_yaml("timeout_ms: 0").unwrap();
        assert!(zero_timeout.validate().is_err());

        let zero_poll =
            AppConfig::from_yaml("controller:\n  supervisor:\n    poll_interval_ms: 0").unwrap();
        assert!(zero_poll.validate().is_err());

        let zero_pool =
            AppConfig::from_yaml("controller:\n  max_concurrent_operations: 0").unwrap();
        assert!(zero_pool.validate().is_err());
    }

    #[test]
    fn cli_overrides_file() {
        let mut cfg = AppConfig::default();
        let cli = Cli::parse_from([
            "padbot-agentd",
            "--listen",
            "127.0.0.1:7000",
            "--log-level",
            "debug",
        ]);

        cfg.apply_cli(&cli);
        assert_eq!(cfg.api.listen.port(), 7000);
        assert_eq!(cfg.logger.level, "debug");
    }
}
