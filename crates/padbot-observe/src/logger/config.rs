use std::io::IsTerminal;

use serde::Deserialize;

use crate::logger::format::LoggerFormat;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// Bare level for the padbot crates (`debug`), or a full `EnvFilter`
    /// directive (`padbot_core=trace,info`).
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
    /// `SYSLOG_IDENTIFIER` of journald entries.
    pub syslog_identifier: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
            syslog_identifier: "padbot-agentd".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: LoggerConfig = serde_json::from_str(r#"{"format":"json","level":"debug"}"#).unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level, "debug");
        assert!(cfg.with_targets);
        assert_eq!(cfg.syslog_identifier, "padbot-agentd");
    }

    #[test]
    fn unknown_format_fails_to_load() {
        let err = serde_json::from_str::<LoggerConfig>(r#"{"format":"xml"}"#).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }
}
