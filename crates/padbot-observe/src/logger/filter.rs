use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Crates whose events follow the configured level.
const OWN_TARGETS: [&str; 5] = [
    "padbot_agentd",
    "padbot_api",
    "padbot_core",
    "padbot_client",
    "padbot_observe",
];

/// Level for everything else (reqwest, hyper, axum), unless ours is quieter.
const DEPENDENCY_LEVEL: &str = "warn";

/// Expand a bare level into per-crate directives.
///
/// `debug` becomes `warn,padbot_agentd=debug,...`; anything containing `=` or
/// `,` is taken as a full `EnvFilter` directive and passed through.
pub(crate) fn directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    let quieter = matches!(level.to_ascii_lowercase().as_str(), "error" | "off");
    let mut out = String::from(if quieter { level } else { DEPENDENCY_LEVEL });
    for target in OWN_TARGETS {
        out.push(',');
        out.push_str(target);
        out.push('=');
        out.push_str(level);
    }
    out
}

pub(crate) fn build(level: &str) -> Result<EnvFilter, LoggerError> {
    let directive = directives(level);
    EnvFilter::try_new(&directive).map_err(|e| LoggerError::BadFilter {
        directive,
        reason: e.to_string(),
    })
}
