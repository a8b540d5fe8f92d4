mod config;
mod error;
mod filter;
mod format;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    Layer, Registry, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

type Output = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global tracing subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInstalled`] when called twice.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = filter::build(&cfg.level)?;
    if tracing::dispatcher::has_been_set() {
        return Err(LoggerError::AlreadyInstalled);
    }
    let output = match cfg.format {
        LoggerFormat::Text => text(cfg),
        LoggerFormat::Json => json(cfg),
        LoggerFormat::Journald => journald(cfg)?,
    };

    tracing_subscriber::registry()
        .with(output.with_filter(filter))
        .try_init()
        .map_err(|e| LoggerError::Install(e.to_string()))
}

fn text(cfg: &LoggerConfig) -> Output {
    fmt::layer()
        .with_ansi(cfg.use_color)
        .with_target(cfg.with_targets)
        .with_timer(local_timer())
        .boxed()
}

/// One object per line; the enclosing span carries `operation_id` and `kind`.
fn json(cfg: &LoggerConfig) -> Output {
    fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_current_span(true)
        .with_span_list(false)
        .with_timer(local_timer())
        .boxed()
}

fn local_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald(cfg: &LoggerConfig) -> Result<Output, LoggerError> {
    let layer = tracing_journald::layer()
        .map_err(|e| LoggerError::Install(format!("journald socket: {e}")))?
        .with_syslog_identifier(cfg.syslog_identifier.clone());
    Ok(layer.boxed())
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald(_cfg: &LoggerConfig) -> Result<Output, LoggerError> {
    Err(LoggerError::JournaldUnavailable)
}
