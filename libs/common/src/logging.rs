//! Logging setup shared by the screen position services
//!
//! Console and file output share one event format:
//! `2025-12-02T00:50:44.809Z [INFO] message`. The file layer writes to a
//! daily rolling file `{log_dir}/{service}.log.YYYY-MM-DD` through a
//! non-blocking writer whose guard lives for the rest of the process.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use tracing::{debug, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Target used by the HTTP access log middleware
pub const API_ACCESS_TARGET: &str = "api_access";

/// Keeps the file writer flushing until the process exits
static FILE_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();

fn format_level(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "\x1b[35m",
        Level::DEBUG => "\x1b[34m",
        Level::INFO => "\x1b[32m",
        Level::WARN => "\x1b[33m",
        Level::ERROR => "\x1b[31m",
    }
}

/// Event formatter producing `timestamp [LEVEL] message fields`
struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(writer, "{} ", now.format("%Y-%m-%dT%H:%M:%S%.3fZ"))?;

        let level = event.metadata().level();
        if writer.has_ansi_escapes() {
            write!(
                writer,
                "{}{}\x1b[0m ",
                level_color(level),
                format_level(level)
            )?;
        } else {
            write!(writer, "{} ", format_level(level))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Logging configuration for one service process
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Service name, used as the log file prefix
    pub service_name: String,
    /// Directory for rolling log files; `None` logs to the console only
    pub log_dir: Option<PathBuf>,
    /// Filter directive (`info`, `debug`, `screensrv=trace,api_access=info`, ...)
    pub level: String,
    /// Colored console output
    pub ansi: bool,
}

impl LogConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_dir: Some(PathBuf::from("logs")),
            level: "info".to_string(),
            ansi: true,
        }
    }

    /// Build the filter, falling back to `info` when the directive does not parse
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|e| {
            eprintln!(
                "Invalid log filter '{}' ({}), falling back to info",
                self.level, e
            );
            EnvFilter::new("info")
        })
    }
}

/// Install the global subscriber
///
/// Fails if a global subscriber is already installed or the log directory
/// cannot be created.
pub fn init_with_config(config: &LogConfig) -> anyhow::Result<()> {
    let file_writer = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender =
                tracing_appender::rolling::daily(dir, format!("{}.log", config.service_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let slot = FILE_GUARD.get_or_init(|| Mutex::new(None));
            match slot.lock() {
                Ok(mut slot) => *slot = Some(guard),
                Err(poisoned) => *poisoned.into_inner() = Some(guard),
            }
            Some(writer)
        },
        None => None,
    };

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .event_format(BracketedLevelFormat)
    });

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(
            fmt::layer()
                .with_ansi(config.ansi)
                .event_format(BracketedLevelFormat),
        )
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Axum middleware writing one access log line per request
///
/// Requests are logged on the [`API_ACCESS_TARGET`] target at DEBUG level so
/// that polling clients do not flood the service log.
pub async fn http_request_logger(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    debug!(
        target: API_ACCESS_TARGET,
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "HTTP request"
    );

    response
}
