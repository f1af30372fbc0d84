//! Logging Infrastructure
//!
//! Structured logging for the process hosting the rules engine.
//! Features:
//! - Pretty console output for development, JSON for production
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent audit logs for recorded visits and tier changes

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate, TimeZone};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Days application logs are kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

/// Target used by [`audit_log!`](crate::audit_log)
pub const AUDIT_TARGET: &str = "audit";

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Delete `app.YYYY-MM-DD.log` files older than the retention window.
///
/// Audit logs are never touched. Returns how many files were removed.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    let cutoff = Local::now() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date_part) = name
            .strip_prefix("app.")
            .and_then(|d| d.strip_suffix(".log"))
        else {
            continue;
        };

        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && let Some(midnight) = date.and_hms_opt(0, 0, 0)
            && let Some(local) = Local.from_local_datetime(&midnight).single()
            && local < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(removed)
}

fn daily_appender(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    fs::create_dir_all(dir)?;
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)?)
}

fn file_layer(appender: RollingFileAppender, json_format: bool, audit: bool) -> BoxedLayer {
    let target_filter = filter_fn(move |meta| (meta.target() == AUDIT_TARGET) == audit);
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(appender));

    if json_format {
        layer.json().with_filter(target_filter).boxed()
    } else {
        layer.with_filter(target_filter).boxed()
    }
}

/// Initialize the logging system with daily rotating logs
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins if set
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for file logging
///
/// Calling it twice is an error rather than a panic.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let console = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    if json_format {
        layers.push(console.json().with_current_span(true).with_thread_ids(true).boxed());
    } else {
        layers.push(console.boxed());
    }

    if let Some(dir) = log_dir {
        let app_log = daily_appender(&dir.join("app"), "app")?;
        let audit_log = daily_appender(&dir.join(AUDIT_TARGET), AUDIT_TARGET)?;
        layers.push(file_layer(app_log, json_format, false));
        layers.push(file_layer(audit_log, json_format, true));
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    // Pruned once here; long-running hosts call cleanup_old_logs on a schedule
    if let Some(dir) = log_dir
        && let Err(e) = cleanup_old_logs(dir)
    {
        tracing::error!(error = %e, "Failed to cleanup old logs");
    }

    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Audit log helper - records visits and tier changes
///
/// Audit logs are stored in `audit/audit.YYYY-MM-DD.log` and are never
/// deleted by [`cleanup_old_logs`].
///
/// # Examples
/// ```no_run
/// salon_core::audit_log!("stylist:7", "record_visit", "member:42");
/// salon_core::audit_log!("system", "tier_change", "member:42", "silver -> gold");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($actor:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            actor = $actor,
            action = $action,
            resource = $resource,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($actor:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            actor = $actor,
            action = $action,
            resource = $resource,
            details = $details,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}
