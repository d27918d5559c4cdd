/// Process-wide state: the active logger and the default view configuration.
///
/// Both live in `OnceLock` statics guarded by `RwLock`, so they can be
/// replaced at runtime from any thread. Query state (generation stamps)
/// lives in each `VisibilityEngine`, not here.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::config::ViewConfig;
use crate::error::{Error, Result};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Default configuration handed to new `ViewState`s
static CONFIG: OnceLock<RwLock<ViewConfig>> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn config_lock() -> &'static RwLock<ViewConfig> {
    CONFIG.get_or_init(|| RwLock::new(ViewConfig::default()))
}

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Global configuration and logging hub
///
/// # Example
///
/// ```no_run
/// use rts_view_query::viewquery::{Engine, ViewConfig};
///
/// Engine::initialize(ViewConfig {
///     view_range: 6000.0,
///     ..ViewConfig::default()
/// })?;
///
/// let config = Engine::config();
/// assert_eq!(config.view_range, 6000.0);
/// # Ok::<(), rts_view_query::viewquery::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Install the default view configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration fails validation,
    /// or if the config lock is poisoned.
    pub fn initialize(config: ViewConfig) -> Result<()> {
        if let Err(err) = config.validate() {
            crate::view_error!("viewquery::Engine", "Rejected configuration: {}", err);
            return Err(err);
        }

        let mut lock = config_lock().write()
            .map_err(|_| Error::InvalidConfig("Config lock poisoned".to_string()))?;
        *lock = config;

        crate::view_info!("viewquery::Engine", "View configuration installed");
        Ok(())
    }

    /// Current default configuration (a copy).
    pub fn config() -> ViewConfig {
        config_lock()
            .read()
            .map(|config| config.clone())
            .unwrap_or_default()
    }

    /// Restore `ViewConfig::default()` and the default logger.
    pub fn shutdown() {
        if let Ok(mut lock) = config_lock().write() {
            *lock = ViewConfig::default();
        }
        Self::reset_logger();
    }

    // ===== LOGGING API =====

    /// Replace the active logger.
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to `DefaultLogger`.
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Log without file:line (used by `view_trace!` .. `view_warn!`).
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Log with file:line (used by `view_error!`).
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
