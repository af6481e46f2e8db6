//! Decoupled logging pipeline for the dashboard.
//!
//! ```text
//! log::info!() / log::warn!() ...
//!     |
//! [LogCollector] (log::Log impl, non-blocking)
//!     | (crossbeam unbounded channel)
//!     v
//! [writer thread] --> logs/dashboard_<ts>.log   (always)
//!                 --> UI status bar channel     (best effort, try_send)
//! ```
//!
//! Disk writes never wait on the UI: if the bounded UI channel is full the
//! line is still persisted.

use chrono::Local;
use crossbeam_channel::{unbounded, Sender};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Internal log line or special marker
enum LogMessage {
    Line(LogLine),
    /// Flush marker with channel sender to signal completion
    Flush(std::sync::mpsc::Sender<()>),
}

/// Get the global logs path relative to the current working directory: ./logs
pub fn get_global_logs_path() -> Result<PathBuf, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Failed to get current working directory: {}", e))?;
    Ok(cwd.join("logs"))
}

/// Ensure the global logs directory exists
pub fn ensure_logs_dir_exists(log_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| format!("Failed to create logs directory: {}", e))
}

/// A log line with metadata
#[derive(Clone, Debug)]
pub struct LogLine {
    pub level: Level,
    pub message: String,
    /// Wall-clock time the line was created (HH:MM:SS.mmm)
    pub timestamp: String,
}

impl LogLine {
    pub fn new(level: Level, message: String) -> Self {
        LogLine {
            level,
            message,
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }

    /// Line as written to disk
    pub fn formatted(&self) -> String {
        format!("[{}] [{}] {}", self.timestamp, self.level, self.message)
    }
}

/// Unified logger that handles disk and UI dispatch
#[derive(Clone)]
pub struct LogCollector {
    tx: Sender<LogMessage>,
    log_path: PathBuf,
    max_level: LevelFilter,
}

impl LogCollector {
    /// Create a collector writing to a fresh `dashboard_<timestamp>.log` in `log_dir`
    pub fn new(
        log_dir: PathBuf,
        ui_tx: tokio::sync::mpsc::Sender<LogLine>,
        max_level: LevelFilter,
    ) -> Result<Self, String> {
        ensure_logs_dir_exists(&log_dir)?;
        let log_path = log_dir.join(format!(
            "dashboard_{}.log",
            Local::now().format("%Y%m%d_%H%M%S")
        ));
        let mut file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| format!("Failed to open log file {}: {}", log_path.display(), e))?;

        let (tx, rx) = unbounded::<LogMessage>();

        // Plain OS thread: the writer must keep draining even if no runtime is alive
        std::thread::spawn(move || {
            while let Ok(msg) = rx.recv() {
                match msg {
                    LogMessage::Line(line) => {
                        let _ = writeln!(file, "{}", line.formatted());
                        let _ = ui_tx.try_send(line);
                    }
                    LogMessage::Flush(done) => {
                        let _ = file.flush();
                        let _ = file.sync_data();
                        let _ = done.send(());
                    }
                }
            }
            eprintln!("[Log] Disk writer thread shutting down");
        });

        Ok(LogCollector {
            tx,
            log_path,
            max_level,
        })
    }

    /// Path of this session's log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    /// Queue a line (never blocks)
    pub fn push(&self, line: LogLine) {
        let _ = self.tx.send(LogMessage::Line(line));
    }

    pub fn log_str(&self, level: Level, message: impl Into<String>) {
        self.push(LogLine::new(level, message.into()));
    }

    /// Wait until every line queued before this call has been written to disk.
    pub async fn wait_for_empty(&self) -> Result<(), String> {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        self.tx
            .send(LogMessage::Flush(tx))
            .map_err(|e| format!("Failed to send flush marker: {}", e))?;
        tokio::task::spawn_blocking(move || rx.recv())
            .await
            .map_err(|e| format!("Flush task failed: {}", e))?
            .map_err(|e| format!("Flush signal interrupted: {}", e))
    }

    /// Install this collector as the global `log` backend
    pub fn install(&self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(self.max_level);
        Ok(())
    }
}

/// Wires all log::info!(), log::warn!(), log::error!() calls into LogCollector
impl Log for LogCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.log_str(record.level(), record.args().to_string());
        }
    }

    fn flush(&self) {}
}
