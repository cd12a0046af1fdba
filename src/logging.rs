// File-based logging: every tracing event goes to stderr and a timestamped log file.
//
// Creates a new log file on every launch:
//   ~/.local/share/museum-curator/logs/curator-2026-03-01_14-30-00.log
//
// Keeps last 5 log files, deletes older ones. RUST_LOG overrides the default `info` filter.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

const LOG_PREFIX: &str = "curator-";
const KEEP_LOGS: usize = 5;

/// Initialize logging. Call once at startup; later calls are no-ops.
///
/// With `logs_dir` set, events are also appended to a fresh file in that
/// directory. If the file cannot be created, logging stays on stderr only.
pub fn init(logs_dir: Option<&Path>) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);

        let (file_layer, file_error) = match logs_dir.map(open_log_file) {
            Some(Ok((file, path))) => (
                Some(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                ),
                Some(Ok(path)),
            ),
            Some(Err(e)) => (None, Some(Err(e))),
            None => (None, None),
        };

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init();

        if let Err(e) = installed {
            eprintln!("Warning: Failed to install logger: {}", e);
            return;
        }

        match file_error {
            Some(Ok(path)) => tracing::info!("Logging: Writing to {}", path.display()),
            Some(Err(e)) => tracing::warn!("Logging: Failed to initialize file logging: {}", e),
            None => {}
        }
    });
}

fn open_log_file(logs_dir: &Path) -> io::Result<(File, PathBuf)> {
    fs::create_dir_all(logs_dir)?;

    // Make room for the file about to be created
    rotate_logs(logs_dir, KEEP_LOGS - 1)?;

    let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = logs_dir.join(format!("{}{}.log", LOG_PREFIX, timestamp));
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Delete old log files, keeping the most recent `keep` files.
fn rotate_logs(logs_dir: &Path, keep: usize) -> Result<(), io::Error> {
    let mut log_files: Vec<(PathBuf, std::time::SystemTime)> = Vec::new();

    for entry in fs::read_dir(logs_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("log")
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(LOG_PREFIX))
                .unwrap_or(false)
        {
            if let Ok(metadata) = entry.metadata() {
                let modified = metadata.modified().unwrap_or(std::time::UNIX_EPOCH);
                log_files.push((path, modified));
            }
        }
    }

    // Newest first; ties broken by name, which embeds the timestamp
    log_files.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    for (path, _) in log_files.iter().skip(keep) {
        let _ = fs::remove_file(path);
    }

    Ok(())
}

/// Get the logs directory path.
pub fn logs_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("museum-curator").join("logs"))
}
