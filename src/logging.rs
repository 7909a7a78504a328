use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "KEEPSAKE_LOG";

/// Log file location inside the per-user cache directory.
pub fn log_path() -> PathBuf {
    directories::ProjectDirs::from("com", "mrmattias", "keepsake")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("keepsake"))
        .join("keepsake.log")
}

/// Route `tracing` output to the log file. The terminal belongs to the TUI,
/// so nothing is written to stdout/stderr. Logging is skipped if the file
/// cannot be opened.
pub fn init_tracing() {
    let path = log_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .compact()
        .try_init();
}
