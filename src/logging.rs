//! File logging. The terminal belongs to the table UI, so log output goes to
//! `ytwl.log` in the platform data dir, filtered by `YTWL_LOG` (default `info`).

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::constants::constants;

pub fn log_dir() -> Option<PathBuf> {
  ProjectDirs::from("", "", "ytwl").map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Install the global subscriber. Keep the guard alive until exit so buffered lines flush.
/// Returns `None` when there is nowhere to log to; the app runs without logging then.
pub fn init() -> Option<WorkerGuard> {
  let dir = log_dir()?;
  std::fs::create_dir_all(&dir).ok()?;
  let c = constants();
  let appender = tracing_appender::rolling::never(&dir, &c.log_file_name);
  let (writer, guard) = tracing_appender::non_blocking(appender);
  let filter = EnvFilter::try_from_env(&c.log_env_var).unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt().with_writer(writer).with_ansi(false).with_env_filter(filter).try_init().ok()?;
  Some(guard)
}
