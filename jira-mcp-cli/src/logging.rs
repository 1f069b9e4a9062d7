//! Log destination and subscriber setup
//!
//! In stdio MCP mode stdout carries the protocol, so logs go to a file that is
//! flushed on every write. Everywhere else they go to stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Directory under the home directory holding the MCP log
pub const LOG_DIR: &str = ".jira-mcp";

/// Default log file name, overridable with `JIRA_MCP_LOG_FILE`
pub const DEFAULT_LOG_FILE: &str = "mcp.log";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Writer that flushes and syncs the shared log file after every write, so the
/// log is readable while a client holds the server open.
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

/// `~/.jira-mcp/<JIRA_MCP_LOG_FILE or mcp.log>`; an absolute override is used as is
pub fn mcp_log_path() -> PathBuf {
    let log_dir = dirs::home_dir()
        .map(|home| home.join(LOG_DIR))
        .unwrap_or_else(|| PathBuf::from(LOG_DIR));
    let file_name =
        std::env::var("JIRA_MCP_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    log_dir.join(file_name)
}

/// Level from the flags unless `RUST_LOG` is set
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(level).into()))
}

fn open_log_file(path: &PathBuf) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber
pub fn init(level: Level, target: LogTarget) {
    match target {
        LogTarget::File(path) => match open_log_file(&path) {
            Ok(file) => {
                let shared = Arc::new(Mutex::new(file));
                tracing_subscriber::fmt()
                    .with_writer(move || FileWriterGuard::new(shared.clone()))
                    .with_env_filter(env_filter(level))
                    .with_ansi(false)
                    .init();
            }
            Err(e) => {
                tracing_subscriber::fmt()
                    .with_writer(io::stderr)
                    .with_env_filter(env_filter(level))
                    .init();
                tracing::warn!("Failed to open log file {}, using stderr: {}", path.display(), e);
            }
        },
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .with_env_filter(env_filter(level))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_guard_writes_through() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("guard.log");
        let file = open_log_file(&path).unwrap();
        let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));

        guard.write_all(b"first line\n").unwrap();
        guard.write_all(b"second line\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "first line\nsecond line\n"
        );
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("mcp.log");
        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    #[serial]
    fn test_log_path_override() {
        std::env::remove_var("JIRA_MCP_LOG_FILE");
        let default = mcp_log_path();
        assert!(default.ends_with(PathBuf::from(LOG_DIR).join(DEFAULT_LOG_FILE)));

        std::env::set_var("JIRA_MCP_LOG_FILE", "debug.log");
        assert!(mcp_log_path().ends_with(PathBuf::from(LOG_DIR).join("debug.log")));

        std::env::set_var("JIRA_MCP_LOG_FILE", "/var/tmp/jira.log");
        assert_eq!(mcp_log_path(), PathBuf::from("/var/tmp/jira.log"));
        std::env::remove_var("JIRA_MCP_LOG_FILE");
    }
}
