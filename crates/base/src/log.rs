//! Backends for the `log` facade.
//!
//! Every line is formatted as
//! `[<thread>:<LEVEL>:<timestamp> - <file>:<line>] <message>`.

use {
    crate::DateTime,
    anyhow::Result,
    log::{LevelFilter, Log, Metadata, Record},
    std::{
        fs::{File, OpenOptions, create_dir_all},
        io::Write,
        path::PathBuf,
        sync::Mutex,
    },
};

pub fn format_line(record: &Record<'_>, now: &DateTime) -> String {
    format!(
        "[{:?}:{}:{} - {}:{}] {}",
        std::thread::current().id(),
        record.level(),
        now.iso(),
        record.file().unwrap_or("?"),
        record.line().unwrap_or(0),
        record.args()
    )
}

pub struct StdoutLogger {
    level: LevelFilter,
}

impl StdoutLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            println!("{}", format_line(record, &DateTime::now()));
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

struct FileLoggerState {
    path: PathBuf,
    current_date: String,
    file: File,
}

/// Appends to `<dir>/<YYYY-MM-DD>.log`, switching files when the date changes.
pub struct FileLogger {
    level: LevelFilter,
    state: Mutex<FileLoggerState>,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>, level: LevelFilter) -> Result<Self> {
        let path = path.into();
        create_dir_all(&path)?;
        let current_date = DateTime::now().date();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.join(format!("{}.log", current_date)))?;
        Ok(FileLogger {
            level,
            state: Mutex::new(FileLoggerState {
                path,
                current_date,
                file,
            }),
        })
    }

    /// Directory the daily files are written to.
    pub fn dir(&self) -> PathBuf {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.path.clone()
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let now = DateTime::now();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let today = now.date();
        if today != state.current_date {
            let new_path = state.path.join(format!("{}.log", today));
            match OpenOptions::new().create(true).append(true).open(&new_path) {
                Ok(new_file) => {
                    state.file = new_file;
                    state.current_date = today;
                }
                Err(error) => {
                    eprintln!("Failed to open new log file {:?}: {}", new_path, error);
                }
            }
        }
        let log_line = format_line(record, &now);
        if let Err(error) = writeln!(state.file, "{}", log_line) {
            eprintln!("Failed to write to log file: {}", error);
            eprintln!("{}", log_line);
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let _ = state.file.flush();
    }
}

fn install(logger: Box<dyn Log>, level: LevelFilter) -> Result<()> {
    log::set_boxed_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Route `log` records to stdout. Fails if a logger is already installed.
pub fn init_stdout_logger(level: LevelFilter) -> Result<()> {
    install(Box::new(StdoutLogger::new(level)), level)
}

/// Route `log` records to daily files under `path`.
pub fn init_file_logger(path: impl Into<PathBuf>, level: LevelFilter) -> Result<()> {
    install(Box::new(FileLogger::new(path, level)?), level)
}
