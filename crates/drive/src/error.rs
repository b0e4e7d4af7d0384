use {std::fmt, std::path::PathBuf, vision::VisionError};

/// The motor controller can no longer be driven.
#[derive(Debug)]
pub enum MotorError {
    Io(std::io::Error),
    Closed,
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::Io(err) => write!(f, "motor io error: {err}"),
            MotorError::Closed => write!(f, "motor controller closed"),
        }
    }
}

impl std::error::Error for MotorError {}

impl From<std::io::Error> for MotorError {
    fn from(err: std::io::Error) -> Self {
        MotorError::Io(err)
    }
}

/// Writing or sealing a session archive failed.
#[derive(Debug)]
pub enum RecordError {
    Io(std::io::Error),
    Encode(VisionError),
    Manifest(serde_json::Error),
    ArchiveExists(PathBuf),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Io(err) => write!(f, "io error: {err}"),
            RecordError::Encode(err) => write!(f, "encode error: {err}"),
            RecordError::Manifest(err) => write!(f, "manifest error: {err}"),
            RecordError::ArchiveExists(path) => {
                write!(f, "archive {} already exists", path.display())
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        RecordError::Io(err)
    }
}

impl From<VisionError> for RecordError {
    fn from(err: VisionError) -> Self {
        RecordError::Encode(err)
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Manifest(err)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {err}"),
            ConfigError::Parse(err) => write!(f, "parse error: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
