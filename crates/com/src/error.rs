use std::fmt;

#[derive(Debug)]
pub enum ComError {
    Io(std::io::Error),
    ConnectionClosed,
}

impl ComError {
    /// True for the ways a peer normally goes away (EOF, reset, broken pipe).
    pub fn is_disconnect(&self) -> bool {
        match self {
            ComError::ConnectionClosed => true,
            ComError::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::UnexpectedEof
            ),
        }
    }
}

impl fmt::Display for ComError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComError::Io(err) => write!(f, "io error: {err}"),
            ComError::ConnectionClosed => write!(f, "connection closed"),
        }
    }
}

impl std::error::Error for ComError {}

impl From<std::io::Error> for ComError {
    fn from(err: std::io::Error) -> Self {
        ComError::Io(err)
    }
}
