use {
    crate::{Motion, MotorError},
    std::{future::Future, path::Path},
    tokio::{
        fs::{File, OpenOptions},
        io::{AsyncWrite, AsyncWriteExt},
    },
};

/// Destination of motor commands.
///
/// Commands are fire-and-forget: a sink only reports whether the command could
/// be handed over, never whether the vehicle carried it out.
pub trait MotorSink: Send {
    fn send(&mut self, motion: Motion) -> impl Future<Output = Result<(), MotorError>> + Send;
}

/// Writes every command as a `"<command> <millis>\n"` text line.
pub struct LineSink<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl LineSink<File> {
    /// Open the motor controller device (or any writable file).
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, MotorError> {
        let path = path.as_ref();
        let file = OpenOptions::new().write(true).open(path).await?;
        log::info!("Motor controller opened at {}", path.display());
        Ok(Self::new(file))
    }
}

impl<W: AsyncWrite + Unpin + Send> MotorSink for LineSink<W> {
    async fn send(&mut self, motion: Motion) -> Result<(), MotorError> {
        let line = format!(
            "{} {}\n",
            motion.command.as_str(),
            motion.duration.as_millis()
        );
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Dry-run sink that only logs.
#[derive(Debug, Default)]
pub struct LogSink {
    issued: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl MotorSink for LogSink {
    async fn send(&mut self, motion: Motion) -> Result<(), MotorError> {
        self.issued += 1;
        log::info!("motor: {}", motion);
        Ok(())
    }
}
