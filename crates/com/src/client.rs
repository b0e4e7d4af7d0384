use {
    crate::ComError,
    std::net::SocketAddr,
    tokio::{
        io::AsyncWriteExt,
        net::{TcpStream, ToSocketAddrs},
    },
};

/// Vehicle-side end of the stream: writes encoded frames back to back.
pub struct Client {
    stream: TcpStream,
}

impl Client {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ComError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self { stream })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ComError> {
        Ok(self.stream.local_addr()?)
    }

    /// Write one encoded frame as a series of writes of at most `chunk` bytes.
    pub async fn send_frame(&mut self, frame: &[u8], chunk: usize) -> Result<(), ComError> {
        for part in frame.chunks(chunk.max(1)) {
            self.stream.write_all(part).await?;
        }
        self.stream.flush().await?;
        Ok(())
    }

    /// Half-close the connection; the server sees end of stream.
    pub async fn close(mut self) -> Result<(), ComError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
