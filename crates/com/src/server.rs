use {
    crate::ComError,
    std::{future::Future, net::SocketAddr},
    tokio::{
        net::{TcpListener, TcpStream, ToSocketAddrs},
        sync::watch,
        task::JoinSet,
    },
};

pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Server {
    /// Bind a TCP listener.
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self, ComError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Return the local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections until `shutdown` reads `true`.
    ///
    /// Every accepted connection runs `handler` on its own task, so a slow
    /// connection never holds up the accept loop. Once shutdown is signalled
    /// (or its sender is dropped) the listener is closed and this waits for
    /// all handlers still running before returning. Handlers receive their own
    /// copy of the signal if they need to react to it.
    pub async fn serve<F, Fut>(self, handler: F, mut shutdown: watch::Receiver<bool>)
    where
        F: Fn(TcpStream, SocketAddr) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        log::info!("Listening on {}", self.local_addr);
        while !*shutdown.borrow_and_update() {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        log::info!("Accepted connection from {}", addr);
                        tasks.spawn(handler(stream, addr));
                    }
                    Err(e) => {
                        log::warn!("Accept error: {}", e);
                        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                    }
                },
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = result {
                        log::error!("Connection task failed: {}", e);
                    }
                }
            }
        }

        drop(self.listener);
        log::info!(
            "Stopped accepting on {}, waiting for {} connection(s)",
            self.local_addr,
            tasks.len()
        );
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                log::error!("Connection task failed: {}", e);
            }
        }
    }
}
