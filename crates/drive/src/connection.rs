use {
    crate::{
        Actuator, Archive, Assessment, DecisionEngine, MotorSink, Preempt, RoverConfig,
        SessionRecorder,
    },
    com::{FrameExtractor, FrameReader, Server},
    std::{fmt, path::PathBuf, sync::Arc},
    tokio::{
        io::AsyncRead,
        sync::{Mutex, watch},
    },
    vision::{Frame, VisionError},
};

/// Why a connection left the Streaming state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer closed or reset the stream.
    Disconnected,
    ReadError,
    /// The server is shutting down.
    Shutdown,
    /// The motor sink failed; driving on is unsafe.
    MotorFailure,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CloseReason::Disconnected => "disconnected",
            CloseReason::ReadError => "read error",
            CloseReason::Shutdown => "shutdown",
            CloseReason::MotorFailure => "motor failure",
        };
        f.write_str(text)
    }
}

/// Summary of one finished connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionReport {
    pub reason: CloseReason,
    /// Frames decided and actuated.
    pub frames: u64,
    /// Frames that failed to decode.
    pub dropped: u64,
    /// Frames written to the session archive.
    pub recorded: u64,
    /// Where the session was sealed, if recording worked.
    pub archive: Option<PathBuf>,
}

/// Accepts video connections and drives the vehicle from each one.
pub struct ConnectionServer<S> {
    engine: DecisionEngine,
    config: Arc<RoverConfig>,
    sink: Arc<Mutex<S>>,
    archive: Arc<Archive>,
    preempt: Preempt,
}

impl<S> Clone for ConnectionServer<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            config: Arc::clone(&self.config),
            sink: Arc::clone(&self.sink),
            archive: Arc::clone(&self.archive),
            preempt: self.preempt.clone(),
        }
    }
}

impl<S: MotorSink + 'static> ConnectionServer<S> {
    pub fn new(engine: DecisionEngine, config: RoverConfig, sink: S) -> Self {
        let archive = Archive::new(config.record_root()).with_quality(config.jpeg_quality());
        Self {
            engine,
            config: Arc::new(config),
            sink: Arc::new(Mutex::new(sink)),
            archive: Arc::new(archive),
            preempt: Preempt::new(),
        }
    }

    /// Handle for raising an external stop on every connection.
    pub fn preempt(&self) -> Preempt {
        self.preempt.clone()
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    pub fn sink(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.sink)
    }

    /// Serve connections from `server` until `shutdown` reads `true`, then wait
    /// for every open connection to seal its session.
    pub async fn run(self, server: Server, shutdown: watch::Receiver<bool>) {
        let signal = shutdown.clone();
        server
            .serve(
                move |stream, addr| {
                    let this = self.clone();
                    let shutdown = signal.clone();
                    async move {
                        let peer = addr.to_string();
                        let report = this.handle(stream, &peer, shutdown).await;
                        log::info!(
                            "{}: closed ({}), {} frame(s), {} dropped, {} recorded",
                            peer,
                            report.reason,
                            report.frames,
                            report.dropped,
                            report.recorded
                        );
                    }
                },
                shutdown,
            )
            .await;
    }

    /// Drive one connection from accept to seal.
    ///
    /// Frames are decoded, decided, actuated and recorded strictly in arrival
    /// order; the next read starts only after the previous frame is done. A
    /// shutdown signal is only observed between frames.
    pub async fn handle<R>(
        &self,
        stream: R,
        peer: &str,
        mut shutdown: watch::Receiver<bool>,
    ) -> ConnectionReport
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut recorder = match self.archive.open_session().await {
            Ok(recorder) => Some(recorder),
            Err(e) => {
                log::warn!("{}: recording disabled: {}", peer, e);
                None
            }
        };
        let mut actuator = Actuator::new(Arc::clone(&self.sink), *self.config.timing())
            .with_preempt(self.preempt.clone());
        let mut extractor = FrameExtractor::new();
        if let Some(max) = self.config.max_buffer() {
            extractor = extractor.with_max_buffer(max);
        }
        let mut reader = FrameReader::new(stream)
            .with_chunk_size(self.config.read_chunk())
            .with_extractor(extractor);

        let mut frames = 0;
        let mut dropped = 0;
        let mut recorded = 0;
        log::info!("{}: streaming", peer);

        let reason = loop {
            if *shutdown.borrow_and_update() {
                break CloseReason::Shutdown;
            }
            let data = tokio::select! {
                result = reader.next_frame() => match result {
                    Ok(data) => data,
                    Err(e) if e.is_disconnect() => break CloseReason::Disconnected,
                    Err(e) => {
                        log::warn!("{}: read failed: {}", peer, e);
                        break CloseReason::ReadError;
                    }
                },
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break CloseReason::Shutdown;
                    }
                    continue;
                }
            };

            let (frame, assessment) = match self.process(data).await {
                Ok(processed) => processed,
                Err(e) => {
                    dropped += 1;
                    log::warn!("{}: dropping undecodable frame: {}", peer, e);
                    continue;
                }
            };
            log::debug!(
                "{}: frame {} ({}x{}) -> {}, {} queued",
                peer,
                frames,
                frame.width(),
                frame.height(),
                assessment.decision,
                reader.pending()
            );

            if let Err(e) = actuator.execute(assessment.decision).await {
                log::error!("{}: motor sink failed: {}", peer, e);
                break CloseReason::MotorFailure;
            }
            frames += 1;

            if let Some(recorder) = recorder.as_mut() {
                match recorder.record(&frame, &assessment).await {
                    Ok(_) => recorded += 1,
                    Err(e) => log::warn!("{}: failed to record frame: {}", peer, e),
                }
            }
        };

        log::info!("{}: closing ({})", peer, reason);
        let archive = match recorder {
            Some(recorder) => seal(recorder, peer).await,
            None => None,
        };
        ConnectionReport {
            reason,
            frames,
            dropped,
            recorded,
            archive,
        }
    }

    // decode and decide off the async threads
    async fn process(&self, data: Vec<u8>) -> Result<(Frame, Assessment), VisionError> {
        let engine = self.engine.clone();
        let preprocess = *self.config.preprocess();
        tokio::task::spawn_blocking(move || {
            let frame = vision::decode_frame_blocking(&data, &preprocess)?;
            let assessment = engine.assess_frame(&frame);
            Ok((frame, assessment))
        })
        .await
        .map_err(|e| VisionError::Decode(e.to_string()))?
    }
}

async fn seal(recorder: SessionRecorder, peer: &str) -> Option<PathBuf> {
    match recorder.seal().await {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("{}: failed to seal session: {}", peer, e);
            None
        }
    }
}
