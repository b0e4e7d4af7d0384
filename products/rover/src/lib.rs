use {
    com::Server,
    drive::{
        Classifier, ConnectionServer, DecisionEngine, IdleClassifier, MotorSink, NoObstacles,
        Preempt, RoverConfig, SizeFilter,
    },
    inference::{InferError, Inference},
    std::{
        io,
        path::{Path, PathBuf},
        sync::Arc,
    },
    tokio::sync::watch,
};

/// Build the decision engine described by `config`.
///
/// Without a classifier file the rover runs dry: it records and stops for
/// obstacles but never steers.
pub fn build_engine(config: &RoverConfig) -> Result<DecisionEngine, InferError> {
    let classifier: Arc<dyn Classifier> = match config.classifier() {
        Some(path) => {
            #[cfg(feature = "cuda")]
            let inference = Inference::cuda(0)?;
            #[cfg(not(feature = "cuda"))]
            let inference = Inference::cpu();

            let model = inference.use_steering_classifier(path)?;
            log::info!(
                "Steering classifier {} loaded ({} inputs, {} labels)",
                path.display(),
                model.input_len(),
                model.output_len()
            );
            Arc::new(model)
        }
        None => {
            log::warn!("No classifier configured, steering disabled");
            Arc::new(IdleClassifier)
        }
    };
    let detector = Arc::new(SizeFilter::new(NoObstacles, *config.detector()));
    Ok(DecisionEngine::new(classifier, detector))
}

/// Run `server` on `listener` until `shutdown`, with SIGUSR1 raising an
/// external stop.
pub async fn serve<S: MotorSink + 'static>(
    server: ConnectionServer<S>,
    listener: Server,
    shutdown: watch::Receiver<bool>,
) {
    watch_preempt(server.preempt());
    server.run(listener, shutdown).await;
    log::info!("All sessions sealed");
}

#[cfg(unix)]
fn watch_preempt(preempt: Preempt) {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::user_defined1()) {
        Ok(mut signals) => {
            tokio::spawn(async move {
                while signals.recv().await.is_some() {
                    let generation = preempt.request_stop();
                    log::warn!("External stop requested (#{})", generation);
                }
            });
        }
        Err(e) => log::warn!("External stop unavailable: {}", e),
    }
}

#[cfg(not(unix))]
fn watch_preempt(_preempt: Preempt) {
    log::warn!("External stop is only wired to SIGUSR1 on unix");
}

/// The `.jpg`/`.jpeg` files of `dir`, sorted by name.
pub fn collect_frames(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_jpeg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
        if is_jpeg && path.is_file() {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}
