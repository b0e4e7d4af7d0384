use {
    anyhow::Context,
    argh::FromArgs,
    com::Server,
    drive::{ConnectionServer, LineSink, LogSink, RoverConfig},
    log::LevelFilter,
    std::path::PathBuf,
    tokio::sync::watch,
};

#[derive(FromArgs)]
/// Rover control server: drives the vehicle from a streamed camera feed.
struct Args {
    /// configuration file (JSON)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// address to listen on, overrides the configuration
    #[argh(option, short = 'l')]
    listen: Option<String>,

    /// write daily log files to this directory instead of stdout
    #[argh(option)]
    log_dir: Option<PathBuf>,

    /// log every frame decision
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// only log motor commands, even if a motor device is configured
    #[argh(switch)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match &args.log_dir {
        Some(dir) => base::init_file_logger(dir, level)?,
        None => base::init_stdout_logger(level)?,
    }

    let mut config = match &args.config {
        Some(path) => RoverConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => RoverConfig::default(),
    };
    if let Some(listen) = args.listen {
        config = config.with_listen(listen);
    }
    if args.dry_run {
        config = config.with_motor_device(None);
    }
    config.validate()?;

    log::info!("loading decision engine");
    let engine = rover::build_engine(&config)?;

    let listener = Server::bind(config.listen())
        .await
        .with_context(|| format!("failed to listen on {}", config.listen()))?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Ctrl-C received, shutting down");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                log::error!("Ctrl-C handler unavailable: {}", e);
                // a dropped sender would read as shutdown
                std::future::pending::<()>().await;
            }
        }
    });

    match config.motor_device().map(PathBuf::from) {
        Some(device) => {
            let sink = LineSink::open(&device)
                .await
                .with_context(|| format!("failed to open motor device {}", device.display()))?;
            rover::serve(ConnectionServer::new(engine, config, sink), listener, shutdown_rx).await;
        }
        None => {
            log::info!("no motor device, logging commands only");
            rover::serve(
                ConnectionServer::new(engine, config, LogSink::new()),
                listener,
                shutdown_rx,
            )
            .await;
        }
    }
    Ok(())
}
