use {
    anyhow::bail,
    argh::FromArgs,
    com::Client,
    log::LevelFilter,
    std::path::PathBuf,
    tokio::time::{Duration, sleep},
};

#[derive(FromArgs)]
/// Stream a directory of JPEG frames to a rover control server, the way the
/// vehicle's camera does.
struct Args {
    /// server address, e.g. 127.0.0.1:8000
    #[argh(positional)]
    addr: String,

    /// directory holding the frames, sent in file name order
    #[argh(positional)]
    dir: PathBuf,

    /// bytes per write
    #[argh(option, default = "1024")]
    chunk: usize,

    /// pause between frames in milliseconds
    #[argh(option, default = "100")]
    delay: u64,

    /// how many times to send the directory
    #[argh(option, default = "1")]
    repeat: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    base::init_stdout_logger(LevelFilter::Info)?;

    let frames = rover::collect_frames(&args.dir)?;
    if frames.is_empty() {
        bail!("no .jpg frames in {}", args.dir.display());
    }
    if args.chunk == 0 {
        bail!("chunk size must be positive");
    }

    let mut client = Client::connect(&args.addr).await?;
    log::info!(
        "streaming {} frame(s) x{} to {}",
        frames.len(),
        args.repeat,
        args.addr
    );

    let mut sent = 0usize;
    for _ in 0..args.repeat {
        for path in &frames {
            let bytes = tokio::fs::read(path).await?;
            client.send_frame(&bytes, args.chunk).await?;
            sent += 1;
            log::debug!("sent {}", path.display());
            sleep(Duration::from_millis(args.delay)).await;
        }
    }
    client.close().await?;
    log::info!("sent {} frame(s)", sent);
    Ok(())
}
