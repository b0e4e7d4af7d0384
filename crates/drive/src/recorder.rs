use {
    crate::{Assessment, RecordError},
    base::{DateTime, Rect},
    serde::Serialize,
    std::{
        io,
        path::{Path, PathBuf},
        sync::atomic::{AtomicU64, Ordering},
    },
    tokio::{
        fs::{self, File, OpenOptions},
        io::AsyncWriteExt,
    },
    vision::Frame,
};

const WORKING_DIR: &str = "temp";
const SAVED_DIR: &str = "saved";
const MANIFEST: &str = "frames.jsonl";

/// Root of all recorded sessions.
///
/// Working directories live under `temp/`, sealed sessions under `saved/`.
/// Every session gets its own working directory, so concurrent connections
/// never share one.
#[derive(Debug)]
pub struct Archive {
    root: PathBuf,
    quality: u8,
    sequence: AtomicU64,
}

impl Archive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            quality: 90,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn working_dir(&self) -> PathBuf {
        self.root.join(WORKING_DIR)
    }

    pub fn saved_dir(&self) -> PathBuf {
        self.root.join(SAVED_DIR)
    }

    /// Start a session with a fresh, empty working directory.
    ///
    /// Ids already taken on disk, by a working directory or an archive left
    /// from an earlier run, are skipped.
    pub async fn open_session(&self) -> Result<SessionRecorder, RecordError> {
        let started = DateTime::now();
        fs::create_dir_all(self.working_dir()).await?;
        let (session, dir) = loop {
            let session = Session {
                started,
                sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
            };
            let dir = self.working_dir().join(format!("session_{}", session.id()));
            let archived = self.saved_dir().join(format!("frames_{}", session.id()));
            if fs::try_exists(&archived).await? {
                continue;
            }
            match fs::create_dir(&dir).await {
                Ok(()) => break (session, dir),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::warn!("Skipping stale session directory {}", dir.display());
                }
                Err(e) => return Err(e.into()),
            }
        };
        let manifest = OpenOptions::new()
            .create_new(true)
            .append(true)
            .open(dir.join(MANIFEST))
            .await?;
        log::info!("Session {} recording to {}", session.id(), dir.display());
        Ok(SessionRecorder {
            session,
            dir,
            saved: self.saved_dir(),
            quality: self.quality,
            frames: 0,
            manifest,
        })
    }
}

/// Identity of one connection's recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    pub started: DateTime,
    pub sequence: u64,
}

impl Session {
    /// `<YYYYMMDD_HHMMSS>_<sequence>`; the sequence keeps sessions started in
    /// the same second apart.
    pub fn id(&self) -> String {
        format!("{}_{:04}", self.started.compact(), self.sequence)
    }
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    frame: u64,
    label: &'a str,
    regions: Vec<[u32; 4]>,
}

/// Writes the annotated frames of one session, then seals them into the archive.
#[derive(Debug)]
pub struct SessionRecorder {
    session: Session,
    dir: PathBuf,
    saved: PathBuf,
    quality: u8,
    frames: u64,
    manifest: File,
}

impl SessionRecorder {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frame numbers handed out so far.
    pub fn frames_recorded(&self) -> u64 {
        self.frames
    }

    /// Store the grayscale view of `frame`, boxed around any obstacle and
    /// named after its decision. Returns the path written.
    ///
    /// The frame number is consumed even if writing fails, so numbers on
    /// disk stay unique.
    pub async fn record(
        &mut self,
        frame: &Frame,
        assessment: &Assessment,
    ) -> Result<PathBuf, RecordError> {
        let index = self.frames;
        self.frames += 1;

        let label = assessment.decision.label_text();
        let path = self.dir.join(format!("frame{index:05}_{label}.jpg"));
        let annotated = vision::annotate(frame.gray(), &assessment.regions);
        let bytes = vision::encode_jpeg(annotated, self.quality).await?;
        fs::write(&path, bytes).await?;

        let entry = ManifestEntry {
            frame: index,
            label,
            regions: assessment.regions.iter().map(Rect::as_array).collect(),
        };
        let mut line = serde_json::to_vec(&entry)?;
        line.push(b'\n');
        self.manifest.write_all(&line).await?;
        self.manifest.flush().await?;
        Ok(path)
    }

    /// Move the working directory into the archive as `saved/frames_<id>`.
    ///
    /// Consumes the recorder, so nothing can be recorded after sealing.
    pub async fn seal(mut self) -> Result<PathBuf, RecordError> {
        self.manifest.flush().await?;
        drop(self.manifest);

        let target = self.saved.join(format!("frames_{}", self.session.id()));
        if fs::try_exists(&target).await? {
            return Err(RecordError::ArchiveExists(target));
        }
        fs::create_dir_all(&self.saved).await?;
        fs::rename(&self.dir, &target).await?;
        log::info!(
            "Session {} sealed with {} frame(s) at {}",
            self.session.id(),
            self.frames,
            target.display()
        );
        Ok(target)
    }
}
