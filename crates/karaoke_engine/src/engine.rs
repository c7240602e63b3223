use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use karaoke_logging::{karaoke_info, karaoke_warn};
use url::Url;

use crate::download::ChannelProgressSink;
use crate::{
    video_filename, AtomicFileWriter, AudioUpload, DownloadOutput, DownloadSettings, Downloader,
    EngineEvent, FailureKind, JobSubmitter, PersistError, RequestError, ReqwestDownloader,
    ReqwestSubmitter, SubmitSettings,
};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub submit: SubmitSettings,
    pub download: DownloadSettings,
    pub download_dir: PathBuf,
}

enum EngineCommand {
    Submit(AudioUpload),
    Download { url: Url },
}

/// Runs network work on a background tokio runtime so the page loop never blocks.
///
/// Commands go in through `submit`/`download`; results come back as
/// [`EngineEvent`]s polled with `try_recv`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> io::Result<Self> {
        Self::with_backends(
            Arc::new(ReqwestSubmitter::new(settings.submit)),
            Arc::new(ReqwestDownloader::new(settings.download)),
            settings.download_dir,
        )
    }

    pub fn with_backends(
        submitter: Arc<dyn JobSubmitter>,
        downloader: Arc<dyn Downloader>,
        download_dir: PathBuf,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("karaoke-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let event_tx = event_tx.clone();
                    match command {
                        EngineCommand::Submit(upload) => {
                            let submitter = submitter.clone();
                            runtime.spawn(async move {
                                let result = submitter.submit(upload).await;
                                let _ = event_tx.send(EngineEvent::SubmitCompleted(result));
                            });
                        }
                        EngineCommand::Download { url } => {
                            let downloader = downloader.clone();
                            let dir = download_dir.clone();
                            runtime.spawn(async move {
                                let sink = ChannelProgressSink::new(event_tx.clone());
                                let result = download_to(downloader.as_ref(), &url, dir, &sink).await;
                                let _ = event_tx.send(EngineEvent::DownloadCompleted(result));
                            });
                        }
                    }
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, upload: AudioUpload) {
        if self.cmd_tx.send(EngineCommand::Submit(upload)).is_err() {
            karaoke_warn!("Engine thread is gone; submission dropped");
        }
    }

    pub fn download(&self, url: Url) {
        if self.cmd_tx.send(EngineCommand::Download { url }).is_err() {
            karaoke_warn!("Engine thread is gone; download dropped");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

fn io_error(err: impl ToString) -> RequestError {
    RequestError::new(FailureKind::Io, err.to_string())
}

/// Streams `url` into a temp file under `dir`, then renames it after the served name.
/// A failed download leaves nothing behind.
async fn download_to(
    downloader: &dyn Downloader,
    url: &Url,
    dir: PathBuf,
    sink: &ChannelProgressSink,
) -> Result<DownloadOutput, RequestError> {
    let writer = AtomicFileWriter::new(dir);
    let mut pending = tokio::task::spawn_blocking(move || writer.begin())
        .await
        .map_err(io_error)?
        .map_err(io_error)?;

    let fetched = downloader.download(url, sink, &mut pending).await?;
    let filename = video_filename(&fetched.final_url);

    let written = tokio::task::spawn_blocking(move || -> Result<PathBuf, PersistError> {
        pending.commit(&filename)
    })
    .await
    .map_err(io_error)?
    .map_err(io_error)?;

    karaoke_info!(
        "Saved {} ({} bytes, {}) to {:?}",
        url,
        fetched.byte_len,
        fetched.content_type.as_deref().unwrap_or("no content type"),
        written
    );
    Ok(DownloadOutput {
        path: written,
        byte_len: fetched.byte_len,
    })
}
