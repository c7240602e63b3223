//! Karaoke engine: job submission, video download and effect execution.
mod audio;
mod download;
mod engine;
mod filename;
mod persist;
mod submit;
mod types;

pub use audio::{load_audio_file, AudioFileError, AudioUpload};
pub use download::{DownloadSettings, Downloader, FetchedVideo, ProgressSink, ReqwestDownloader};
pub use engine::{EngineHandle, EngineSettings};
pub use filename::video_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PendingFile, PersistError};
pub use submit::{JobSubmitter, ReqwestSubmitter, SubmitSettings};
pub use types::{
    DownloadOutput, EngineEvent, FailureKind, JobOutput, RequestError, DEFAULT_SERVER_ORIGIN,
    PROCESS_PATH, UPLOAD_FIELD,
};
