use crate::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadMsg {
    /// User picked a file through the browse dialog.
    FileChosen(SelectedFile),
    /// A drag entered or moved over the upload box.
    DragEntered,
    /// The drag left the upload box without dropping.
    DragLeft,
    /// Files were dropped on the upload box; only the first one is considered.
    FilesDropped(Vec<SelectedFile>),
    /// User clicked the process button.
    SubmitClicked,
    /// The processing endpoint answered with a video location.
    SubmitSucceeded { video_url: String },
    /// Submission failed; `message` is the server-provided error, if any.
    SubmitFailed { message: Option<String> },
    /// Timer for the hero typing animation fired.
    TypingTick,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultMsg {
    /// User clicked play/pause. Carries the video element's current state.
    PlayPauseClicked { paused: bool, ended: bool },
    /// The video element started playing.
    Played,
    /// The video element paused.
    Paused,
    /// The video element reached its natural end.
    Ended,
    /// User clicked the download link.
    DownloadClicked,
    DownloadFinished { path: String },
    DownloadFailed { message: String },
    NoOp,
}
