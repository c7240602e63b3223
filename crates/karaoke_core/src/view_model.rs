use crate::{PlayLabel, UploadPhase};

pub const INVALID_FILE_TEXT: &str = "Please select a valid audio file.";
pub const PROCESSING_TEXT: &str = "Processing... this may take several minutes.";
pub const GENERIC_FAILURE: &str = "An unknown error occurred.";
pub const RESULT_TITLE: &str = "Your karaoke video is ready!";
pub const NOT_FOUND_TITLE: &str = "Could not find video.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadViewModel {
    pub phase: UploadPhase,
    pub hero_text: String,
    /// Text under the upload box: the chosen file name or the rejection message.
    pub file_label: Option<String>,
    pub submit_enabled: bool,
    pub drag_active: bool,
    /// Blocking progress indicator; `None` when hidden.
    pub loader_text: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultViewModel {
    pub title: String,
    pub video_src: Option<String>,
    pub download_href: Option<String>,
    pub play_enabled: bool,
    pub play_label: PlayLabel,
    pub download_visible: bool,
    pub download_status: Option<String>,
    pub dirty: bool,
}
