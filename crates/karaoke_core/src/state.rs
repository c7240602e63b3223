use std::fmt;

use url::Url;

use crate::links::{resolve_video_url, video_location};
use crate::view_model::{
    ResultViewModel, UploadViewModel, INVALID_FILE_TEXT, NOT_FOUND_TITLE, PROCESSING_TEXT,
    RESULT_TITLE,
};
use crate::{SelectedFile, TypingAnimation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    NoFile,
    FileSelected,
    Submitting,
    /// The job finished and navigation to the result view was requested.
    ResultReady,
}

/// Landing page state: the selected file, drop-target mark and submission progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadState {
    result_page: Url,
    phase: UploadPhase,
    selected: Option<SelectedFile>,
    file_label: Option<String>,
    drag_active: bool,
    loader_text: Option<String>,
    typing: TypingAnimation,
    dirty: bool,
}

impl UploadState {
    /// `result_page` is the result view that successful jobs navigate to.
    pub fn new(result_page: Url) -> Self {
        Self {
            result_page,
            phase: UploadPhase::NoFile,
            selected: None,
            file_label: None,
            drag_active: false,
            loader_text: None,
            typing: TypingAnimation::default(),
            dirty: false,
        }
    }

    pub fn view(&self) -> UploadViewModel {
        UploadViewModel {
            phase: self.phase,
            hero_text: self.typing.text(),
            file_label: self.file_label.clone(),
            submit_enabled: self.phase == UploadPhase::FileSelected && self.selected.is_some(),
            drag_active: self.drag_active,
            loader_text: self.loader_text.clone(),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn result_page(&self) -> &Url {
        &self.result_page
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn select(&mut self, file: SelectedFile) {
        if file.is_audio() {
            self.file_label = Some(format!("File selected: {}", file.name));
            self.selected = Some(file);
            self.phase = UploadPhase::FileSelected;
        } else {
            self.file_label = Some(INVALID_FILE_TEXT.to_string());
            self.selected = None;
            self.phase = UploadPhase::NoFile;
        }
        self.dirty = true;
    }

    pub(crate) fn set_drag_active(&mut self, active: bool) {
        if self.drag_active != active {
            self.drag_active = active;
            self.dirty = true;
        }
    }

    /// Moves to `Submitting` and hands out the file to send; the payload is shared, not copied.
    pub(crate) fn begin_submit(&mut self) -> Option<SelectedFile> {
        if self.phase != UploadPhase::FileSelected {
            return None;
        }
        let file = self.selected.clone()?;
        self.phase = UploadPhase::Submitting;
        self.loader_text = Some(PROCESSING_TEXT.to_string());
        self.dirty = true;
        Some(file)
    }

    pub(crate) fn finish_submit(&mut self) {
        self.phase = UploadPhase::ResultReady;
        self.dirty = true;
    }

    pub(crate) fn fail_submit(&mut self) {
        self.phase = UploadPhase::FileSelected;
        self.loader_text = None;
        self.dirty = true;
    }

    pub(crate) fn advance_typing(&mut self) -> std::time::Duration {
        let delay = self.typing.step();
        self.dirty = true;
        delay
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayLabel {
    #[default]
    Play,
    Pause,
    Replay,
}

impl PlayLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayLabel::Play => "Play",
            PlayLabel::Pause => "Pause",
            PlayLabel::Replay => "Replay",
        }
    }
}

impl fmt::Display for PlayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result page state. Playback itself lives in the video element; this only
/// tracks what the controls show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultState {
    title: String,
    video_src: Option<Url>,
    play_label: PlayLabel,
    download_status: Option<String>,
    dirty: bool,
}

impl ResultState {
    /// Resolves the video source from the result view URL.
    ///
    /// A missing `video` parameter (or one that cannot form a URL on `origin`)
    /// leaves the page in its not-found state.
    pub fn load(page_url: &Url, origin: &Url) -> Self {
        let video_src =
            video_location(page_url).and_then(|location| resolve_video_url(origin, &location).ok());
        let title = if video_src.is_some() {
            RESULT_TITLE
        } else {
            NOT_FOUND_TITLE
        };
        Self {
            title: title.to_string(),
            video_src,
            play_label: PlayLabel::Play,
            download_status: None,
            dirty: true,
        }
    }

    pub fn view(&self) -> ResultViewModel {
        let src = self.video_src.as_ref().map(Url::to_string);
        ResultViewModel {
            title: self.title.clone(),
            download_href: src.clone(),
            video_src: src,
            play_enabled: self.video_src.is_some(),
            play_label: self.play_label,
            download_visible: self.video_src.is_some(),
            download_status: self.download_status.clone(),
            dirty: self.dirty,
        }
    }

    pub fn video_src(&self) -> Option<&Url> {
        self.video_src.as_ref()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_play_label(&mut self, label: PlayLabel) {
        if self.play_label != label {
            self.play_label = label;
            self.dirty = true;
        }
    }

    pub(crate) fn set_download_status(&mut self, status: String) {
        self.download_status = Some(status);
        self.dirty = true;
    }
}
