use std::time::Duration;

use url::Url;

use crate::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEffect {
    SubmitJob { file: SelectedFile },
    Navigate { url: Url },
    Alert { message: String },
    ScheduleTyping { delay: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultEffect {
    Play,
    Pause,
    Download { url: Url },
}
