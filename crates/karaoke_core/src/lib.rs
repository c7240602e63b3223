//! Karaoke core: pure page controllers, typing animation and link helpers.
mod effect;
mod links;
mod media;
mod msg;
mod state;
mod typing;
mod update;
mod view_model;

pub use effect::{ResultEffect, UploadEffect};
pub use links::{resolve_video_url, result_view_url, video_location, VIDEO_QUERY_PARAM};
pub use media::SelectedFile;
pub use msg::{ResultMsg, UploadMsg};
pub use state::{PlayLabel, ResultState, UploadPhase, UploadState};
pub use typing::{TypingAnimation, DEFAULT_PHRASES};
pub use update::{update_result, update_upload};
pub use view_model::{
    ResultViewModel, UploadViewModel, GENERIC_FAILURE, INVALID_FILE_TEXT, NOT_FOUND_TITLE,
    PROCESSING_TEXT, RESULT_TITLE,
};
