use crate::links::result_view_url;
use crate::view_model::GENERIC_FAILURE;
use crate::{
    PlayLabel, ResultEffect, ResultMsg, ResultState, UploadEffect, UploadMsg, UploadPhase,
    UploadState,
};

/// Pure update function for the upload page: applies a message and returns any effects.
pub fn update_upload(mut state: UploadState, msg: UploadMsg) -> (UploadState, Vec<UploadEffect>) {
    let effects = match msg {
        UploadMsg::FileChosen(file) => {
            // A submission in flight is not interruptible by new selections.
            if state.phase() != UploadPhase::Submitting {
                state.select(file);
            }
            Vec::new()
        }
        UploadMsg::DragEntered => {
            state.set_drag_active(true);
            Vec::new()
        }
        UploadMsg::DragLeft => {
            state.set_drag_active(false);
            Vec::new()
        }
        UploadMsg::FilesDropped(files) => {
            state.set_drag_active(false);
            if state.phase() != UploadPhase::Submitting {
                if let Some(first) = files.into_iter().next() {
                    state.select(first);
                }
            }
            Vec::new()
        }
        UploadMsg::SubmitClicked => match state.begin_submit() {
            Some(file) => vec![UploadEffect::SubmitJob { file }],
            None => Vec::new(),
        },
        UploadMsg::SubmitSucceeded { video_url } => {
            if state.phase() == UploadPhase::Submitting {
                state.finish_submit();
                let url = result_view_url(state.result_page(), &video_url);
                vec![UploadEffect::Navigate { url }]
            } else {
                Vec::new()
            }
        }
        UploadMsg::SubmitFailed { message } => {
            if state.phase() == UploadPhase::Submitting {
                let reason = message
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                let message = format!("Processing failed: {reason}");
                state.fail_submit();
                vec![UploadEffect::Alert { message }]
            } else {
                Vec::new()
            }
        }
        UploadMsg::TypingTick => {
            let delay = state.advance_typing();
            vec![UploadEffect::ScheduleTyping { delay }]
        }
        UploadMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Pure update function for the result page.
pub fn update_result(mut state: ResultState, msg: ResultMsg) -> (ResultState, Vec<ResultEffect>) {
    let effects = match msg {
        ResultMsg::PlayPauseClicked { paused, ended } => {
            if state.video_src().is_none() {
                Vec::new()
            } else if paused || ended {
                vec![ResultEffect::Play]
            } else {
                vec![ResultEffect::Pause]
            }
        }
        ResultMsg::Played => {
            state.set_play_label(PlayLabel::Pause);
            Vec::new()
        }
        ResultMsg::Paused => {
            state.set_play_label(PlayLabel::Play);
            Vec::new()
        }
        ResultMsg::Ended => {
            state.set_play_label(PlayLabel::Replay);
            Vec::new()
        }
        ResultMsg::DownloadClicked => match state.video_src() {
            Some(url) => {
                let url = url.clone();
                state.set_download_status(format!("Downloading {url}..."));
                vec![ResultEffect::Download { url }]
            }
            None => Vec::new(),
        },
        ResultMsg::DownloadFinished { path } => {
            state.set_download_status(format!("Saved to {path}"));
            Vec::new()
        }
        ResultMsg::DownloadFailed { message } => {
            state.set_download_status(format!("Download failed: {message}"));
            Vec::new()
        }
        ResultMsg::NoOp => Vec::new(),
    };

    (state, effects)
}
