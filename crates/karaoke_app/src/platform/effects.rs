use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use karaoke_core::{ResultEffect, ResultMsg, SelectedFile, UploadEffect, UploadMsg};
use karaoke_engine::{AudioUpload, EngineEvent, EngineHandle};
use karaoke_logging::{karaoke_info, karaoke_trace, karaoke_warn};
use url::Url;

use super::video::HeadlessVideo;
use super::AppEvent;

/// Executes controller effects against the engine, the typing timer and the video.
pub struct EffectRunner {
    engine: EngineHandle,
    timer_tx: mpsc::Sender<Duration>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: mpsc::Sender<AppEvent>) -> Self {
        let (timer_tx, timer_rx) = mpsc::channel::<Duration>();
        thread::spawn(move || {
            while let Ok(delay) = timer_rx.recv() {
                thread::sleep(delay);
                if events.send(AppEvent::TypingTick).is_err() {
                    break;
                }
            }
        });
        Self { engine, timer_tx }
    }

    /// Runs upload-page effects and returns the navigation target, if any.
    pub fn run_upload(&self, effects: Vec<UploadEffect>) -> Option<Url> {
        let mut navigate = None;
        for effect in effects {
            match effect {
                UploadEffect::SubmitJob { file } => {
                    karaoke_info!(
                        "SubmitJob name={} media_type={} len={}",
                        file.name,
                        file.media_type,
                        file.bytes.len()
                    );
                    self.engine.submit(to_upload(file));
                }
                UploadEffect::Navigate { url } => {
                    karaoke_info!("Navigate {}", url);
                    navigate = Some(url);
                }
                UploadEffect::Alert { message } => {
                    karaoke_warn!("{}", message);
                    println!("!! {message}");
                }
                UploadEffect::ScheduleTyping { delay } => {
                    let _ = self.timer_tx.send(delay);
                }
            }
        }
        navigate
    }

    /// Runs result-page effects; returns the signals the video element fired.
    pub fn run_result(
        &self,
        effects: Vec<ResultEffect>,
        video: &mut HeadlessVideo,
    ) -> Vec<ResultMsg> {
        let mut signals = Vec::new();
        for effect in effects {
            match effect {
                ResultEffect::Play => signals.extend(video.play()),
                ResultEffect::Pause => signals.extend(video.pause()),
                ResultEffect::Download { url } => {
                    karaoke_info!("Download {}", url);
                    self.engine.download(url);
                }
            }
        }
        signals
    }

    pub fn poll_engine(&self) -> Option<EngineEvent> {
        self.engine.try_recv()
    }
}

pub enum PageMsg {
    Upload(UploadMsg),
    Result(ResultMsg),
}

/// Translates an engine completion into the message for the page that asked for it.
pub fn map_engine_event(event: EngineEvent) -> Option<PageMsg> {
    match event {
        EngineEvent::SubmitCompleted(Ok(output)) => {
            Some(PageMsg::Upload(UploadMsg::SubmitSucceeded {
                video_url: output.video_url,
            }))
        }
        EngineEvent::SubmitCompleted(Err(err)) => {
            karaoke_warn!("Submission failed: {}", err);
            Some(PageMsg::Upload(UploadMsg::SubmitFailed {
                message: err.server_message,
            }))
        }
        EngineEvent::DownloadProgress { bytes } => {
            karaoke_trace!("Downloaded {} bytes", bytes);
            None
        }
        EngineEvent::DownloadCompleted(Ok(output)) => {
            Some(PageMsg::Result(ResultMsg::DownloadFinished {
                path: output.path.display().to_string(),
            }))
        }
        EngineEvent::DownloadCompleted(Err(err)) => {
            karaoke_warn!("Download failed: {}", err);
            Some(PageMsg::Result(ResultMsg::DownloadFailed {
                message: err.to_string(),
            }))
        }
    }
}

pub fn to_selected(upload: AudioUpload) -> SelectedFile {
    SelectedFile::new(upload.file_name, upload.media_type, upload.bytes)
}

fn to_upload(file: SelectedFile) -> AudioUpload {
    AudioUpload {
        file_name: file.name,
        media_type: file.media_type,
        bytes: file.bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use karaoke_engine::{FailureKind, JobOutput, RequestError};

    #[test]
    fn submit_errors_carry_only_server_message() {
        let err = RequestError {
            kind: FailureKind::HttpStatus(413),
            message: "413 Payload Too Large".to_string(),
            server_message: Some("file too large".to_string()),
        };
        let msg = map_engine_event(EngineEvent::SubmitCompleted(Err(err)));
        assert!(matches!(
            msg,
            Some(PageMsg::Upload(UploadMsg::SubmitFailed { message: Some(ref m) })) if m == "file too large"
        ));

        let err = RequestError {
            kind: FailureKind::Network,
            message: "connection refused".to_string(),
            server_message: None,
        };
        let msg = map_engine_event(EngineEvent::SubmitCompleted(Err(err)));
        assert!(matches!(
            msg,
            Some(PageMsg::Upload(UploadMsg::SubmitFailed { message: None }))
        ));
    }

    #[test]
    fn success_maps_to_video_location() {
        let msg = map_engine_event(EngineEvent::SubmitCompleted(Ok(JobOutput {
            video_url: "/outputs/a.mp4".to_string(),
        })));
        assert!(matches!(
            msg,
            Some(PageMsg::Upload(UploadMsg::SubmitSucceeded { ref video_url })) if video_url == "/outputs/a.mp4"
        ));
        assert!(map_engine_event(EngineEvent::DownloadProgress { bytes: 1 }).is_none());
    }

    #[test]
    fn files_convert_both_ways() {
        let upload = AudioUpload {
            file_name: "a.mp3".to_string(),
            media_type: "audio/mpeg".to_string(),
            bytes: vec![1, 2, 3].into(),
        };
        let file = to_selected(upload.clone());
        assert!(file.is_audio());
        let back = to_upload(file);
        assert!(std::sync::Arc::ptr_eq(&back.bytes, &upload.bytes));
        assert_eq!(back, upload);
    }
}
