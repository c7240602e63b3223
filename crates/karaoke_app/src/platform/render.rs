use karaoke_core::{ResultViewModel, UploadPhase, UploadViewModel};

/// Lines describing what changed on the upload page since `prev`.
///
/// The hero text is left out; it goes to the terminal title instead.
pub fn upload_lines(prev: Option<&UploadViewModel>, view: &UploadViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if prev.is_some_and(|p| p.drag_active != view.drag_active) {
        lines.push(if view.drag_active {
            "[ drop your audio file here ]".to_string()
        } else {
            "[ upload box ]".to_string()
        });
    }
    if prev.map(|p| &p.file_label) != Some(&view.file_label) {
        if let Some(label) = &view.file_label {
            lines.push(label.clone());
        }
    }
    if prev.map_or(true, |p| p.submit_enabled != view.submit_enabled) {
        lines.push(if view.submit_enabled {
            "Process button: enabled".to_string()
        } else {
            "Process button: disabled".to_string()
        });
    }
    if prev.map(|p| &p.loader_text) != Some(&view.loader_text) {
        match &view.loader_text {
            Some(text) => lines.push(format!("... {text}")),
            None if prev.is_some() => lines.push("Progress indicator hidden".to_string()),
            None => {}
        }
    }
    if view.phase == UploadPhase::ResultReady && prev.map(|p| p.phase) != Some(view.phase) {
        lines.push("Video ready, opening the result view".to_string());
    }
    lines
}

pub fn result_lines(prev: Option<&ResultViewModel>, view: &ResultViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if prev.map(|p| &p.title) != Some(&view.title) {
        lines.push(format!("== {} ==", view.title));
    }
    if prev.is_none() {
        if let Some(src) = &view.video_src {
            lines.push(format!("Video: {src}"));
        }
        if view.download_visible {
            if let Some(href) = &view.download_href {
                lines.push(format!("Download: {href}"));
            }
        }
        if !view.play_enabled {
            lines.push("Play/pause: disabled".to_string());
        }
    }
    if view.play_enabled && prev.map_or(true, |p| p.play_label != view.play_label) {
        lines.push(format!("[ {} ]", view.play_label));
    }
    if prev.map(|p| &p.download_status) != Some(&view.download_status) {
        if let Some(status) = &view.download_status {
            lines.push(status.clone());
        }
    }
    lines
}

/// OSC 0 sequence that sets the terminal window title.
pub fn title_sequence(text: &str) -> String {
    let clean: String = text.chars().filter(|c| !c.is_control()).collect();
    format!("\x1b]0;{clean}\x07")
}

#[cfg(test)]
mod tests {
    use super::*;
    use karaoke_core::PlayLabel;

    fn upload_view() -> UploadViewModel {
        UploadViewModel {
            phase: UploadPhase::NoFile,
            hero_text: String::new(),
            file_label: None,
            submit_enabled: false,
            drag_active: false,
            loader_text: None,
            dirty: false,
        }
    }

    fn result_view() -> ResultViewModel {
        ResultViewModel {
            title: "Your karaoke video is ready!".to_string(),
            video_src: Some("http://127.0.0.1:5000/a.mp4".to_string()),
            download_href: Some("http://127.0.0.1:5000/a.mp4".to_string()),
            play_enabled: true,
            play_label: PlayLabel::Play,
            download_visible: true,
            download_status: None,
            dirty: true,
        }
    }

    #[test]
    fn first_upload_render_shows_disabled_button() {
        assert_eq!(
            upload_lines(None, &upload_view()),
            vec!["Process button: disabled".to_string()]
        );
    }

    #[test]
    fn upload_diff_reports_only_changes() {
        let before = upload_view();
        let after = UploadViewModel {
            file_label: Some("File selected: a.mp3".to_string()),
            submit_enabled: true,
            hero_text: "Cr".to_string(),
            ..before.clone()
        };
        assert_eq!(
            upload_lines(Some(&before), &after),
            vec![
                "File selected: a.mp3".to_string(),
                "Process button: enabled".to_string()
            ]
        );

        let hero_only = UploadViewModel {
            hero_text: "Cre".to_string(),
            ..after.clone()
        };
        assert!(upload_lines(Some(&after), &hero_only).is_empty());
    }

    #[test]
    fn loader_hide_is_reported() {
        let shown = UploadViewModel {
            loader_text: Some("Processing".to_string()),
            ..upload_view()
        };
        assert_eq!(
            upload_lines(Some(&shown), &upload_view()),
            vec!["Progress indicator hidden".to_string()]
        );
    }

    #[test]
    fn finished_job_announces_navigation_once() {
        let submitting = UploadViewModel {
            phase: UploadPhase::Submitting,
            loader_text: Some("Processing".to_string()),
            ..upload_view()
        };
        let ready = UploadViewModel {
            phase: UploadPhase::ResultReady,
            ..submitting.clone()
        };
        assert_eq!(
            upload_lines(Some(&submitting), &ready),
            vec!["Video ready, opening the result view".to_string()]
        );
        assert!(upload_lines(Some(&ready), &ready).is_empty());
    }

    #[test]
    fn result_first_render_and_label_changes() {
        let view = result_view();
        let lines = result_lines(None, &view);
        assert_eq!(lines[0], "== Your karaoke video is ready! ==");
        assert!(lines.contains(&"[ Play ]".to_string()));

        let playing = ResultViewModel {
            play_label: PlayLabel::Pause,
            ..view.clone()
        };
        assert_eq!(result_lines(Some(&view), &playing), vec!["[ Pause ]".to_string()]);
    }

    #[test]
    fn not_found_render_hides_controls() {
        let view = ResultViewModel {
            title: "Could not find video.".to_string(),
            video_src: None,
            download_href: None,
            play_enabled: false,
            download_visible: false,
            ..result_view()
        };
        assert_eq!(
            result_lines(None, &view),
            vec![
                "== Could not find video. ==".to_string(),
                "Play/pause: disabled".to_string()
            ]
        );
    }

    #[test]
    fn title_sequence_strips_controls() {
        assert_eq!(title_sequence("a\x07b"), "\x1b]0;ab\x07");
    }
}
