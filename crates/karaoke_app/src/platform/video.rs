use karaoke_core::ResultMsg;
use url::Url;

/// Headless stand-in for the result page's video element.
///
/// It owns playback state and answers `play`/`pause` with the same signals a
/// media element fires, which the page loop feeds back as [`ResultMsg`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessVideo {
    src: Option<Url>,
    paused: bool,
    ended: bool,
}

impl HeadlessVideo {
    pub fn new(src: Option<Url>) -> Self {
        Self {
            src,
            paused: true,
            ended: false,
        }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    pub fn play(&mut self) -> Vec<ResultMsg> {
        if self.src.is_none() || !self.paused {
            return Vec::new();
        }
        // Playing an ended video restarts it from the beginning.
        self.ended = false;
        self.paused = false;
        vec![ResultMsg::Played]
    }

    pub fn pause(&mut self) -> Vec<ResultMsg> {
        if self.paused {
            return Vec::new();
        }
        self.paused = true;
        vec![ResultMsg::Paused]
    }

    /// Playback reached the end of the media.
    pub fn finish(&mut self) -> Vec<ResultMsg> {
        if self.src.is_none() || self.ended {
            return Vec::new();
        }
        let mut signals = self.pause();
        self.ended = true;
        signals.push(ResultMsg::Ended);
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> HeadlessVideo {
        HeadlessVideo::new(Some(Url::parse("http://127.0.0.1:5000/a.mp4").unwrap()))
    }

    #[test]
    fn play_pause_signals() {
        let mut video = video();
        assert_eq!(video.play(), vec![ResultMsg::Played]);
        assert!(video.play().is_empty());
        assert_eq!(video.pause(), vec![ResultMsg::Paused]);
        assert!(video.pause().is_empty());
    }

    #[test]
    fn end_then_replay() {
        let mut video = video();
        video.play();
        assert_eq!(video.finish(), vec![ResultMsg::Paused, ResultMsg::Ended]);
        assert!(video.paused() && video.ended());
        assert_eq!(video.play(), vec![ResultMsg::Played]);
        assert!(!video.ended());
    }

    #[test]
    fn without_source_nothing_plays() {
        let mut video = HeadlessVideo::new(None);
        assert!(video.play().is_empty());
        assert!(video.finish().is_empty());
    }
}
