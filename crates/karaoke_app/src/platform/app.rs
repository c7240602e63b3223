use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use karaoke_core::{
    update_result, update_upload, ResultMsg, ResultState, ResultViewModel, UploadMsg, UploadPhase,
    UploadState, UploadViewModel,
};
use karaoke_engine::{load_audio_file, EngineHandle};
use karaoke_logging::{karaoke_debug, karaoke_info, karaoke_warn};
use url::Url;

use super::config::AppConfig;
use super::effects::{map_engine_event, to_selected, EffectRunner, PageMsg};
use super::input::{
    parse_result, parse_upload, ResultCommand, UploadCommand, RESULT_HELP, UPLOAD_HELP,
};
use super::render;
use super::video::HeadlessVideo;
use super::{AppEvent, StartPage};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app(config: AppConfig, start: StartPage) -> anyhow::Result<()> {
    let origin = config.origin()?;
    let result_page = config.result_page_url()?;
    let engine =
        EngineHandle::new(config.engine_settings()?).context("failed to start network engine")?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    spawn_stdin_reader(event_tx.clone());
    let effects = EffectRunner::new(engine, event_tx.clone());

    let mut app = App {
        origin,
        effects,
        page: Page::Upload(UploadPage::new(UploadState::new(result_page))),
        input_closed: false,
        downloads_in_flight: 0,
        show_title: io::stdout().is_terminal(),
    };
    match start {
        StartPage::Upload => app.enter_upload(),
        StartPage::Result(url) => app.enter_result(&url),
    }

    loop {
        while let Some(event) = app.effects.poll_engine() {
            app.handle_engine_event(event);
        }
        match event_rx.recv_timeout(POLL_INTERVAL) {
            Ok(AppEvent::Line(line)) => {
                if app.handle_line(&line) == Flow::Quit {
                    break;
                }
            }
            Ok(AppEvent::TypingTick) => app.dispatch_upload(UploadMsg::TypingTick),
            Ok(AppEvent::InputClosed) => app.input_closed = true,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        if app.input_closed && !app.has_pending_work() {
            break;
        }
    }

    karaoke_info!("Session ended");
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

// States are taken out while `update_*` consumes them and put back right after.
struct UploadPage {
    state: Option<UploadState>,
    last_view: Option<UploadViewModel>,
}

impl UploadPage {
    fn new(state: UploadState) -> Self {
        Self {
            state: Some(state),
            last_view: None,
        }
    }
}

struct ResultPage {
    state: Option<ResultState>,
    video: HeadlessVideo,
    last_view: Option<ResultViewModel>,
}

enum Page {
    Upload(UploadPage),
    Result(ResultPage),
}

struct App {
    origin: Url,
    effects: EffectRunner,
    page: Page,
    input_closed: bool,
    downloads_in_flight: usize,
    show_title: bool,
}

impl App {
    fn enter_upload(&mut self) {
        println!("Upload your song ({UPLOAD_HELP})");
        self.render();
        // Starts the hero animation; each tick schedules the next.
        self.dispatch_upload(UploadMsg::TypingTick);
    }

    fn enter_result(&mut self, page_url: &Url) {
        let state = ResultState::load(page_url, &self.origin);
        karaoke_info!(
            "Result page {} -> source {:?}",
            page_url,
            state.video_src().map(Url::as_str)
        );
        let video = HeadlessVideo::new(state.video_src().cloned());
        self.page = Page::Result(ResultPage {
            state: Some(state),
            video,
            last_view: None,
        });
        println!("({RESULT_HELP})");
        self.render();
    }

    fn has_pending_work(&self) -> bool {
        let submitting = match &self.page {
            Page::Upload(page) => page
                .state
                .as_ref()
                .is_some_and(|state| state.phase() == UploadPhase::Submitting),
            Page::Result(_) => false,
        };
        submitting || self.downloads_in_flight > 0
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }
        if matches!(self.page, Page::Upload(_)) {
            match parse_upload(line) {
                Ok(command) => self.handle_upload_command(command),
                Err(err) => {
                    println!("{err} ({UPLOAD_HELP})");
                    Flow::Continue
                }
            }
        } else {
            match parse_result(line) {
                Ok(command) => self.handle_result_command(command),
                Err(err) => {
                    println!("{err} ({RESULT_HELP})");
                    Flow::Continue
                }
            }
        }
    }

    fn handle_upload_command(&mut self, command: UploadCommand) -> Flow {
        match command {
            UploadCommand::Browse(path) => {
                if let Some(file) = read_file(&path) {
                    self.dispatch_upload(UploadMsg::FileChosen(file));
                }
            }
            UploadCommand::Drag => self.dispatch_upload(UploadMsg::DragEntered),
            UploadCommand::Leave => self.dispatch_upload(UploadMsg::DragLeft),
            UploadCommand::Drop(paths) => {
                if paths.len() > 1 {
                    karaoke_debug!("Ignoring {} extra dropped file(s)", paths.len() - 1);
                }
                let files = paths.first().and_then(|path| read_file(path)).into_iter().collect();
                self.dispatch_upload(UploadMsg::FilesDropped(files));
            }
            UploadCommand::Process => self.dispatch_upload(UploadMsg::SubmitClicked),
            UploadCommand::Help => println!("{UPLOAD_HELP}"),
            UploadCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn handle_result_command(&mut self, command: ResultCommand) -> Flow {
        match command {
            ResultCommand::PlayPause => {
                let Page::Result(page) = &self.page else {
                    return Flow::Continue;
                };
                let msg = ResultMsg::PlayPauseClicked {
                    paused: page.video.paused(),
                    ended: page.video.ended(),
                };
                self.dispatch_result(msg);
            }
            ResultCommand::End => {
                let Page::Result(page) = &mut self.page else {
                    return Flow::Continue;
                };
                let signals = page.video.finish();
                for signal in signals {
                    self.dispatch_result(signal);
                }
            }
            ResultCommand::Download => self.dispatch_result(ResultMsg::DownloadClicked),
            ResultCommand::Help => println!("{RESULT_HELP}"),
            ResultCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn handle_engine_event(&mut self, event: karaoke_engine::EngineEvent) {
        match map_engine_event(event) {
            Some(PageMsg::Upload(msg)) => self.dispatch_upload(msg),
            Some(PageMsg::Result(msg)) => {
                self.downloads_in_flight = self.downloads_in_flight.saturating_sub(1);
                self.dispatch_result(msg);
            }
            None => {}
        }
    }

    fn dispatch_upload(&mut self, msg: UploadMsg) {
        let Page::Upload(page) = &mut self.page else {
            karaoke_debug!("Dropping upload message {:?} on result page", msg);
            return;
        };
        let Some(state) = page.state.take() else {
            return;
        };
        let (mut state, effects) = update_upload(state, msg);
        let dirty = state.consume_dirty();
        page.state = Some(state);
        if dirty {
            self.render();
        }

        if let Some(url) = self.effects.run_upload(effects) {
            self.enter_result(&url);
        }
    }

    fn dispatch_result(&mut self, msg: ResultMsg) {
        let Page::Result(page) = &mut self.page else {
            return;
        };
        let Some(state) = page.state.take() else {
            return;
        };
        let (mut state, effects) = update_result(state, msg);
        let dirty = state.consume_dirty();
        page.state = Some(state);

        self.downloads_in_flight += effects
            .iter()
            .filter(|effect| matches!(effect, karaoke_core::ResultEffect::Download { .. }))
            .count();
        let signals = self.effects.run_result(effects, &mut page.video);
        if dirty {
            self.render();
        }
        for signal in signals {
            self.dispatch_result(signal);
        }
    }

    fn render(&mut self) {
        let mut out = io::stdout().lock();
        match &mut self.page {
            Page::Upload(page) => {
                let Some(view) = page.state.as_ref().map(UploadState::view) else {
                    return;
                };
                if self.show_title {
                    let _ = write!(out, "{}", render::title_sequence(&view.hero_text));
                }
                for line in render::upload_lines(page.last_view.as_ref(), &view) {
                    let _ = writeln!(out, "{line}");
                }
                page.last_view = Some(view);
            }
            Page::Result(page) => {
                let Some(view) = page.state.as_ref().map(ResultState::view) else {
                    return;
                };
                for line in render::result_lines(page.last_view.as_ref(), &view) {
                    let _ = writeln!(out, "{line}");
                }
                page.last_view = Some(view);
            }
        }
        let _ = out.flush();
    }
}

fn read_file(path: &Path) -> Option<karaoke_core::SelectedFile> {
    match load_audio_file(path) {
        Ok(upload) => Some(to_selected(upload)),
        Err(err) => {
            karaoke_warn!("{}", err);
            println!("Cannot open {}: {err}", path.display());
            None
        }
    }
}
