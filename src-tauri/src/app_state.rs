use crate::app_error::AppError;
use crate::assets::IconColor;
use crate::clock::Clock;
use crate::countdown::CountdownEngine;
use crate::models::{NowPlayingPayload, ShufflePayload};
use crate::music_player::MusicPlayer;
use crate::playback_driver::PlaybackError;
use crate::prompts::{FilePicker, AUDIO_FILTERS};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::surface::Surface;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const GET_READY_TITLE: &str = "GET READY!";
const GET_READY_MESSAGE: &str = "TIME DONE, GET READY FOR THE CLASS!";
const PICKER_TITLE: &str = "Select songs";

/// Deferred work run by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Tick,
    PollPlayback,
    StartPlayback,
}

/// Control bar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    OpenFiles,
    Previous,
    Play,
    Pause,
    Stop,
    Next,
    ToggleShuffle,
}

/// All mutable application state. Owned by a single thread; every user
/// command and every timer callback goes through `&mut self`.
pub struct AppState {
    countdown: CountdownEngine,
    player: MusicPlayer,
    scheduler: Scheduler<Task>,
    surface: Box<dyn Surface>,
    picker: Box<dyn FilePicker>,
    clock: Box<dyn Clock>,
    alert_sound: PathBuf,
    tick_interval: Duration,
    tick_task: Option<TaskHandle>,
    shown_now_playing: Option<NowPlayingPayload>,
}

impl AppState {
    pub fn new(
        countdown: CountdownEngine,
        player: MusicPlayer,
        surface: Box<dyn Surface>,
        picker: Box<dyn FilePicker>,
        clock: Box<dyn Clock>,
        alert_sound: PathBuf,
        tick_interval: Duration,
    ) -> Self {
        Self {
            countdown,
            player,
            scheduler: Scheduler::new(),
            surface,
            picker,
            clock,
            alert_sound,
            tick_interval,
            tick_task: None,
            shown_now_playing: None,
        }
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    pub fn player(&self) -> &MusicPlayer {
        &self.player
    }

    /// Shows the initial player state and schedules the first tick
    /// immediately.
    pub fn start(&mut self, now: Instant) {
        if let Some(handle) = self.tick_task.take() {
            self.scheduler.cancel(handle);
        }
        self.tick_task = Some(self.scheduler.schedule(now, Duration::ZERO, Task::Tick));
        self.publish_shuffle();
        self.publish_now_playing();
    }

    /// The "activate music" path of setup: pick files, then play.
    pub fn activate_music(&mut self, now: Instant) {
        self.handle_command(UserCommand::OpenFiles, now);
        self.handle_command(UserCommand::Play, now);
    }

    pub fn handle_command(&mut self, command: UserCommand, now: Instant) {
        tracing::debug!(?command, "user command");
        let expired = self.countdown.is_expired();
        match command {
            UserCommand::OpenFiles => {
                let tracks = self.picker.choose_files(PICKER_TITLE, AUDIO_FILTERS);
                self.player.load(tracks);
            }
            UserCommand::Previous => {
                self.player.previous(&mut self.scheduler, now);
            }
            UserCommand::Next => {
                self.player.next(&mut self.scheduler, now);
            }
            UserCommand::Play => {
                let result = self.player.play(&mut self.scheduler, now, expired);
                self.report_playback(result.map(|_| ()));
            }
            UserCommand::Pause => {
                self.player.pause(&mut self.scheduler, now);
            }
            UserCommand::Stop => {
                self.player.stop(&mut self.scheduler);
            }
            UserCommand::ToggleShuffle => {
                let result = self.player.toggle_shuffle(&mut self.scheduler, now, expired);
                self.report_playback(result.map(|_| ()));
                self.publish_shuffle();
            }
        }
        self.publish_now_playing();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn pop_due(&mut self, now: Instant) -> Option<Task> {
        self.scheduler.pop_due(now)
    }

    pub fn run_task(&mut self, task: Task, now: Instant) {
        let expired = self.countdown.is_expired();
        match task {
            Task::Tick => self.on_tick(now),
            Task::PollPlayback => {
                self.player.on_poll(&mut self.scheduler, now, expired);
            }
            Task::StartPlayback => {
                let result = self.player.on_start_task(&mut self.scheduler, now, expired);
                self.report_playback(result.map(|_| ()));
            }
        }
        self.publish_now_playing();
    }

    fn on_tick(&mut self, now: Instant) {
        self.tick_task = None;
        let outcome = self.countdown.tick(self.clock.now());
        self.surface.show_clock(&outcome.display);

        if outcome.expired_now {
            tracing::info!(deadline = %self.countdown.target(), "countdown expired");
            let result = self.player.play_alert(&mut self.scheduler, &self.alert_sound);
            self.report_playback(result);
        }
        if outcome.notify {
            self.surface.notify(GET_READY_TITLE, GET_READY_MESSAGE);
        }

        self.tick_task = Some(self.scheduler.schedule(now, self.tick_interval, Task::Tick));
    }

    fn report_playback(&mut self, result: Result<(), PlaybackError>) {
        let Err(err) = result else {
            return;
        };
        tracing::error!(error = %err, "playback failed");
        let error = AppError::from(err);
        if self.player.note_failure() {
            self.surface.report_error(&error);
        }
    }

    fn publish_now_playing(&mut self) {
        let payload = self.player.now_playing();
        if self.shown_now_playing.as_ref() == Some(&payload) {
            return;
        }
        self.surface.show_now_playing(&payload);
        self.shown_now_playing = Some(payload);
    }

    fn publish_shuffle(&mut self) {
        let enabled = self.player.is_shuffle();
        self.surface.show_shuffle(&ShufflePayload {
            enabled,
            icon_color: IconColor::for_shuffle(enabled).name().to_string(),
        });
    }
}
