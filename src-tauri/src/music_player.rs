use crate::app_state::Task;
use crate::models::{NowPlayingPayload, PlaybackState};
use crate::playback_driver::{display_name, PlaybackDriver, PlaybackError};
use crate::playlist::Playlist;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::settings::Timings;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const IDLE_HINT: &str = "Select songs and click Play to listen to music";
const PAUSED_LABEL: &str = "(paused)";
const PAUSED_MARKER: &str = " | (paused)";

/// How the player treats its track list, picked from what the driver can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerProfile {
    /// Sequential or shuffled playback over the selected files.
    Playlist,
    /// One track played over and over. Falls back to the first selected file
    /// when no track is configured.
    FixedLoop { track: Option<PathBuf> },
}

impl PlayerProfile {
    pub fn for_driver(driver: &dyn PlaybackDriver, loop_track: Option<PathBuf>) -> Self {
        if driver.capabilities().playlist {
            Self::Playlist
        } else {
            Self::FixedLoop { track: loop_track }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NowPlaying {
    Idle,
    Between { paused: bool },
    Track { name: String, paused: bool },
    Stopped,
}

impl NowPlaying {
    fn text(&self) -> String {
        match self {
            NowPlaying::Idle => IDLE_HINT.to_string(),
            NowPlaying::Between { paused: true } => PAUSED_LABEL.to_string(),
            NowPlaying::Between { paused: false } | NowPlaying::Stopped => String::new(),
            NowPlaying::Track { name, paused } => {
                let marker = if *paused { PAUSED_MARKER } else { "" };
                format!("🎧 Now Playing: {name}{marker}")
            }
        }
    }
}

/// Playback state machine over a [`Playlist`] and a [`PlaybackDriver`].
///
/// Completion polling and delayed starts go through the caller's scheduler.
/// The player keeps the handles of what it scheduled and cancels them before
/// any transition that would make them stale.
pub struct MusicPlayer {
    playlist: Playlist,
    driver: Box<dyn PlaybackDriver>,
    profile: PlayerProfile,
    timings: Timings,
    volume: f32,
    state: PlaybackState,
    now_playing: NowPlaying,
    track_length: Option<Duration>,
    poll_task: Option<TaskHandle>,
    start_task: Option<TaskHandle>,
    /// Set when a pause swallowed a pending start; resuming schedules it again.
    restart_on_resume: bool,
    failure_notified: bool,
}

impl MusicPlayer {
    pub fn new(
        driver: Box<dyn PlaybackDriver>,
        playlist: Playlist,
        profile: PlayerProfile,
        timings: Timings,
        volume: f32,
    ) -> Self {
        Self {
            playlist,
            driver,
            profile,
            timings,
            volume: volume.clamp(0.0, 1.0),
            state: PlaybackState::Stopped,
            now_playing: NowPlaying::Idle,
            track_length: None,
            poll_task: None,
            start_task: None,
            restart_on_resume: false,
            failure_notified: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn is_shuffle(&self) -> bool {
        self.playlist.is_shuffle()
    }

    pub fn has_pending_poll(&self) -> bool {
        self.poll_task.is_some()
    }

    pub fn has_pending_start(&self) -> bool {
        self.start_task.is_some()
    }

    pub fn now_playing(&self) -> NowPlayingPayload {
        NowPlayingPayload {
            text: self.now_playing.text(),
            state: self.state,
        }
    }

    /// Replaces the track list and rewinds to the first track. Whatever is
    /// playing keeps playing.
    pub fn load(&mut self, tracks: Vec<PathBuf>) {
        tracing::info!(tracks = tracks.len(), "playlist loaded");
        self.playlist.replace(tracks);
    }

    /// Starts the track at the current position. Does nothing once the
    /// countdown has expired or when there is nothing to play.
    pub fn play(
        &mut self,
        scheduler: &mut Scheduler<Task>,
        now: Instant,
        expired: bool,
    ) -> Result<bool, PlaybackError> {
        if expired {
            tracing::debug!("countdown expired, ignoring play");
            return Ok(false);
        }
        let Some(path) = self.track_to_play() else {
            tracing::debug!("nothing to play");
            return Ok(false);
        };

        self.cancel_pending(scheduler);
        if let Err(err) = self.start_track(&path) {
            self.driver.stop();
            self.state = PlaybackState::Stopped;
            self.now_playing = NowPlaying::Stopped;
            return Err(err);
        }

        self.failure_notified = false;
        self.state = PlaybackState::Playing;
        self.now_playing = NowPlaying::Track {
            name: display_name(&path),
            paused: false,
        };
        self.poll_task = Some(scheduler.schedule(now, self.timings.poll, Task::PollPlayback));
        tracing::debug!(track = %path.display(), "playing");
        Ok(true)
    }

    /// Pause and resume share one button. Pausing between tracks holds the
    /// pending start until playback resumes.
    pub fn pause(&mut self, scheduler: &mut Scheduler<Task>, now: Instant) -> bool {
        if !self.driver.capabilities().pause {
            return false;
        }
        match self.state {
            PlaybackState::Playing => {
                let restart = self.start_task.is_some();
                self.cancel_pending(scheduler);
                self.restart_on_resume = restart;
                self.driver.pause();
                self.state = PlaybackState::Paused;
                self.set_paused_marker(true);
                true
            }
            PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                self.set_paused_marker(false);
                if std::mem::take(&mut self.restart_on_resume) {
                    tracing::debug!("resuming with the held track start");
                    self.start_task = Some(scheduler.schedule(
                        now,
                        self.timings.skip_delay,
                        Task::StartPlayback,
                    ));
                } else {
                    self.driver.unpause();
                    self.poll_task =
                        Some(scheduler.schedule(now, self.timings.poll, Task::PollPlayback));
                }
                true
            }
            PlaybackState::Stopped => false,
        }
    }

    pub fn stop(&mut self, scheduler: &mut Scheduler<Task>) -> bool {
        self.cancel_pending(scheduler);
        if self.state == PlaybackState::Stopped {
            return false;
        }
        self.driver.stop();
        self.state = PlaybackState::Stopped;
        self.now_playing = NowPlaying::Stopped;
        self.track_length = None;
        true
    }

    pub fn next(&mut self, scheduler: &mut Scheduler<Task>, now: Instant) -> bool {
        if self.profile != PlayerProfile::Playlist || self.playlist.advance().is_none() {
            return false;
        }
        self.schedule_start(scheduler, now, self.timings.skip_delay);
        true
    }

    pub fn previous(&mut self, scheduler: &mut Scheduler<Task>, now: Instant) -> bool {
        if self.profile != PlayerProfile::Playlist || self.playlist.retreat().is_none() {
            return false;
        }
        self.schedule_start(scheduler, now, self.timings.skip_delay);
        true
    }

    /// Flips shuffle. Turning it on jumps to a random track right away.
    pub fn toggle_shuffle(
        &mut self,
        scheduler: &mut Scheduler<Task>,
        now: Instant,
        expired: bool,
    ) -> Result<bool, PlaybackError> {
        if self.profile != PlayerProfile::Playlist {
            return Ok(self.playlist.is_shuffle());
        }
        let enabled = !self.playlist.is_shuffle();
        self.playlist.set_shuffle(enabled);
        if enabled {
            self.playlist.randomize();
            self.play(scheduler, now, expired)?;
        }
        Ok(enabled)
    }

    pub fn on_start_task(
        &mut self,
        scheduler: &mut Scheduler<Task>,
        now: Instant,
        expired: bool,
    ) -> Result<bool, PlaybackError> {
        self.start_task = None;
        self.play(scheduler, now, expired)
    }

    /// Completion check. Returns true when the current track ended on this
    /// poll.
    pub fn on_poll(&mut self, scheduler: &mut Scheduler<Task>, now: Instant, expired: bool) -> bool {
        self.poll_task = None;
        if self.state != PlaybackState::Playing {
            return false;
        }
        if !self.current_track_finished() {
            self.poll_task = Some(scheduler.schedule(now, self.timings.poll, Task::PollPlayback));
            return false;
        }

        tracing::debug!("track finished");
        self.track_length = None;
        if expired {
            self.stop(scheduler);
            return true;
        }
        if self.profile == PlayerProfile::Playlist && self.playlist.advance().is_none() {
            self.stop(scheduler);
            return true;
        }
        self.now_playing = NowPlaying::Between { paused: false };
        self.start_task = Some(scheduler.schedule(now, self.timings.track_gap, Task::StartPlayback));
        true
    }

    /// Stops regular playback and plays `path` once at full volume.
    pub fn play_alert(
        &mut self,
        scheduler: &mut Scheduler<Task>,
        path: &Path,
    ) -> Result<(), PlaybackError> {
        self.stop(scheduler);
        self.driver.load(path)?;
        if self.driver.capabilities().volume {
            self.driver.set_volume(1.0);
        }
        self.driver.play()?;
        tracing::info!(sound = %path.display(), "alert playing");
        Ok(())
    }

    /// True the first time a failure should be shown to the user; further
    /// failures stay quiet until a track plays again.
    pub fn note_failure(&mut self) -> bool {
        if self.failure_notified {
            false
        } else {
            self.failure_notified = true;
            true
        }
    }

    fn track_to_play(&self) -> Option<PathBuf> {
        match &self.profile {
            PlayerProfile::Playlist => self.playlist.current().map(Path::to_path_buf),
            PlayerProfile::FixedLoop { track } => track
                .clone()
                .or_else(|| self.playlist.tracks().first().cloned()),
        }
    }

    fn start_track(&mut self, path: &Path) -> Result<(), PlaybackError> {
        self.driver.load(path)?;
        let capabilities = self.driver.capabilities();
        self.track_length = if capabilities.end_of_track {
            None
        } else {
            Some(self.driver.track_duration(path)?)
        };
        if capabilities.volume {
            self.driver.set_volume(self.volume);
        }
        self.driver.play()
    }

    fn current_track_finished(&mut self) -> bool {
        if let Some(finished) = self.driver.track_finished() {
            return finished;
        }
        match self.track_length {
            Some(length) => self.driver.elapsed().as_secs() >= length.as_secs(),
            None => false,
        }
    }

    fn set_paused_marker(&mut self, paused: bool) {
        match &mut self.now_playing {
            NowPlaying::Track { paused: current, .. } | NowPlaying::Between { paused: current } => {
                *current = paused
            }
            NowPlaying::Idle | NowPlaying::Stopped => {}
        }
    }

    fn schedule_start(&mut self, scheduler: &mut Scheduler<Task>, now: Instant, delay: Duration) {
        self.cancel_pending(scheduler);
        self.start_task = Some(scheduler.schedule(now, delay, Task::StartPlayback));
    }

    fn cancel_poll(&mut self, scheduler: &mut Scheduler<Task>) {
        if let Some(handle) = self.poll_task.take() {
            scheduler.cancel(handle);
        }
    }

    fn cancel_pending(&mut self, scheduler: &mut Scheduler<Task>) {
        self.cancel_poll(scheduler);
        self.restart_on_resume = false;
        if let Some(handle) = self.start_task.take() {
            scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MusicPlayer, PlayerProfile};
    use crate::app_state::Task;
    use crate::models::PlaybackState;
    use crate::playback_driver::testing::{DriverCall, DriverLog, RecordingDriver};
    use crate::playback_driver::DriverCapabilities;
    use crate::playlist::Playlist;
    use crate::scheduler::Scheduler;
    use crate::settings::Timings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    fn tracks(count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|index| PathBuf::from(format!("/music/track-{index}.mp3")))
            .collect()
    }

    fn player_with(
        capabilities: DriverCapabilities,
        profile: PlayerProfile,
    ) -> (MusicPlayer, Rc<RefCell<DriverLog>>) {
        let (driver, log) = RecordingDriver::with_capabilities(capabilities);
        let player = MusicPlayer::new(
            Box::new(driver),
            Playlist::with_rng(StdRng::seed_from_u64(11)),
            profile,
            Timings::default(),
            0.8,
        );
        (player, log)
    }

    fn mixer_player() -> (MusicPlayer, Rc<RefCell<DriverLog>>) {
        player_with(DriverCapabilities::MIXER, PlayerProfile::Playlist)
    }

    fn loads(log: &Rc<RefCell<DriverLog>>) -> Vec<PathBuf> {
        log.borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Load(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    fn drain(scheduler: &mut Scheduler<Task>, at: Instant) -> Vec<Task> {
        let mut tasks = Vec::new();
        while let Some(task) = scheduler.pop_due(at) {
            tasks.push(task);
        }
        tasks
    }

    #[test]
    fn play_with_empty_playlist_does_not_touch_driver() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let played = player
            .play(&mut scheduler, Instant::now(), false)
            .expect("play");
        assert!(!played);
        assert!(log.borrow().calls.is_empty());
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn play_loads_current_track_and_starts_polling() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(3));

        assert!(player.play(&mut scheduler, now, false).expect("play"));
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(
            log.borrow().calls,
            vec![
                DriverCall::Load(PathBuf::from("/music/track-0.mp3")),
                DriverCall::SetVolume(0.8),
                DriverCall::Play,
            ]
        );
        assert!(player.has_pending_poll());
        assert_eq!(
            scheduler.next_deadline(),
            Some(now + Duration::from_millis(100))
        );
        assert_eq!(player.now_playing().text, "🎧 Now Playing: track-0.mp3");
    }

    #[test]
    fn play_after_expiry_is_ignored() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        player.load(tracks(2));
        assert!(!player
            .play(&mut scheduler, Instant::now(), true)
            .expect("play"));
        assert!(log.borrow().calls.is_empty());
    }

    #[test]
    fn pause_twice_restores_track_name() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(1));
        player.play(&mut scheduler, now, false).expect("play");
        let before = player.now_playing().text;

        assert!(player.pause(&mut scheduler, now));
        assert_eq!(player.state(), PlaybackState::Paused);
        assert_eq!(player.now_playing().text, format!("{before} | (paused)"));
        assert!(!player.has_pending_poll());

        assert!(player.pause(&mut scheduler, now));
        assert!(player.pause(&mut scheduler, now));
        assert!(player.pause(&mut scheduler, now));
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(player.now_playing().text, before);
        assert!(player.has_pending_poll());

        let calls = &log.borrow().calls;
        assert_eq!(calls.iter().filter(|call| **call == DriverCall::Pause).count(), 2);
        assert_eq!(calls.iter().filter(|call| **call == DriverCall::Unpause).count(), 2);
    }

    #[test]
    fn pause_holds_a_pending_skip_until_resume() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(2));
        player.play(&mut scheduler, now, false).expect("play");

        assert!(player.next(&mut scheduler, now));
        assert!(player.pause(&mut scheduler, now));
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(!player.has_pending_start());
        assert!(scheduler.is_empty());
        assert_eq!(
            player.now_playing().text,
            "🎧 Now Playing: track-0.mp3 | (paused)"
        );

        let later = now + Duration::from_secs(2);
        assert!(drain(&mut scheduler, later).is_empty());
        assert_eq!(player.state(), PlaybackState::Paused);
        assert_eq!(loads(&log), vec![PathBuf::from("/music/track-0.mp3")]);

        assert!(player.pause(&mut scheduler, later));
        assert!(player.has_pending_start());
        let start_at = later + Duration::from_millis(100);
        assert_eq!(drain(&mut scheduler, start_at), vec![Task::StartPlayback]);
        player
            .on_start_task(&mut scheduler, start_at, false)
            .expect("start");
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(
            loads(&log),
            vec![
                PathBuf::from("/music/track-0.mp3"),
                PathBuf::from("/music/track-1.mp3"),
            ]
        );
        assert!(!log.borrow().calls.contains(&DriverCall::Unpause));
    }

    #[test]
    fn pause_between_tracks_shows_marker() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(2));
        player.play(&mut scheduler, now, false).expect("play");
        log.borrow_mut().finished = Some(true);
        assert!(player.on_poll(&mut scheduler, now, false));
        assert!(player.has_pending_start());

        assert!(player.pause(&mut scheduler, now));
        assert_eq!(player.now_playing().text, "(paused)");
        assert!(scheduler.is_empty());

        assert!(player.stop(&mut scheduler));
        assert!(!player.pause(&mut scheduler, now));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn pause_while_stopped_is_a_no_op() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        assert!(!player.pause(&mut scheduler, Instant::now()));
        assert!(log.borrow().calls.is_empty());
    }

    #[test]
    fn stop_cancels_polling_and_is_idempotent() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(2));
        player.play(&mut scheduler, now, false).expect("play");

        assert!(player.stop(&mut scheduler));
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert!(scheduler.is_empty());
        assert_eq!(player.now_playing().text, "");

        let calls_before = log.borrow().calls.len();
        assert!(!player.stop(&mut scheduler));
        assert_eq!(log.borrow().calls.len(), calls_before);
    }

    #[test]
    fn next_wraps_and_restarts_after_delay() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(3));
        player.play(&mut scheduler, now, false).expect("play");

        for _ in 0..3 {
            assert!(player.next(&mut scheduler, now));
        }
        assert_eq!(player.playlist().position(), Some(0));
        assert!(player.has_pending_start());
        assert!(!player.has_pending_poll());
        assert_eq!(scheduler.len(), 1);

        let later = now + Duration::from_millis(100);
        assert_eq!(drain(&mut scheduler, later), vec![Task::StartPlayback]);
        player
            .on_start_task(&mut scheduler, later, false)
            .expect("start");
        assert_eq!(
            loads(&log),
            vec![
                PathBuf::from("/music/track-0.mp3"),
                PathBuf::from("/music/track-0.mp3"),
            ]
        );
    }

    #[test]
    fn previous_stops_at_first_track() {
        let (mut player, _log) = mixer_player();
        let mut scheduler = Scheduler::new();
        player.load(tracks(3));
        assert!(player.previous(&mut scheduler, Instant::now()));
        assert_eq!(player.playlist().position(), Some(0));
    }

    #[test]
    fn skip_with_empty_playlist_schedules_nothing() {
        let (mut player, _log) = mixer_player();
        let mut scheduler = Scheduler::new();
        assert!(!player.next(&mut scheduler, Instant::now()));
        assert!(!player.previous(&mut scheduler, Instant::now()));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn completion_advances_to_next_track() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(2));
        player.play(&mut scheduler, now, false).expect("play");

        let poll_at = now + Duration::from_millis(100);
        assert_eq!(drain(&mut scheduler, poll_at), vec![Task::PollPlayback]);
        assert!(!player.on_poll(&mut scheduler, poll_at, false));
        assert!(player.has_pending_poll());

        log.borrow_mut().finished = Some(true);
        let end_at = poll_at + Duration::from_millis(100);
        assert_eq!(drain(&mut scheduler, end_at), vec![Task::PollPlayback]);
        assert!(player.on_poll(&mut scheduler, end_at, false));
        assert_eq!(player.playlist().position(), Some(1));
        assert_eq!(player.now_playing().text, "");

        let start_at = end_at + Duration::from_millis(500);
        assert_eq!(drain(&mut scheduler, start_at), vec![Task::StartPlayback]);
        player
            .on_start_task(&mut scheduler, start_at, false)
            .expect("start");
        assert_eq!(
            loads(&log).last(),
            Some(&PathBuf::from("/music/track-1.mp3"))
        );
        assert_eq!(player.state(), PlaybackState::Playing);
    }

    #[test]
    fn completion_after_last_track_wraps_to_first() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(2));
        player.next(&mut scheduler, now);
        player
            .on_start_task(&mut scheduler, now, false)
            .expect("start");
        log.borrow_mut().finished = Some(true);
        assert!(player.on_poll(&mut scheduler, now, false));
        assert_eq!(player.playlist().position(), Some(0));
    }

    #[test]
    fn completion_falls_back_to_duration_comparison() {
        let capabilities = DriverCapabilities {
            end_of_track: false,
            ..DriverCapabilities::MIXER
        };
        let (mut player, log) = player_with(capabilities, PlayerProfile::Playlist);
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        log.borrow_mut()
            .durations
            .push((PathBuf::from("/music/track-0.mp3"), Duration::from_millis(3400)));
        player.load(tracks(2));
        player.play(&mut scheduler, now, false).expect("play");

        log.borrow_mut().elapsed = Duration::from_millis(2900);
        assert!(!player.on_poll(&mut scheduler, now, false));

        log.borrow_mut().elapsed = Duration::from_millis(3050);
        assert!(player.on_poll(&mut scheduler, now, false));
        assert_eq!(player.playlist().position(), Some(1));
    }

    #[test]
    fn completion_after_expiry_does_not_start_another_track() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(3));
        player.play(&mut scheduler, now, false).expect("play");
        log.borrow_mut().finished = Some(true);

        assert!(player.on_poll(&mut scheduler, now, true));
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn toggle_shuffle_on_restarts_and_off_keeps_position() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(5));

        assert!(player
            .toggle_shuffle(&mut scheduler, now, false)
            .expect("shuffle on"));
        assert!(player.is_shuffle());
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(loads(&log).len(), 1);
        let position = player.playlist().position();

        assert!(!player
            .toggle_shuffle(&mut scheduler, now, false)
            .expect("shuffle off"));
        assert!(!player.is_shuffle());
        assert_eq!(player.playlist().position(), position);
        assert_eq!(loads(&log).len(), 1);
    }

    #[test]
    fn failed_load_leaves_player_stopped() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        log.borrow_mut()
            .broken
            .insert(PathBuf::from("/music/track-0.mp3"));
        player.load(tracks(2));

        let result = player.play(&mut scheduler, Instant::now(), false);
        assert!(result.is_err());
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert!(scheduler.is_empty());

        assert!(player.note_failure());
        assert!(!player.note_failure());
    }

    #[test]
    fn alert_stops_music_and_plays_once() {
        let (mut player, log) = mixer_player();
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        player.load(tracks(2));
        player.play(&mut scheduler, now, false).expect("play");
        log.borrow_mut().calls.clear();

        player
            .play_alert(&mut scheduler, &PathBuf::from("/assets/sound/alert.wav"))
            .expect("alert");
        assert_eq!(
            log.borrow().calls,
            vec![
                DriverCall::Stop,
                DriverCall::Load(PathBuf::from("/assets/sound/alert.wav")),
                DriverCall::SetVolume(1.0),
                DriverCall::Play,
            ]
        );
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn fixed_loop_replays_one_track() {
        let capabilities = DriverCapabilities {
            pause: false,
            volume: false,
            playlist: false,
            end_of_track: true,
        };
        let (mut player, log) = player_with(
            capabilities,
            PlayerProfile::FixedLoop {
                track: Some(PathBuf::from("/music/loop.ogg")),
            },
        );
        let mut scheduler = Scheduler::new();
        let now = Instant::now();

        assert!(player.play(&mut scheduler, now, false).expect("play"));
        assert!(!player.next(&mut scheduler, now));
        assert!(!player.pause(&mut scheduler, now));
        assert!(!player
            .toggle_shuffle(&mut scheduler, now, false)
            .expect("shuffle"));

        log.borrow_mut().finished = Some(true);
        assert!(player.on_poll(&mut scheduler, now, false));
        let start_at = now + Duration::from_millis(500);
        assert_eq!(drain(&mut scheduler, start_at), vec![Task::StartPlayback]);
        player
            .on_start_task(&mut scheduler, start_at, false)
            .expect("restart");
        assert_eq!(
            loads(&log),
            vec![
                PathBuf::from("/music/loop.ogg"),
                PathBuf::from("/music/loop.ogg"),
            ]
        );
    }

    #[test]
    fn fixed_loop_without_track_uses_first_selection() {
        let capabilities = DriverCapabilities {
            pause: false,
            volume: false,
            playlist: false,
            end_of_track: true,
        };
        let (mut player, log) =
            player_with(capabilities, PlayerProfile::FixedLoop { track: None });
        let mut scheduler = Scheduler::new();
        player.load(tracks(3));
        player
            .play(&mut scheduler, Instant::now(), false)
            .expect("play");
        assert_eq!(loads(&log), vec![PathBuf::from("/music/track-0.mp3")]);
    }

    #[test]
    fn profile_follows_driver_capabilities() {
        let (mixer, _) = RecordingDriver::new();
        assert_eq!(
            PlayerProfile::for_driver(&mixer, Some(PathBuf::from("/loop.ogg"))),
            PlayerProfile::Playlist
        );
        let (system, _) = RecordingDriver::with_capabilities(DriverCapabilities {
            pause: false,
            volume: false,
            playlist: false,
            end_of_track: true,
        });
        assert_eq!(
            PlayerProfile::for_driver(&system, None),
            PlayerProfile::FixedLoop { track: None }
        );
    }
}
