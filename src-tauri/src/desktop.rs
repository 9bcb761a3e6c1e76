use crate::app_error::{AppError, AppErrorKind};
use crate::app_state::AppState;
use crate::assets::AssetCatalog;
use crate::background::ImageBackgroundLoader;
use crate::clock::SystemClock;
use crate::commands::LoopHandle;
use crate::dialogs::{TauriFilePicker, TauriPrompter};
use crate::event_loop::{EventLoop, LoopMessage};
use crate::events::TauriSurface;
use crate::models::BackgroundPayload;
use crate::music_player::{MusicPlayer, PlayerProfile};
use crate::playback_driver::PlaybackDriver;
use crate::playlist::Playlist;
use crate::prompt_bridge::PromptBridge;
use crate::rodio_driver::RodioDriver;
use crate::settings::{AppSettings, DriverKind};
use crate::setup_flow::configure_session;
use crate::surface::Surface;
use crate::system_driver::SystemCommandDriver;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Instant;
use tauri::{AppHandle, Manager};

/// Checks the assets and starts the session thread. Missing assets are fatal.
pub fn start(app: &AppHandle, settings: AppSettings) -> Result<(), AppError> {
    let assets = resolve_assets(app, &settings.assets_dir);
    if let Err(err) = assets.verify() {
        let error = AppError::from(err);
        error.log();
        return Err(error);
    }
    tracing::info!(assets = %assets.root().display(), "assets verified");

    let (sender, receiver) = mpsc::channel();
    app.manage(LoopHandle::new(sender));
    let bridge = Arc::new(PromptBridge::new());
    app.manage(Arc::clone(&bridge));

    let handle = app.clone();
    std::thread::Builder::new()
        .name("countdown-loop".to_string())
        .spawn(move || run_session(handle, settings, assets, bridge, receiver))
        .map_err(|err| {
            AppError::with_detail(
                AppErrorKind::System,
                "The countdown could not be started",
                err.to_string(),
                false,
            )
        })?;
    Ok(())
}

/// Window teardown: unblocks pending prompts and stops the loop.
pub fn shutdown(app: &AppHandle) {
    if let Some(bridge) = app.try_state::<Arc<PromptBridge>>() {
        bridge.close();
    }
    if let Some(handle) = app.try_state::<LoopHandle>() {
        handle.shutdown();
    }
}

fn run_session(
    app: AppHandle,
    settings: AppSettings,
    assets: AssetCatalog,
    bridge: Arc<PromptBridge>,
    receiver: Receiver<LoopMessage>,
) {
    let mut prompter = TauriPrompter::new(app.clone(), bridge);
    if prompter.wait_until_ready().is_err() {
        tracing::info!("window closed before the page loaded");
        return;
    }

    let clock = SystemClock;
    let (width, height) = settings.background_size;
    let loader = ImageBackgroundLoader::new(width, height);
    let setup = match configure_session(&mut prompter, &clock, &assets, &loader) {
        Ok(setup) => setup,
        Err(err) => {
            tracing::info!(error = %err, "setup ended without a session");
            app.exit(0);
            return;
        }
    };

    let mut surface = TauriSurface::new(app.clone());
    surface.show_background(&BackgroundPayload {
        name: setup.background.name().to_string(),
        data_url: setup.image.data_url.clone(),
        width: setup.image.width,
        height: setup.image.height,
    });
    match assets.load_icons() {
        Ok(icons) => surface.show_icons(&icons),
        Err(err) => {
            let error = AppError::from(err);
            error.log();
            surface.report_error(&error);
        }
    }

    let driver = build_driver(&settings);
    let profile = PlayerProfile::for_driver(driver.as_ref(), settings.loop_track.clone());
    tracing::info!(?profile, "music player ready");
    let player = MusicPlayer::new(
        driver,
        Playlist::new(),
        profile,
        settings.timings,
        settings.volume,
    );

    let mut state = AppState::new(
        setup.countdown,
        player,
        Box::new(surface),
        Box::new(TauriFilePicker::new(app.clone())),
        Box::new(clock),
        assets.alert_sound(),
        settings.timings.tick,
    );
    let now = Instant::now();
    state.start(now);
    if setup.activate_music {
        state.activate_music(now);
    }

    EventLoop::new(state, receiver).run();
}

/// The mixer is not `Send`, so this runs on the session thread.
fn build_driver(settings: &AppSettings) -> Box<dyn PlaybackDriver> {
    if settings.audio_driver == DriverKind::Mixer {
        match RodioDriver::new() {
            Ok(driver) => return Box::new(driver),
            Err(err) => tracing::warn!(
                error = %err,
                "audio mixer unavailable, falling back to the system player"
            ),
        }
    }
    let driver = SystemCommandDriver::new();
    tracing::info!(program = driver.program(), "using the system player");
    Box::new(driver)
}

fn resolve_assets(app: &AppHandle, configured: &Path) -> AssetCatalog {
    let mut candidates: Vec<PathBuf> = vec![configured.to_path_buf()];
    if configured.is_relative() {
        candidates.push(Path::new("..").join(configured));
        if let Ok(resources) = app.path().resource_dir() {
            candidates.push(resources.join("_up_").join(configured));
            candidates.push(resources.join(configured));
        }
    }
    AssetCatalog::locate(candidates).unwrap_or_else(|| AssetCatalog::new(configured))
}
