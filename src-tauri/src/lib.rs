pub mod app_error;
pub mod app_state;
pub mod assets;
pub mod background;
pub mod clock;
pub mod countdown;
pub mod event_loop;
pub mod logging;
pub mod models;
pub mod music_player;
pub mod playback_driver;
pub mod playlist;
pub mod prompt_bridge;
pub mod prompts;
pub mod scheduler;
pub mod settings;
pub mod setup_flow;
pub mod surface;
pub mod system_driver;

#[cfg(feature = "desktop")]
mod commands;
#[cfg(feature = "desktop")]
mod desktop;
#[cfg(feature = "desktop")]
mod dialogs;
#[cfg(feature = "desktop")]
mod events;
#[cfg(feature = "desktop")]
mod rodio_driver;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    let settings = settings::AppSettings::from_env();
    logging::init(&settings);
    settings.report_rejected();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(move |app| {
            desktop::start(app.handle(), settings.clone())
                .map_err(|err| err.detail().unwrap_or(err.message()).to_string())?;
            Ok(())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Destroyed = event {
                desktop::shutdown(window.app_handle());
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::open_files,
            commands::previous_track,
            commands::play,
            commands::pause,
            commands::stop,
            commands::next_track,
            commands::toggle_shuffle,
            commands::frontend_ready,
            commands::answer_prompt,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
