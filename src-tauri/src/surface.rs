use crate::app_error::AppError;
use crate::models::{BackgroundPayload, ClockDisplay, IconPayload, NowPlayingPayload, ShufflePayload};

/// Everything the app shows. Implementations only render; no state lives here.
pub trait Surface {
    fn show_clock(&mut self, display: &ClockDisplay);

    fn show_now_playing(&mut self, payload: &NowPlayingPayload);

    fn show_shuffle(&mut self, payload: &ShufflePayload);

    fn show_background(&mut self, payload: &BackgroundPayload);

    fn show_icons(&mut self, icons: &[IconPayload]);

    /// Non-blocking notice.
    fn notify(&mut self, title: &str, message: &str);

    fn report_error(&mut self, error: &AppError);
}
