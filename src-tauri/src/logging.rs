//! Logging setup. Writes to stdout through `tracing-subscriber`; set
//! `DEBUG_LOGGING=1` to get debug output from this crate.

use crate::settings::AppSettings;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";
const DEBUG_DIRECTIVE: &str = "info,countdown_player_lib=debug,countdown_player=debug";

pub fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        DEBUG_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    }
}

/// Installs the global subscriber. Safe to call more than once; later calls
/// keep the first subscriber.
pub fn init(settings: &AppSettings) {
    let directive = filter_directive(settings.debug_logging);
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_target(true)
        .try_init();

    if result.is_ok() {
        tracing::info!(
            debug_logging = settings.debug_logging,
            "countdown logging initialized"
        );
    }
}
