use crate::assets::{AssetCatalog, Background};
use crate::background::{BackgroundError, BackgroundImage, BackgroundLoader};
use crate::clock::Clock;
use crate::countdown::{matches_time_pattern, ConfigError, CountdownEngine};
use crate::prompts::{PromptError, Prompter};
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Background(#[from] BackgroundError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl SetupError {
    /// Configuration and image failures start the flow over; a closed window
    /// ends it.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SetupError::Prompt(_))
    }
}

#[derive(Debug, Clone)]
pub struct SessionSetup {
    pub countdown: CountdownEngine,
    pub background: Background,
    pub image: BackgroundImage,
    pub activate_music: bool,
}

/// Asks for the target time and background, retrying from the top until both
/// are usable, then asks whether to start music.
pub fn configure_session(
    prompter: &mut dyn Prompter,
    clock: &dyn Clock,
    assets: &AssetCatalog,
    loader: &dyn BackgroundLoader,
) -> Result<SessionSetup, SetupError> {
    let mut attempt = 0u32;
    let (countdown, background, image) = loop {
        attempt += 1;
        match configure_attempt(prompter, clock, assets, loader) {
            Ok(configured) => break configured,
            Err(err) if err.is_retryable() => {
                tracing::warn!(attempt, error = %err, "configuration failed, starting over");
            }
            Err(err) => return Err(err),
        }
    };
    tracing::info!(
        deadline = %countdown.target(),
        background = background.name(),
        attempts = attempt,
        "session configured"
    );

    let activate_music =
        prompter.ask_yes_no("Activate music?", "Would you like to activate the sound?")?;
    Ok(SessionSetup {
        countdown,
        background,
        image,
        activate_music,
    })
}

fn configure_attempt(
    prompter: &mut dyn Prompter,
    clock: &dyn Clock,
    assets: &AssetCatalog,
    loader: &dyn BackgroundLoader,
) -> Result<(CountdownEngine, Background, BackgroundImage), SetupError> {
    let today = clock.now().date();
    let input = ask_time_of_day(prompter, today)?;
    let countdown = CountdownEngine::configure(&input, today)?;
    prompter.alert(
        "Datetime",
        &format!("Datetime configured: {}", countdown.target()),
    )?;

    let background = choose_background(prompter)?;
    let image = loader.load(&assets.background(background))?;
    Ok((countdown, background, image))
}

/// Prompts until the answer looks like `HH:MM`. Cancelling asks again.
pub fn ask_time_of_day(
    prompter: &mut dyn Prompter,
    today: NaiveDate,
) -> Result<String, PromptError> {
    let message = format!("Enter Hour in format: HH:MM for date {today}");
    loop {
        match prompter.ask_text("Activate", &message)? {
            Some(input) if matches_time_pattern(&input) => return Ok(input),
            Some(input) => tracing::debug!(input = %input, "not an HH:MM time, asking again"),
            None => tracing::debug!("time prompt cancelled, asking again"),
        }
    }
}

/// One question per image; declining all three keeps the initial one.
pub fn choose_background(prompter: &mut dyn Prompter) -> Result<Background, PromptError> {
    if prompter.ask_yes_no("Initial image?", "Would you like an initial image?")? {
        return Ok(Background::Init);
    }
    if prompter.ask_yes_no("Back image?", "Would you like a back image?")? {
        return Ok(Background::Back);
    }
    if prompter.ask_yes_no("End image?", "Would you like an end image?")? {
        return Ok(Background::End);
    }
    Ok(Background::Init)
}
