//! Blocking dialogs the setup flow and the folder button depend on.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("the window was closed before the dialog was answered")]
    Closed,
}

pub trait Prompter {
    /// `Ok(None)` when the user cancelled the prompt.
    fn ask_text(&mut self, title: &str, message: &str) -> Result<Option<String>, PromptError>;

    fn ask_yes_no(&mut self, title: &str, message: &str) -> Result<bool, PromptError>;

    fn alert(&mut self, title: &str, message: &str) -> Result<(), PromptError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const AUDIO_FILTERS: &[FileFilter] = &[
    FileFilter {
        name: "MP3 Files",
        extensions: &["mp3"],
    },
    FileFilter {
        name: "WAV Files",
        extensions: &["wav"],
    },
    FileFilter {
        name: "OGG Files",
        extensions: &["ogg"],
    },
];

pub trait FilePicker {
    /// Multi-select. An empty list means the user cancelled.
    fn choose_files(&mut self, title: &str, filters: &[FileFilter]) -> Vec<PathBuf>;
}


#[cfg(test)]
mod tests {
    use super::AUDIO_FILTERS;

    #[test]
    fn audio_filters_cover_supported_formats() {
        let extensions: Vec<&str> = AUDIO_FILTERS
            .iter()
            .flat_map(|filter| filter.extensions.iter().copied())
            .collect();
        assert_eq!(extensions, vec!["mp3", "wav", "ogg"]);
    }
}
