use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::FilterType;
use image::ImageFormat;
use std::io::Cursor;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum BackgroundError {
    #[error("failed to open background {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode background: {0}")]
    Encode(#[source] image::ImageError),
}

/// A background scaled to the window, ready to hand to the webview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

pub trait BackgroundLoader {
    fn load(&self, path: &Path) -> Result<BackgroundImage, BackgroundError>;
}

/// Decodes with `image` and stretches to a fixed size, ignoring aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct ImageBackgroundLoader {
    width: u32,
    height: u32,
}

impl ImageBackgroundLoader {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl BackgroundLoader for ImageBackgroundLoader {
    fn load(&self, path: &Path) -> Result<BackgroundImage, BackgroundError> {
        let image = image::open(path).map_err(|source| BackgroundError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let resized = image.resize_exact(self.width, self.height, FilterType::Triangle);

        let mut bytes = Vec::new();
        resized
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(BackgroundError::Encode)?;
        tracing::debug!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            "background prepared"
        );

        Ok(BackgroundImage {
            data_url: data_url("image/png", &bytes),
            width: self.width,
            height: self.height,
        })
    }
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
