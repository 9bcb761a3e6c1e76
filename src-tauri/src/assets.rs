use crate::background::data_url;
use crate::models::IconPayload;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("missing required assets: {}", join_paths(.0))]
    Missing(Vec<PathBuf>),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    Init,
    Back,
    End,
}

impl Background {
    pub const ALL: [Background; 3] = [Background::Init, Background::Back, Background::End];

    pub fn name(self) -> &'static str {
        match self {
            Background::Init => "init",
            Background::Back => "back",
            Background::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconColor {
    Yellow,
    Gray,
}

impl IconColor {
    pub const ALL: [IconColor; 2] = [IconColor::Yellow, IconColor::Gray];

    pub fn name(self) -> &'static str {
        match self {
            IconColor::Yellow => "yellow",
            IconColor::Gray => "gray",
        }
    }

    /// Shuffle button color: gray while shuffle is on.
    pub fn for_shuffle(enabled: bool) -> Self {
        if enabled {
            IconColor::Gray
        } else {
            IconColor::Yellow
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Folder,
    Back,
    Play,
    Pause,
    Stop,
    Next,
    Shuffle,
}

impl Icon {
    /// Button order in the control bar.
    pub const ALL: [Icon; 7] = [
        Icon::Folder,
        Icon::Back,
        Icon::Play,
        Icon::Pause,
        Icon::Stop,
        Icon::Next,
        Icon::Shuffle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Icon::Folder => "folder",
            Icon::Back => "back",
            Icon::Play => "play",
            Icon::Pause => "pause",
            Icon::Stop => "stop",
            Icon::Next => "next",
            Icon::Shuffle => "shuffle",
        }
    }
}

/// Fixed files shipped next to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCatalog {
    root: PathBuf,
}

impl AssetCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// First candidate directory holding a complete asset tree.
    pub fn locate<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        candidates
            .into_iter()
            .map(Self::new)
            .find(|catalog| catalog.verify().is_ok())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn background(&self, background: Background) -> PathBuf {
        self.root
            .join("img")
            .join(format!("background_{}.png", background.name()))
    }

    pub fn icon(&self, color: IconColor, icon: Icon) -> PathBuf {
        self.root
            .join("icons")
            .join(color.name())
            .join(format!("{}.png", icon.name()))
    }

    pub fn alert_sound(&self) -> PathBuf {
        self.root.join("sound").join("alert.wav")
    }

    pub fn required(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Background::ALL
            .iter()
            .map(|background| self.background(*background))
            .collect();
        for color in IconColor::ALL {
            paths.extend(Icon::ALL.iter().map(|icon| self.icon(color, *icon)));
        }
        paths.push(self.alert_sound());
        paths
    }

    /// Checks every required file up front and reports all missing ones at
    /// once.
    pub fn verify(&self) -> Result<(), AssetError> {
        let missing: Vec<PathBuf> = self
            .required()
            .into_iter()
            .filter(|path| !path.is_file())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AssetError::Missing(missing))
        }
    }

    /// Every button icon in both colors, as PNG data URLs.
    pub fn load_icons(&self) -> Result<Vec<IconPayload>, AssetError> {
        let mut icons = Vec::with_capacity(IconColor::ALL.len() * Icon::ALL.len());
        for color in IconColor::ALL {
            for icon in Icon::ALL {
                let path = self.icon(color, icon);
                let bytes = std::fs::read(&path).map_err(|source| AssetError::Read {
                    path: path.clone(),
                    source,
                })?;
                icons.push(IconPayload {
                    name: icon.name().to_string(),
                    color: color.name().to_string(),
                    data_url: data_url("image/png", &bytes),
                });
            }
        }
        Ok(icons)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::write_catalog;
    use super::{AssetCatalog, AssetError, Background, Icon, IconColor};
    use std::path::PathBuf;

    #[test]
    fn layout_matches_shipped_tree() {
        let catalog = AssetCatalog::new("assets");
        assert_eq!(
            catalog.background(Background::Back),
            PathBuf::from("assets/img/background_back.png")
        );
        assert_eq!(
            catalog.icon(IconColor::Gray, Icon::Shuffle),
            PathBuf::from("assets/icons/gray/shuffle.png")
        );
        assert_eq!(
            catalog.alert_sound(),
            PathBuf::from("assets/sound/alert.wav")
        );
        assert_eq!(catalog.required().len(), 3 + 14 + 1);
    }

    #[test]
    fn verify_reports_every_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = write_catalog(dir.path());
        catalog.verify().expect("complete tree");

        std::fs::remove_file(catalog.alert_sound()).expect("remove alert");
        std::fs::remove_file(catalog.background(Background::End)).expect("remove end");

        match catalog.verify() {
            Err(AssetError::Missing(missing)) => {
                assert_eq!(missing.len(), 2);
                assert!(missing.contains(&catalog.alert_sound()));
                assert!(missing.contains(&catalog.background(Background::End)));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn locate_skips_incomplete_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let empty = dir.path().join("empty");
        std::fs::create_dir_all(&empty).expect("create empty");
        let complete = write_catalog(&dir.path().join("complete"));

        let found = AssetCatalog::locate(vec![empty.clone(), complete.root().to_path_buf()])
            .expect("complete tree");
        assert_eq!(found, complete);
        assert_eq!(AssetCatalog::locate(vec![empty]), None);
    }

    #[test]
    fn icons_load_in_button_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = write_catalog(dir.path());

        let icons = catalog.load_icons().expect("icons");
        assert_eq!(icons.len(), 14);
        assert_eq!(icons[0].name, "folder");
        assert_eq!(icons[0].color, "yellow");
        assert_eq!(icons[13].name, "shuffle");
        assert_eq!(icons[13].color, "gray");
        assert!(icons[0].data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn shuffle_icon_is_gray_while_enabled() {
        assert_eq!(IconColor::for_shuffle(true), IconColor::Gray);
        assert_eq!(IconColor::for_shuffle(false), IconColor::Yellow);
    }
}
