//! Application icons
//!
//! Icon `N` is `<applications_dir>/N.png` unless the application overrides
//! it. A missing or unreadable icon is not an error: the menu shows a
//! placeholder for that entry instead.

use image::imageops::{self, FilterType};
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::LauncherConfig;

/// A decoded icon with a cached copy scaled to the last requested size
pub struct Icon {
    image: RgbImage,
    scaled: Option<RgbImage>,
}

impl Icon {
    pub fn open(path: &Path) -> image::ImageResult<Self> {
        Ok(Self::from_image(image::open(path)?.to_rgb8()))
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self {
            image,
            scaled: None,
        }
    }

    /// Pixels stretched to exactly `width × height`, or `None` for an empty area
    pub fn scaled(&mut self, width: u32, height: u32) -> Option<&RgbImage> {
        if width == 0 || height == 0 || self.image.width() == 0 || self.image.height() == 0 {
            return None;
        }

        let stale = self
            .scaled
            .as_ref()
            .map_or(true, |s| s.width() != width || s.height() != height);
        if stale {
            self.scaled = Some(imageops::resize(
                &self.image,
                width,
                height,
                FilterType::Triangle,
            ));
        }

        self.scaled.as_ref()
    }
}

/// Icons for every menu position, loaded once at startup
pub struct IconSet {
    expected: Vec<PathBuf>,
    icons: Vec<Option<Icon>>,
}

impl IconSet {
    pub fn load(config: &LauncherConfig) -> Self {
        let mut expected = Vec::with_capacity(config.application_count);
        let mut icons = Vec::with_capacity(config.application_count);

        for index in 1..=config.application_count {
            let path = icon_path(config, index);
            let icon = match Icon::open(&path) {
                Ok(icon) => {
                    debug!("Loaded icon {} for application {}", path.display(), index);
                    Some(icon)
                }
                Err(e) => {
                    warn!("No icon for application {} ({}): {}", index, path.display(), e);
                    None
                }
            };
            expected.push(path);
            icons.push(icon);
        }

        Self { expected, icons }
    }

    /// Icon for a 1-based index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Icon> {
        let slot = index.checked_sub(1)?;
        self.icons.get_mut(slot)?.as_mut()
    }

    /// Where the icon for a 1-based index is looked up
    pub fn expected_path(&self, index: usize) -> Option<&Path> {
        let slot = index.checked_sub(1)?;
        self.expected.get(slot).map(PathBuf::as_path)
    }
}

fn icon_path(config: &LauncherConfig, index: usize) -> PathBuf {
    match config.application(index).and_then(|app| app.icon.as_ref()) {
        Some(icon) if icon.is_absolute() => icon.clone(),
        Some(icon) => config.applications_dir.join(icon),
        None => config.applications_dir.join(format!("{}.png", index)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn config_in(dir: &Path, extra: &str) -> LauncherConfig {
        let mut config =
            LauncherConfig::from_str(&format!("application_count = 3\n{}", extra)).unwrap();
        config.applications_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn test_missing_icons_are_absent_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(4, 4, Rgb([255, 0, 0]))
            .save(dir.path().join("2.png"))
            .unwrap();
        std::fs::write(dir.path().join("3.png"), b"not a png").unwrap();

        let mut icons = IconSet::load(&config_in(dir.path(), ""));
        assert!(icons.get_mut(1).is_none());
        assert!(icons.get_mut(2).is_some());
        assert!(icons.get_mut(3).is_none());
        assert!(icons.get_mut(0).is_none());
        assert!(icons.get_mut(4).is_none());
        assert_eq!(icons.expected_path(1), Some(dir.path().join("1.png").as_path()));
    }

    #[test]
    fn test_icon_override_is_relative_to_applications_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("art")).unwrap();
        RgbImage::new(2, 2).save(dir.path().join("art/emu.png")).unwrap();

        let extra = "[[applications]]\nindex = 1\nicon = \"art/emu.png\"\n";
        let mut icons = IconSet::load(&config_in(dir.path(), extra));
        assert!(icons.get_mut(1).is_some());
        assert_eq!(
            icons.expected_path(1),
            Some(dir.path().join("art/emu.png").as_path())
        );
    }

    #[test]
    fn test_scaled_is_cached_per_size() {
        let mut icon = Icon::from_image(RgbImage::from_pixel(8, 8, Rgb([0, 128, 255])));

        let scaled = icon.scaled(4, 6).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (4, 6));

        let scaled = icon.scaled(10, 2).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (10, 2));
        assert!(icon.scaled(0, 5).is_none());
    }
}
