//! Launcher configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::keys::{self, DEFAULT_CONFIRM, DEFAULT_SELECT_LEFT, DEFAULT_SELECT_RIGHT};
use crate::menu::{Bindings, MAX_APPLICATIONS, MIN_APPLICATIONS};
use crate::ticker::{DEFAULT_REFRESH_RATE, MAX_REFRESH_RATE};

/// Config file looked up when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "launcher.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not open {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Too few applications ({0}). Please set application_count to be between 2 and 9 inclusive.")]
    TooFewApplications(usize),

    #[error("Too many applications ({0}). Please set application_count to be between 2 and 9 inclusive.")]
    TooManyApplications(usize),

    #[error("Refresh rate {0} Hz is too high. Please set refresh_rate to at most 1000.")]
    RefreshRateTooHigh(u32),

    #[error("Application override for index {index} is outside 1..={count}")]
    UnknownApplication { index: usize, count: usize },
}

/// How a confirmed selection is started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Spawn and keep the menu running
    #[default]
    Detached,
    /// Hand the terminal to the application until it exits
    Foreground,
}

/// Button names as written in the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonConfig {
    #[serde(default)]
    pub select_left: Option<String>,

    #[serde(default)]
    pub select_right: Option<String>,

    #[serde(default)]
    pub confirm: Option<String>,
}

/// Per-application overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// 1-based menu position
    pub index: usize,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Shell command, replaces `<index>.sh`
    #[serde(default)]
    pub command: Option<String>,

    /// Icon path, replaces `<index>.png`
    #[serde(default)]
    pub icon: Option<PathBuf>,
}

/// Complete launcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Number of applications on offer, 2..=9
    pub application_count: usize,

    /// Logic ticks per second, 0 means default
    #[serde(default)]
    pub refresh_rate: u32,

    /// Directory holding `<index>.png` icons and `<index>.sh` scripts
    #[serde(default = "default_applications_dir")]
    pub applications_dir: PathBuf,

    #[serde(default)]
    pub launch_mode: LaunchMode,

    /// Show the footer with the selected application
    #[serde(default = "default_true")]
    pub show_status: bool,

    #[serde(default)]
    pub buttons: ButtonConfig,

    #[serde(default)]
    pub applications: Vec<ApplicationConfig>,
}

fn default_applications_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl LauncherConfig {
    /// Load and validate a configuration file. A relative `applications_dir`
    /// is resolved against the file's directory and made absolute.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let read_error = |source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        };
        let content = std::fs::read_to_string(path).map_err(read_error)?;
        let mut config = Self::from_str(&content)?;

        if config.applications_dir.is_relative() {
            let parent = path.parent().unwrap_or(Path::new(""));
            config.applications_dir =
                std::path::absolute(parent.join(&config.applications_dir)).map_err(read_error)?;
        }

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: LauncherConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.application_count;
        if count < MIN_APPLICATIONS {
            return Err(ConfigError::TooFewApplications(count));
        }
        if count > MAX_APPLICATIONS {
            return Err(ConfigError::TooManyApplications(count));
        }
        if self.refresh_rate > MAX_REFRESH_RATE {
            return Err(ConfigError::RefreshRateTooHigh(self.refresh_rate));
        }

        for app in &self.applications {
            if app.index < 1 || app.index > count {
                return Err(ConfigError::UnknownApplication {
                    index: app.index,
                    count,
                });
            }
        }

        Ok(())
    }

    /// Effective tick rate
    pub fn refresh_rate(&self) -> u32 {
        if self.refresh_rate == 0 {
            DEFAULT_REFRESH_RATE
        } else {
            self.refresh_rate
        }
    }

    /// Resolve button names, falling back to the arrow keys and enter
    pub fn bindings(&self) -> Bindings {
        Bindings {
            select_left: keys::resolve_button(
                self.buttons.select_left.as_deref(),
                DEFAULT_SELECT_LEFT,
            ),
            select_right: keys::resolve_button(
                self.buttons.select_right.as_deref(),
                DEFAULT_SELECT_RIGHT,
            ),
            confirm: keys::resolve_button(self.buttons.confirm.as_deref(), DEFAULT_CONFIRM),
        }
    }

    /// Override entry for a 1-based index, if any. The last entry wins.
    pub fn application(&self, index: usize) -> Option<&ApplicationConfig> {
        self.applications.iter().rev().find(|app| app.index == index)
    }

    /// Display name for a 1-based index
    pub fn application_name(&self, index: usize) -> String {
        self.application(index)
            .and_then(|app| app.name.clone())
            .unwrap_or_else(|| format!("Application {}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Button;
    use crossterm::event::KeyCode;

    #[test]
    fn test_parse_minimal_config() {
        let config = LauncherConfig::from_str("application_count = 3").unwrap();
        assert_eq!(config.application_count, 3);
        assert_eq!(config.refresh_rate(), DEFAULT_REFRESH_RATE);
        assert_eq!(config.applications_dir, PathBuf::from("."));
        assert_eq!(config.launch_mode, LaunchMode::Detached);
        assert!(config.show_status);
        assert_eq!(config.bindings(), Bindings::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
application_count = 4
refresh_rate = 30
applications_dir = "/opt/kiosk"
launch_mode = "foreground"
show_status = false

[buttons]
select_left = "A"
select_right = "D"
confirm = "SPACE"

[[applications]]
index = 2
name = "Emulator"
command = "retroarch --fullscreen"
icon = "art/emu.png"
"#;
        let config = LauncherConfig::from_str(toml).unwrap();
        assert_eq!(config.refresh_rate(), 30);
        assert_eq!(config.launch_mode, LaunchMode::Foreground);
        assert!(!config.show_status);

        let bindings = config.bindings();
        assert_eq!(bindings.select_left, Button::Key(KeyCode::Char('a')));
        assert_eq!(bindings.select_right, Button::Key(KeyCode::Char('d')));
        assert_eq!(bindings.confirm, Button::Key(KeyCode::Char(' ')));

        assert_eq!(config.application_name(2), "Emulator");
        assert_eq!(config.application_name(3), "Application 3");
        assert_eq!(
            config.application(2).and_then(|a| a.command.as_deref()),
            Some("retroarch --fullscreen")
        );
    }

    #[test]
    fn test_application_count_bounds() {
        assert!(matches!(
            LauncherConfig::from_str("application_count = 1"),
            Err(ConfigError::TooFewApplications(1))
        ));
        assert!(matches!(
            LauncherConfig::from_str("application_count = 10"),
            Err(ConfigError::TooManyApplications(10))
        ));
        assert!(LauncherConfig::from_str("application_count = 2").is_ok());
        assert!(LauncherConfig::from_str("application_count = 9").is_ok());
    }

    #[test]
    fn test_refresh_rate_ceiling() {
        assert!(matches!(
            LauncherConfig::from_str("application_count = 3\nrefresh_rate = 1001"),
            Err(ConfigError::RefreshRateTooHigh(1001))
        ));
        assert!(matches!(
            LauncherConfig::from_str("application_count = 3\nrefresh_rate = 4000000000"),
            Err(ConfigError::RefreshRateTooHigh(4_000_000_000))
        ));

        let config = LauncherConfig::from_str("application_count = 3\nrefresh_rate = 1000").unwrap();
        assert_eq!(config.refresh_rate(), MAX_REFRESH_RATE);
    }

    #[test]
    fn test_missing_count_is_a_parse_error() {
        assert!(matches!(
            LauncherConfig::from_str("refresh_rate = 60"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            LauncherConfig::from_str("application_count = \"three\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_override_outside_range_is_rejected() {
        let toml = r#"
application_count = 3

[[applications]]
index = 4
"#;
        assert!(matches!(
            LauncherConfig::from_str(toml),
            Err(ConfigError::UnknownApplication { index: 4, count: 3 })
        ));
    }

    #[test]
    fn test_unknown_button_falls_back() {
        let toml = r#"
application_count = 3

[buttons]
select_left = "NOT_A_KEY"
"#;
        let config = LauncherConfig::from_str(toml).unwrap();
        assert_eq!(config.bindings().select_left, DEFAULT_SELECT_LEFT);
    }

    #[test]
    fn test_load_resolves_relative_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launcher.toml");
        std::fs::write(&path, "application_count = 2\napplications_dir = \"apps\"\n").unwrap();

        let config = LauncherConfig::load(&path).unwrap();
        assert_eq!(config.applications_dir, dir.path().join("apps"));
    }

    #[test]
    fn test_load_from_relative_path_gives_absolute_dir() {
        let dir = tempfile::tempdir_in(".").unwrap();
        let name = dir.path().file_name().unwrap();
        let relative = Path::new(name).join("kiosk").join("launcher.toml");
        std::fs::create_dir(dir.path().join("kiosk")).unwrap();
        std::fs::write(&relative, "application_count = 2\n").unwrap();

        let config = LauncherConfig::load(&relative).unwrap();
        assert!(config.applications_dir.is_absolute());
        assert_eq!(
            config.applications_dir,
            std::env::current_dir().unwrap().join(name).join("kiosk")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LauncherConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("Could not open"));
    }
}
