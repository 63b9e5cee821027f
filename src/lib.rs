//! raven-launcher - kiosk application launcher
//!
//! A fullscreen terminal menu that cycles through a fixed set of application
//! icons with two buttons and starts the selected one with a third.

pub mod app;
pub mod config;
pub mod icons;
pub mod input;
pub mod keys;
pub mod launch;
pub mod menu;
pub mod ticker;
pub mod tui;
pub mod ui;

pub use app::App;
pub use config::{ConfigError, LaunchMode, LauncherConfig};
pub use input::{InputSample, InputSource, InputTracker};
pub use launch::{Launcher, ShellLauncher};
pub use menu::{Bindings, LaunchRequest, MenuController, Selection};
