//! Starting the selected application
//!
//! Launching is fire-and-forget. Spawn failures and exit statuses are logged
//! and never reach the menu.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::{debug, error, info, warn};

use crate::config::{LaunchMode, LauncherConfig};
use crate::menu::LaunchRequest;

/// Host-side action behind a confirmed selection
pub trait Launcher {
    fn launch(&mut self, request: LaunchRequest);

    /// Whether the launched program needs the terminal while it runs
    fn takes_terminal(&self) -> bool {
        false
    }

    /// Collect finished children. Called once per tick.
    fn reap(&mut self) {}
}

/// What runs for one menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchCommand {
    /// `<applications_dir>/<index>.sh`, run with `sh`
    Script(PathBuf),
    /// Configured command line, run with `sh -c`
    Shell(String),
}

impl LaunchCommand {
    fn to_command(&self, dir: &Path) -> Command {
        let mut cmd = Command::new("sh");
        match self {
            LaunchCommand::Script(path) => {
                cmd.arg(path);
            }
            LaunchCommand::Shell(line) => {
                cmd.arg("-c").arg(line);
            }
        }
        cmd.current_dir(dir);
        cmd
    }
}

impl std::fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchCommand::Script(path) => write!(f, "{}", path.display()),
            LaunchCommand::Shell(line) => f.write_str(line),
        }
    }
}

/// Runs entries through `sh`
pub struct ShellLauncher {
    dir: PathBuf,
    mode: LaunchMode,
    commands: Vec<LaunchCommand>,
    children: Vec<Child>,
}

impl ShellLauncher {
    pub fn new(config: &LauncherConfig) -> Self {
        // Scripts are named from this directory and also run inside it, so a
        // relative path would be applied twice.
        let dir = std::path::absolute(&config.applications_dir)
            .unwrap_or_else(|_| config.applications_dir.clone());

        let commands = (1..=config.application_count)
            .map(|index| match config.application(index).and_then(|a| a.command.clone()) {
                Some(line) => LaunchCommand::Shell(line),
                None => LaunchCommand::Script(dir.join(format!("{}.sh", index))),
            })
            .collect();

        Self {
            dir,
            mode: config.launch_mode,
            commands,
            children: Vec::new(),
        }
    }

    /// Command for a 1-based index
    pub fn command(&self, index: usize) -> Option<&LaunchCommand> {
        self.commands.get(index.checked_sub(1)?)
    }

    /// Detached children not yet reaped
    #[cfg(test)]
    fn running(&self) -> usize {
        self.children.len()
    }

    fn spawn_detached(&mut self, index: usize, command: LaunchCommand) {
        let result = command
            .to_command(&self.dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match result {
            Ok(child) => {
                info!("Launched application {} ({}), pid {}", index, command, child.id());
                self.children.push(child);
            }
            Err(e) => {
                error!("Failed to launch application {} ({}): {}", index, command, e);
            }
        }
    }

    fn run_foreground(&self, index: usize, command: &LaunchCommand) {
        info!("Running application {} ({}) in the foreground", index, command);
        match command.to_command(&self.dir).status() {
            Ok(status) if status.success() => {
                debug!("Application {} exited cleanly", index);
            }
            Ok(status) => {
                warn!("Application {} exited with {}", index, status);
            }
            Err(e) => {
                error!("Failed to launch application {} ({}): {}", index, command, e);
            }
        }
    }
}

impl Launcher for ShellLauncher {
    fn launch(&mut self, request: LaunchRequest) {
        let Some(command) = self.command(request.index).cloned() else {
            warn!("Launch requested for unknown application {}", request.index);
            return;
        };

        match self.mode {
            LaunchMode::Detached => self.spawn_detached(request.index, command),
            LaunchMode::Foreground => self.run_foreground(request.index, &command),
        }
    }

    fn takes_terminal(&self) -> bool {
        self.mode == LaunchMode::Foreground
    }

    fn reap(&mut self) {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("Process {} exited with {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("Failed to poll process {}: {}", child.id(), e);
                false
            }
        });
    }
}
