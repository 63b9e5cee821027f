//! raven-launcher - RavenLinux Kiosk Application Launcher

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use raven_launcher::config::DEFAULT_CONFIG_PATH;
use raven_launcher::keys::button_name;
use raven_launcher::tui::Tui;
use raven_launcher::{App, LauncherConfig, ShellLauncher};

#[derive(Parser)]
#[command(name = "raven-launcher")]
#[command(author = "RavenLinux Team")]
#[command(version = "0.1.0")]
#[command(about = "Kiosk application launcher", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log file (the terminal itself shows the menu)
    #[arg(long, default_value = "raven-launcher.log")]
    log_file: PathBuf,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file)?;
    info!("raven-launcher starting");

    let config = LauncherConfig::load(&cli.config)?;

    if cli.check {
        print_summary(&config);
        return Ok(());
    }

    let launcher = ShellLauncher::new(&config);
    let mut tui = Tui::enter()?;
    let mut app = App::new(config, launcher, tui.reports_release(), Instant::now());
    let result = app.run(&mut tui);
    drop(tui);

    info!("raven-launcher exiting");
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn print_summary(config: &LauncherConfig) {
    let bindings = config.bindings();

    println!("Configuration OK");
    println!("  Applications:   {}", config.application_count);
    println!("  Refresh rate:   {} Hz", config.refresh_rate());
    println!("  Directory:      {}", config.applications_dir.display());
    println!("  Launch mode:    {:?}", config.launch_mode);
    println!(
        "  Buttons:        left={} right={} confirm={}",
        button_name(bindings.select_left),
        button_name(bindings.select_right),
        button_name(bindings.confirm)
    );

    let launcher = ShellLauncher::new(config);
    for index in 1..=config.application_count {
        if let Some(command) = launcher.command(index) {
            println!("  {}. {} -> {}", index, config.application_name(index), command);
        }
    }
}
