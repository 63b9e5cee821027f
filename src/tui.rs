//! Terminal session
//!
//! Raw mode, alternate screen, mouse capture and (where supported) key
//! release reporting. The terminal is restored on drop and on panic.

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::sync::Once;
use tracing::{debug, error};

pub type TerminalBackend = CrosstermBackend<Stdout>;

pub struct Tui {
    terminal: Terminal<TerminalBackend>,
    reports_release: bool,
    active: bool,
}

impl Tui {
    pub fn enter() -> Result<Self> {
        install_panic_hook();

        let terminal =
            Terminal::new(CrosstermBackend::new(stdout())).context("Failed to open terminal")?;
        let mut tui = Self {
            terminal,
            reports_release: false,
            active: false,
        };
        tui.resume()?;
        Ok(tui)
    }

    /// Take over the terminal
    pub fn resume(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }

        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;

        self.reports_release = supports_keyboard_enhancement().unwrap_or(false);
        if self.reports_release {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        debug!("Terminal reports key releases: {}", self.reports_release);

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        self.active = true;
        Ok(())
    }

    /// Hand the terminal back, e.g. to a foreground application
    pub fn suspend(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        restore_terminal(self.reports_release).context("Failed to restore terminal")?;
        self.terminal.show_cursor()?;
        self.active = false;
        Ok(())
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn terminal(&mut self) -> &mut Terminal<TerminalBackend> {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.suspend() {
            error!("{:#}", e);
        }
    }
}

fn restore_terminal(pop_enhancement: bool) -> io::Result<()> {
    if pop_enhancement {
        execute!(stdout(), PopKeyboardEnhancementFlags)?;
    }
    execute!(
        stdout(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal(true);
            original(info);
        }));
    });
}
