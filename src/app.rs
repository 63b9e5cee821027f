//! Main event loop
//!
//! Each pass drains every pending terminal event, then runs at most one logic
//! tick, then redraws if asked to and nothing new is queued. Quit requests
//! are honoured before any logic runs.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::LauncherConfig;
use crate::icons::IconSet;
use crate::input::{InputTracker, TerminalInput};
use crate::launch::Launcher;
use crate::menu::{LaunchRequest, MenuController};
use crate::ticker::Ticker;
use crate::tui::Tui;
use crate::ui::{self, MenuView};

pub struct App<L: Launcher> {
    config: LauncherConfig,
    controller: MenuController,
    tracker: InputTracker,
    input: TerminalInput,
    icons: IconSet,
    launcher: L,
    ticker: Ticker,
    quit: bool,
    need_redraw: bool,
}

impl<L: Launcher> App<L> {
    pub fn new(config: LauncherConfig, launcher: L, reports_release: bool, now: Instant) -> Self {
        let controller = MenuController::new(config.application_count, config.bindings());
        let icons = IconSet::load(&config);
        let ticker = Ticker::new(config.refresh_rate(), now);

        Self {
            config,
            controller,
            tracker: InputTracker::new(),
            input: TerminalInput::new(reports_release),
            icons,
            launcher,
            ticker,
            quit: false,
            need_redraw: true,
        }
    }

    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        info!(
            "Menu running with {} applications at {} Hz",
            self.config.application_count,
            self.config.refresh_rate()
        );

        let mut events = Vec::new();
        while !self.quit {
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }

            if let Some(request) = self.pass(events.drain(..), Instant::now()) {
                self.dispatch(tui, request)?;
            }
            if self.quit {
                break;
            }

            if self.need_redraw && !event::poll(Duration::ZERO)? {
                tui.terminal().draw(|frame| self.render(frame))?;
                self.need_redraw = false;
            }

            // Sleep until the next tick or the next event, whichever is first.
            event::poll(self.ticker.time_until_next(Instant::now()))?;
        }

        info!("Quit requested");
        Ok(())
    }

    /// One loop pass without the terminal: apply the drained events, then run
    /// the logic tick if one is due at `now`. Nothing runs once quit is set.
    pub fn pass(
        &mut self,
        events: impl IntoIterator<Item = Event>,
        now: Instant,
    ) -> Option<LaunchRequest> {
        for event in events {
            self.handle_event(&event);
        }

        if self.quit || !self.ticker.poll(now) {
            return None;
        }
        self.on_tick()
    }

    /// Feed one terminal event
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if key.code == KeyCode::Esc || ctrl_c {
                    self.quit = true;
                }
            }
            Event::Resize(..) | Event::FocusGained => self.need_redraw = true,
            _ => {}
        }
        self.input.apply(event);
    }

    /// One logic tick: sample input once, advance the menu
    pub fn on_tick(&mut self) -> Option<LaunchRequest> {
        self.tracker.update(&mut self.input);
        self.launcher.reap();
        self.need_redraw = true;
        self.controller.tick(&self.tracker)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn selected(&self) -> usize {
        self.controller.selection().index()
    }

    fn dispatch(&mut self, tui: &mut Tui, request: LaunchRequest) -> Result<()> {
        debug!("Launch requested for application {}", request.index);

        if !self.launcher.takes_terminal() {
            self.launcher.launch(request);
            return Ok(());
        }

        tui.suspend()?;
        self.launcher.launch(request);
        tui.resume()?;

        // Releases that happened while the application ran went to it.
        self.input = TerminalInput::new(tui.reports_release());
        self.need_redraw = true;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let selection = self.controller.selection();
        let index = selection.index();
        let name = self.config.application_name(index);
        let icon_path = self.icons.expected_path(index).map(|p| p.to_path_buf());
        let status = self.config.show_status.then_some(self.controller.bindings());

        ui::draw(
            frame,
            MenuView {
                index,
                count: selection.count(),
                name: &name,
                icon: self.icons.get_mut(index),
                icon_path: icon_path.as_deref(),
                status,
            },
        );
    }
}
