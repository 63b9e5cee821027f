//! Keyboard and pointer state tracking
//!
//! The tracker keeps two snapshots, `current` and `previous`, and derives
//! "just pressed" edges by comparing them. `update` must run exactly once per
//! logic tick: running it twice collapses an edge, skipping it freezes edges.

use std::collections::HashSet;

use crossterm::event::{Event, KeyEventKind, MouseEventKind};

use crate::keys::Button;

/// Snapshot of every tracked button and the pointer at one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSample {
    pub pressed: HashSet<Button>,
    pub pointer: (i32, i32),
}

impl InputSample {
    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }
}

/// Host input system, sampled once per tick
pub trait InputSource {
    fn sample(&mut self) -> InputSample;
}

/// Current/previous double buffer over an [`InputSource`]
#[derive(Debug, Default)]
pub struct InputTracker {
    current: InputSample,
    previous: InputSample,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `current` into `previous` and take a fresh sample
    pub fn update<S: InputSource + ?Sized>(&mut self, source: &mut S) {
        let fresh = source.sample();
        self.previous = std::mem::replace(&mut self.current, fresh);
    }

    pub fn is_down(&self, button: Button) -> bool {
        self.current.is_pressed(button)
    }

    pub fn is_just_pressed(&self, button: Button) -> bool {
        self.current.is_pressed(button) && !self.previous.is_pressed(button)
    }

    pub fn pointer_position(&self) -> (i32, i32) {
        self.current.pointer
    }
}

/// Terminal-backed input source.
///
/// Terminals deliver events, not state, so held buttons are reconstructed
/// from the event stream. When the terminal reports key releases a key stays
/// down until its release arrives. Otherwise a press is latched until the
/// next sample, which makes it down for exactly one tick.
#[derive(Debug)]
pub struct TerminalInput {
    held: HashSet<Button>,
    latched: HashSet<Button>,
    pointer: (i32, i32),
    reports_release: bool,
}

impl TerminalInput {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HashSet::new(),
            latched: HashSet::new(),
            pointer: (0, 0),
            reports_release,
        }
    }

    /// Feed one drained terminal event
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Key(key) => {
                let button = Button::Key(key.code);
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => self.press(button),
                    KeyEventKind::Release => {
                        self.held.remove(&button);
                    }
                }
            }
            Event::Mouse(mouse) => {
                self.pointer = (i32::from(mouse.column), i32::from(mouse.row));
                match mouse.kind {
                    MouseEventKind::Down(b) => self.press(Button::Mouse(b)),
                    MouseEventKind::Up(b) => {
                        self.held.remove(&Button::Mouse(b));
                    }
                    _ => {}
                }
            }
            // Buttons held while focus leaves never see their release.
            Event::FocusLost => self.held.clear(),
            _ => {}
        }
    }

    fn press(&mut self, button: Button) {
        // Mouse buttons always report their release.
        if self.reports_release || matches!(button, Button::Mouse(_)) {
            self.held.insert(button);
        } else {
            self.latched.insert(button);
        }
    }
}

impl InputSource for TerminalInput {
    fn sample(&mut self) -> InputSample {
        let mut pressed = self.held.clone();
        pressed.extend(self.latched.drain());
        InputSample {
            pressed,
            pointer: self.pointer,
        }
    }
}
