//! Launcher menu state
//!
//! A single wrapping selection index in `1..=count`, moved by edge-detected
//! left/right presses. Within one tick the order is fixed: left, then right,
//! then confirm. Confirm therefore launches the index left by that tick's
//! movement.

use tracing::debug;

use crate::input::InputTracker;
use crate::keys::{Button, DEFAULT_CONFIRM, DEFAULT_SELECT_LEFT, DEFAULT_SELECT_RIGHT};

/// Fewest applications a launcher may offer
pub const MIN_APPLICATIONS: usize = 2;

/// Most applications a launcher may offer
pub const MAX_APPLICATIONS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Move a 1-based index one step in `direction`, wrapping within `1..=count`
pub fn step(index: usize, direction: Direction, count: usize) -> usize {
    match direction {
        Direction::Left => {
            if index <= 1 {
                count
            } else {
                index - 1
            }
        }
        Direction::Right => {
            if index >= count {
                1
            } else {
                index + 1
            }
        }
    }
}

/// Currently highlighted application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    count: usize,
}

impl Selection {
    /// Start at the first application. `count` is validated by the config
    /// loader before a selection is ever built.
    pub fn new(count: usize) -> Self {
        Self { index: 1, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn move_by(&mut self, direction: Direction) {
        self.index = step(self.index, direction, self.count);
    }
}

/// Buttons driving the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub select_left: Button,
    pub select_right: Button,
    pub confirm: Button,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            select_left: DEFAULT_SELECT_LEFT,
            select_right: DEFAULT_SELECT_RIGHT,
            confirm: DEFAULT_CONFIRM,
        }
    }
}

/// Request to start the application at `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchRequest {
    pub index: usize,
}

/// Menu controller, run once per logic tick
#[derive(Debug)]
pub struct MenuController {
    selection: Selection,
    bindings: Bindings,
}

impl MenuController {
    pub fn new(count: usize, bindings: Bindings) -> Self {
        Self {
            selection: Selection::new(count),
            bindings,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Apply this tick's edges. Left, right and confirm are checked
    /// independently and in that order.
    pub fn tick(&mut self, input: &InputTracker) -> Option<LaunchRequest> {
        if input.is_just_pressed(self.bindings.select_left) {
            self.selection.move_by(Direction::Left);
            debug!("Selection moved left to {}", self.selection.index());
        }

        if input.is_just_pressed(self.bindings.select_right) {
            self.selection.move_by(Direction::Right);
            debug!("Selection moved right to {}", self.selection.index());
        }

        if input.is_just_pressed(self.bindings.confirm) {
            return Some(LaunchRequest {
                index: self.selection.index(),
            });
        }

        None
    }
}
