//! Input handler for terminal environments.
//!
//! Moves and rotations fire once per key press. Soft drop is a held state: it ends on a
//! key release, or after a timeout on terminals that do not emit releases. There, holding
//! a key produces one press, a pause of up to the keyboard repeat delay, then a stream of
//! auto-repeat presses; the first press is held long enough to bridge the pause and each
//! repeat refreshes a shorter timer.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::types::{GameAction, SOFT_DROP_GRACE_MS, SOFT_DROP_REPEAT_DELAY_MS};

/// Tracks input state between frames.
#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    soft_drop_timer_ms: u32,
    /// Set once release events are known to arrive; the timeout is then unnecessary.
    releases_supported: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            soft_drop_held: false,
            soft_drop_timer_ms: 0,
            releases_supported: false,
        }
    }

    /// Trust release events from the start, e.g. when the terminal enabled
    /// keyboard enhancement. Without this, the first release seen turns it on.
    pub fn with_key_releases(mut self, supported: bool) -> Self {
        self.releases_supported = supported;
        self
    }

    /// Feed one key event; returns the action to apply, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameAction> {
        match key.kind {
            KeyEventKind::Press => self.handle_key_press(key),
            KeyEventKind::Repeat => {
                // Auto-repeat only extends a held soft drop.
                if is_soft_drop_key(key.code) {
                    self.hold_soft_drop();
                }
                None
            }
            KeyEventKind::Release => {
                self.handle_key_release(key.code);
                None
            }
        }
    }

    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameAction> {
        if is_soft_drop_key(key.code) {
            self.hold_soft_drop();
            return None;
        }
        handle_key_event(key)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        self.releases_supported = true;
        if is_soft_drop_key(code) {
            self.soft_drop_held = false;
            self.soft_drop_timer_ms = 0;
        }
    }

    fn hold_soft_drop(&mut self) {
        self.soft_drop_timer_ms = if self.soft_drop_held {
            SOFT_DROP_GRACE_MS
        } else {
            SOFT_DROP_REPEAT_DELAY_MS
        };
        self.soft_drop_held = true;
    }

    /// Advance timers; call once per frame.
    pub fn update(&mut self, elapsed_ms: u32) {
        if !self.soft_drop_held || self.releases_supported {
            return;
        }
        self.soft_drop_timer_ms = self.soft_drop_timer_ms.saturating_sub(elapsed_ms);
        if self.soft_drop_timer_ms == 0 {
            self.soft_drop_held = false;
        }
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Forget all held state (e.g. on restart).
    pub fn reset(&mut self) {
        self.soft_drop_held = false;
        self.soft_drop_timer_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_press_maps_to_action() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_key(key(KeyCode::Left, KeyEventKind::Press)),
            Some(GameAction::MoveLeft)
        );
        assert!(!input.soft_drop_held());
    }

    #[test]
    fn test_repeat_does_not_move() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_key(key(KeyCode::Left, KeyEventKind::Repeat)), None);
    }

    #[test]
    fn test_soft_drop_times_out_without_release() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_key(key(KeyCode::Down, KeyEventKind::Press)), None);
        assert!(input.soft_drop_held());

        input.update(100);
        assert!(input.soft_drop_held());

        // Auto-repeat refreshes the timer.
        input.handle_key(key(KeyCode::Down, KeyEventKind::Repeat));
        input.update(100);
        assert!(input.soft_drop_held());

        input.update(100);
        assert!(!input.soft_drop_held());
    }

    #[test]
    fn test_first_press_outlasts_the_repeat_delay() {
        let mut input = InputHandler::new();
        input.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press));
        for _ in 0..(500 / 16) {
            input.update(16);
            assert!(input.soft_drop_held());
        }
    }

    #[test]
    fn test_known_release_support_disables_the_timeout() {
        let mut input = InputHandler::new().with_key_releases(true);
        input.handle_key(key(KeyCode::Down, KeyEventKind::Press));
        input.update(5_000);
        assert!(input.soft_drop_held());
        input.handle_key(key(KeyCode::Down, KeyEventKind::Release));
        assert!(!input.soft_drop_held());
    }

    #[test]
    fn test_soft_drop_held_until_release_when_supported() {
        let mut input = InputHandler::new();
        // A release of some other key proves the terminal reports releases.
        input.handle_key(key(KeyCode::Left, KeyEventKind::Release));

        input.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press));
        input.update(1000);
        assert!(input.soft_drop_held());

        input.handle_key(key(KeyCode::Char('s'), KeyEventKind::Release));
        assert!(!input.soft_drop_held());
    }
}
