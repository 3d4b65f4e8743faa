/// Keyboard model.
///
/// Instead of acting on each key event individually we record the frame of
/// the last press/repeat event for every key.  A key is "held" while that
/// sighting is fresh, which works on two classes of terminal:
///
/// * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
///   `Repeat` / `Release` events, so keys are dropped on release.
/// * **Classic terminals**: only `Press` events, with OS key-repeat showing
///   up as repeated presses.  Keys expire after `hold_frames` of silence.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Shoot,
    Restart,
    Contact,
    Back,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Repeat,
    Up,
}

/// Map a terminal key event onto the game's keys.  Unbound keys give `None`.
pub fn translate(event: &KeyEvent) -> Option<(Key, KeyAction)> {
    let key = match event.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Shoot,
        KeyCode::Enter => Key::Restart,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('c') | KeyCode::Char('C') => Key::Contact,
        KeyCode::Esc => Key::Back,
        KeyCode::Char('q') | KeyCode::Char('Q') => Key::Quit,
        _ => return None,
    };
    let action = match event.kind {
        KeyEventKind::Press => KeyAction::Down,
        KeyEventKind::Repeat => KeyAction::Repeat,
        KeyEventKind::Release => KeyAction::Up,
    };
    Some((key, action))
}

/// Held-key bookkeeping keyed by frame number.
#[derive(Clone, Debug)]
pub struct KeyTracker {
    last_seen: HashMap<Key, u64>,
    hold_frames: u64,
}

impl KeyTracker {
    pub fn new(hold_frames: u64) -> Self {
        KeyTracker {
            last_seen: HashMap::new(),
            hold_frames,
        }
    }

    /// Record a key event seen during `frame`.  Returns `true` only for a
    /// fresh press: a `Down` for a key that was not already held.
    pub fn record(&mut self, key: Key, action: KeyAction, frame: u64) -> bool {
        match action {
            KeyAction::Down => {
                let fresh = !self.is_held(key, frame);
                self.last_seen.insert(key, frame);
                fresh
            }
            KeyAction::Repeat => {
                self.last_seen.insert(key, frame);
                false
            }
            KeyAction::Up => {
                self.last_seen.remove(&key);
                false
            }
        }
    }

    pub fn is_held(&self, key: Key, frame: u64) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= self.hold_frames)
            .unwrap_or(false)
    }
}
