/// Keyboard state for the simulation.
///
/// Terminals only deliver key events, not key state, so `InputState`
/// remembers the frame each key was last pressed or repeated.  A key counts
/// as held while it was seen within `HOLD_WINDOW` frames, or until its
/// release event on terminals that report releases (kitty protocol).

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::PlayerSlot;

/// OS key-repeat runs at ≥ 15 Hz, so 8 frames @ 60 FPS (≈133 ms) is always
/// refreshed before it expires.
pub const HOLD_WINDOW: u64 = 8;

/// What one ship is being asked to do this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub backward: bool,
    pub shoot: bool,
}

/// Keys for one player slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub shoot: KeyCode,
}

impl Bindings {
    pub fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => Bindings {
                left: KeyCode::Char('a'),
                right: KeyCode::Char('d'),
                forward: KeyCode::Char('w'),
                backward: KeyCode::Char('s'),
                shoot: KeyCode::Char(' '),
            },
            PlayerSlot::Two => Bindings {
                left: KeyCode::Left,
                right: KeyCode::Right,
                forward: KeyCode::Up,
                backward: KeyCode::Down,
                shoot: KeyCode::Enter,
            },
        }
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Letters are tracked lower-case so Caps Lock doesn't freeze a ship.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    /// Terminal reports releases, so keys stay held until one arrives.
    release_events: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for a terminal with keyboard enhancement: no hold window,
    /// a key is held from its press until its release.
    pub fn with_release_events(release_events: bool) -> Self {
        Self {
            release_events,
            ..Self::default()
        }
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    /// Advance to the next frame; call once per tick before `apply`.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Record one key event.  Returns `true` when the event is a quit request.
    pub fn apply(&mut self, event: &KeyEvent) -> bool {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press => {
                if is_quit(event) {
                    return true;
                }
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
        false
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.key_frame
            .get(&normalize(code))
            .map(|&last| self.release_events || self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn controls(&self, bindings: &Bindings) -> Controls {
        Controls {
            left: self.is_held(bindings.left),
            right: self.is_held(bindings.right),
            forward: self.is_held(bindings.forward),
            backward: self.is_held(bindings.backward),
            shoot: self.is_held(bindings.shoot),
        }
    }

    pub fn controls_for(&self, slot: PlayerSlot) -> Controls {
        self.controls(&Bindings::for_slot(slot))
    }
}
