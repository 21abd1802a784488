use asteroids::entities::PlayerSlot;
use asteroids::input::*;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn release(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    }
}

#[test]
fn quit_keys_are_reported() {
    let mut input = InputState::new();
    assert!(input.apply(&press(KeyCode::Char('q'))));
    assert!(input.apply(&press(KeyCode::Char('Q'))));
    assert!(input.apply(&press(KeyCode::Esc)));
    assert!(input.apply(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!input.apply(&press(KeyCode::Char('c'))));
}

#[test]
fn pressed_key_is_held_within_window() {
    let mut input = InputState::new();
    input.begin_frame();
    input.apply(&press(KeyCode::Char('w')));
    for _ in 0..HOLD_WINDOW {
        input.begin_frame();
        assert!(input.is_held(KeyCode::Char('w')));
    }
    input.begin_frame();
    assert!(!input.is_held(KeyCode::Char('w')));
}

#[test]
fn release_terminal_holds_key_until_released() {
    let mut input = InputState::with_release_events(true);
    assert!(input.release_events());
    input.begin_frame();
    input.apply(&press(KeyCode::Char('w')));

    // No repeats for longer than the OS repeat delay
    for _ in 0..30 {
        input.begin_frame();
        assert!(input.controls_for(PlayerSlot::One).forward);
    }

    input.apply(&release(KeyCode::Char('w')));
    assert!(!input.controls_for(PlayerSlot::One).forward);
    input.begin_frame();
    assert!(!input.is_held(KeyCode::Char('w')));
}

#[test]
fn classic_terminal_expires_silent_key() {
    let mut input = InputState::with_release_events(false);
    input.begin_frame();
    input.apply(&press(KeyCode::Char(' ')));
    for _ in 0..30 {
        input.begin_frame();
    }
    assert!(!input.controls_for(PlayerSlot::One).shoot);
}

#[test]
fn release_drops_key_immediately() {
    let mut input = InputState::new();
    input.begin_frame();
    input.apply(&press(KeyCode::Up));
    assert!(input.is_held(KeyCode::Up));
    input.apply(&release(KeyCode::Up));
    assert!(!input.is_held(KeyCode::Up));
}

#[test]
fn uppercase_letters_count_as_lowercase() {
    let mut input = InputState::new();
    input.begin_frame();
    input.apply(&press(KeyCode::Char('D')));
    assert!(input.controls_for(PlayerSlot::One).right);
}

#[test]
fn slots_use_separate_bindings() {
    let mut input = InputState::new();
    input.begin_frame();
    input.apply(&press(KeyCode::Char('w')));
    input.apply(&press(KeyCode::Char(' ')));
    input.apply(&press(KeyCode::Left));

    let one = input.controls_for(PlayerSlot::One);
    assert_eq!(
        one,
        Controls { forward: true, shoot: true, ..Controls::default() }
    );

    let two = input.controls_for(PlayerSlot::Two);
    assert_eq!(two, Controls { left: true, ..Controls::default() });
}

#[test]
fn player_two_bindings() {
    let b = Bindings::for_slot(PlayerSlot::Two);
    assert_eq!(b.forward, KeyCode::Up);
    assert_eq!(b.backward, KeyCode::Down);
    assert_eq!(b.shoot, KeyCode::Enter);
}
