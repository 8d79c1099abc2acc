/// Terminal keyboard → game commands.
///
/// A dedicated thread forwards raw crossterm events through a channel; this
/// module turns them into [`InputEvent`]s.  Crouching needs a key-up, which
/// only keyboard-enhancement terminals (kitty protocol, Ghostty, …) report.
/// Everywhere else the Down key counts as held while its press/repeat events
/// keep arriving, and a release is synthesised once they stop.

use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dino_runner::session::{InputEvent, InputSource};
use log::trace;

/// Frames of silence after which a held Down key counts as released.
/// Must outlast the OS key-repeat delay (≈500 ms), so ≈600 ms at 60 FPS.
const HOLD_WINDOW: u64 = 36;

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    /// Real release events are available; no need to guess.
    keyboard_enhanced: bool,
    /// Frame on which the Down key was last seen pressed or repeating.
    crouch_seen: Option<u64>,
    frame: u64,
}

impl TerminalInput {
    pub fn new(rx: mpsc::Receiver<Event>, keyboard_enhanced: bool) -> Self {
        TerminalInput {
            rx,
            keyboard_enhanced,
            crouch_seen: None,
            frame: 0,
        }
    }

    fn translate(&mut self, event: Event, out: &mut Vec<InputEvent>) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            return;
        };
        trace!("key {:?} {:?}", code, kind);

        match kind {
            KeyEventKind::Press => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    out.push(InputEvent::Quit);
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    out.push(InputEvent::Quit);
                }
                KeyCode::Char('r') | KeyCode::Char('R') => out.push(InputEvent::Retry),
                KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') => {
                    out.push(InputEvent::Jump);
                }
                KeyCode::Down | KeyCode::Char('s') => {
                    if self.crouch_seen.is_none() {
                        out.push(InputEvent::CrouchStart);
                    }
                    self.crouch_seen = Some(self.frame);
                }
                _ => {}
            },
            KeyEventKind::Repeat => {
                if matches!(code, KeyCode::Down | KeyCode::Char('s')) {
                    self.crouch_seen = Some(self.frame);
                }
            }
            KeyEventKind::Release => {
                if matches!(code, KeyCode::Down | KeyCode::Char('s'))
                    && self.crouch_seen.take().is_some()
                {
                    out.push(InputEvent::CrouchEnd);
                }
            }
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frame += 1;
        let mut events = Vec::new();

        while let Ok(event) = self.rx.try_recv() {
            self.translate(event, &mut events);
        }

        if !self.keyboard_enhanced {
            if let Some(last) = self.crouch_seen {
                if self.frame.saturating_sub(last) > HOLD_WINDOW {
                    self.crouch_seen = None;
                    events.push(InputEvent::CrouchEnd);
                }
            }
        }

        events
    }

    fn wait(&mut self) -> Option<InputEvent> {
        // A crouch held into the game-over screen is over either way.
        self.crouch_seen = None;

        let mut events = Vec::new();
        loop {
            let event = self.rx.recv().ok()?;
            self.translate(event, &mut events);
            if let Some(first) = events.first() {
                return Some(*first);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyEventKind::Press)
    }

    fn terminal(keyboard_enhanced: bool) -> (mpsc::Sender<Event>, TerminalInput) {
        let (tx, rx) = mpsc::channel();
        (tx, TerminalInput::new(rx, keyboard_enhanced))
    }

    fn silent_polls(input: &mut TerminalInput, n: usize) {
        for _ in 0..n {
            assert!(input.poll().is_empty());
        }
    }

    // ── Key mapping ───────────────────────────────────────────────────────────

    #[test]
    fn presses_map_to_commands() {
        let (tx, mut input) = terminal(false);
        for event in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            Event::Key(KeyEvent::new_with_kind(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyEventKind::Press,
            )),
            press(KeyCode::Char('r')),
            press(KeyCode::Up),
            press(KeyCode::Char(' ')),
        ] {
            tx.send(event).unwrap();
        }
        assert_eq!(
            input.poll(),
            vec![
                InputEvent::Quit,
                InputEvent::Quit,
                InputEvent::Quit,
                InputEvent::Retry,
                InputEvent::Jump,
                InputEvent::Jump,
            ]
        );
    }

    #[test]
    fn unbound_keys_and_other_events_are_dropped() {
        let (tx, mut input) = terminal(false);
        tx.send(press(KeyCode::Char('c'))).unwrap();
        tx.send(press(KeyCode::Left)).unwrap();
        tx.send(Event::Resize(80, 24)).unwrap();
        tx.send(key(KeyCode::Up, KeyEventKind::Release)).unwrap();
        assert!(input.poll().is_empty());
    }

    // ── Crouch without key-up events ──────────────────────────────────────────

    #[test]
    fn held_crouch_is_released_after_the_hold_window() {
        let (tx, mut input) = terminal(false);
        tx.send(press(KeyCode::Down)).unwrap();
        assert_eq!(input.poll(), vec![InputEvent::CrouchStart]);

        silent_polls(&mut input, HOLD_WINDOW as usize);
        assert_eq!(input.poll(), vec![InputEvent::CrouchEnd]);
        assert!(input.poll().is_empty());
    }

    #[test]
    fn repeats_keep_the_crouch_held() {
        let (tx, mut input) = terminal(false);
        tx.send(press(KeyCode::Down)).unwrap();
        assert_eq!(input.poll(), vec![InputEvent::CrouchStart]);
        silent_polls(&mut input, 30);

        tx.send(key(KeyCode::Down, KeyEventKind::Repeat)).unwrap();
        assert!(input.poll().is_empty());
        silent_polls(&mut input, HOLD_WINDOW as usize);
        assert_eq!(input.poll(), vec![InputEvent::CrouchEnd]);
    }

    #[test]
    fn second_press_while_held_does_not_restart_the_crouch() {
        let (tx, mut input) = terminal(false);
        tx.send(press(KeyCode::Down)).unwrap();
        assert_eq!(input.poll(), vec![InputEvent::CrouchStart]);
        tx.send(press(KeyCode::Char('s'))).unwrap();
        assert!(input.poll().is_empty());
    }

    // ── Crouch with key-up events ─────────────────────────────────────────────

    #[test]
    fn enhanced_terminal_waits_for_the_real_release() {
        let (tx, mut input) = terminal(true);
        tx.send(press(KeyCode::Down)).unwrap();
        assert_eq!(input.poll(), vec![InputEvent::CrouchStart]);

        silent_polls(&mut input, 3 * HOLD_WINDOW as usize);

        tx.send(key(KeyCode::Down, KeyEventKind::Release)).unwrap();
        assert_eq!(input.poll(), vec![InputEvent::CrouchEnd]);

        // A stray release with nothing held is ignored.
        tx.send(key(KeyCode::Down, KeyEventKind::Release)).unwrap();
        assert!(input.poll().is_empty());
    }

    // ── Blocking wait ─────────────────────────────────────────────────────────

    #[test]
    fn wait_skips_to_the_first_command() {
        let (tx, mut input) = terminal(false);
        tx.send(press(KeyCode::Char('x'))).unwrap();
        tx.send(Event::Resize(80, 24)).unwrap();
        tx.send(press(KeyCode::Char('r'))).unwrap();
        assert_eq!(input.wait(), Some(InputEvent::Retry));
    }

    #[test]
    fn wait_forgets_a_held_crouch() {
        let (tx, mut input) = terminal(false);
        tx.send(press(KeyCode::Down)).unwrap();
        assert_eq!(input.poll(), vec![InputEvent::CrouchStart]);

        tx.send(press(KeyCode::Char('r'))).unwrap();
        assert_eq!(input.wait(), Some(InputEvent::Retry));

        // The next Down press starts a fresh crouch.
        tx.send(press(KeyCode::Down)).unwrap();
        assert_eq!(input.poll(), vec![InputEvent::CrouchStart]);
    }

    #[test]
    fn wait_reports_a_closed_stream() {
        let (tx, mut input) = terminal(false);
        drop(tx);
        assert_eq!(input.wait(), None);
    }
}
