//! Page-level keyboard interception.
//!
//! Works around the embedded module's input capture swallowing
//! Backspace/Enter: while a dialog is open, every key event is stopped
//! at the window level before the module's own listeners run, and Enter
//! is rerouted to the dialog's confirm action. Ctrl+S is always kept
//! away from the browser's native save shortcut.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub enter: bool,
    pub ctrl_s: bool,
}

/// What the window-level listener should do with one key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyDecision {
    pub stop_propagation: bool,
    pub confirm_dialog: bool,
    pub prevent_default: bool,
}

pub fn decide(suppressing: bool, event: KeyEvent) -> KeyDecision {
    let mut decision = KeyDecision::default();
    if suppressing {
        decision.stop_propagation = true;
        if event.kind == KeyEventKind::Down && event.enter {
            decision.confirm_dialog = true;
        }
    }
    if event.kind == KeyEventKind::Down && event.ctrl_s {
        decision.prevent_default = true;
    }
    decision
}

/// Shared handle on the suppression flag. Clones observe the same flag;
/// the save protocol raises it for exactly the lifetime of its dialog.
#[derive(Debug, Clone, Default)]
pub struct KeyGate {
    suppressing: Rc<Cell<bool>>,
}

impl KeyGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppressing(&self) -> bool {
        self.suppressing.get()
    }

    pub fn set_suppressing(&self, on: bool) {
        self.suppressing.set(on);
    }

    pub fn decide(&self, event: KeyEvent) -> KeyDecision {
        decide(self.suppressing(), event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter_down() -> KeyEvent {
        KeyEvent { kind: KeyEventKind::Down, enter: true, ctrl_s: false }
    }

    fn plain(kind: KeyEventKind) -> KeyEvent {
        KeyEvent { kind, enter: false, ctrl_s: false }
    }

    #[test]
    fn idle_gate_lets_keys_through() {
        let gate = KeyGate::new();
        assert_eq!(gate.decide(plain(KeyEventKind::Down)), KeyDecision::default());
        assert_eq!(gate.decide(enter_down()), KeyDecision::default());
    }

    #[test]
    fn suppressing_stops_propagation_both_ways() {
        let gate = KeyGate::new();
        gate.set_suppressing(true);
        assert!(gate.decide(plain(KeyEventKind::Down)).stop_propagation);
        assert!(gate.decide(plain(KeyEventKind::Up)).stop_propagation);
    }

    #[test]
    fn enter_keydown_confirms_only_while_suppressing() {
        let gate = KeyGate::new();
        gate.set_suppressing(true);
        assert!(gate.decide(enter_down()).confirm_dialog);
        let up = KeyEvent { kind: KeyEventKind::Up, enter: true, ctrl_s: false };
        assert!(!gate.decide(up).confirm_dialog);
        gate.set_suppressing(false);
        assert!(!gate.decide(enter_down()).confirm_dialog);
    }

    #[test]
    fn ctrl_s_is_always_prevented() {
        let gate = KeyGate::new();
        let ctrl_s = KeyEvent { kind: KeyEventKind::Down, enter: false, ctrl_s: true };
        assert!(gate.decide(ctrl_s).prevent_default);
        assert!(!gate.decide(ctrl_s).stop_propagation);
        gate.set_suppressing(true);
        let decision = gate.decide(ctrl_s);
        assert!(decision.prevent_default);
        assert!(decision.stop_propagation);
    }

    #[test]
    fn clones_share_the_flag() {
        let gate = KeyGate::new();
        let clone = gate.clone();
        gate.set_suppressing(true);
        assert!(clone.suppressing());
    }
}
