#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    TogglePause,
    Quit,
}

const ACTION_COUNT: usize = 6;

const MOVE_ACTIONS: [InputAction; 4] = [
    InputAction::MoveUp,
    InputAction::MoveDown,
    InputAction::MoveLeft,
    InputAction::MoveRight,
];

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::TogglePause => 4,
            InputAction::Quit => 5,
        }
    }
}

/// Accumulates host keyboard state between logic ticks.
///
/// Movement actions are held-state; pause and quit are edge-triggered so a
/// held key cannot re-fire them. The host's event binding (out of scope
/// here) calls `set_action` / `focus_lost`; the loop calls
/// `snapshot_for_tick` once per frame.
#[derive(Debug, Default)]
pub struct IntentCollector {
    action_states: ActionStates,
    pause_toggle_pressed_edge: bool,
    quit_requested: bool,
}

impl IntentCollector {
    pub fn set_action(&mut self, action: InputAction, is_down: bool) {
        match action {
            InputAction::TogglePause => {
                if is_down && !self.action_states.is_down(InputAction::TogglePause) {
                    self.pause_toggle_pressed_edge = true;
                }
                self.action_states.set(InputAction::TogglePause, is_down);
            }
            InputAction::Quit => {
                if is_down {
                    self.quit_requested = true;
                }
                self.action_states.set(InputAction::Quit, is_down);
            }
            _ => self.action_states.set(action, is_down),
        }
    }

    /// Losing input focus drops every held movement intent; a key released
    /// while unfocused would otherwise stay "held" forever.
    pub fn focus_lost(&mut self) {
        for action in MOVE_ACTIONS {
            self.action_states.set(action, false);
        }
    }

    pub fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::new(
            self.action_states,
            self.pause_toggle_pressed_edge,
            self.quit_requested,
        );
        self.pause_toggle_pressed_edge = false;
        snapshot
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    pause_toggled: bool,
    quit_requested: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(actions: ActionStates, pause_toggled: bool, quit_requested: bool) -> Self {
        Self {
            actions,
            pause_toggled,
            quit_requested,
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn pause_toggled(&self) -> bool {
        self.pause_toggled
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_actions_are_held_state() {
        let mut input = IntentCollector::default();
        input.set_action(InputAction::MoveRight, true);

        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();
        assert!(first.is_down(InputAction::MoveRight));
        assert!(second.is_down(InputAction::MoveRight));

        input.set_action(InputAction::MoveRight, false);
        assert!(!input.snapshot_for_tick().is_down(InputAction::MoveRight));
    }

    #[test]
    fn pause_toggle_is_edge_triggered_for_single_tick() {
        let mut input = IntentCollector::default();
        input.set_action(InputAction::TogglePause, true);

        assert!(input.snapshot_for_tick().pause_toggled());
        assert!(!input.snapshot_for_tick().pause_toggled());
    }

    #[test]
    fn held_pause_key_does_not_spam_toggle_edges() {
        let mut input = IntentCollector::default();

        input.set_action(InputAction::TogglePause, true);
        assert!(input.snapshot_for_tick().pause_toggled());

        input.set_action(InputAction::TogglePause, true);
        assert!(!input.snapshot_for_tick().pause_toggled());

        input.set_action(InputAction::TogglePause, false);
        input.set_action(InputAction::TogglePause, true);
        assert!(input.snapshot_for_tick().pause_toggled());
    }

    #[test]
    fn focus_loss_clears_movement_but_not_pause_edge() {
        let mut input = IntentCollector::default();
        input.set_action(InputAction::MoveUp, true);
        input.set_action(InputAction::MoveLeft, true);
        input.set_action(InputAction::TogglePause, true);

        input.focus_lost();

        let snapshot = input.snapshot_for_tick();
        assert!(!snapshot.is_down(InputAction::MoveUp));
        assert!(!snapshot.is_down(InputAction::MoveLeft));
        assert!(snapshot.pause_toggled());
    }

    #[test]
    fn quit_latches_once_pressed() {
        let mut input = IntentCollector::default();
        input.set_action(InputAction::Quit, true);
        input.set_action(InputAction::Quit, false);
        assert!(input.snapshot_for_tick().quit_requested());
    }
}
