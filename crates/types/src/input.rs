//! Logical input intents, independent of any keyboard or terminal.

use crate::geom::Vec2;

/// Discrete action buttons a game can react to.
///
/// Movement is not an action; it lives on the [`InputSnapshot`] axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Primary action (shoot, jump, serve).
    Fire,
    /// Accept / start (menus).
    Confirm,
    /// Toggle pause.
    Pause,
    /// Leave the current screen (menus).
    Back,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Fire, Action::Confirm, Action::Pause, Action::Back];

    const fn bit(self) -> u8 {
        match self {
            Action::Fire => 1 << 0,
            Action::Confirm => 1 << 1,
            Action::Pause => 1 << 2,
            Action::Back => 1 << 3,
        }
    }

    /// Parse an action name, ignoring case.
    ///
    /// ```
    /// use arcade_types::Action;
    ///
    /// assert_eq!(Action::from_str("fire"), Some(Action::Fire));
    /// assert_eq!(Action::from_str("PAUSE"), Some(Action::Pause));
    /// assert_eq!(Action::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fire" => Some(Action::Fire),
            "confirm" => Some(Action::Confirm),
            "pause" => Some(Action::Pause),
            "back" => Some(Action::Back),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Fire => "fire",
            Action::Confirm => "confirm",
            Action::Pause => "pause",
            Action::Back => "back",
        }
    }
}

/// Set of currently held [`Action`]s, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    /// Rebuild a set from its raw bits; unknown bits are dropped.
    pub fn from_bits(bits: u8) -> Self {
        let known = Action::ALL.iter().fold(0u8, |acc, a| acc | a.bit());
        Self(bits & known)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    #[must_use]
    pub fn with(mut self, action: Action) -> Self {
        self.insert(action);
        self
    }

    pub fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

/// Instantaneous input state for one frame.
///
/// This is level-triggered: it says what is held *now*. Consumers that need
/// "pressed this frame" diff against the previous snapshot with
/// [`InputSnapshot::pressed_since`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Movement axes, each component in [-1, 1]. `+x` right, `+y` down.
    pub axis: Vec2,
    pub actions: ActionSet,
}

impl InputSnapshot {
    pub const IDLE: InputSnapshot = InputSnapshot {
        axis: Vec2::ZERO,
        actions: ActionSet::EMPTY,
    };

    /// Build a snapshot, clamping each axis into [-1, 1].
    ///
    /// Non-finite axis values are treated as centered.
    pub fn new(axis: Vec2, actions: ActionSet) -> Self {
        Self {
            axis: Vec2::new(normalize_axis(axis.x), normalize_axis(axis.y)),
            actions,
        }
    }

    pub fn held(&self, action: Action) -> bool {
        self.actions.contains(action)
    }

    /// True when `action` is held now but was not held in `prev`.
    pub fn pressed_since(&self, prev: &InputSnapshot, action: Action) -> bool {
        self.held(action) && !prev.held(action)
    }

    /// True when `action` was held in `prev` but is not held now.
    pub fn released_since(&self, prev: &InputSnapshot, action: Action) -> bool {
        !self.held(action) && prev.held(action)
    }

    pub fn is_idle(&self) -> bool {
        self.axis == Vec2::ZERO && self.actions.is_empty()
    }
}

fn normalize_axis(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_are_clamped() {
        let s = InputSnapshot::new(Vec2::new(-3.0, 0.25), ActionSet::EMPTY);
        assert_eq!(s.axis, Vec2::new(-1.0, 0.25));

        let s = InputSnapshot::new(Vec2::new(f32::NAN, f32::INFINITY), ActionSet::EMPTY);
        assert_eq!(s.axis, Vec2::ZERO);
    }

    #[test]
    fn edge_detection_diffs_against_previous() {
        let prev = InputSnapshot::IDLE;
        let now = InputSnapshot::new(Vec2::ZERO, ActionSet::EMPTY.with(Action::Fire));

        assert!(now.pressed_since(&prev, Action::Fire));
        assert!(!now.pressed_since(&now, Action::Fire), "held is not pressed");
        assert!(prev.released_since(&now, Action::Fire));
        assert!(!now.pressed_since(&prev, Action::Pause));
    }

    #[test]
    fn action_set_round_trips_bits() {
        let set = ActionSet::EMPTY.with(Action::Confirm).with(Action::Back);
        assert_eq!(ActionSet::from_bits(set.bits()), set);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Action::Confirm, Action::Back]
        );
        assert_eq!(ActionSet::from_bits(0xF0), ActionSet::EMPTY);
    }

    #[test]
    fn remove_clears_only_that_action() {
        let mut set = ActionSet::EMPTY.with(Action::Fire).with(Action::Pause);
        set.remove(Action::Fire);
        assert!(!set.contains(Action::Fire));
        assert!(set.contains(Action::Pause));
    }
}
