use arcade_types::{Action, ActionSet, InputSnapshot};

/// Turns held actions into press edges across frames.
///
/// The first snapshot after a [`reset`](Edges::reset) only primes the
/// detector, so a key still held from the previous screen does not fire
/// again on the next one.
#[derive(Debug, Default, Clone)]
pub struct Edges {
    prev: Option<InputSnapshot>,
}

impl Edges {
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Actions held now that were not held in the previous snapshot.
    pub fn pressed(&mut self, input: &InputSnapshot) -> ActionSet {
        let prev = self.prev.replace(*input).unwrap_or(*input);
        let mut set = ActionSet::EMPTY;
        for action in Action::ALL {
            if input.pressed_since(&prev, action) {
                set.insert(action);
            }
        }
        set
    }
}
