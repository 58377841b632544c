use std::cell::Cell;

/// Round results shared between the play screen and the screens that show
/// them.
#[derive(Debug, Default)]
pub struct Session {
    score: Cell<u32>,
    best: Cell<u32>,
    wave: Cell<usize>,
    abandoned: Cell<bool>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score.get()
    }

    pub fn best(&self) -> u32 {
        self.best.get()
    }

    /// Zero-based wave the current round is on.
    pub fn wave(&self) -> usize {
        self.wave.get()
    }

    pub fn add_points(&self, points: u32) {
        self.score.set(self.score.get().saturating_add(points));
    }

    pub fn set_wave(&self, wave: usize) {
        self.wave.set(wave);
    }

    pub fn start_round(&self) {
        self.score.set(0);
        self.wave.set(0);
        self.abandoned.set(false);
    }

    /// Record the final score; returns true on a new best.
    pub fn finish_round(&self) -> bool {
        let score = self.score.get();
        if score > self.best.get() {
            self.best.set(score);
            true
        } else {
            false
        }
    }

    /// Flag the running round as given up so the next play `enter` resets.
    pub fn abandon(&self) {
        self.abandoned.set(true);
    }

    pub fn take_abandoned(&self) -> bool {
        self.abandoned.replace(false)
    }
}
