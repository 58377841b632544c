//! Held-key tracking and snapshot normalisation.
//!
//! Terminals differ in what they report. Some (with keyboard enhancement)
//! send press / repeat / release; most only send press and auto-repeat
//! presses. The tracker handles both: a release clears the key immediately,
//! and a key that has not been re-reported within the release timeout is
//! treated as released.
//!
//! Keys are tracked individually, so releasing one alias of an intent (say
//! `Left`) leaves it held while another (`a`) is still down.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;
use tracing::debug;

use crate::map::{key_intent, Intent};
use crate::types::{ActionSet, InputSnapshot, Vec2, KEY_RELEASE_TIMEOUT_MS};

const MAX_HELD: usize = 16;

#[derive(Debug, Clone, Copy)]
struct Held {
    key: KeyCode,
    intent: Intent,
    last_seen: Instant,
}

/// Shifted and unshifted letters are the same physical key.
fn physical(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

/// Tracks which keys, and so which intents, are currently held.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: ArrayVec<Held, MAX_HELD>,
    release_timeout: Option<Duration>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            release_timeout: Some(Duration::from_millis(KEY_RELEASE_TIMEOUT_MS as u64)),
        }
    }

    /// Override the auto-release timeout. `None` disables auto-release, for
    /// terminals that report real key releases.
    pub fn with_release_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.release_timeout = timeout;
        self
    }

    pub fn release_timeout(&self) -> Option<Duration> {
        self.release_timeout
    }

    /// Record a press (or auto-repeat) of `code` at `now`.
    ///
    /// Returns the intent the key maps to, if any.
    pub fn press(&mut self, code: KeyCode, now: Instant) -> Option<Intent> {
        let intent = key_intent(code)?;
        let key = physical(code);
        if let Some(h) = self.held.iter_mut().find(|h| h.key == key) {
            h.last_seen = now;
        } else if self
            .held
            .try_push(Held {
                key,
                intent,
                last_seen: now,
            })
            .is_err()
        {
            debug!(?code, held = MAX_HELD, "held-key table full; press dropped");
        }
        Some(intent)
    }

    /// Release one key. Its intent stays held while another key mapped to
    /// the same intent is still down.
    pub fn release(&mut self, code: KeyCode) {
        let key = physical(code);
        self.held.retain(|h| h.key != key);
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        self.held.iter().any(|h| h.intent == intent)
    }

    /// Expire stale keys and build the snapshot for this frame.
    ///
    /// Opposite directions cancel out; each axis is in [-1, 1].
    pub fn snapshot(&mut self, now: Instant) -> InputSnapshot {
        if let Some(timeout) = self.release_timeout {
            self.held
                .retain(|h| now.saturating_duration_since(h.last_seen) <= timeout);
        }

        // Aliases held together still count once per direction.
        let (mut left, mut right, mut up, mut down) = (false, false, false, false);
        let mut actions = ActionSet::EMPTY;
        for h in &self.held {
            match h.intent {
                Intent::Left => left = true,
                Intent::Right => right = true,
                Intent::Up => up = true,
                Intent::Down => down = true,
                Intent::Action(action) => actions.insert(action),
            }
        }
        let axis = Vec2::new(axis(left, right), axis(up, down));
        InputSnapshot::new(axis, actions)
    }

    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
