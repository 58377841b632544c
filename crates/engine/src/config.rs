//! Loop configuration.

use std::time::Duration;

use crate::types::{DEFAULT_MAX_DELTA_SECS, TARGET_FPS};

/// Who keeps the loop at the target frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// The loop sleeps away the rest of each frame budget.
    Sleep,
    /// The backend blocks in `present` (vsync or similar); the loop never sleeps.
    Backend,
}

impl Pacing {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sleep" => Some(Pacing::Sleep),
            "backend" | "vsync" => Some(Pacing::Backend),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    /// Frame-rate cap; `0` disables the cap.
    pub target_fps: u32,
    /// Clamp for a single frame's delta, in seconds.
    pub max_delta_secs: f32,
    pub pacing: Pacing,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            max_delta_secs: DEFAULT_MAX_DELTA_SECS,
            pacing: Pacing::Sleep,
        }
    }
}

impl LoopConfig {
    /// Read configuration from the process environment.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let target_fps = lookup("ARCADE_TARGET_FPS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.target_fps);

        let max_delta_secs = lookup("ARCADE_MAX_DELTA_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .map(|ms| ms as f32 / 1000.0)
            .unwrap_or(defaults.max_delta_secs);

        let pacing = lookup("ARCADE_PACING")
            .and_then(|s| Pacing::from_str(&s))
            .unwrap_or(defaults.pacing);

        Self {
            target_fps,
            max_delta_secs,
            pacing,
        }
    }

    /// Wall-clock time one frame may take at the target rate.
    ///
    /// Zero when uncapped.
    pub fn frame_budget(&self) -> Duration {
        if self.target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / u64::from(self.target_fps))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = LoopConfig::from_lookup(|_| None);
        assert_eq!(cfg, LoopConfig::default());
        assert_eq!(cfg.target_fps, 60);
        assert_eq!(cfg.pacing, Pacing::Sleep);
    }

    #[test]
    fn reads_overrides() {
        let cfg = LoopConfig::from_lookup(lookup_from(&[
            ("ARCADE_TARGET_FPS", "30"),
            ("ARCADE_MAX_DELTA_MS", "100"),
            ("ARCADE_PACING", "Backend"),
        ]));
        assert_eq!(cfg.target_fps, 30);
        assert!((cfg.max_delta_secs - 0.1).abs() < 1e-6);
        assert_eq!(cfg.pacing, Pacing::Backend);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = LoopConfig::from_lookup(lookup_from(&[
            ("ARCADE_TARGET_FPS", "fast"),
            ("ARCADE_MAX_DELTA_MS", "0"),
            ("ARCADE_PACING", "whenever"),
        ]));
        assert_eq!(cfg, LoopConfig::default());
    }

    #[test]
    fn frame_budget_matches_rate() {
        let cfg = LoopConfig {
            target_fps: 50,
            ..LoopConfig::default()
        };
        assert_eq!(cfg.frame_budget(), Duration::from_millis(20));

        let uncapped = LoopConfig {
            target_fps: 0,
            ..LoopConfig::default()
        };
        assert_eq!(uncapped.frame_budget(), Duration::ZERO);
    }
}
