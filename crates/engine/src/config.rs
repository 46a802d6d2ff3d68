//! Engine configuration.
//!
//! Environment variables:
//!
//! - `GRID_ARCADE_MAX_FRAMES`: frame cap per action (1..=1000, default 1000)
//! - `GRID_ARCADE_BACKGROUND`: default camera background (0..=15, default 5)
//! - `GRID_ARCADE_LETTERBOX`: default camera letterbox (0..=15, default 5)

use std::str::FromStr;

use log::warn;

use crate::types::{DEFAULT_BACKGROUND, DEFAULT_LETTERBOX, MAX_COLOR, MAX_FRAMES_PER_ACTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_frames_per_action: usize,
    pub background: u8,
    pub letterbox: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_frames_per_action: MAX_FRAMES_PER_ACTION,
            background: DEFAULT_BACKGROUND,
            letterbox: DEFAULT_LETTERBOX,
        }
    }
}

fn parse_var<T, F>(lookup: &impl Fn(&str) -> Option<String>, key: &str, valid: F) -> Option<T>
where
    T: FromStr,
    F: Fn(&T) -> bool,
{
    let raw = lookup(key)?;
    let parsed = raw.trim().parse::<T>().ok().filter(|v| valid(v));
    if parsed.is_none() {
        warn!("ignoring invalid {key}={raw:?}, keeping the default");
    }
    parsed
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let is_color = |c: &u8| *c <= MAX_COLOR as u8;

        let max_frames_per_action = parse_var(&lookup, "GRID_ARCADE_MAX_FRAMES", |n: &usize| {
            (1..=MAX_FRAMES_PER_ACTION).contains(n)
        })
        .unwrap_or(defaults.max_frames_per_action);
        let background = parse_var(&lookup, "GRID_ARCADE_BACKGROUND", is_color)
            .unwrap_or(defaults.background);
        let letterbox =
            parse_var(&lookup, "GRID_ARCADE_LETTERBOX", is_color).unwrap_or(defaults.letterbox);

        Self {
            max_frames_per_action,
            background,
            letterbox,
        }
    }

    /// Frame cap actually applied; never above 1000 and never 0
    pub fn frame_cap(&self) -> usize {
        self.max_frames_per_action.clamp(1, MAX_FRAMES_PER_ACTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_lookup(|_| None);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.max_frames_per_action, 1000);
        assert_eq!(config.background, 5);
        assert_eq!(config.letterbox, 5);
    }

    #[test]
    fn test_reads_valid_values() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("GRID_ARCADE_MAX_FRAMES", "50"),
            ("GRID_ARCADE_BACKGROUND", "0"),
            ("GRID_ARCADE_LETTERBOX", " 15 "),
        ]));
        assert_eq!(config.max_frames_per_action, 50);
        assert_eq!(config.background, 0);
        assert_eq!(config.letterbox, 15);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("GRID_ARCADE_MAX_FRAMES", "5000"),
            ("GRID_ARCADE_BACKGROUND", "16"),
            ("GRID_ARCADE_LETTERBOX", "red"),
        ]));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_frame_cap_never_exceeds_limit() {
        let config = EngineConfig {
            max_frames_per_action: 10_000,
            ..EngineConfig::default()
        };
        assert_eq!(config.frame_cap(), 1000);
        let config = EngineConfig {
            max_frames_per_action: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.frame_cap(), 1);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = EngineConfig::from_env();
    }
}
