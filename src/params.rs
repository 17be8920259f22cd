/*
 * Effect Parameters Module
 *
 * This module defines the EffectParams struct that contains the adjustable
 * parameters of the glass effect. They start from defaults, can be overridden
 * from the environment at startup, and can be modified through the UI.
 * It also tracks the shard size between UI passes so the app knows when the
 * shard grid must be rebuilt.
 *
 * Environment overrides:
 * - SHATTER_SHARD_SIZE: shard edge length in pixels
 * - SHATTER_TRANSITION_SECS: duration of a screen transition
 * - SHATTER_IMAGE: image file used as the snapshot instead of the procedural screen
 */

use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::transition::DEFAULT_TRANSITION_SECS;
use crate::DEFAULT_SHARD_SIZE;

// Parameters for the effect that can be adjusted via UI
pub struct EffectParams {
    pub shard_size: f32,
    pub transition_secs: f32,
    pub show_debug: bool,
    pub image_path: Option<PathBuf>,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
struct ParamSnapshot {
    shard_size: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            shard_size: DEFAULT_SHARD_SIZE,
            transition_secs: DEFAULT_TRANSITION_SECS,
            show_debug: false,
            image_path: None,
            previous_values: None,
        }
    }
}

impl EffectParams {
    // Defaults with any SHATTER_* environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    // Apply overrides from any key lookup; invalid values are logged and skipped
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(size) = parse_in_range(&lookup, "SHATTER_SHARD_SIZE", Self::get_shard_size_range()) {
            self.shard_size = size;
        }
        if let Some(secs) =
            parse_in_range(&lookup, "SHATTER_TRANSITION_SECS", Self::get_transition_secs_range())
        {
            self.transition_secs = secs;
        }
        if let Some(path) = lookup("SHATTER_IMAGE").filter(|p| !p.trim().is_empty()) {
            self.image_path = Some(PathBuf::from(path));
        }
        self
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            shard_size: self.shard_size,
        });
    }

    // Whether the shard size moved since the last snapshot, which means the grid must be rebuilt
    pub fn shard_size_changed(&self) -> bool {
        // If we don't have previous values, nothing has changed
        match &self.previous_values {
            Some(prev) => self.shard_size != prev.shard_size,
            None => false,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_shard_size_range() -> std::ops::RangeInclusive<f32> {
        1.0..=32.0
    }

    pub fn get_transition_secs_range() -> std::ops::RangeInclusive<f32> {
        0.2..=5.0
    }
}

fn parse_in_range<F, T>(lookup: &F, key: &str, range: std::ops::RangeInclusive<T>) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + std::fmt::Display + Copy,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if range.contains(&value) => Some(value),
        Ok(value) => {
            warn!(
                "{} = {} is outside {}..={}, ignoring",
                key,
                value,
                range.start(),
                range.end()
            );
            None
        }
        Err(_) => {
            warn!("{} = {:?} is not a number, ignoring", key, raw);
            None
        }
    }
}
