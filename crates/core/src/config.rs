// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Board configuration
//!
//! Reveal cadence and trade expiry are tunable per deployment; defaults
//! match the original presentation timings. Durations parse from
//! humantime strings ("750ms", "60s") in TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors loading a board configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Delays of one dice reveal cycle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTiming {
    /// Roll-intro animation before the value appears
    #[serde(with = "humantime_serde")]
    pub pre_roll: Duration,
    /// Gap between the value and its narrative label
    #[serde(with = "humantime_serde")]
    pub description_delay: Duration,
    /// How long the result stays on screen
    #[serde(with = "humantime_serde")]
    pub display: Duration,
    /// Gap after clearing the display
    #[serde(with = "humantime_serde")]
    pub clear_gap: Duration,
    /// Quiet period before the next queued entry starts
    #[serde(with = "humantime_serde")]
    pub settle: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            pre_roll: Duration::from_millis(750),
            description_delay: Duration::from_millis(500),
            display: Duration::from_millis(1500),
            clear_gap: Duration::from_millis(100),
            settle: Duration::from_millis(500),
        }
    }
}

impl RevealTiming {
    pub fn with_pre_roll(mut self, delay: Duration) -> Self {
        self.pre_roll = delay;
        self
    }

    pub fn with_description_delay(mut self, delay: Duration) -> Self {
        self.description_delay = delay;
        self
    }

    pub fn with_display(mut self, delay: Duration) -> Self {
        self.display = delay;
        self
    }

    pub fn with_clear_gap(mut self, delay: Duration) -> Self {
        self.clear_gap = delay;
        self
    }

    pub fn with_settle(mut self, delay: Duration) -> Self {
        self.settle = delay;
        self
    }

    /// Total wall time of one full cycle for an entry with a description
    pub fn full_cycle(&self) -> Duration {
        self.pre_roll + self.description_delay + self.display + self.clear_gap + self.settle
    }
}

/// Trade negotiation tunables
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeConfig {
    /// How long an offer stays open before expiring
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
    /// How often the engine sweeps for elapsed deadlines
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            sweep_interval: Duration::from_secs(1),
        }
    }
}

impl TradeConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Top-level board configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub trade: TradeConfig,
    #[serde(default)]
    pub reveal: RevealTiming,
}

impl BoardConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
