use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use ant_trail_system_playback::{Config as PlaybackConfig, DEFAULT_STEP_INTERVAL};
use serde::Deserialize;

/// Settings read from the optional `--config` TOML file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Animation cadence used by `run --animate`.
    pub(crate) playback: PlaybackSettings,
    /// Board size limits enforced when loading assignments.
    pub(crate) limits: AssignmentLimits,
}

impl CliConfig {
    /// Loads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;
        config.limits.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlaybackSettings {
    step_interval_ms: u64,
}

impl PlaybackSettings {
    /// Builds the playback configuration, optionally overriding the cadence.
    pub(crate) fn playback_config(&self, override_ms: Option<u64>) -> PlaybackConfig {
        let millis = override_ms.unwrap_or(self.step_interval_ms);
        PlaybackConfig::new(Duration::from_millis(millis))
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            step_interval_ms: u64::try_from(DEFAULT_STEP_INTERVAL.as_millis()).unwrap_or(500),
        }
    }
}

/// Inclusive bounds on the board sizes an assignment may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AssignmentLimits {
    min_width: u32,
    max_width: u32,
    min_height: u32,
    max_height: u32,
    max_iterations: u32,
}

impl AssignmentLimits {
    fn validate(&self) -> Result<()> {
        if self.min_width == 0 || self.min_height == 0 {
            bail!("minimum board dimensions must be positive");
        }
        if self.max_iterations == 0 {
            bail!("max_iterations must allow at least one iteration");
        }
        if self.min_width > self.max_width || self.min_height > self.max_height {
            bail!(
                "board limits are inverted: width {}..={}, height {}..={}",
                self.min_width,
                self.max_width,
                self.min_height,
                self.max_height
            );
        }
        Ok(())
    }

    /// Largest iteration count a repeat block may request.
    pub(crate) const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Fails when the board dimensions fall outside the configured bounds.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<()> {
        if !(self.min_width..=self.max_width).contains(&width) {
            bail!(
                "board width {width} is outside the allowed range {}..={}",
                self.min_width,
                self.max_width
            );
        }
        if !(self.min_height..=self.max_height).contains(&height) {
            bail!(
                "board height {height} is outside the allowed range {}..={}",
                self.min_height,
                self.max_height
            );
        }
        Ok(())
    }
}

impl Default for AssignmentLimits {
    fn default() -> Self {
        Self {
            min_width: 1,
            max_width: 32,
            min_height: 1,
            max_height: 32,
            max_iterations: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = CliConfig::parse("").expect("empty config parses");
        assert_eq!(config, CliConfig::default());
        assert_eq!(
            config.playback.playback_config(None).step_interval(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = CliConfig::parse(
            "[playback]\nstep_interval_ms = 120\n\n[limits]\nmax_width = 8\n",
        )
        .expect("config parses");
        assert_eq!(
            config.playback.playback_config(None).step_interval(),
            Duration::from_millis(120)
        );
        assert_eq!(
            config.playback.playback_config(Some(0)).step_interval(),
            Duration::ZERO
        );
        assert!(config.limits.check(8, 32).is_ok());
        assert!(config.limits.check(9, 1).is_err());
        assert_eq!(config.limits.max_iterations(), 100);
    }

    #[test]
    fn unknown_keys_and_inverted_limits_are_rejected() {
        assert!(CliConfig::parse("[playback]\nspeed = 3\n").is_err());
        assert!(CliConfig::parse("[limits]\nmin_height = 10\nmax_height = 4\n").is_err());
        assert!(CliConfig::parse("[limits]\nmax_iterations = 0\n").is_err());
    }
}
