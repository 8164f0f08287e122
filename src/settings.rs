//! Runner settings
//!
//! Defaults, then `ZENOS_*` environment variables, then command-line flags.
//! Game content lives in [`crate::config`]; these only steer the host loop.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{INPUT_DEBOUNCE_MS, TICK_HZ};
use crate::error::SettingsError;

const DEFAULT_SEED: u64 = 0x5EED_2E05;
/// Ten simulated minutes at the default rate
const DEFAULT_MAX_TICKS: u64 = 36_000;

/// Settings for the headless runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// RNG seed of the first match
    pub seed: u64,
    /// Simulation rate; each tick advances the injected clock by `1000 / tick_hz` ms
    pub tick_hz: u32,
    /// Key debounce window
    pub debounce_ms: u64,
    /// Stop after this many ticks even if the match is still running
    pub max_ticks: u64,
    /// Level file; the built-in arena when unset
    pub config_path: Option<PathBuf>,
    /// Raise the default log filter to debug
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tick_hz: TICK_HZ,
            debounce_ms: INPUT_DEBOUNCE_MS,
            max_ticks: DEFAULT_MAX_TICKS,
            config_path: None,
            verbose: false,
        }
    }
}

impl Settings {
    /// Defaults overridden by `ZENOS_SEED`, `ZENOS_TICK_HZ` and
    /// `ZENOS_DEBOUNCE_MS`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            seed: read_env(&lookup, "ZENOS_SEED").unwrap_or(defaults.seed),
            tick_hz: read_env(&lookup, "ZENOS_TICK_HZ")
                .filter(|&hz: &u32| hz > 0)
                .unwrap_or(defaults.tick_hz),
            debounce_ms: read_env(&lookup, "ZENOS_DEBOUNCE_MS").unwrap_or(defaults.debounce_ms),
            ..defaults
        }
    }

    /// Apply command-line flags (program name already stripped)
    pub fn apply_args<I>(&mut self, args: I) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            match flag.as_str() {
                "-v" | "--verbose" => self.verbose = true,
                "--seed" => self.seed = parse_value(&flag, args.next())?,
                "--tick-hz" => {
                    self.tick_hz = parse_value(&flag, args.next())?;
                    if self.tick_hz == 0 {
                        return Err(SettingsError::InvalidValue {
                            flag,
                            value: "0".into(),
                        });
                    }
                }
                "--debounce-ms" => self.debounce_ms = parse_value(&flag, args.next())?,
                "--max-ticks" => self.max_ticks = parse_value(&flag, args.next())?,
                "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| SettingsError::MissingValue(flag.clone()))?;
                    self.config_path = Some(PathBuf::from(path));
                }
                _ => return Err(SettingsError::UnknownArg(flag)),
            }
        }
        Ok(())
    }

    /// Milliseconds of injected time per tick
    pub fn tick_ms(&self) -> u64 {
        (1000 / u64::from(self.tick_hz.max(1))).max(1)
    }
}

fn read_env<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|val| val.trim().parse().ok())
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> Result<T, SettingsError> {
    let value = value.ok_or_else(|| SettingsError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| SettingsError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}
