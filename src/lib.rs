//! Zenos - top-down arcade action game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, combat, mob AI)
//! - `config`: Static map/player definitions loaded once before a session
//! - `input`: Debounced action buffer between raw key events and the simulation
//! - `settings`: Runtime settings for the headless runner

pub mod config;
pub mod error;
pub mod input;
pub mod settings;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, SettingsError, SimError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default simulation rate (one pass per display refresh)
    pub const TICK_HZ: u32 = 60;
    /// Match timer / damage-over-time period
    pub const CLOCK_PERIOD_MS: u64 = 1000;
    /// Every Nth remaining second drains life from the player
    pub const DRAIN_EVERY_SECS: u32 = 5;
    /// Life lost per drain
    pub const DRAIN_AMOUNT: i32 = 1;
    /// Key events closer than this collapse into the latest one
    pub const INPUT_DEBOUNCE_MS: u64 = 30;

    /// Defense scalar when an entity does not set one (lower = tougher)
    pub const DAMAGE_TAKEN_FACTOR: i32 = 50;
    /// Cooldown between two damaging hits from the same attacker
    pub const TIME_BETWEEN_HITS_MS: u64 = 450;
    /// Divisor applied to damage absorbed by a shield
    pub const SHIELD_REDUCE_FACTOR: f32 = 2.0;
    /// Blocks a durable shield absorbs before losing a charge
    pub const SHIELD_BREAK_AMOUNT: u32 = 5;
    /// Delay before a mob re-raises its shield after it dropped
    pub const SHIELD_UP_DELAY_MS: u64 = 3000;

    /// Radius at which mobs notice the player
    pub const AGGRO_RANGE: f32 = 200.0;
    /// Aggro range gained by a mob each time it takes damage
    pub const AGGRO_RANGE_INCREMENT: f32 = 100.0;
    /// Per-axis speed of a chasing mob whose patrol velocity was zero
    pub const CHASE_SPEED: f32 = 1.0;

    /// Projectile speed when a weapon does not set one
    pub const SHOOT_SPEED: f32 = 15.0;
    /// Minimum delay between two mob shots
    pub const SHOOT_CADENCE_MS: u64 = 450;
    /// Shots fired in a burst before a mob pauses
    pub const HIT_PAUSE_TRIGGER: u32 = 5;
    /// Length of the pause after a burst
    pub const HIT_PAUSE_WAIT_MS: u64 = 6000;
    /// Upper bound of the random gap between projectile ids
    pub const PROJECTILE_ID_SPREAD: u32 = 16;
    /// Gap left between a shooter and its fresh projectile
    pub const SPAWN_CLEARANCE: f32 = 1.0;
}

/// Round half away from negative infinity, matching integer pixel math
/// (`-2.5` rounds to `-2`, `2.5` rounds to `3`).
#[inline]
pub fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// Uniform integer in `[min, max]`, both ends included.
///
/// Bounds are swapped when given in reverse so callers can pass
/// `(half, full)` pairs for negative values without special casing.
#[inline]
pub fn random_int_inclusive<R: rand::Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(lo..=hi)
}
