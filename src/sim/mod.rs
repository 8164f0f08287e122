//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected timestamps only, never the system clock
//! - Seeded RNG only
//! - Stable iteration order (map element list order)
//! - No rendering or platform dependencies

pub mod aggro;
pub mod clock;
pub mod collision;
pub mod combat;
pub mod entity;
pub mod movement;
pub mod player;
pub mod response;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod view;

pub use clock::IntervalTimer;
pub use collision::{Contact, PairReport, Sweep, border_bounce, detect, sweep_pair};
pub use combat::{HitReport, apply_hit, exchange};
pub use entity::{
    Aggro, Ammo, Axis, BehaviorType, Entity, EntityId, Facing, Flags, Hit, HitPause, PLAYER_ID,
    RangeLimit, Shape, Shield, Skills, Step, Style, Weapon,
};
pub use response::{Outcome, VelocityEffect, resolve};
pub use spawn::Aim;
pub use state::{GameEvent, GamePhase, GameSession, MapState};
pub use tick::{TickInput, tick};
pub use view::{AmmoStatus, RenderView, Sprite, StatusSnapshot, format_clock, format_speed};
