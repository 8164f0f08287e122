//! Session state and lifecycle
//!
//! Everything a running match needs lives in one [`GameSession`] owned by
//! the caller: map, player, RNG, clocks and the pending event log. Nothing is
//! global, so two sessions with the same seed and inputs replay identically.

use std::sync::Arc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::IntervalTimer;
use super::combat::HitReport;
use super::entity::{Entity, EntityId, PLAYER_ID};
use super::tick::{TickInput, tick};
use crate::config::{CombatDefaults, Fill, GameConfig};
use crate::consts::*;
use crate::error::{ConfigError, SimError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player life reached zero; only a restart is accepted
    GameOver,
}

/// Runtime map: bounds, border and the ordered element list.
///
/// The player is not an element; it takes part in the same collision math
/// as an extra entity.
#[derive(Debug, Clone)]
pub struct MapState {
    pub bounds: Vec2,
    pub border: f32,
    /// Seconds left in the match
    pub timer: u32,
    pub fill: Option<Fill>,
    pub outline: Option<Fill>,
    pub elements: Vec<Entity>,
}

impl MapState {
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Drop tombstoned and dead elements, returning their ids in list order
    pub fn compact(&mut self) -> Vec<EntityId> {
        let mut removed = Vec::new();
        self.elements.retain(|e| {
            if e.is_gone() {
                removed.push(e.id);
                false
            } else {
                true
            }
        });
        removed
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A collision changed an entity's life
    Hit(HitReport),
    /// Timed life loss from the match clock
    Drain { target: EntityId, amount: i32, life_after: i32 },
    Removed { id: EntityId },
    Shot { shooter: EntityId, projectile: EntityId },
    ShieldBroken { id: EntityId, charges_left: u32 },
    Aggro { id: EntityId, origin: bool },
    Calm { id: EntityId },
    GameOver { tick: u64 },
    Restarted { seed: u64 },
}

/// A running match
#[derive(Debug, Clone)]
pub struct GameSession {
    config: Arc<GameConfig>,
    /// Seed this match was started with
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub map: MapState,
    pub player: Entity,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Timestamp of the tick being (or last) simulated
    pub now_ms: u64,
    pub(crate) last_issued_id: EntityId,
    pub(crate) clock: IntervalTimer,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a match from a validated config
    pub fn new(config: Arc<GameConfig>, seed: u64) -> Result<Self, ConfigError> {
        let world = config.build_world()?;
        log::info!(
            "Session started with seed {seed}: {} elements, timer {}s",
            world.map.elements.len(),
            world.map.timer
        );
        Ok(Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            map: world.map,
            player: world.player,
            time_ticks: 0,
            now_ms: 0,
            last_issued_id: PLAYER_ID,
            clock: IntervalTimer::new(CLOCK_PERIOD_MS),
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub(crate) fn config_handle(&self) -> Arc<GameConfig> {
        Arc::clone(&self.config)
    }

    pub fn defaults(&self) -> &CombatDefaults {
        &self.config.defaults
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Look up the player or a map element
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id == PLAYER_ID {
            Some(&self.player)
        } else {
            self.map.get(id)
        }
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// End the match now
    pub fn end(&mut self) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {} ({}s left)",
            self.time_ticks,
            self.map.timer
        );
        self.push_event(GameEvent::GameOver {
            tick: self.time_ticks,
        });
    }

    /// Start a fresh match from the same config. Only honored once the
    /// current match is over; returns whether a restart happened.
    pub fn restart(&mut self) -> Result<bool, ConfigError> {
        if !self.is_over() {
            return Ok(false);
        }
        let seed: u64 = self.rng.random();
        let mut fresh = Self::new(self.config_handle(), seed)?;
        fresh.now_ms = self.now_ms;
        fresh.events = std::mem::take(&mut self.events);
        fresh.push_event(GameEvent::Restarted { seed });
        *self = fresh;
        log::info!("Session restarted with seed {seed}");
        Ok(true)
    }

    /// Apply whole seconds elapsed on the match clock
    pub(crate) fn on_second(&mut self) {
        if self.map.timer == 0 {
            return;
        }
        self.map.timer -= 1;

        let life = self.player.life.unwrap_or(0);
        let amount = if self.map.timer == 0 {
            life
        } else if self.map.timer % DRAIN_EVERY_SECS == 0 && self.player.life.is_some() {
            DRAIN_AMOUNT
        } else {
            return;
        };

        let life_after = (life - amount).max(0);
        self.player.life = Some(life_after);
        log::debug!(
            "Timed drain of {amount} at {}s left, life {life_after}",
            self.map.timer
        );
        self.push_event(GameEvent::Drain {
            target: PLAYER_ID,
            amount,
            life_after,
        });
    }

    /// Run one tick, rolling back to the pre-tick state on a fault.
    ///
    /// A fault leaves the session as it was before the call, minus any
    /// element whose state was already non-finite, so the next call starts
    /// clean.
    pub fn advance(&mut self, input: &TickInput) -> Result<(), SimError> {
        let snapshot = self.clone();
        tick(self, input);
        let Err(err) = self.validate() else {
            return Ok(());
        };
        log::error!("Tick {} rolled back: {err}", snapshot.time_ticks);
        *self = snapshot;
        self.quarantine();
        Err(err)
    }

    /// Check that every entity has finite position and velocity
    pub fn validate(&self) -> Result<(), SimError> {
        let bad = std::iter::once(&self.player)
            .chain(self.map.elements.iter())
            .find(|e| !is_finite(e));
        match bad {
            Some(e) => Err(SimError::NonFinite {
                id: e.id,
                tick: self.time_ticks,
            }),
            None => Ok(()),
        }
    }

    fn quarantine(&mut self) {
        for element in self.map.elements.iter_mut().filter(|e| !is_finite(e)) {
            log::warn!("Dropping element {} with non-finite state", element.id);
            element.despawn();
        }
        for id in self.map.compact() {
            self.events.push(GameEvent::Removed { id });
        }
    }
}

fn is_finite(e: &Entity) -> bool {
    e.pos.is_finite() && e.velocity().is_finite()
}
