//! Read-only surfaces for the host: render list and HUD status

use std::fmt;

use glam::Vec2;
use serde::Serialize;

use super::entity::{Ammo, Entity, EntityId, Facing, PLAYER_ID, Shape, Style};
use super::state::GameSession;
use crate::config::Fill;

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub id: EntityId,
    pub shape: Shape,
    pub pos: Vec2,
    pub facing: Option<Facing>,
    pub style: Style,
    pub taking_damage: bool,
    pub shooting: bool,
    pub shield_up: bool,
    pub is_player: bool,
}

impl Sprite {
    fn of(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            shape: entity.shape,
            pos: entity.pos,
            facing: entity.facing,
            style: entity.style.clone(),
            taking_damage: entity.flags.taking_damage,
            shooting: entity.flags.shooting,
            shield_up: entity.shield_up(),
            is_player: entity.id == PLAYER_ID,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderView {
    pub bounds: Vec2,
    pub border: f32,
    pub fill: Option<Fill>,
    pub outline: Option<Fill>,
    /// Map elements in list order, player last
    pub sprites: Vec<Sprite>,
    pub over: bool,
}

/// Ammunition as shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AmmoStatus {
    None,
    Infinite,
    Count(u32),
}

impl fmt::Display for AmmoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmmoStatus::None => f.write_str("-"),
            AmmoStatus::Infinite => f.write_str("inf"),
            AmmoStatus::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Player HUD fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub name: String,
    pub life: i32,
    pub ammo: AmmoStatus,
    pub shield_charges: u32,
    /// Velocity magnitude
    pub speed: f32,
    /// Seconds left on the match timer
    pub time_remaining: u32,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | life {} | ammo {} | shield {} | {} | {}",
            self.name,
            self.life,
            self.ammo,
            self.shield_charges,
            format_speed(self.speed),
            format_clock(self.time_remaining)
        )
    }
}

/// `mm:ss`, minutes wrapping at the hour
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", (seconds / 60) % 60, seconds % 60)
}

/// Speed with one decimal and a decimal comma, e.g. `"1,4 m/s"`
pub fn format_speed(speed: f32) -> String {
    let rounded = (speed * 10.0 + 0.5).floor() / 10.0;
    format!("{rounded:.1} m/s").replace('.', ",")
}

impl GameSession {
    pub fn status(&self) -> StatusSnapshot {
        let player = &self.player;
        let ammo = match player.skills.weapon.as_ref().map(|w| w.ammo) {
            None => AmmoStatus::None,
            Some(Ammo::Infinite) => AmmoStatus::Infinite,
            Some(Ammo::Finite(n)) => AmmoStatus::Count(n),
        };
        StatusSnapshot {
            name: player.name.clone().unwrap_or_default(),
            life: player.life.unwrap_or(0),
            ammo,
            shield_charges: player.skills.shield.as_ref().map_or(0, |s| s.charges),
            speed: player.velocity().length(),
            time_remaining: self.map.timer,
        }
    }

    /// Drawable state of every surviving entity
    pub fn render_view(&self) -> RenderView {
        let sprites = self
            .map
            .elements
            .iter()
            .filter(|e| !e.is_gone())
            .chain(std::iter::once(&self.player))
            .map(Sprite::of)
            .collect();
        RenderView {
            bounds: self.map.bounds,
            border: self.map.border,
            fill: self.map.fill.clone(),
            outline: self.map.outline.clone(),
            sprites,
            over: self.is_over(),
        }
    }
}
