//! Static level and player definitions
//!
//! Loaded once before a session starts and treated as read-only seed data.
//! Every definition is validated while the world is built, so malformed
//! entities fail here instead of mid-simulation.

pub mod defaults;
pub mod entity;
pub mod fill;

use std::collections::HashSet;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use defaults::CombatDefaults;
pub use entity::{BuildContext, EntityConfig};
pub use fill::{ColorStop, Fill, FillTable, Repeat};

use crate::error::ConfigError;
use crate::sim::{Entity, MapState, PLAYER_ID};

/// Built-in arena level and its player
const PRESET_ARENA: &str = include_str!("../../assets/arena.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartKeyword {
    Mid,
}

/// Player start coordinate: `"mid"` or an absolute pixel value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StartCoord {
    Keyword(StartKeyword),
    At(f32),
}

impl Default for StartCoord {
    fn default() -> Self {
        StartCoord::At(0.0)
    }
}

impl StartCoord {
    fn resolve(self, bound: f32) -> f32 {
        match self {
            StartCoord::Keyword(StartKeyword::Mid) => bound / 2.0,
            StartCoord::At(v) if v.is_finite() => v,
            StartCoord::At(_) => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartPoint {
    #[serde(default)]
    pub start_point_x: StartCoord,
    #[serde(default)]
    pub start_point_y: StartCoord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStyleConfig {
    pub fill_style: Option<String>,
    pub outline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// Match length in seconds
    pub timer: u32,
    #[serde(alias = "baseLineWidth")]
    pub border_thickness: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub style: MapStyleConfig,
    #[serde(default)]
    pub players: StartPoint,
    #[serde(default)]
    pub elements: Vec<EntityConfig>,
}

/// A complete level: map, player and combat defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub map: MapConfig,
    pub player: EntityConfig,
    #[serde(default)]
    pub defaults: CombatDefaults,
    #[serde(default)]
    pub fills: FillTable,
}

/// Runtime world built from a config
#[derive(Debug, Clone)]
pub struct World {
    pub map: MapState,
    pub player: Entity,
}

impl GameConfig {
    /// Parse and validate a JSON level
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.build_world()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded level from {} ({} elements)",
            path.display(),
            config.map.elements.len()
        );
        Ok(config)
    }

    /// The built-in arena level
    pub fn preset() -> Result<Self, ConfigError> {
        Self::from_json(PRESET_ARENA)
    }

    /// Build fresh runtime entities from this config
    pub fn build_world(&self) -> Result<World, ConfigError> {
        let map_cfg = &self.map;
        if !(map_cfg.width > 0.0 && map_cfg.height > 0.0) {
            return Err(ConfigError::EmptyBounds {
                width: map_cfg.width,
                height: map_cfg.height,
            });
        }
        let ctx = BuildContext {
            defaults: &self.defaults,
            fills: &self.fills,
        };

        let mut seen = HashSet::new();
        let mut next_free = map_cfg
            .elements
            .iter()
            .filter_map(|e| e.id)
            .max()
            .unwrap_or(PLAYER_ID);
        let mut elements = Vec::with_capacity(map_cfg.elements.len());
        for cfg in &map_cfg.elements {
            let id = match cfg.id {
                Some(id) => id,
                None => {
                    next_free += 1;
                    next_free
                }
            };
            if id == PLAYER_ID {
                return Err(ConfigError::ReservedId(id));
            }
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateId(id));
            }
            elements.push(cfg.build(id, &ctx)?);
        }

        let bounds = Vec2::new(map_cfg.width, map_cfg.height);
        let mut player = self.player.build(PLAYER_ID, &ctx)?;
        player.pos += Vec2::new(
            map_cfg.players.start_point_x.resolve(bounds.x),
            map_cfg.players.start_point_y.resolve(bounds.y),
        );

        let map = MapState {
            bounds,
            border: map_cfg.border_thickness.max(0.0),
            timer: map_cfg.timer,
            fill: map_cfg.style.fill_style.as_deref().map(|raw| self.fills.resolve(raw)),
            outline: map_cfg.style.outline.as_deref().map(|raw| self.fills.resolve(raw)),
            elements,
        };
        Ok(World { map, player })
    }
}
