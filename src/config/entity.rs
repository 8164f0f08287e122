//! Entity definitions as written in level files, and their validation into
//! runtime [`Entity`] values

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::defaults::CombatDefaults;
use super::fill::FillTable;
use crate::error::ConfigError;
use crate::round_half_up;
use crate::sim::{
    Aggro, Ammo, BehaviorType, Entity, EntityId, Facing, HitPause, RangeLimit, Shape, Shield,
    Skills, Step, Style, Weapon,
};

/// Velocity block of an entity definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepConfig {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub speed: Option<f32>,
    pub increment: Option<f32>,
    pub x_max: Option<f32>,
    pub y_max: Option<f32>,
    pub range_limit: Option<RangeLimit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitConfig {
    pub bonus_life_modifier: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldConfig {
    #[serde(default)]
    pub charges: u32,
    #[serde(alias = "reduceFactor")]
    pub shield_reduce_factor: Option<f32>,
    pub shield_break_amount: Option<u32>,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub up: bool,
    pub up_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootConfig {
    /// `-1` for infinite ammunition
    pub charges: i64,
    pub shoot_speed: Option<f32>,
    pub base_element: Box<EntityConfig>,
    pub cadence_ms: Option<u64>,
    /// `[max_hit_trigger, time_to_wait_ms]`
    pub hit_pause: Option<(u32, u64)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponConfig {
    pub shoot: Option<ShootConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsConfig {
    pub shield: Option<ShieldConfig>,
    pub weapon: Option<WeaponConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    pub body: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub color: ColorConfig,
}

/// One entity as written in a level or player file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityConfig {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub behavior: BehaviorType,
    pub radius: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub step: Option<StepConfig>,
    pub facing: Option<Facing>,
    pub life: Option<i32>,
    pub max_life: Option<i32>,
    pub damage_taken_factor: Option<f32>,
    pub hit_bonus: Option<f64>,
    pub hit: Option<HitConfig>,
    pub time_between_hits: Option<u64>,
    pub aggro_range: Option<f32>,
    pub aggro_group: Option<u32>,
    pub skills: Option<SkillsConfig>,
    pub style: Option<StyleConfig>,
}

/// Shared inputs for turning definitions into entities
pub struct BuildContext<'a> {
    pub defaults: &'a CombatDefaults,
    pub fills: &'a FillTable,
}

impl EntityConfig {
    /// Validate and convert into a runtime entity carrying `id`
    pub fn build(&self, id: EntityId, ctx: &BuildContext<'_>) -> Result<Entity, ConfigError> {
        let shape = self.shape(id)?;
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ConfigError::BadPosition { id });
        }
        let defaults = ctx.defaults;

        let mut entity = match shape {
            Shape::Circle { radius } => Entity::circle(id, self.x, self.y, radius, self.behavior),
            Shape::Rect { width, height } => {
                Entity::rect(id, self.x, self.y, width, height, self.behavior)
            }
        };
        entity.name = self.name.clone();
        entity.step = self.step.as_ref().map(StepConfig::build);
        entity.facing = self.facing;
        entity.life = self.life.map(|life| life.max(0));
        entity.max_life = self.max_life;
        entity.damage_taken_factor = match self.damage_taken_factor {
            Some(v) if v.is_finite() && v > 0.0 => round_half_up(v),
            _ => defaults.damage_taken_factor,
        };
        entity.hit_bonus = self.hit_bonus();
        entity.time_between_hits_ms = self
            .time_between_hits
            .unwrap_or(defaults.time_between_hits_ms);
        entity.aggro = self.aggro(defaults);
        entity.skills = self.skills(id, ctx)?;
        entity.style = self.style(ctx.fills);
        Ok(entity)
    }

    fn shape(&self, id: EntityId) -> Result<Shape, ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        match (self.radius, self.width, self.height) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                Err(ConfigError::ContradictoryShape { id })
            }
            (Some(radius), None, None) if positive(radius) => Ok(Shape::Circle { radius }),
            (None, Some(width), Some(height)) if positive(width) && positive(height) => {
                Ok(Shape::Rect { width, height })
            }
            (Some(_), None, None) | (None, Some(_), Some(_)) => {
                Err(ConfigError::BadDimensions { id })
            }
            (None, Some(_), None) | (None, None, Some(_)) => Err(ConfigError::IncompleteRect { id }),
            (None, None, None) => Err(ConfigError::MissingShape { id }),
        }
    }

    /// Bonus life modifier; `hit.bonusLifeModifier` wins over `hitBonus`,
    /// non-finite values read as 0
    fn hit_bonus(&self) -> i32 {
        let raw = self
            .hit
            .as_ref()
            .and_then(|h| h.bonus_life_modifier)
            .or(self.hit_bonus)
            .unwrap_or(0.0);
        if raw.is_finite() {
            round_half_up(raw as f32)
        } else {
            0
        }
    }

    fn aggro(&self, defaults: &CombatDefaults) -> Option<Aggro> {
        match self.aggro_range {
            Some(range) if range.is_finite() => Some(Aggro::new(range, self.aggro_group)),
            Some(_) => Some(Aggro::new(defaults.aggro_range, self.aggro_group)),
            None if self.behavior.is_mob() => {
                Some(Aggro::new(defaults.aggro_range, self.aggro_group))
            }
            None => None,
        }
    }

    fn skills(&self, id: EntityId, ctx: &BuildContext<'_>) -> Result<Skills, ConfigError> {
        let Some(skills) = self.skills.as_ref() else {
            return Ok(Skills::default());
        };
        let defaults = ctx.defaults;

        let shield = skills.shield.as_ref().map(|s| Shield {
            charges: s.charges,
            reduce_factor: defaults.reduce_factor_or_default(s.shield_reduce_factor.unwrap_or(0.0)),
            break_amount: s
                .shield_break_amount
                .filter(|&n| n > 0)
                .unwrap_or(defaults.shield_break_amount),
            durable: s.durable,
            up: s.up && s.charges > 0,
            up_delay_ms: s.up_delay_ms.unwrap_or(defaults.shield_up_delay_ms),
            blocked: 0,
            raise_at: 0,
        });

        let weapon = match skills.weapon.as_ref().and_then(|w| w.shoot.as_ref()) {
            Some(shoot) => {
                let template = shoot.base_element.build(0, ctx)?;
                if !matches!(template.shape, Shape::Circle { .. }) {
                    return Err(ConfigError::ProjectileShape { id });
                }
                let (max_hit_trigger, time_to_wait_ms) = shoot.hit_pause.unwrap_or(defaults.hit_pause);
                Some(Weapon {
                    ammo: Ammo::from_charges(shoot.charges),
                    shoot_speed: shoot
                        .shoot_speed
                        .filter(|s| s.is_finite() && *s > 0.0)
                        .unwrap_or(defaults.shoot_speed),
                    projectile: Box::new(template),
                    cadence_ms: shoot.cadence_ms.unwrap_or(defaults.shoot_cadence_ms),
                    hit_pause: HitPause {
                        max_hit_trigger,
                        time_to_wait_ms,
                    },
                    next_shot_at: 0,
                    burst: 0,
                    paused_until: 0,
                })
            }
            None => None,
        };

        Ok(Skills { shield, weapon })
    }

    fn style(&self, fills: &FillTable) -> Style {
        let Some(style) = self.style.as_ref() else {
            return Style::default();
        };
        Style {
            body: style.color.body.as_deref().map(|raw| fills.resolve(raw)),
            details: style.color.details.as_deref().map(|raw| fills.resolve(raw)),
        }
    }
}

impl StepConfig {
    fn build(&self) -> Step {
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        Step {
            vel: Vec2::new(finite_or(self.x, 0.0), finite_or(self.y, 0.0)),
            speed: self.speed.filter(|s| s.is_finite()),
            increment: self.increment.filter(|i| i.is_finite() && *i > 0.0).unwrap_or(1.0),
            max: Vec2::new(
                self.x_max.unwrap_or(f32::INFINITY),
                self.y_max.unwrap_or(f32::INFINITY),
            ),
            range_limit: self.range_limit,
        }
    }
}
