//! Combat and AI defaults applied when an entity leaves a value unset

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BehaviorType, Hit};

/// Tunables shared by every entity of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombatDefaults {
    /// Types whose collisions may change life (either side matching is enough)
    pub element_types_can_hit: Vec<BehaviorType>,
    pub aggro_range: f32,
    pub aggro_increment: f32,
    pub chase_speed: f32,
    pub damage_taken_factor: i32,
    pub time_between_hits_ms: u64,
    pub shoot_speed: f32,
    pub shoot_cadence_ms: u64,
    pub shield_reduce_factor: f32,
    pub shield_break_amount: u32,
    pub shield_up_delay_ms: u64,
    /// `[max_hit_trigger, time_to_wait_ms]`
    pub hit_pause: (u32, u64),
    pub projectile_id_spread: u32,
}

impl Default for CombatDefaults {
    fn default() -> Self {
        Self {
            element_types_can_hit: BehaviorType::ALL
                .into_iter()
                .filter(|b| b.hit() == Hit::Damaging)
                .collect(),
            aggro_range: AGGRO_RANGE,
            aggro_increment: AGGRO_RANGE_INCREMENT,
            chase_speed: CHASE_SPEED,
            damage_taken_factor: DAMAGE_TAKEN_FACTOR,
            time_between_hits_ms: TIME_BETWEEN_HITS_MS,
            shoot_speed: SHOOT_SPEED,
            shoot_cadence_ms: SHOOT_CADENCE_MS,
            shield_reduce_factor: SHIELD_REDUCE_FACTOR,
            shield_break_amount: SHIELD_BREAK_AMOUNT,
            shield_up_delay_ms: SHIELD_UP_DELAY_MS,
            hit_pause: (HIT_PAUSE_TRIGGER, HIT_PAUSE_WAIT_MS),
            projectile_id_spread: PROJECTILE_ID_SPREAD,
        }
    }
}

impl CombatDefaults {
    #[inline]
    pub fn can_hit(&self, behavior: BehaviorType) -> bool {
        self.element_types_can_hit.contains(&behavior)
    }

    /// Defense used for damage rolls; non-positive values fall back
    pub fn defense_or_default(&self, damage_taken_factor: i32) -> i32 {
        if damage_taken_factor > 0 {
            damage_taken_factor
        } else if self.damage_taken_factor > 0 {
            self.damage_taken_factor
        } else {
            DAMAGE_TAKEN_FACTOR
        }
    }

    /// Shield divisor; zero, negative or NaN factors fall back
    pub fn reduce_factor_or_default(&self, factor: f32) -> f32 {
        if factor.is_finite() && factor > 0.0 {
            factor
        } else if self.shield_reduce_factor.is_finite() && self.shield_reduce_factor > 0.0 {
            self.shield_reduce_factor
        } else {
            SHIELD_REDUCE_FACTOR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_can_hit_set_is_odd_codes() {
        let defaults = CombatDefaults::default();
        let codes: Vec<u8> = defaults
            .element_types_can_hit
            .iter()
            .map(|b| b.code())
            .collect();
        assert_eq!(codes, vec![3, 5, 7, 9, 11, 13, 15]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let defaults: CombatDefaults =
            serde_json::from_str(r#"{ "elementTypesCanHit": [3, 9], "aggroRange": 300 }"#).unwrap();
        assert!(defaults.can_hit(BehaviorType::Keep(Hit::Damaging)));
        assert!(!defaults.can_hit(BehaviorType::Stop(Hit::Damaging)));
        assert_eq!(defaults.aggro_range, 300.0);
        assert_eq!(defaults.time_between_hits_ms, TIME_BETWEEN_HITS_MS);
        assert_eq!(defaults.hit_pause, (5, 6000));
    }

    #[test]
    fn test_numeric_fallbacks() {
        let defaults = CombatDefaults::default();
        assert_eq!(defaults.reduce_factor_or_default(0.0), 2.0);
        assert_eq!(defaults.reduce_factor_or_default(f32::NAN), 2.0);
        assert_eq!(defaults.reduce_factor_or_default(4.0), 4.0);
        assert_eq!(defaults.defense_or_default(0), 50);
        assert_eq!(defaults.defense_or_default(25), 25);
    }
}
