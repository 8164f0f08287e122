//! Life changes from qualifying collisions
//!
//! A hit rolls a randomized delta from the hitter's bonus and the taker's
//! defense. Positive deltas (damage) are gated by the hitter's hit rate and
//! divided by an active shield; negative deltas (heals) always land.

use rand::Rng;

use super::entity::{Entity, EntityId, PLAYER_ID};
use crate::config::CombatDefaults;
use crate::{random_int_inclusive, round_half_up};

/// One applied life change
#[derive(Debug, Clone, PartialEq)]
pub struct HitReport {
    pub hitter: EntityId,
    pub target: EntityId,
    /// Life removed (negative for heals)
    pub amount: i32,
    pub bonus: i32,
    pub defense: i32,
    pub reduce_factor: f32,
    pub life_after: i32,
    /// The taker's shield spent a charge on this hit
    pub shield_spent: bool,
}

impl HitReport {
    #[inline]
    pub fn is_heal(&self) -> bool {
        self.amount < 0
    }
}

/// Damage multiplier applied to the bonus part of a roll: tough defenders
/// (low factor) scale it down, never up
pub fn defense_reducer(defense: i32, defaults: &CombatDefaults) -> f32 {
    let base = defaults.defense_or_default(0) as f32;
    (defense as f32 / base).min(1.0)
}

/// Roll a raw life delta. Positive is damage, negative is a heal.
pub fn roll_life_delta<R: Rng + ?Sized>(rng: &mut R, bonus: i32, defense: i32, reducer: f32) -> f32 {
    let half_bonus = round_half_up(bonus as f32 / 2.0);
    if bonus < 0 {
        (bonus + random_int_inclusive(rng, 0, -half_bonus)) as f32
    } else {
        let half_defense = round_half_up(defense as f32 / 2.0);
        random_int_inclusive(rng, half_defense, defense) as f32
            + random_int_inclusive(rng, half_bonus, bonus) as f32 * reducer
    }
}

/// Apply `hitter`'s bonus to `taker`.
///
/// Returns `None` when nothing changed: the hitter cannot hit, the taker is
/// indestructible or already dead, the roll was zero, or the hitter is still
/// cooling down.
pub fn apply_hit<R: Rng + ?Sized>(
    hitter: &mut Entity,
    taker: &mut Entity,
    rng: &mut R,
    now_ms: u64,
    defaults: &CombatDefaults,
) -> Option<HitReport> {
    if !defaults.can_hit(hitter.behavior) {
        return None;
    }
    let life = taker.life.filter(|&life| life > 0)?;

    let defense = defaults.defense_or_default(taker.damage_taken_factor);
    let bonus = hitter.hit_bonus;
    let delta = roll_life_delta(rng, bonus, defense, defense_reducer(defense, defaults));
    if delta == 0.0 {
        return None;
    }

    let mut reduce_factor = 1.0;
    let mut shield_spent = false;
    if delta > 0.0 {
        if hitter.next_hit_at.is_some_and(|at| now_ms <= at) {
            return None;
        }
        if let Some(shield) = taker.skills.shield.as_mut().filter(|s| s.is_active()) {
            reduce_factor = defaults.reduce_factor_or_default(shield.reduce_factor);
            shield_spent = shield.absorb(now_ms);
        }
        taker.flags.taking_damage = true;
        hitter.next_hit_at = Some(now_ms.saturating_add(hitter.time_between_hits_ms));
    }

    let amount = round_half_up(delta / reduce_factor);
    let mut life_after = (life - amount).max(0);
    if amount < 0 {
        if let Some(max) = taker.max_life {
            life_after = life_after.min(max.max(life));
        }
    }
    taker.life = Some(life_after);

    if amount > 0 && taker.id != PLAYER_ID && life_after > 0 {
        if let Some(aggro) = taker.aggro.as_mut().filter(|a| a.is_enabled()) {
            aggro.range += defaults.aggro_increment;
        }
    }

    let report = HitReport {
        hitter: hitter.id,
        target: taker.id,
        amount,
        bonus,
        defense,
        reduce_factor,
        life_after,
        shield_spent,
    };
    log::debug!(
        "Entity {} hit by {} for {} (bonus {}, defense {}, reduce {}), life {}",
        report.target,
        report.hitter,
        report.amount,
        report.bonus,
        report.defense,
        report.reduce_factor,
        report.life_after
    );
    Some(report)
}

/// Resolve both directions of a damage-eligible collision: the target's
/// bonus lands on the origin first, then the origin's on the target.
pub fn exchange<R: Rng + ?Sized>(
    origin: &mut Entity,
    target: &mut Entity,
    rng: &mut R,
    now_ms: u64,
    defaults: &CombatDefaults,
) -> Vec<HitReport> {
    let mut reports = Vec::with_capacity(2);
    reports.extend(apply_hit(target, origin, rng, now_ms, defaults));
    reports.extend(apply_hit(origin, target, rng, now_ms, defaults));
    reports
}
