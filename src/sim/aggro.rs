//! Mob aggro state machine
//!
//! Once per tick every living mob with aggro enabled is either idle
//! (patrolling) or engaged (chasing the player). A mob engages when the
//! player is inside its aggro range, or when a member of its aggro group is
//! engaged on its own. Only the first in-range member of a group counts as
//! the group's origin; the rest ride on its state.

use std::collections::HashMap;

use glam::Vec2;

use super::entity::{Axis, Entity, Facing};
use super::spawn::{self, Aim};
use super::state::{GameEvent, GameSession};

/// Aggro decision for one mob this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engagement {
    pub engaged: bool,
    /// Engaged by its own range test
    pub origin: bool,
}

/// Decide engagement for every element. `None` marks entities that cannot
/// aggro this tick (no profile, disabled, dead or indestructible).
pub fn assess(elements: &[Entity], player: &Entity) -> Vec<Option<Engagement>> {
    let target = player.center();
    let in_range: Vec<Option<bool>> = elements
        .iter()
        .map(|e| {
            let aggro = e.aggro.as_ref()?;
            if e.is_gone() || !aggro.is_enabled() || !e.life.is_some_and(|life| life > 0) {
                return None;
            }
            Some(e.center().distance_squared(target) <= aggro.range * aggro.range)
        })
        .collect();

    let mut group_origin: HashMap<u32, usize> = HashMap::new();
    for (i, e) in elements.iter().enumerate() {
        if in_range[i] == Some(true) {
            if let Some(group) = e.aggro.as_ref().and_then(|a| a.group) {
                group_origin.entry(group).or_insert(i);
            }
        }
    }

    elements
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let near = in_range[i]?;
            let group = e.aggro.as_ref().and_then(|a| a.group);
            Some(Engagement {
                engaged: near || group.is_some_and(|g| group_origin.contains_key(&g)),
                origin: near && group.is_none_or(|g| group_origin.get(&g) == Some(&i)),
            })
        })
        .collect()
}

/// Per-axis direction toward the player; an axis already within half the
/// player's extent holds still
pub fn chase_direction(mob: &Entity, player: &Entity) -> Aim {
    let gap = player.center() - mob.center();
    let along = |axis: Axis| {
        let g = axis.of(gap);
        if g.abs() <= player.shape.half_extent(axis) {
            0
        } else if g > 0.0 {
            1
        } else {
            -1
        }
    };
    (along(Axis::X), along(Axis::Y))
}

fn raw_direction(mob: &Entity, player: &Entity) -> Aim {
    let gap = player.center() - mob.center();
    let sign = |v: f32| (v > 0.0) as i8 - (v < 0.0) as i8;
    (sign(gap.x), sign(gap.y))
}

/// Point the mob's velocity along `dir` at its patrol pace (or the chase
/// speed when it had none)
pub fn steer(mob: &mut Entity, dir: Aim, chase_speed: f32) {
    let pace = mob
        .aggro
        .as_ref()
        .and_then(|a| a.saved_vel)
        .map(|v| v.abs().max_element())
        .filter(|&p| p > 0.0)
        .unwrap_or(chase_speed);
    let vel = Vec2::new(dir.0 as f32, dir.1 as f32) * pace;
    if let Some(step) = mob.step.as_mut() {
        step.vel = vel;
    }
    if mob.facing.is_some() {
        if let Some(facing) = Facing::from_velocity(vel) {
            mob.facing = Some(facing);
        }
    }
}

/// Idle → engaged. Saves the patrol velocity. Returns true on transition.
fn engage(mob: &mut Entity, origin: bool) -> bool {
    let vel = mob.step.as_ref().map(|s| s.vel);
    let Some(aggro) = mob.aggro.as_mut() else {
        return false;
    };
    aggro.origin = origin;
    if aggro.engaged {
        return false;
    }
    aggro.engaged = true;
    aggro.saved_vel = vel;
    true
}

/// Engaged → idle. Restores the patrol velocity. Returns true on transition.
fn calm(mob: &mut Entity) -> bool {
    let Some(aggro) = mob.aggro.as_mut() else {
        return false;
    };
    if !aggro.engaged {
        return false;
    }
    aggro.engaged = false;
    aggro.origin = false;
    if let (Some(vel), Some(step)) = (aggro.saved_vel.take(), mob.step.as_mut()) {
        step.vel = vel;
    }
    true
}

/// Raise a dropped, charged shield once its delay has passed
fn raise_shield(mob: &mut Entity, now_ms: u64) -> bool {
    match mob.skills.shield.as_mut() {
        Some(shield) if !shield.up && shield.charges > 0 && now_ms >= shield.raise_at => {
            shield.up = true;
            true
        }
        _ => false,
    }
}

/// Run the aggro state machine for every mob
pub fn update(session: &mut GameSession) {
    let config = session.config_handle();
    let defaults = &config.defaults;
    let now = session.now_ms;
    let GameSession {
        map,
        player,
        rng,
        last_issued_id,
        events,
        ..
    } = session;

    let plan = assess(&map.elements, player);
    for (i, engagement) in plan.into_iter().enumerate() {
        let Some(Engagement { engaged, origin }) = engagement else {
            continue;
        };
        let mob = &mut map.elements[i];
        let id = mob.id;

        if !engaged {
            if calm(mob) {
                log::debug!("Mob {id} calmed down");
                events.push(GameEvent::Calm { id });
            }
            continue;
        }

        if engage(mob, origin) {
            log::debug!("Mob {id} aggroed (origin: {origin})");
            events.push(GameEvent::Aggro { id, origin });
        }
        let dir = chase_direction(mob, player);
        steer(mob, dir, defaults.chase_speed);
        if raise_shield(mob, now) {
            log::debug!("Mob {id} raised its shield");
        }

        if !mob.skills.weapon.as_ref().is_some_and(|w| w.ready(now)) {
            continue;
        }
        let aim = if dir != (0, 0) { dir } else { raw_direction(mob, player) };
        if aim == (0, 0) {
            continue;
        }
        let projectile_id =
            spawn::fresh_id(&map.elements, last_issued_id, rng, defaults.projectile_id_spread);
        let mob = &mut map.elements[i];
        if let Some(projectile) = spawn::fire(mob, aim, projectile_id) {
            if let Some(weapon) = mob.skills.weapon.as_mut() {
                weapon.record_burst_shot(now);
            }
            events.push(GameEvent::Shot {
                shooter: id,
                projectile: projectile_id,
            });
            map.elements.push(projectile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BehaviorType, Hit, PLAYER_ID};

    const MOB: BehaviorType = BehaviorType::Mob(Hit::Damaging);

    fn player_at(x: f32, y: f32) -> Entity {
        Entity::circle(PLAYER_ID, x, y, 20.0, BehaviorType::Keep(Hit::Damaging)).with_life(500)
    }

    fn mob(id: u32, x: f32, y: f32, range: f32, group: Option<u32>) -> Entity {
        Entity::circle(id, x, y, 30.0, MOB)
            .with_life(100)
            .with_velocity(1.0, 1.0)
            .with_aggro(range, group)
    }

    #[test]
    fn test_in_range_engages() {
        let player = player_at(0.0, 0.0);
        let elements = vec![mob(1, 150.0, 200.0, 300.0, None), mob(2, 400.0, 0.0, 300.0, None)];
        let plan = assess(&elements, &player);
        assert_eq!(plan[0], Some(Engagement { engaged: true, origin: true }));
        assert_eq!(plan[1], Some(Engagement { engaged: false, origin: false }));
    }

    #[test]
    fn test_disabled_aggro_never_engages() {
        let player = player_at(0.0, 0.0);
        let elements = vec![mob(1, 1.0, 1.0, -1.0, None)];
        assert_eq!(assess(&elements, &player), vec![None]);
    }

    #[test]
    fn test_group_pulls_in_out_of_range_member() {
        let player = player_at(0.0, 0.0);
        let elements = vec![
            mob(1, 1000.0, 0.0, 100.0, Some(7)),
            mob(2, 50.0, 0.0, 100.0, Some(7)),
            mob(3, 60.0, 0.0, 100.0, Some(7)),
            mob(4, 1000.0, 0.0, 100.0, Some(8)),
        ];
        let plan = assess(&elements, &player);
        assert_eq!(plan[0], Some(Engagement { engaged: true, origin: false }));
        assert_eq!(plan[1], Some(Engagement { engaged: true, origin: true }));
        assert_eq!(plan[2], Some(Engagement { engaged: true, origin: false }));
        assert_eq!(plan[3], Some(Engagement { engaged: false, origin: false }));
    }

    #[test]
    fn test_dead_mob_is_skipped() {
        let player = player_at(0.0, 0.0);
        let mut m = mob(1, 10.0, 0.0, 100.0, None);
        m.life = Some(0);
        assert_eq!(assess(&[m], &player), vec![None]);
    }

    #[test]
    fn test_chase_direction_with_tolerance() {
        let player = player_at(100.0, 100.0);
        let m = mob(1, 90.0, 300.0, 300.0, None);
        assert_eq!(chase_direction(&m, &player), (0, -1));
        let m = mob(1, 300.0, 50.0, 300.0, None);
        assert_eq!(chase_direction(&m, &player), (-1, 1));
    }

    #[test]
    fn test_engage_and_calm_restore_patrol() {
        let mut m = mob(1, 0.0, 0.0, 100.0, None);
        m.step = Some(crate::sim::Step::moving(Vec2::new(-1.0, 2.0)));
        assert!(engage(&mut m, true));
        assert!(!engage(&mut m, true));
        steer(&mut m, (1, -1), 1.0);
        assert_eq!(m.velocity(), Vec2::new(2.0, -2.0));
        assert!(calm(&mut m));
        assert_eq!(m.velocity(), Vec2::new(-1.0, 2.0));
        assert!(!calm(&mut m));
    }

    #[test]
    fn test_zero_patrol_uses_chase_speed() {
        let mut m = mob(1, 0.0, 0.0, 100.0, None);
        m.step = Some(crate::sim::Step::moving(Vec2::ZERO));
        engage(&mut m, true);
        steer(&mut m, (-1, 0), 1.5);
        assert_eq!(m.velocity(), Vec2::new(-1.5, 0.0));
    }
}
