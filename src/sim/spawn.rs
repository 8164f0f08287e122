//! Projectile spawning

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, EntityId, Facing, Step};
use crate::consts::SPAWN_CLEARANCE;

/// Per-axis sign in `{-1, 0, 1}`
pub type Aim = (i8, i8);

/// Firing direction of a shooter: the velocity sign on each moving axis,
/// the persisted facing on still axes
pub fn aim_of(shooter: &Entity) -> Option<Aim> {
    let vel = shooter.velocity();
    let facing = shooter.facing.map_or((0, 0), Facing::signs);
    let pick = |v: f32, fallback: i8| {
        if v > 0.0 {
            1
        } else if v < 0.0 {
            -1
        } else {
            fallback
        }
    };
    let aim = (pick(vel.x, facing.0), pick(vel.y, facing.1));
    (aim != (0, 0)).then_some(aim)
}

/// Fresh projectile id, strictly above every existing and previously issued
/// id with a random gap so rapid fire never reuses one
pub fn fresh_id<R: Rng + ?Sized>(
    elements: &[Entity],
    last_issued: &mut EntityId,
    rng: &mut R,
    spread: u32,
) -> EntityId {
    let highest = elements
        .iter()
        .map(|e| e.id)
        .max()
        .unwrap_or(0)
        .max(*last_issued);
    let id = highest.saturating_add(rng.random_range(1..=spread.max(1)));
    *last_issued = id;
    id
}

/// Whether `shooter` can fire right now (weapon present and loaded)
pub fn can_fire(shooter: &Entity) -> bool {
    shooter
        .skills
        .weapon
        .as_ref()
        .is_some_and(|w| w.ammo.is_available())
}

/// Fire the shooter's weapon along `aim`.
///
/// The projectile is a copy of the weapon template placed just outside the
/// shooter's reach on each aimed axis, moving at the shoot speed. Spends one
/// round and flags the shooter. Returns `None` without side effects when the
/// shooter is unarmed, out of ammo or has no direction.
pub fn fire(shooter: &mut Entity, aim: Aim, id: EntityId) -> Option<Entity> {
    if aim == (0, 0) {
        return None;
    }
    let center = shooter.center();
    let reach = shooter.shape.reach();
    let owner = shooter.id;
    let weapon = shooter.skills.weapon.as_mut().filter(|w| w.ammo.is_available())?;

    let template = weapon.projectile.as_ref();
    let dir = Vec2::new(aim.0 as f32, aim.1 as f32);
    let offset = reach + template.shape.reach() + SPAWN_CLEARANCE;

    let mut projectile = template.clone();
    projectile.id = id;
    projectile.owner = Some(owner);
    projectile.pos = center + dir * offset;
    let mut step = projectile.step.take().unwrap_or_else(|| Step::moving(Vec2::ZERO));
    step.vel = dir * weapon.shoot_speed;
    projectile.step = Some(step);

    weapon.ammo.consume();
    shooter.flags.shooting = true;
    log::debug!("Entity {owner} fired projectile {id}");
    Some(projectile)
}
