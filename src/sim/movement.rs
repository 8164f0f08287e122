//! Per-tick translation and patrol bounds

use glam::Vec2;

use super::entity::{Axis, Entity, RangeLimit};

/// Advance an entity by its displacement for this tick.
///
/// Platforms keep their velocity for facing bookkeeping but never translate.
pub fn integrate(entity: &mut Entity) {
    if entity.behavior.is_platform() {
        return;
    }
    let displacement = entity.displacement();
    if displacement != Vec2::ZERO {
        entity.pos += displacement;
    }
}

/// Reverse a patrolling axis once the entity passes its range limit.
///
/// Unset limits fall back to the map edges. Engaged mobs chase instead of
/// patrolling, so the limit is ignored for them.
pub fn apply_range_limit(entity: &mut Entity, bounds: Vec2) {
    if entity.is_engaged() {
        return;
    }
    let pos = entity.pos;
    let Some(step) = entity.step.as_mut() else {
        return;
    };
    let Some(limit) = step.range_limit else {
        return;
    };

    for axis in Axis::BOTH {
        let (min, max) = limits(&limit, axis, bounds);
        let v = axis.of(step.vel);
        let p = axis.of(pos);
        if (v < 0.0 && p < min) || (v > 0.0 && p > max) {
            axis.set(&mut step.vel, -v);
        }
    }
}

fn limits(limit: &RangeLimit, axis: Axis, bounds: Vec2) -> (f32, f32) {
    match axis {
        Axis::X => (limit.min_x.unwrap_or(0.0), limit.max_x.unwrap_or(bounds.x)),
        Axis::Y => (limit.min_y.unwrap_or(0.0), limit.max_y.unwrap_or(bounds.y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BehaviorType, Hit};

    const BOUNDS: Vec2 = Vec2::new(1600.0, 800.0);

    #[test]
    fn test_integrate_moves_by_step() {
        let mut e = Entity::circle(1, 500.0, 500.0, 30.0, BehaviorType::Keep(Hit::Damaging))
            .with_velocity(-1.0, 2.0);
        integrate(&mut e);
        assert_eq!(e.pos, Vec2::new(499.0, 502.0));
    }

    #[test]
    fn test_integrate_applies_speed_floor() {
        let mut e = Entity::circle(1, 0.0, 0.0, 5.0, BehaviorType::Keep(Hit::Inert))
            .with_velocity(3.0, -3.0);
        if let Some(step) = e.step.as_mut() {
            step.speed = Some(0.5);
        }
        integrate(&mut e);
        assert_eq!(e.pos, Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_platform_never_translates() {
        let mut e = Entity::rect(1, 10.0, 10.0, 40.0, 40.0, BehaviorType::Platform(Hit::Damaging))
            .with_velocity(2.0, 0.0);
        integrate(&mut e);
        assert_eq!(e.pos, Vec2::new(10.0, 10.0));
        assert_eq!(e.velocity(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_range_limit_reverses_patrol() {
        let mut e = Entity::circle(1, 601.0, 450.0, 30.0, BehaviorType::Mob(Hit::Damaging))
            .with_velocity(1.0, -2.0);
        if let Some(step) = e.step.as_mut() {
            step.range_limit = Some(RangeLimit {
                max_x: Some(600.0),
                min_y: Some(400.0),
                ..RangeLimit::default()
            });
        }
        apply_range_limit(&mut e, BOUNDS);
        assert_eq!(e.velocity(), Vec2::new(-1.0, -2.0));

        e.pos.y = 399.0;
        apply_range_limit(&mut e, BOUNDS);
        assert_eq!(e.velocity(), Vec2::new(-1.0, 2.0));
    }

    #[test]
    fn test_range_limit_ignored_while_engaged() {
        let mut e = Entity::circle(1, 700.0, 450.0, 30.0, BehaviorType::Mob(Hit::Damaging))
            .with_velocity(1.0, 0.0)
            .with_aggro(200.0, None);
        if let Some(step) = e.step.as_mut() {
            step.range_limit = Some(RangeLimit {
                max_x: Some(600.0),
                ..RangeLimit::default()
            });
        }
        if let Some(aggro) = e.aggro.as_mut() {
            aggro.engaged = true;
        }
        apply_range_limit(&mut e, BOUNDS);
        assert_eq!(e.velocity(), Vec2::new(1.0, 0.0));
    }
}
