//! Axis-separated swept collision detection and penetration correction
//!
//! Every moving entity is tested against a target once per axis. A sweep
//! along X first rejects pairs whose Y spans do not overlap (broad phase),
//! then picks a direction from the signs of both displacements and runs an
//! interval or distance test (narrow phase). Circles are anchored at their
//! center, rectangles at their top-left corner, so every formula below reads
//! raw anchor coordinates.

use glam::Vec2;

use super::entity::{Axis, Entity, Shape};
use super::response::{VelocityEffect, resolve};
use crate::config::CombatDefaults;

/// Which edge of the origin leads on the swept axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Moving toward negative coordinates (or standing while the target advances)
    Backward,
    Forward,
}

/// A detected overlap on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub axis: Axis,
    pub sweep: Sweep,
}

/// Result of sweeping an origin against one target on both axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairReport {
    pub collided: bool,
    pub remove_origin: bool,
    pub remove_target: bool,
    pub damage_eligible: bool,
}

/// Reject pairs whose spans on the axis perpendicular to `axis` do not
/// overlap.
///
/// The overlap is shrunk by a secure border of `|step| + 1` on that other
/// axis, capped by the target's size, so grazing contacts are left to the
/// other axis' sweep.
pub fn broad_phase(origin: &Entity, target: &Entity, axis: Axis) -> bool {
    let other = axis.other();
    let secure = other.of(origin.displacement()).abs() + 1.0;
    let target_size = match target.shape {
        Shape::Circle { radius } => radius,
        Shape::Rect { .. } => target.shape.extent(other),
    };
    let border = secure.min(target_size);

    let o = other.of(origin.pos);
    let t = other.of(target.pos);
    let oc = origin.shape.extent(other);
    let tc = target.shape.extent(other);

    match (origin.shape.radius(), target.shape.radius()) {
        (Some(r), Some(big_r)) => !(o - r > t + big_r - border || o + r < t - big_r + border),
        (Some(r), None) => !(o - r > t + tc - border || o + r < t + border),
        (None, Some(big_r)) => !(o > t + big_r - border || o + oc < t - big_r + border),
        (None, None) => !(o > t + tc - border || o + oc < t + border),
    }
}

/// Leading direction of the origin on `axis`
pub fn sweep_direction(origin: &Entity, target: &Entity, axis: Axis) -> Sweep {
    let d = axis.of(origin.displacement());
    let target_d = axis.of(target.displacement());
    if d < 0.0 || (d == 0.0 && target_d > 0.0) {
        Sweep::Backward
    } else {
        Sweep::Forward
    }
}

/// Narrow-phase overlap test along `axis` for the given sweep direction
pub fn narrow_phase(origin: &Entity, target: &Entity, axis: Axis, sweep: Sweep) -> bool {
    let o = axis.of(origin.pos);
    let t = axis.of(target.pos);
    let oc = origin.shape.extent(axis);
    let tc = target.shape.extent(axis);

    match (origin.shape.radius(), target.shape.radius(), sweep) {
        (Some(r), Some(big_r), _) => {
            origin.pos.distance_squared(target.pos) <= (r + big_r) * (r + big_r)
        }
        (Some(r), None, Sweep::Backward) => o - r <= t + tc && o - r > t,
        (Some(r), None, Sweep::Forward) => o + r >= t && o + r < t + tc,
        (None, Some(big_r), Sweep::Backward) => o <= t + big_r && o > t - big_r,
        (None, Some(big_r), Sweep::Forward) => o + oc >= t - big_r && o + oc < t + big_r,
        (None, None, Sweep::Backward) => o <= t + tc && o > t,
        (None, None, Sweep::Forward) => o + oc >= t && o + oc < t + tc,
    }
}

/// Full per-axis test: broad phase, direction, narrow phase
pub fn detect(origin: &Entity, target: &Entity, axis: Axis) -> Option<Contact> {
    if !broad_phase(origin, target, axis) {
        return None;
    }
    let sweep = sweep_direction(origin, target, axis);
    narrow_phase(origin, target, axis, sweep).then_some(Contact { axis, sweep })
}

/// Move the origin back to the contact boundary and apply the velocity
/// effect.
///
/// Only applies when the origin itself moves in the swept direction and the
/// step brings it closer to the target's anchor. Returns true when the
/// position was corrected.
pub fn correct(origin: &mut Entity, target: &Entity, contact: Contact, effect: VelocityEffect) -> bool {
    if effect == VelocityEffect::None {
        return false;
    }
    let axis = contact.axis;
    let d = axis.of(origin.displacement());
    let leading = match contact.sweep {
        Sweep::Backward => d < 0.0,
        Sweep::Forward => d > 0.0,
    };
    if !leading {
        return false;
    }

    let o = axis.of(origin.pos);
    let t = axis.of(target.pos);
    if (o - t + d).abs() >= (o - t).abs() {
        return false;
    }

    let base_origin = match origin.shape {
        Shape::Circle { radius } => radius,
        Shape::Rect { .. } if d > 0.0 => origin.shape.extent(axis),
        Shape::Rect { .. } => 0.0,
    };
    let base_target = match (target.shape, origin.shape) {
        (Shape::Circle { radius: big_r }, Shape::Circle { radius: r }) => {
            let across = axis.other().of(origin.pos) - axis.other().of(target.pos);
            let chord = ((r + big_r) * (r + big_r) - across * across).sqrt();
            if chord.is_finite() && chord > 0.0 { chord - r } else { big_r }
        }
        (Shape::Circle { radius: big_r }, Shape::Rect { .. }) => big_r,
        (Shape::Rect { .. }, _) if d > 0.0 => 0.0,
        (Shape::Rect { .. }, _) => target.shape.extent(axis),
    };

    let corrected = match contact.sweep {
        Sweep::Backward => t + base_origin + base_target,
        Sweep::Forward => t - base_origin - base_target,
    };
    axis.set(&mut origin.pos, corrected);

    if let Some(step) = origin.step.as_mut() {
        match effect {
            VelocityEffect::Stop => axis.set(&mut step.vel, 0.0),
            VelocityEffect::Revert => {
                let v = axis.of(step.vel);
                axis.set(&mut step.vel, -v);
            }
            VelocityEffect::Keep | VelocityEffect::None => {}
        }
    }
    true
}

/// Sweep `origin` against `target` on X then Y, applying corrections.
///
/// Removals are reported, not applied; the caller owns the entity list.
pub fn sweep_pair(origin: &mut Entity, target: &Entity, defaults: &CombatDefaults) -> PairReport {
    let mut report = PairReport::default();
    if origin.related_to(target) {
        return report;
    }
    for axis in Axis::BOTH {
        let Some(contact) = detect(origin, target, axis) else {
            continue;
        };
        let outcome = resolve(origin.behavior, target.behavior, defaults);
        if outcome.passes {
            continue;
        }
        report.collided = true;
        correct(origin, target, contact, outcome.velocity);
        report.remove_origin |= outcome.remove_origin;
        report.remove_target |= outcome.remove_target;
        report.damage_eligible |= outcome.damage_eligible;
    }
    report
}

/// Bounce off the map border on `axis`: negate the axis velocity and clamp
/// the entity inside the border. Static axes are left alone.
pub fn border_bounce(entity: &mut Entity, bounds: Vec2, thickness: f32, axis: Axis) -> bool {
    let Some(step) = entity.step.as_mut() else {
        return false;
    };
    let v = axis.of(step.vel);
    if v == 0.0 {
        return false;
    }

    let (near, far) = match entity.shape {
        Shape::Circle { radius } => (radius, radius),
        Shape::Rect { .. } => (0.0, entity.shape.extent(axis)),
    };
    let primary = near + thickness;
    let opposite = axis.of(bounds) - far - thickness;
    let p = axis.of(entity.pos);

    if p <= primary || p >= opposite {
        axis.set(&mut step.vel, -v);
        axis.set(&mut entity.pos, if p <= primary { primary } else { opposite });
        return true;
    }
    false
}

/// Two distinct mutable entries of a slice
pub(crate) fn pair_mut(items: &mut [Entity], a: usize, b: usize) -> (&mut Entity, &mut Entity) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Sweep element `origin` against every other live element in list order.
///
/// Stops at the first damage-eligible collision and returns its index.
/// Removals are applied as tombstones; the scan also stops once the origin
/// itself is removed.
pub fn scan_elements(
    elements: &mut [Entity],
    origin: usize,
    defaults: &CombatDefaults,
) -> Option<usize> {
    for j in 0..elements.len() {
        if j == origin || elements[j].is_gone() || elements[j].id == elements[origin].id {
            continue;
        }
        let (o, t) = pair_mut(elements, origin, j);
        let report = sweep_pair(o, t, defaults);
        apply_removals(o, t, report);
        if report.damage_eligible {
            return Some(j);
        }
        if o.is_despawned() {
            break;
        }
    }
    None
}

/// Sweep an entity that is not part of `elements` (the player) against
/// every live element
pub fn scan_from_outside(
    origin: &mut Entity,
    elements: &mut [Entity],
    defaults: &CombatDefaults,
) -> Option<usize> {
    for (j, target) in elements.iter_mut().enumerate() {
        if target.is_gone() || target.id == origin.id {
            continue;
        }
        let report = sweep_pair(origin, target, defaults);
        apply_removals(origin, target, report);
        if report.damage_eligible {
            return Some(j);
        }
    }
    None
}

/// Apply a report's removals as tombstones
pub fn apply_removals(origin: &mut Entity, target: &mut Entity, report: PairReport) {
    if report.remove_origin {
        origin.despawn();
    }
    if report.remove_target {
        target.despawn();
    }
}
