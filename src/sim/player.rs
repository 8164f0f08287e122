//! Player control effects
//!
//! Keyboard intents change the player's step directly. Movement accelerates
//! one increment per press, capped per axis; pressing against the current
//! direction brakes instead.

use crate::input::Direction;

use super::entity::{Axis, Entity};

/// Apply one move press.
///
/// Pressing the direction the player already travels on that axis clears the
/// other axis; otherwise a moving other axis is normalized to one increment.
pub fn apply_move(player: &mut Entity, direction: Direction) {
    let Some(step) = player.step.as_mut() else {
        return;
    };
    let axis = direction.axis();
    let other = axis.other();
    let sign = f32::from(direction.sign());
    let inc = step.increment;
    let current = axis.of(step.vel);

    if current * sign > 0.0 {
        other.set(&mut step.vel, 0.0);
    } else {
        let o = other.of(step.vel);
        if o != 0.0 {
            other.set(&mut step.vel, inc.copysign(o));
        }
    }

    if current * sign >= 0.0 {
        if current.abs() < axis.of(step.max) {
            axis.set(&mut step.vel, current + sign * inc);
        }
    } else {
        axis.set(&mut step.vel, current + sign * inc);
    }
}

/// Zero both axes
pub fn stop(player: &mut Entity) {
    if let Some(step) = player.step.as_mut() {
        for axis in Axis::BOTH {
            axis.set(&mut step.vel, 0.0);
        }
    }
}

/// Raise the shield when down and charged, lower it otherwise. Returns the
/// new state.
pub fn toggle_shield(player: &mut Entity) -> bool {
    match player.skills.shield.as_mut() {
        Some(shield) => {
            shield.toggle();
            shield.up
        }
        None => false,
    }
}
