//! Collision response table
//!
//! Maps a behavior pair to its structural outcome. The outcome never depends
//! on kinematics or randomness; those only affect the correction offset and
//! the damage magnitude.

use super::entity::BehaviorType;
use crate::config::CombatDefaults;

/// What happens to the origin's velocity on the contact axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityEffect {
    /// No correction, no velocity change (platform, mob and destroy families)
    None,
    /// Corrected to the contact point, velocity untouched
    Keep,
    /// Corrected, axis velocity zeroed
    Stop,
    /// Corrected, axis velocity negated
    Revert,
}

/// Structural result of a collision between an origin and a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// The pair does not interact at all
    pub passes: bool,
    pub remove_origin: bool,
    pub remove_target: bool,
    pub velocity: VelocityEffect,
    /// Forward the pair to combat
    pub damage_eligible: bool,
}

impl Outcome {
    const PASS: Outcome = Outcome {
        passes: true,
        remove_origin: false,
        remove_target: false,
        velocity: VelocityEffect::None,
        damage_eligible: false,
    };
}

/// Resolve the outcome of `origin` running into `target`.
///
/// The target's family decides the velocity effect and target removal; only
/// a mutual-destroy origin removes itself. No-collision on either side lets
/// the pair pass untouched.
pub fn resolve(origin: BehaviorType, target: BehaviorType, defaults: &CombatDefaults) -> Outcome {
    if origin == BehaviorType::NoCollision || target == BehaviorType::NoCollision {
        return Outcome::PASS;
    }

    let (velocity, remove_target) = match target {
        BehaviorType::NoCollision => return Outcome::PASS,
        BehaviorType::Keep(_) => (VelocityEffect::Keep, false),
        // Overlap is allowed; only contact is reported
        BehaviorType::Platform(_) | BehaviorType::Mob(_) => (VelocityEffect::None, false),
        BehaviorType::Stop(_) => (VelocityEffect::Stop, false),
        BehaviorType::Revert(_) => (VelocityEffect::Revert, false),
        BehaviorType::MutualDestroy(_) | BehaviorType::TargetDestroy(_) => {
            (VelocityEffect::None, true)
        }
    };

    Outcome {
        passes: false,
        remove_origin: matches!(origin, BehaviorType::MutualDestroy(_)),
        remove_target,
        velocity,
        damage_eligible: defaults.can_hit(origin) || defaults.can_hit(target),
    }
}
