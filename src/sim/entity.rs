//! Entity model shared by the player, map obstacles, mobs and projectiles
//!
//! One record carries shape, kinematics, combat stats and optional
//! capabilities. Capabilities are plain `Option`s: an entity without a
//! shield simply has `skills.shield == None`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Fill;
use crate::error::ConfigError;

/// Stable entity identifier (removal lookups, self-exclusion)
pub type EntityId = u32;

/// Reserved id of the player, which never lives in the map element list
pub const PLAYER_ID: EntityId = 0;

/// One of the two simulation axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    pub fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }

    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Collision shape. Circles are anchored at their center, rectangles at
/// their top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

impl Shape {
    pub fn radius(&self) -> Option<f32> {
        match *self {
            Shape::Circle { radius } => Some(radius),
            Shape::Rect { .. } => None,
        }
    }

    /// Full extent along an axis (diameter, width or height)
    pub fn extent(&self, axis: Axis) -> f32 {
        match (*self, axis) {
            (Shape::Circle { radius }, _) => radius * 2.0,
            (Shape::Rect { width, .. }, Axis::X) => width,
            (Shape::Rect { height, .. }, Axis::Y) => height,
        }
    }

    #[inline]
    pub fn half_extent(&self, axis: Axis) -> f32 {
        self.extent(axis) / 2.0
    }

    /// Distance from the center to the farthest edge along either axis
    pub fn reach(&self) -> f32 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Rect { width, height } => width.max(height) / 2.0,
        }
    }
}

/// Whether a behavior family may forward its collisions to combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hit {
    Inert,
    Damaging,
}

impl Hit {
    fn from_parity(code: u8) -> Self {
        if code % 2 == 1 { Hit::Damaging } else { Hit::Inert }
    }
}

/// Obstacle interaction table selector.
///
/// Numeric codes follow the level format: 1 is no-collision, then each family
/// takes an even (inert) and odd (damaging) code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BehaviorType {
    NoCollision,
    Keep(Hit),
    Stop(Hit),
    Revert(Hit),
    MutualDestroy(Hit),
    TargetDestroy(Hit),
    Platform(Hit),
    Mob(Hit),
}

impl BehaviorType {
    /// Every behavior type, in code order
    pub const ALL: [BehaviorType; 15] = [
        BehaviorType::NoCollision,
        BehaviorType::Keep(Hit::Inert),
        BehaviorType::Keep(Hit::Damaging),
        BehaviorType::Stop(Hit::Inert),
        BehaviorType::Stop(Hit::Damaging),
        BehaviorType::Revert(Hit::Inert),
        BehaviorType::Revert(Hit::Damaging),
        BehaviorType::MutualDestroy(Hit::Inert),
        BehaviorType::MutualDestroy(Hit::Damaging),
        BehaviorType::TargetDestroy(Hit::Inert),
        BehaviorType::TargetDestroy(Hit::Damaging),
        BehaviorType::Platform(Hit::Inert),
        BehaviorType::Platform(Hit::Damaging),
        BehaviorType::Mob(Hit::Inert),
        BehaviorType::Mob(Hit::Damaging),
    ];

    pub fn code(self) -> u8 {
        let (base, hit) = match self {
            BehaviorType::NoCollision => return 1,
            BehaviorType::Keep(hit) => (2, hit),
            BehaviorType::Stop(hit) => (4, hit),
            BehaviorType::Revert(hit) => (6, hit),
            BehaviorType::MutualDestroy(hit) => (8, hit),
            BehaviorType::TargetDestroy(hit) => (10, hit),
            BehaviorType::Platform(hit) => (12, hit),
            BehaviorType::Mob(hit) => (14, hit),
        };
        match hit {
            Hit::Inert => base,
            Hit::Damaging => base + 1,
        }
    }

    pub fn hit(self) -> Hit {
        match self {
            BehaviorType::NoCollision => Hit::Inert,
            BehaviorType::Keep(hit)
            | BehaviorType::Stop(hit)
            | BehaviorType::Revert(hit)
            | BehaviorType::MutualDestroy(hit)
            | BehaviorType::TargetDestroy(hit)
            | BehaviorType::Platform(hit)
            | BehaviorType::Mob(hit) => hit,
        }
    }

    #[inline]
    pub fn is_platform(self) -> bool {
        matches!(self, BehaviorType::Platform(_))
    }

    #[inline]
    pub fn is_mob(self) -> bool {
        matches!(self, BehaviorType::Mob(_) | BehaviorType::Platform(_))
    }
}

impl TryFrom<u8> for BehaviorType {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        let hit = Hit::from_parity(code);
        Ok(match code {
            1 => BehaviorType::NoCollision,
            2 | 3 => BehaviorType::Keep(hit),
            4 | 5 => BehaviorType::Stop(hit),
            6 | 7 => BehaviorType::Revert(hit),
            8 | 9 => BehaviorType::MutualDestroy(hit),
            10 | 11 => BehaviorType::TargetDestroy(hit),
            12 | 13 => BehaviorType::Platform(hit),
            14 | 15 => BehaviorType::Mob(hit),
            other => return Err(ConfigError::UnknownBehavior(other)),
        })
    }
}

impl From<BehaviorType> for u8 {
    fn from(behavior: BehaviorType) -> Self {
        behavior.code()
    }
}

/// Compass facing in screen coordinates (+y points south)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Facing {
    /// Facing implied by a velocity, `None` when it is zero
    pub fn from_velocity(vel: Vec2) -> Option<Self> {
        let sx = sign(vel.x);
        let sy = sign(vel.y);
        Some(match (sx, sy) {
            (0, -1) => Facing::N,
            (1, -1) => Facing::NE,
            (1, 0) => Facing::E,
            (1, 1) => Facing::SE,
            (0, 1) => Facing::S,
            (-1, 1) => Facing::SW,
            (-1, 0) => Facing::W,
            (-1, -1) => Facing::NW,
            _ => return None,
        })
    }

    /// Unit signs `(x, y)` of this facing
    pub fn signs(self) -> (i8, i8) {
        match self {
            Facing::N => (0, -1),
            Facing::NE => (1, -1),
            Facing::E => (1, 0),
            Facing::SE => (1, 1),
            Facing::S => (0, 1),
            Facing::SW => (-1, 1),
            Facing::W => (-1, 0),
            Facing::NW => (-1, -1),
        }
    }
}

#[inline]
fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Patrol bounds. Unset sides default to the map edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeLimit {
    pub min_x: Option<f32>,
    pub max_x: Option<f32>,
    pub min_y: Option<f32>,
    pub max_y: Option<f32>,
}

/// Velocity record. `vel` is the per-tick displacement before `speed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub vel: Vec2,
    pub speed: Option<f32>,
    /// Per-keypress acceleration (player only)
    pub increment: f32,
    /// Per-axis speed cap for keyboard acceleration
    pub max: Vec2,
    pub range_limit: Option<RangeLimit>,
}

impl Step {
    pub fn moving(vel: Vec2) -> Self {
        Self {
            vel,
            speed: None,
            increment: 1.0,
            max: Vec2::splat(f32::INFINITY),
            range_limit: None,
        }
    }

    /// Displacement applied this tick: `floor(vel * speed)` when scaled
    pub fn displacement(&self) -> Vec2 {
        match self.speed {
            Some(speed) => (self.vel * speed).floor(),
            None => self.vel,
        }
    }
}

/// Shield capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub charges: u32,
    pub reduce_factor: f32,
    /// Absorbed hits per charge when `durable`
    pub break_amount: u32,
    /// Durable shields stay up and spend a charge every `break_amount` blocks;
    /// simple shields spend a charge and drop on the first block
    pub durable: bool,
    pub up: bool,
    pub up_delay_ms: u64,
    #[serde(default)]
    pub blocked: u32,
    /// Earliest time a mob may raise this shield again
    #[serde(default)]
    pub raise_at: u64,
}

impl Shield {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.up && self.charges > 0
    }

    /// Absorb one hit. Returns true when a charge was spent.
    pub fn absorb(&mut self, now_ms: u64) -> bool {
        if !self.is_active() {
            return false;
        }
        let spent = if self.durable {
            self.blocked += 1;
            if self.blocked >= self.break_amount.max(1) {
                self.blocked = 0;
                true
            } else {
                false
            }
        } else {
            true
        };
        if spent {
            self.charges = self.charges.saturating_sub(1);
        }
        if !self.durable || self.charges == 0 {
            self.up = false;
            self.raise_at = now_ms.saturating_add(self.up_delay_ms);
        }
        spent
    }

    /// Player toggle: raise when down and charged, otherwise lower
    pub fn toggle(&mut self) {
        self.up = !self.up && self.charges > 0;
    }
}

/// Ammunition count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ammo {
    Infinite,
    Finite(u32),
}

impl Ammo {
    /// Level format: `-1` means infinite, negatives otherwise read as empty
    pub fn from_charges(charges: i64) -> Self {
        if charges == -1 {
            Ammo::Infinite
        } else {
            Ammo::Finite(u32::try_from(charges.max(0)).unwrap_or(u32::MAX))
        }
    }

    #[inline]
    pub fn is_available(self) -> bool {
        !matches!(self, Ammo::Finite(0))
    }

    /// Spend one round; infinite ammo never decrements
    pub fn consume(&mut self) {
        if let Ammo::Finite(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

/// Burst limiter: fire `max_hit_trigger` shots, then wait `time_to_wait_ms`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitPause {
    pub max_hit_trigger: u32,
    pub time_to_wait_ms: u64,
}

/// Ranged weapon capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub ammo: Ammo,
    pub shoot_speed: f32,
    /// Template of the spawned projectile (always a circle)
    pub projectile: Box<Entity>,
    /// Minimum delay between two automatic shots
    pub cadence_ms: u64,
    pub hit_pause: HitPause,
    #[serde(default)]
    pub next_shot_at: u64,
    #[serde(default)]
    pub burst: u32,
    #[serde(default)]
    pub paused_until: u64,
}

impl Weapon {
    /// Cadence and burst gate for automatic (mob) fire
    pub fn ready(&self, now_ms: u64) -> bool {
        self.ammo.is_available() && now_ms >= self.next_shot_at && now_ms >= self.paused_until
    }

    /// Record an automatic shot against the cadence and burst limiter
    pub fn record_burst_shot(&mut self, now_ms: u64) {
        self.next_shot_at = now_ms.saturating_add(self.cadence_ms);
        self.burst += 1;
        if self.burst >= self.hit_pause.max_hit_trigger.max(1) {
            self.burst = 0;
            self.paused_until = now_ms.saturating_add(self.hit_pause.time_to_wait_ms);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub shield: Option<Shield>,
    pub weapon: Option<Weapon>,
}

/// Mob aggro profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggro {
    /// Negative disables aggro entirely
    pub range: f32,
    pub group: Option<u32>,
    #[serde(default)]
    pub engaged: bool,
    /// Engaged by its own range test rather than through its group
    #[serde(default)]
    pub origin: bool,
    /// Patrol velocity saved on engage, restored on calm
    #[serde(default)]
    pub saved_vel: Option<Vec2>,
}

impl Aggro {
    pub fn new(range: f32, group: Option<u32>) -> Self {
        Self {
            range,
            group,
            engaged: false,
            origin: false,
            saved_vel: None,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.range >= 0.0
    }
}

/// Renderer-facing colors and fills
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub body: Option<Fill>,
    pub details: Option<Fill>,
}

/// Transient visual flags, reset at the start of every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub taking_damage: bool,
    pub shooting: bool,
}

/// The unit of simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: Option<String>,
    pub behavior: BehaviorType,
    pub shape: Shape,
    pub pos: Vec2,
    pub step: Option<Step>,
    pub facing: Option<Facing>,
    pub life: Option<i32>,
    pub max_life: Option<i32>,
    pub damage_taken_factor: i32,
    pub hit_bonus: i32,
    pub time_between_hits_ms: u64,
    pub aggro: Option<Aggro>,
    pub skills: Skills,
    pub style: Style,
    /// Shooter of a projectile; owners and their projectiles never collide
    pub owner: Option<EntityId>,
    /// Attacker hit-rate gate: damaging hits land only after this time
    #[serde(skip)]
    pub next_hit_at: Option<u64>,
    #[serde(skip)]
    pub flags: Flags,
    /// Tombstone: removed this tick, compacted at the end of the pass
    #[serde(skip)]
    pub(crate) despawned: bool,
}

impl Entity {
    fn with_shape(id: EntityId, pos: Vec2, shape: Shape, behavior: BehaviorType) -> Self {
        Self {
            id,
            name: None,
            behavior,
            shape,
            pos,
            step: None,
            facing: None,
            life: None,
            max_life: None,
            damage_taken_factor: crate::consts::DAMAGE_TAKEN_FACTOR,
            hit_bonus: 0,
            time_between_hits_ms: crate::consts::TIME_BETWEEN_HITS_MS,
            aggro: None,
            skills: Skills::default(),
            style: Style::default(),
            owner: None,
            next_hit_at: None,
            flags: Flags::default(),
            despawned: false,
        }
    }

    pub fn circle(id: EntityId, x: f32, y: f32, radius: f32, behavior: BehaviorType) -> Self {
        Self::with_shape(id, Vec2::new(x, y), Shape::Circle { radius }, behavior)
    }

    pub fn rect(
        id: EntityId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        behavior: BehaviorType,
    ) -> Self {
        Self::with_shape(id, Vec2::new(x, y), Shape::Rect { width, height }, behavior)
    }

    pub fn with_velocity(mut self, x: f32, y: f32) -> Self {
        self.step = Some(Step::moving(Vec2::new(x, y)));
        self
    }

    pub fn with_life(mut self, life: i32) -> Self {
        self.life = Some(life);
        self
    }

    pub fn with_hit_bonus(mut self, bonus: i32) -> Self {
        self.hit_bonus = bonus;
        self
    }

    pub fn with_defense(mut self, damage_taken_factor: i32) -> Self {
        self.damage_taken_factor = damage_taken_factor;
        self
    }

    pub fn with_aggro(mut self, range: f32, group: Option<u32>) -> Self {
        self.aggro = Some(Aggro::new(range, group));
        self
    }

    /// Geometric center (circle anchor, or rectangle midpoint)
    pub fn center(&self) -> Vec2 {
        match self.shape {
            Shape::Circle { .. } => self.pos,
            Shape::Rect { width, height } => self.pos + Vec2::new(width, height) / 2.0,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.step.as_ref().map_or(Vec2::ZERO, |s| s.vel)
    }

    /// Displacement for this tick, zero for static entities
    #[inline]
    pub fn displacement(&self) -> Vec2 {
        self.step.as_ref().map_or(Vec2::ZERO, Step::displacement)
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.displacement() != Vec2::ZERO
    }

    /// Tombstoned, or out of life
    #[inline]
    pub fn is_gone(&self) -> bool {
        self.despawned || self.life.is_some_and(|life| life <= 0)
    }

    #[inline]
    pub fn is_despawned(&self) -> bool {
        self.despawned
    }

    /// Tombstone this entity. The player only ever leaves play through its
    /// life, so this is a no-op for it.
    pub fn despawn(&mut self) -> bool {
        if self.id == PLAYER_ID {
            return false;
        }
        self.despawned = true;
        true
    }

    #[inline]
    pub fn shield_up(&self) -> bool {
        self.skills.shield.as_ref().is_some_and(Shield::is_active)
    }

    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.aggro.as_ref().is_some_and(|a| a.engaged)
    }

    /// Update the persisted facing from the current velocity.
    ///
    /// Only entities that carry a facing track one; a zero velocity keeps the
    /// last facing.
    pub fn refresh_facing(&mut self) -> Option<Facing> {
        if self.facing.is_some() {
            if let Some(facing) = Facing::from_velocity(self.velocity()) {
                self.facing = Some(facing);
            }
        }
        self.facing
    }

    /// Both sides of a projectile/shooter pair
    #[inline]
    pub fn related_to(&self, other: &Entity) -> bool {
        self.owner == Some(other.id) || other.owner == Some(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_codes_round_trip() {
        for (i, behavior) in BehaviorType::ALL.iter().enumerate() {
            let code = behavior.code();
            assert_eq!(code as usize, i + 1);
            assert_eq!(BehaviorType::try_from(code).ok(), Some(*behavior));
        }
        assert!(BehaviorType::try_from(0).is_err());
        assert!(BehaviorType::try_from(16).is_err());
    }

    #[test]
    fn test_damaging_codes_are_odd() {
        for behavior in BehaviorType::ALL {
            let odd = behavior.code() % 2 == 1 && behavior != BehaviorType::NoCollision;
            assert_eq!(behavior.hit() == Hit::Damaging, odd);
        }
    }

    #[test]
    fn test_facing_from_velocity() {
        assert_eq!(Facing::from_velocity(Vec2::new(2.0, 0.0)), Some(Facing::E));
        assert_eq!(Facing::from_velocity(Vec2::new(-1.0, -3.0)), Some(Facing::NW));
        assert_eq!(Facing::from_velocity(Vec2::new(0.0, 1.0)), Some(Facing::S));
        assert_eq!(Facing::from_velocity(Vec2::ZERO), None);
    }

    #[test]
    fn test_facing_persists_when_stopped() {
        let mut e = Entity::circle(1, 0.0, 0.0, 10.0, BehaviorType::Keep(Hit::Inert))
            .with_velocity(-1.0, 1.0);
        e.facing = Some(Facing::E);
        assert_eq!(e.refresh_facing(), Some(Facing::SW));

        if let Some(step) = e.step.as_mut() {
            step.vel = Vec2::ZERO;
        }
        assert_eq!(e.refresh_facing(), Some(Facing::SW));
    }

    #[test]
    fn test_entities_without_facing_stay_without() {
        let mut e = Entity::circle(1, 0.0, 0.0, 10.0, BehaviorType::Keep(Hit::Inert))
            .with_velocity(3.0, 0.0);
        assert_eq!(e.refresh_facing(), None);
    }

    #[test]
    fn test_speed_scaled_displacement_floors() {
        let mut step = Step::moving(Vec2::new(3.0, -3.0));
        step.speed = Some(0.5);
        assert_eq!(step.displacement(), Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_rect_center() {
        let e = Entity::rect(1, 10.0, 20.0, 40.0, 60.0, BehaviorType::Stop(Hit::Inert));
        assert_eq!(e.center(), Vec2::new(30.0, 50.0));
    }

    #[test]
    fn test_simple_shield_drops_after_one_block() {
        let mut shield = Shield {
            charges: 2,
            reduce_factor: 2.0,
            break_amount: 5,
            durable: false,
            up: true,
            up_delay_ms: 1000,
            blocked: 0,
            raise_at: 0,
        };
        assert!(shield.absorb(500));
        assert_eq!(shield.charges, 1);
        assert!(!shield.up);
        assert_eq!(shield.raise_at, 1500);
        assert!(!shield.absorb(600));
        assert_eq!(shield.charges, 1);
    }

    #[test]
    fn test_durable_shield_spends_after_break_amount() {
        let mut shield = Shield {
            charges: 1,
            reduce_factor: 2.0,
            break_amount: 3,
            durable: true,
            up: true,
            up_delay_ms: 0,
            blocked: 0,
            raise_at: 0,
        };
        assert!(!shield.absorb(0));
        assert!(!shield.absorb(0));
        assert!(shield.up);
        assert!(shield.absorb(0));
        assert_eq!(shield.charges, 0);
        assert!(!shield.up);
    }

    #[test]
    fn test_shield_toggle_requires_charges() {
        let mut shield = Shield {
            charges: 0,
            reduce_factor: 2.0,
            break_amount: 5,
            durable: false,
            up: false,
            up_delay_ms: 0,
            blocked: 0,
            raise_at: 0,
        };
        shield.toggle();
        assert!(!shield.up);
        shield.charges = 1;
        shield.toggle();
        assert!(shield.up);
        shield.toggle();
        assert!(!shield.up);
    }

    #[test]
    fn test_huge_delays_saturate() {
        let mut shield = Shield {
            charges: 2,
            reduce_factor: 2.0,
            break_amount: 5,
            durable: false,
            up: true,
            up_delay_ms: u64::MAX,
            blocked: 0,
            raise_at: 0,
        };
        assert!(shield.absorb(10));
        assert_eq!(shield.raise_at, u64::MAX);

        let bullet = Entity::circle(0, 0.0, 0.0, 4.0, BehaviorType::MutualDestroy(Hit::Damaging));
        let mut weapon = Weapon {
            ammo: Ammo::Infinite,
            shoot_speed: 5.0,
            projectile: Box::new(bullet),
            cadence_ms: u64::MAX,
            hit_pause: HitPause {
                max_hit_trigger: 1,
                time_to_wait_ms: u64::MAX,
            },
            next_shot_at: 0,
            burst: 0,
            paused_until: 0,
        };
        weapon.record_burst_shot(10);
        assert_eq!(weapon.next_shot_at, u64::MAX);
        assert_eq!(weapon.paused_until, u64::MAX);
        assert!(!weapon.ready(u64::MAX - 1));
    }

    #[test]
    fn test_ammo() {
        let mut ammo = Ammo::from_charges(-1);
        ammo.consume();
        assert_eq!(ammo, Ammo::Infinite);

        let mut ammo = Ammo::from_charges(1);
        assert!(ammo.is_available());
        ammo.consume();
        assert_eq!(ammo, Ammo::Finite(0));
        assert!(!ammo.is_available());
        ammo.consume();
        assert_eq!(ammo, Ammo::Finite(0));
    }
}
