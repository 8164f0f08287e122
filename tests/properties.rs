//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use zenos::config::CombatDefaults;
use zenos::sim::aggro::{Engagement, assess};
use zenos::sim::movement::integrate;
use zenos::sim::spawn::fire;
use zenos::sim::{
    Ammo, BehaviorType, Entity, Hit, HitPause, PLAYER_ID, Shape, Shield, Weapon, apply_hit,
    resolve, sweep_pair,
};

fn damaging_hitter(bonus: i32) -> Entity {
    Entity::circle(1, 0.0, 0.0, 10.0, BehaviorType::Revert(Hit::Damaging)).with_hit_bonus(bonus)
}

fn behavior() -> impl Strategy<Value = BehaviorType> {
    (0..BehaviorType::ALL.len()).prop_map(|i| BehaviorType::ALL[i])
}

proptest! {
    #[test]
    fn life_stays_between_zero_and_ceiling(
        life in 1..2000i32,
        headroom in 0..500i32,
        defense in -10..200i32,
        bonuses in prop::collection::vec(-1000..1000i32, 1..40),
        seed: u64,
    ) {
        let defaults = CombatDefaults::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let ceiling = life + headroom;
        let mut taker = Entity::circle(PLAYER_ID, 0.0, 0.0, 20.0, BehaviorType::Keep(Hit::Damaging))
            .with_life(life)
            .with_defense(defense);
        taker.max_life = Some(ceiling);

        for (i, bonus) in bonuses.into_iter().enumerate() {
            let mut hitter = damaging_hitter(bonus);
            apply_hit(&mut hitter, &mut taker, &mut rng, i as u64 * 1000, &defaults);
            let current = taker.life.unwrap_or(-1);
            prop_assert!((0..=ceiling).contains(&current), "life {}", current);
        }
    }

    #[test]
    fn shield_spends_at_most_one_charge_per_hit(
        charges in 0..20u32,
        durable: bool,
        break_amount in 0..6u32,
        hits in 1..60usize,
        seed: u64,
    ) {
        let defaults = CombatDefaults::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut taker = Entity::circle(PLAYER_ID, 0.0, 0.0, 20.0, BehaviorType::Keep(Hit::Damaging))
            .with_life(i32::MAX / 2);
        taker.skills.shield = Some(Shield {
            charges,
            reduce_factor: 2.0,
            break_amount,
            durable,
            up: charges > 0,
            up_delay_ms: 0,
            blocked: 0,
            raise_at: 0,
        });

        for i in 0..hits {
            let before = taker.skills.shield.as_ref().map_or(0, |s| s.charges);
            let mut hitter = damaging_hitter(100);
            let report = apply_hit(&mut hitter, &mut taker, &mut rng, i as u64 * 1000, &defaults);
            let shield = taker.skills.shield.as_mut().unwrap();
            prop_assert!(shield.charges <= before);
            prop_assert!(before - shield.charges <= 1);
            if let Some(report) = report {
                prop_assert_eq!(report.shield_spent, before != shield.charges);
            }
            if !shield.up {
                shield.toggle();
            }
        }
    }

    #[test]
    fn approaching_circle_never_tunnels(
        r in 2..40u32,
        big_r in 2..60u32,
        gap in 1..300u32,
        speed_frac in 0.05f32..0.5,
    ) {
        let (r, big_r, gap) = (r as f32, big_r as f32, gap as f32);
        let reach = r + big_r;
        let speed = (reach * speed_frac).floor().max(1.0);
        let defaults = CombatDefaults::default();

        let target = Entity::circle(1, 1000.0, 500.0, big_r, BehaviorType::Stop(Hit::Inert));
        let mut origin = Entity::circle(2, 1000.0 - reach - gap, 500.0, r, BehaviorType::Keep(Hit::Inert))
            .with_velocity(speed, 0.0);

        let deadline = (gap / speed).ceil() as u32;
        let mut hit_at = None;
        for frame in 1..=deadline + 1 {
            integrate(&mut origin);
            if sweep_pair(&mut origin, &target, &defaults).collided {
                hit_at = Some(frame);
                break;
            }
        }
        let hit_at = hit_at.unwrap_or(u32::MAX);
        prop_assert!(hit_at <= deadline, "hit at {} past {}", hit_at, deadline);
        prop_assert!((origin.pos.distance(target.pos) - reach).abs() < 1e-3);
        prop_assert_eq!(origin.velocity().x, 0.0);
    }

    #[test]
    fn response_is_a_function_of_the_pair(
        origin_type in behavior(),
        target_type in behavior(),
        x in 80.0f32..120.0,
        y in 80.0f32..120.0,
        vx in -5i32..5,
        vy in -5i32..5,
    ) {
        let defaults = CombatDefaults::default();
        prop_assert_eq!(
            resolve(origin_type, target_type, &defaults),
            resolve(origin_type, target_type, &defaults)
        );

        let target = Entity::circle(1, 100.0, 100.0, 15.0, target_type);
        let mut a = Entity::circle(2, x, y, 10.0, origin_type).with_velocity(vx as f32, vy as f32);
        let mut b = a.clone();
        let first = sweep_pair(&mut a, &target, &defaults);
        let second = sweep_pair(&mut b, &target, &defaults);
        prop_assert_eq!(first, second);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn disabled_aggro_never_engages(px in 0.0f32..800.0, py in 0.0f32..600.0, group in prop::option::of(0..3u32)) {
        let player = Entity::circle(PLAYER_ID, px, py, 20.0, BehaviorType::Keep(Hit::Damaging));
        let elements = vec![
            Entity::circle(1, px, py, 10.0, BehaviorType::Mob(Hit::Damaging))
                .with_life(100)
                .with_aggro(-1.0, group),
            Entity::circle(2, px + 1.0, py, 10.0, BehaviorType::Mob(Hit::Damaging))
                .with_life(100)
                .with_aggro(500.0, group),
        ];
        let plan = assess(&elements, &player);
        prop_assert_eq!(plan[0], None);
        prop_assert!(plan[1].is_some_and(|e| e.engaged));
    }

    #[test]
    fn group_peer_pulls_member_in(
        far_x in 2000.0f32..5000.0,
        far_y in -5000.0f32..5000.0,
        near_offset in 0.0f32..100.0,
    ) {
        let player = Entity::circle(PLAYER_ID, 0.0, 0.0, 20.0, BehaviorType::Keep(Hit::Damaging));
        let elements = vec![
            Entity::circle(1, far_x, far_y, 10.0, BehaviorType::Mob(Hit::Damaging))
                .with_life(100)
                .with_aggro(50.0, Some(9)),
            Entity::circle(2, near_offset, 0.0, 10.0, BehaviorType::Mob(Hit::Damaging))
                .with_life(100)
                .with_aggro(150.0, Some(9)),
        ];
        let plan = assess(&elements, &player);
        prop_assert_eq!(plan[0], Some(Engagement { engaged: true, origin: false }));
        prop_assert_eq!(plan[1], Some(Engagement { engaged: true, origin: true }));
    }

    #[test]
    fn projectile_spawns_outside_shooter(
        circle_shooter: bool,
        size in 5.0f32..80.0,
        aspect in 0.25f32..4.0,
        projectile_radius in 1.0f32..20.0,
        aim_x in -1i8..=1,
        aim_y in -1i8..=1,
    ) {
        prop_assume!((aim_x, aim_y) != (0, 0));
        let behavior = BehaviorType::Keep(Hit::Damaging);
        let mut shooter = if circle_shooter {
            Entity::circle(PLAYER_ID, 400.0, 300.0, size, behavior)
        } else {
            Entity::rect(PLAYER_ID, 400.0, 300.0, size, size * aspect, behavior)
        };
        let template = Entity::circle(0, 0.0, 0.0, projectile_radius, BehaviorType::MutualDestroy(Hit::Damaging));
        shooter.skills.weapon = Some(Weapon {
            ammo: Ammo::Infinite,
            shoot_speed: 10.0,
            projectile: Box::new(template),
            cadence_ms: 0,
            hit_pause: HitPause { max_hit_trigger: 5, time_to_wait_ms: 0 },
            next_shot_at: 0,
            burst: 0,
            paused_until: 0,
        });

        let projectile = fire(&mut shooter, (aim_x, aim_y), 99).unwrap();
        let gap = match shooter.shape {
            Shape::Circle { radius } => projectile.pos.distance(shooter.pos) - radius,
            Shape::Rect { width, height } => {
                let closest = projectile.pos.clamp(shooter.pos, shooter.pos + Vec2::new(width, height));
                projectile.pos.distance(closest)
            }
        };
        prop_assert!(gap > projectile_radius, "gap {} radius {}", gap, projectile_radius);
        prop_assert!(!sweep_pair(&mut projectile.clone(), &shooter, &CombatDefaults::default()).collided);
    }
}
