//! Per-frame simulation tick
//!
//! One call advances the session by one frame, in a fixed order: player
//! actions, match clock, moving elements, player, mob AI, compaction and the
//! game-over check. Every step reads the timestamp injected through
//! [`TickInput`], never the system clock.

use super::collision;
use super::combat::{self, HitReport};
use super::entity::{Axis, Flags, PLAYER_ID};
use super::state::{GameEvent, GameSession};
use super::{aggro, movement, player, spawn};
use crate::config::CombatDefaults;
use crate::input::Action;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Wall-clock timestamp of this frame
    pub now_ms: u64,
    /// Decoded player actions, applied in order before anything moves
    pub actions: Vec<Action>,
}

impl TickInput {
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput) {
    session.now_ms = input.now_ms;

    // Only a restart gets through once the match is over
    if session.is_over() {
        if input.actions.contains(&Action::Restart) {
            if let Err(err) = session.restart() {
                log::error!("Restart failed: {err}");
            }
        }
        return;
    }

    for entity in session.map.elements.iter_mut() {
        entity.flags = Flags::default();
    }
    session.player.flags = Flags::default();

    for &action in &input.actions {
        apply_action(session, action);
    }

    let seconds = session.clock.poll(input.now_ms);
    for _ in 0..seconds.min(session.map.timer) {
        session.on_second();
    }

    let config = session.config_handle();
    let defaults = &config.defaults;

    let reports = element_pass(session, defaults);
    record_hits(session, reports);

    let reports = player_pass(session, defaults);
    record_hits(session, reports);

    aggro::update(session);

    for id in session.map.compact() {
        log::debug!("Element {id} removed");
        session.push_event(GameEvent::Removed { id });
    }

    if session.player.life.is_some_and(|life| life <= 0) {
        session.end();
    }

    session.time_ticks += 1;
}

fn apply_action(session: &mut GameSession, action: Action) {
    match action {
        Action::Move(direction) => player::apply_move(&mut session.player, direction),
        Action::Stop => player::stop(&mut session.player),
        Action::ToggleShield => {
            let up = player::toggle_shield(&mut session.player);
            log::debug!("Player shield {}", if up { "up" } else { "down" });
        }
        Action::Fire => fire_player_weapon(session),
        // Ignored while the match is running
        Action::Restart => {}
    }
}

fn fire_player_weapon(session: &mut GameSession) {
    if !spawn::can_fire(&session.player) {
        return;
    }
    let Some(aim) = spawn::aim_of(&session.player) else {
        return;
    };
    let spread = session.defaults().projectile_id_spread;
    let id = spawn::fresh_id(
        &session.map.elements,
        &mut session.last_issued_id,
        &mut session.rng,
        spread,
    );
    if let Some(projectile) = spawn::fire(&mut session.player, aim, id) {
        session.map.elements.push(projectile);
        session.push_event(GameEvent::Shot {
            shooter: PLAYER_ID,
            projectile: id,
        });
    }
}

/// Move every live element with a step and resolve its collisions against
/// the player and the rest of the map
fn element_pass(session: &mut GameSession, defaults: &CombatDefaults) -> Vec<HitReport> {
    let now = session.now_ms;
    let GameSession { map, player, rng, .. } = session;
    let bounds = map.bounds;
    let border = map.border;
    let mut reports = Vec::new();

    for i in 0..map.elements.len() {
        let element = &mut map.elements[i];
        if element.is_gone() || element.step.is_none() {
            continue;
        }

        movement::integrate(element);
        movement::apply_range_limit(element, bounds);
        for axis in Axis::BOTH {
            collision::border_bounce(element, bounds, border, axis);
        }

        let report = collision::sweep_pair(element, player, defaults);
        collision::apply_removals(element, player, report);
        if report.damage_eligible {
            reports.extend(combat::exchange(element, player, rng, now, defaults));
        }

        if !element.is_gone() {
            if let Some(j) = collision::scan_elements(&mut map.elements, i, defaults) {
                let (origin, target) = collision::pair_mut(&mut map.elements, i, j);
                reports.extend(combat::exchange(origin, target, rng, now, defaults));
            }
        }
        map.elements[i].refresh_facing();
    }
    reports
}

fn player_pass(session: &mut GameSession, defaults: &CombatDefaults) -> Vec<HitReport> {
    let now = session.now_ms;
    let GameSession { map, player, rng, .. } = session;
    let mut reports = Vec::new();

    movement::integrate(player);
    for axis in Axis::BOTH {
        collision::border_bounce(player, map.bounds, map.border, axis);
    }
    if let Some(j) = collision::scan_from_outside(player, &mut map.elements, defaults) {
        reports.extend(combat::exchange(player, &mut map.elements[j], rng, now, defaults));
    }
    player.refresh_facing();
    reports
}

fn record_hits(session: &mut GameSession, reports: Vec<HitReport>) {
    for report in reports {
        let target = report.target;
        let charges_left = report
            .shield_spent
            .then(|| session.entity(target))
            .flatten()
            .and_then(|e| e.skills.shield.as_ref())
            .map(|s| s.charges);
        session.push_event(GameEvent::Hit(report));
        if let Some(charges_left) = charges_left {
            session.push_event(GameEvent::ShieldBroken {
                id: target,
                charges_left,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::Direction;
    use crate::sim::{Ammo, GamePhase};
    use glam::Vec2;
    use std::sync::Arc;

    fn session(seed: u64) -> GameSession {
        let config = Arc::new(GameConfig::preset().unwrap());
        GameSession::new(config, seed).unwrap()
    }

    #[test]
    fn test_player_moves_after_accelerating() {
        let mut s = session(1);
        let start = s.player.pos;
        tick(&mut s, &TickInput::at(0).with_action(Action::Move(Direction::Right)));
        assert_eq!(s.player.velocity(), Vec2::new(1.0, 0.0));
        assert_eq!(s.player.pos, start + Vec2::new(1.0, 0.0));
        assert_eq!(s.time_ticks, 1);
    }

    #[test]
    fn test_fire_spawns_projectile_and_spends_ammo() {
        let mut s = session(2);
        let before = s.map.elements.len();
        tick(&mut s, &TickInput::at(0).with_action(Action::Fire));

        assert!(s.player.flags.shooting);
        let ammo = s.player.skills.weapon.as_ref().map(|w| w.ammo);
        assert_eq!(ammo, Some(Ammo::Finite(199)));
        let events = s.drain_events();
        let shot = events.iter().find_map(|e| match e {
            GameEvent::Shot { shooter: PLAYER_ID, projectile } => Some(*projectile),
            _ => None,
        });
        let projectile = shot.unwrap();
        assert!(projectile > 14);
        assert_eq!(s.map.elements.len(), before + 1);
        assert_eq!(s.map.get(projectile).and_then(|p| p.owner), Some(PLAYER_ID));
    }

    #[test]
    fn test_flags_reset_each_tick() {
        let mut s = session(3);
        tick(&mut s, &TickInput::at(0).with_action(Action::Fire));
        assert!(s.player.flags.shooting);
        tick(&mut s, &TickInput::at(16));
        assert!(!s.player.flags.shooting);
    }

    #[test]
    fn test_clock_drains_every_fifth_second() {
        let mut s = session(4);
        for second in 0..=5u64 {
            tick(&mut s, &TickInput::at(second * 1000));
        }
        assert_eq!(s.map.timer, 895);
        let drains: Vec<_> = s
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Drain { .. }))
            .collect();
        assert_eq!(drains.len(), 1);
    }

    #[test]
    fn test_game_over_blocks_everything_but_restart() {
        let mut s = session(5);
        s.player.life = Some(0);
        tick(&mut s, &TickInput::at(0));
        assert_eq!(s.phase, GamePhase::GameOver);
        let ticks = s.time_ticks;

        let pos = s.player.pos;
        tick(&mut s, &TickInput::at(16).with_action(Action::Move(Direction::Up)));
        assert_eq!(s.player.pos, pos);
        assert_eq!(s.time_ticks, ticks);

        tick(&mut s, &TickInput::at(32).with_action(Action::Restart));
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.player.life, Some(500));
        assert_eq!(s.time_ticks, 0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut s = session(6);
        let seed = s.seed;
        tick(&mut s, &TickInput::at(0).with_action(Action::Restart));
        assert_eq!(s.seed, seed);
        assert_eq!(s.time_ticks, 1);
    }

    #[test]
    fn test_determinism() {
        let mut s1 = session(99_999);
        let mut s2 = session(99_999);

        let script = [
            Action::Move(Direction::Left),
            Action::Move(Direction::Left),
            Action::Fire,
            Action::Move(Direction::Down),
            Action::ToggleShield,
            Action::Fire,
        ];
        for frame in 0..600u64 {
            let mut input = TickInput::at(frame * 16);
            if frame % 50 == 0 {
                input.actions.push(script[(frame / 50) as usize % script.len()]);
            }
            tick(&mut s1, &input);
            tick(&mut s2, &input);
        }

        assert_eq!(s1.time_ticks, s2.time_ticks);
        assert_eq!(s1.player, s2.player);
        assert_eq!(s1.map.elements, s2.map.elements);
        assert_eq!(s1.drain_events(), s2.drain_events());
    }
}
