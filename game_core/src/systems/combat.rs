use hecs::World;
use rand::Rng;

use crate::components::*;
use crate::resources::*;
use crate::{Config, GestureType};

/// Resolve an accepted punch against the opponent.
///
/// The opponent may block; otherwise it takes a random hit and the player
/// extends their combo and scores.
pub fn resolve_punch(
    world: &mut World,
    gesture: GestureType,
    config: &Config,
    rng: &mut GameRng,
    events: &mut Events,
) -> PunchOutcome {
    if rng.0.gen_bool(config.opponent_block_chance) {
        log::debug!("{} blocked", gesture.label());
        let outcome = PunchOutcome::Blocked { gesture };
        events.punch = Some(outcome);
        return outcome;
    }

    let damage = rng
        .0
        .gen_range(config.punch_damage_min..=config.punch_damage_max);

    for (_e, (fighter, health)) in world.query_mut::<(&Fighter, &mut Health)>() {
        if fighter.side == Side::Opponent {
            health.take(damage);
        }
    }
    for (_e, (fighter, combo, score)) in world.query_mut::<(&Fighter, &mut Combo, &mut Score)>() {
        if fighter.side == Side::Player {
            combo.hit();
            score.add(config.hit_score);
        }
    }

    log::debug!("{} landed for {}", gesture.label(), damage);
    let outcome = PunchOutcome::Landed { gesture, damage };
    events.punch = Some(outcome);
    outcome
}

/// Roll for an opponent attack. Blocking absorbs it; anything else costs
/// health and breaks the combo.
pub fn opponent_attack(
    world: &mut World,
    guard: &Guard,
    config: &Config,
    rng: &mut GameRng,
    events: &mut Events,
) {
    if !rng.0.gen_bool(config.opponent_attack_chance) {
        return;
    }
    events.opponent_attacked = true;

    if guard.is_blocking() {
        log::debug!("Opponent attack blocked");
        return;
    }

    for (_e, (fighter, health, combo)) in world.query_mut::<(&Fighter, &mut Health, &mut Combo)>() {
        if fighter.side == Side::Player {
            health.take(config.opponent_attack_damage);
            combo.reset();
        }
    }
    events.player_damaged = true;
}
