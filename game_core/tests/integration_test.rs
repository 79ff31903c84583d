use game_core::*;
use glam::Vec2;

/// Opponent never blocks or attacks, every punch does exactly 10
fn scripted_config() -> Config {
    Config {
        opponent_block_chance: 0.0,
        opponent_attack_chance: 0.0,
        punch_damage_min: 10,
        punch_damage_max: 10,
        ..Config::new()
    }
}

/// Punch `count` times, spaced past the cooldown, starting at `start_ms`
fn punch_times(session: &mut MatchSession, count: u64, start_ms: u64) -> u64 {
    let mut now = start_ms;
    for _ in 0..count {
        session.observe(GestureType::RightPunch, now);
        now += 600;
    }
    now
}

fn hand(handedness: Handedness, tip_distance: f32) -> TrackedHand {
    let wrist = Vec2::new(0.5, 0.6);
    let mut landmarks = vec![wrist; LANDMARK_COUNT];
    for tip in FINGERTIPS {
        landmarks[tip] = wrist + Vec2::new(0.0, -tip_distance);
    }
    TrackedHand::new(handedness, landmarks)
}

#[test]
fn test_knockout_before_time_is_victory() {
    let mut session = MatchSession::new(scripted_config(), 99);

    for _ in 0..5 {
        session.tick();
    }
    punch_times(&mut session, 10, 0);

    assert_eq!(session.outcome(), Some(Outcome::Victory));
    let result = session.take_result().expect("result after knockout");
    assert_eq!(result.outcome(), Outcome::Victory);
    assert_eq!(result.time_elapsed(), 60 - session.time_left());
    assert_eq!(result.time_elapsed(), 5);
    assert_eq!(result.final_health(), 100);
    assert_eq!(result.damage_dealt(), 1_000);
    assert_eq!(result.max_combo(), 10);
}

#[test]
fn test_time_up_while_behind_is_defeat() {
    // First unblocked attack takes the player to 40, blocking holds it there
    let config = Config {
        opponent_attack_chance: 1.0,
        opponent_attack_damage: 60,
        ..scripted_config()
    };
    let mut session = MatchSession::new(config, 3);

    let now = punch_times(&mut session, 5, 0);
    session.observe(GestureType::Idle, now);
    session.tick();
    assert_eq!(session.player_stats().health, 40);

    session.observe(GestureType::Block, now + 100);
    for _ in 0..59 {
        session.tick();
    }

    assert_eq!(session.time_left(), 0);
    assert_eq!(session.opponent_health().cur, 50);
    assert_eq!(session.outcome(), Some(Outcome::Defeat));
    let result = session.take_result().unwrap();
    assert_eq!(result.time_elapsed(), 60);
    assert_eq!(result.final_health(), 40);
}

#[test]
fn test_time_up_while_ahead_is_victory() {
    let config = Config {
        opponent_attack_chance: 1.0,
        opponent_attack_damage: 50,
        ..scripted_config()
    };
    let mut session = MatchSession::new(config, 4);

    session.tick();
    assert_eq!(session.player_stats().health, 50);

    let now = punch_times(&mut session, 6, 10_000);
    session.observe(GestureType::Block, now);
    for _ in 0..59 {
        session.tick();
    }

    assert_eq!(session.opponent_health().cur, 40);
    assert_eq!(session.outcome(), Some(Outcome::Victory));
}

#[test]
fn test_player_knockout_is_defeat() {
    let config = Config {
        opponent_attack_chance: 1.0,
        ..scripted_config()
    };
    let mut session = MatchSession::new(config, 5);

    // 8 damage a tick: 12 ticks leave 4 health, the 13th ends it
    let mut ticks = 0;
    while !session.is_over() {
        session.tick();
        ticks += 1;
    }

    assert_eq!(ticks, 13);
    assert_eq!(session.outcome(), Some(Outcome::Defeat));
    assert_eq!(session.player_stats().health, 0);
    assert_eq!(session.take_result().unwrap().time_elapsed(), 13);
}

#[test]
fn test_cooldown_in_a_live_match() {
    let mut session = MatchSession::new(scripted_config(), 6);

    session.observe(GestureType::RightPunch, 2_000);
    session.observe(GestureType::RightPunch, 2_300);

    assert_eq!(session.player_stats().score, 100);
    assert_eq!(session.opponent_health().cur, 90);
}

#[test]
fn test_combo_resets_after_unblocked_attack() {
    let config = Config {
        opponent_attack_chance: 1.0,
        opponent_attack_damage: 1,
        ..scripted_config()
    };
    let mut session = MatchSession::new(config, 8);

    let now = punch_times(&mut session, 9, 0);
    assert_eq!(session.player_stats().combo, 9);

    session.observe(GestureType::Idle, now);
    let events = session.tick();
    assert!(events.player_damaged);
    assert_eq!(session.player_stats().combo, 0);
}

#[test]
fn test_hands_drive_the_match() {
    let mut session = MatchSession::new(scripted_config(), 9);
    let threshold = session.config().fist_threshold;

    // Double fist is a block and never punches
    let double_fist = [hand(Handedness::Left, 0.1), hand(Handedness::Right, 0.1)];
    let gesture = classify_gesture(&double_fist, threshold);
    assert_eq!(gesture, GestureType::Block);
    session.observe(gesture, 0);
    assert_eq!(session.opponent_health().cur, 100);

    let right_fist = [hand(Handedness::Right, 0.1)];
    let gesture = classify_gesture(&right_fist, threshold);
    assert_eq!(gesture, GestureType::RightPunch);
    session.observe(gesture, 1_000);
    assert_eq!(session.opponent_health().cur, 90);
    assert_eq!(session.gesture(), GestureType::RightPunch);
}

#[test]
fn test_health_display_stays_clamped_over_a_match() {
    let mut session = MatchSession::new(Config::new(), 2024);
    let mut now = 0;
    while !session.is_over() {
        session.observe(GestureType::LeftPunch, now);
        now += 250;
        if now % 1_000 == 0 {
            session.tick();
        }
        assert!(session.player_health().percent() <= 100);
        assert!(session.opponent_health().percent() <= 100);
        assert!(session.opponent_health().cur >= 0);
    }
}

#[test]
fn test_health_display_with_huge_max_health() {
    let config = Config {
        max_health: 50_000_000,
        ..scripted_config()
    };
    let mut session = MatchSession::new(config, 5);
    assert_eq!(session.player_health().percent(), 100);
    assert_eq!(session.opponent_health().percent(), 100);

    punch_times(&mut session, 3, 0);
    assert_eq!(session.opponent_health().percent(), 99);
}
