//! End-to-end runs through the public API with a headless surface.

use glam::Vec2;

use number_rain::persistence::MemoryStorage;
use number_rain::platform::HeadlessSurface;
use number_rain::sim::{GamePhase, GameState, ObjectId, Selection, advance, start_run};
use number_rain::{Game, HighScores, Tier, Tuning, WrongPickPolicy};

type TestGame = Game<HeadlessSurface, MemoryStorage>;

fn new_game(tuning: Tuning, storage: MemoryStorage) -> TestGame {
    Game::new(
        HeadlessSurface::new(Vec2::new(400.0, 600.0)),
        storage,
        tuning,
        20240611,
    )
}

fn required_id(game: &TestGame) -> ObjectId {
    game.state()
        .pool
        .required_instance()
        .expect("a required disc is always on the board while running")
        .id
}

#[test]
fn five_correct_clicks_on_easy() {
    let mut game = new_game(Tuning::default(), MemoryStorage::new());
    game.start(Tier::Easy).expect("idle game starts");

    for expected in 1..=5 {
        let id = required_id(&game);
        let value = game.state().pool.get(id).map(|o| o.value);
        assert_eq!(value, Some(expected));
        assert_eq!(game.select(id), Selection::Matched);
        game.advance(16);
    }

    let session = game.session();
    assert_eq!(session.score, 5);
    assert_eq!(session.required_number, 6);
    assert!((session.fall_speed - 2.0).abs() < 0.0001);
    assert_eq!(session.spawn_interval_ms, 1300);
    assert_eq!(game.phase(), GamePhase::Running);
}

#[test]
fn untouched_required_disc_ends_the_run() {
    let mut storage = MemoryStorage::new();
    HighScores::from_scores([8, 4])
        .save(&mut storage)
        .expect("memory writes");
    let mut game = new_game(Tuning::default(), storage);
    game.start(Tier::Easy).expect("idle game starts");

    let mut elapsed = 0;
    while game.phase() == GamePhase::Running && elapsed < 20_000 {
        game.advance(16);
        elapsed += 16;
    }

    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.session().score, 0);
    assert_eq!(game.high_scores().top_scores(), &[8, 4]);
    assert_eq!(HighScores::load(game.storage()).top_scores(), &[8, 4]);
    assert!(game.surface().is_empty());
}

#[test]
fn decoy_matching_required_value_falls_off_harmlessly() {
    // Every scheduled spawn carries the required number
    let tuning = Tuning {
        decoy_match_chance: 1.0,
        ..Tuning::default()
    };
    let mut game = new_game(tuning, MemoryStorage::new());
    game.start(Tier::Hard).expect("idle game starts");

    // First decoy spawns at 700 ms; click the required disc out of the way
    game.advance(700);
    let decoy = game
        .state()
        .pool
        .iter()
        .find(|o| !o.required)
        .map(|o| o.id)
        .expect("decoy spawned");
    let required = required_id(&game);
    // Keep the real one safe by matching it; the decoy now shows the old number
    assert_eq!(game.select(required), Selection::Matched);

    let mut elapsed = 0;
    while game.state().pool.contains(decoy) && elapsed < 20_000 {
        game.advance(16);
        elapsed += 16;
        // Keep catching the required disc so the run survives
        if let Some(obj) = game.state().pool.required_instance() {
            if obj.pos.y > 300.0 {
                let id = obj.id;
                game.select(id);
            }
        }
    }

    assert!(!game.state().pool.contains(decoy));
    assert_eq!(game.phase(), GamePhase::Running);
}

#[test]
fn decoy_with_current_required_value_crossing_floor_does_not_end_run() {
    let mut state = GameState::new(99, Tuning::default());
    state.set_area(Vec2::new(400.0, 600.0));
    start_run(&mut state, Tier::Easy).expect("idle state starts");

    // A plain decoy showing the number the player needs, about to land
    let decoy = state.pool.insert(1, Vec2::new(200.0, 599.0), false);
    advance(&mut state, 16);

    assert!(!state.pool.contains(decoy));
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.session.required_number, 1);
    assert!(state.pool.required_instance().is_some());
}

#[test]
fn wrong_pick_policy_end_run_records_score() {
    let tuning = Tuning {
        wrong_pick: WrongPickPolicy::EndRun,
        decoy_match_chance: 0.0,
        ..Tuning::default()
    };
    let mut game = new_game(tuning, MemoryStorage::new());
    game.start(Tier::Medium).expect("idle game starts");
    for _ in 0..2 {
        let id = required_id(&game);
        game.select(id);
    }

    // Anything not showing 3 is a wrong pick
    game.advance(1000);
    let wrong = game
        .state()
        .pool
        .iter()
        .find(|o| o.value != 3)
        .map(|o| o.id)
        .expect("a decoy spawned within the first interval");
    assert_eq!(game.select(wrong), Selection::GameOver);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.high_scores().top_scores(), &[2]);
}

#[test]
fn restart_after_game_over_resets_session() {
    let mut game = new_game(Tuning::default(), MemoryStorage::new());
    game.start(Tier::Hard).expect("idle game starts");
    let id = required_id(&game);
    game.select(id);
    game.advance(60_000);
    assert_eq!(game.phase(), GamePhase::GameOver);

    // Stale click from the previous run
    assert_eq!(game.select(id), Selection::Ignored);

    game.start(Tier::Easy).expect("game over restarts");
    assert_eq!(game.session().score, 0);
    assert_eq!(game.session().required_number, 1);
    assert_eq!(game.surface().len(), 1);
    assert_eq!(game.high_scores().top_scores(), &[1]);
}

#[test]
fn leaderboard_keeps_best_three_across_runs() {
    let mut game = new_game(Tuning::default(), MemoryStorage::new());
    for matches in [2, 5, 1, 4] {
        game.start(Tier::Easy).expect("previous run is over");
        for _ in 0..matches {
            let id = required_id(&game);
            game.select(id);
        }
        game.advance(60_000);
        assert_eq!(game.phase(), GamePhase::GameOver);
    }
    assert_eq!(game.high_scores().top_scores(), &[5, 4, 2]);
}
