use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use odi_terminal::dataset::{self, Dataset};
use odi_terminal::leaderboard::RoleChoice;
use odi_terminal::query::BannerLevel;
use odi_terminal::state::{AppState, InputMode};

fn sample() -> Dataset {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("odi_sample.csv");
    dataset::load(&path).expect("fixture should load")
}

#[test]
fn role_change_resets_selection_and_logs() {
    let ds = sample();
    let mut state = AppState::new();
    state.select_player_next(&ds);
    state.select_player_next(&ds);
    assert_eq!(state.player_selected, 2);

    state.cycle_role_next();
    assert_eq!(state.role, RoleChoice::Bowler);
    assert_eq!(state.player_selected, 0);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] Role: Bowler"));

    state.cycle_role_prev();
    state.cycle_role_prev();
    assert_eq!(state.role, RoleChoice::AllRounder);
}

#[test]
fn setting_same_role_is_a_no_op() {
    let ds = sample();
    let mut state = AppState::new();
    state.select_player_next(&ds);
    state.set_role(RoleChoice::Batsman);
    assert_eq!(state.player_selected, 1);
    assert!(state.logs.is_empty());
}

#[test]
fn player_selection_wraps() {
    let ds = sample();
    let mut state = AppState::new();
    state.set_role(RoleChoice::AllRounder);
    assert_eq!(state.selected_player_name(&ds), Some("Golf Utility"));
    state.select_player_prev(&ds);
    assert_eq!(state.selected_player_name(&ds), Some("Hotel Grafter"));
    state.select_player_next(&ds);
    assert_eq!(state.selected_player_name(&ds), Some("Golf Utility"));
}

#[test]
fn empty_role_keeps_selection_at_zero() {
    let ds = Dataset::default();
    let mut state = AppState::new();
    state.select_player_next(&ds);
    state.select_player_prev(&ds);
    assert_eq!(state.player_selected, 0);
    assert_eq!(state.selected_player_name(&ds), None);

    let mut rng = StdRng::seed_from_u64(5);
    state.refresh_detail(&ds, &mut rng);
    assert!(state.detail.is_none());
    assert!(state.detail_error.is_none());
    assert!(state.leaderboard(&ds).is_empty());
}

#[test]
fn refresh_detail_follows_selection() {
    let ds = sample();
    let mut state = AppState::new();
    let mut rng = StdRng::seed_from_u64(5);
    state.set_role(RoleChoice::Bowler);
    state.select_player_next(&ds);
    state.refresh_detail(&ds, &mut rng);
    let detail = state.detail.as_ref().expect("detail should be set");
    assert_eq!(detail.player.player_name, "Echo Spin");

    state.reroll_quote(&mut rng);
    assert!(state.detail.is_some());
}

#[test]
fn leaderboard_uses_configured_size() {
    let ds = sample();
    let state = AppState::new().with_leaderboard_size(2);
    assert_eq!(state.leaderboard(&ds).len(), 2);
    let state = AppState::new();
    assert_eq!(state.leaderboard(&ds).len(), 3);
}

#[test]
fn query_typing_and_submit() {
    let ds = sample();
    let mut state = AppState::new();
    state.push_query_char('x');
    assert!(state.query_input.is_empty());

    state.begin_query();
    assert_eq!(state.input_mode, InputMode::Query);
    for c in "most runz".chars() {
        state.push_query_char(c);
    }
    state.pop_query_char();
    state.push_query_char('s');
    state.submit_query(&ds);

    assert_eq!(state.input_mode, InputMode::Browse);
    assert!(state.query_input.is_empty());
    let banner = state.banner.as_ref().expect("banner should be set");
    assert_eq!(banner.level, BannerLevel::Info);
    assert_eq!(banner.title, "Most Runs: Bravo Anchor - 6100 runs");
    assert!(state.logs.back().unwrap().starts_with("[INFO] Query 'most runs'"));
}

#[test]
fn unknown_query_sets_warning_banner() {
    let ds = sample();
    let mut state = AppState::new();
    state.begin_query();
    for c in "who will win the world cup".chars() {
        state.push_query_char(c);
    }
    state.submit_query(&ds);
    let banner = state.banner.as_ref().unwrap();
    assert_eq!(banner.level, BannerLevel::Warning);
    assert!(state.logs.back().unwrap().starts_with("[WARN]"));
}

#[test]
fn blank_or_cancelled_query_changes_nothing() {
    let ds = sample();
    let mut state = AppState::new();
    state.begin_query();
    state.push_query_char(' ');
    state.submit_query(&ds);
    assert!(state.banner.is_none());
    assert!(state.logs.is_empty());

    state.begin_query();
    state.push_query_char('m');
    state.cancel_query();
    assert_eq!(state.input_mode, InputMode::Browse);
    assert!(state.query_input.is_empty());
    assert!(state.banner.is_none());
}

#[test]
fn console_log_is_bounded() {
    let mut state = AppState::new();
    for i in 0..250 {
        state.push_log(format!("[INFO] line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}
