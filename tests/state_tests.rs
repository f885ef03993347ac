use ghfeed::activity::{RawEvent, parse_events};
use ghfeed::app::actions::{Action, SideEffect};
use ghfeed::app::state::{AppState, ViewStatus};
use ghfeed::app::update::{fetch_activity, update};

fn make_state() -> AppState {
    AppState::new("testuser".into(), 5)
}

fn push_event(id: &str, repo: &str) -> String {
    format!(
        r#"{{"id":"{id}","type":"PushEvent","repo":{{"name":"{repo}"}},"created_at":"2024-01-01T00:00:00Z","payload":{{"ref":"refs/heads/main","head":"abc","commits":[{{"sha":"abc","message":"m"}}]}}}}"#
    )
}

fn watch_event(id: &str) -> String {
    format!(
        r#"{{"id":"{id}","type":"WatchEvent","repo":{{"name":"o/r"}},"created_at":"2024-01-01T00:00:00Z","payload":{{}}}}"#
    )
}

fn events(raw: &[String]) -> Vec<RawEvent> {
    parse_events(&format!("[{}]", raw.join(","))).unwrap()
}

/// Issue a fetch and return its sequence number.
fn start_fetch(state: &mut AppState, silent: bool) -> u64 {
    match fetch_activity(state, silent).as_slice() {
        [SideEffect::FetchActivity { seq }] => *seq,
        other => panic!("Expected a single fetch, got {:?}", other),
    }
}

fn loaded(seq: u64, raw: &[String]) -> Action {
    Action::ActivityLoaded {
        seq,
        result: Ok(events(raw)),
    }
}

fn failed(seq: u64, msg: &str) -> Action {
    Action::ActivityLoaded {
        seq,
        result: Err(msg.into()),
    }
}

// --- Initial state ---

#[test]
fn test_initial_state_is_loading() {
    let state = make_state();
    assert_eq!(state.status, ViewStatus::Loading);
    assert!(!state.refreshing);
    assert!(state.items.is_empty());
    assert!(state.last_updated.is_none());
    assert_eq!(state.request_seq, 0);
    assert!(!state.should_quit);
}

// --- Fetch transitions ---

#[test]
fn test_non_silent_fetch_enters_loading_and_clears_error() {
    let mut state = make_state();
    state.status = ViewStatus::Error("boom".into());

    let seq = start_fetch(&mut state, false);
    assert_eq!(seq, 1);
    assert_eq!(state.status, ViewStatus::Loading);
    assert!(state.error_message().is_none());
}

#[test]
fn test_silent_fetch_keeps_cards_visible() {
    let mut state = make_state();
    let seq = start_fetch(&mut state, false);
    update(&mut state, loaded(seq, &[push_event("1", "a/b")]));
    assert_eq!(state.status, ViewStatus::Populated);

    start_fetch(&mut state, true);
    assert_eq!(state.status, ViewStatus::Populated);
    assert!(state.refreshing);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn test_success_populates_and_records_time() {
    let mut state = make_state();
    let seq = start_fetch(&mut state, false);
    update(
        &mut state,
        loaded(seq, &[push_event("1", "a/b"), push_event("2", "a/c")]),
    );

    assert_eq!(state.status, ViewStatus::Populated);
    assert_eq!(state.items.len(), 2);
    assert!(state.last_updated.is_some());
    assert!(!state.is_busy());
}

#[test]
fn test_success_truncates_to_limit() {
    let mut state = AppState::new("u".into(), 2);
    let seq = start_fetch(&mut state, false);
    let raw: Vec<String> = (0..5).map(|i| push_event(&i.to_string(), "a/b")).collect();
    update(&mut state, loaded(seq, &raw));
    assert_eq!(state.items.len(), 2);
}

#[test]
fn test_only_ignored_events_is_empty_state() {
    let mut state = make_state();
    let seq = start_fetch(&mut state, false);
    update(&mut state, loaded(seq, &[watch_event("1")]));

    assert_eq!(state.status, ViewStatus::Empty);
    assert!(state.can_retry());

    let effects = update(&mut state, Action::Retry);
    assert_eq!(effects, vec![SideEffect::FetchActivity { seq: 2 }]);
    assert_eq!(state.status, ViewStatus::Loading);
}

#[test]
fn test_failure_replaces_view_with_error() {
    let mut state = make_state();
    let seq = start_fetch(&mut state, false);
    update(&mut state, loaded(seq, &[push_event("1", "a/b")]));

    let seq = start_fetch(&mut state, true);
    update(&mut state, failed(seq, "GitHub API rate limit exceeded"));

    assert_eq!(
        state.status,
        ViewStatus::Error("GitHub API rate limit exceeded".into())
    );
    assert!(state.items.is_empty());
    assert!(!state.refreshing);
}

#[test]
fn test_network_error_then_retry_then_success() {
    let mut state = make_state();
    let seq = start_fetch(&mut state, false);
    update(&mut state, failed(seq, "error sending request"));
    assert!(state.can_retry());

    let effects = update(&mut state, Action::Retry);
    let seq = match effects.as_slice() {
        [SideEffect::FetchActivity { seq }] => *seq,
        other => panic!("Expected fetch, got {:?}", other),
    };
    assert_eq!(state.status, ViewStatus::Loading);

    update(&mut state, loaded(seq, &[push_event("1", "a/b")]));
    assert_eq!(state.status, ViewStatus::Populated);
}

// --- Refresh policy ---

#[test]
fn test_manual_refresh_is_silent() {
    let mut state = make_state();
    let seq = start_fetch(&mut state, false);
    update(&mut state, loaded(seq, &[push_event("1", "a/b")]));

    let effects = update(&mut state, Action::Refresh);
    assert_eq!(effects.len(), 1);
    assert!(state.refreshing);
    assert_eq!(state.status, ViewStatus::Populated);
}

#[test]
fn test_manual_refresh_disabled_while_in_flight() {
    let mut state = make_state();
    start_fetch(&mut state, false);
    assert!(update(&mut state, Action::Refresh).is_empty());

    state.status = ViewStatus::Populated;
    state.refreshing = true;
    assert!(update(&mut state, Action::Refresh).is_empty());
}

#[test]
fn test_auto_refresh_fires_even_while_refreshing() {
    let mut state = make_state();
    state.status = ViewStatus::Populated;
    state.refreshing = true;
    let effects = update(&mut state, Action::AutoRefresh);
    assert_eq!(effects.len(), 1);
}

#[test]
fn test_stale_reply_is_discarded() {
    let mut state = make_state();
    let first = start_fetch(&mut state, false);
    update(&mut state, loaded(first, &[push_event("1", "a/b")]));

    // Manual refresh in flight, then the timer fires
    let manual = match update(&mut state, Action::Refresh).as_slice() {
        [SideEffect::FetchActivity { seq }] => *seq,
        other => panic!("Expected fetch, got {:?}", other),
    };
    let timer = match update(&mut state, Action::AutoRefresh).as_slice() {
        [SideEffect::FetchActivity { seq }] => *seq,
        other => panic!("Expected fetch, got {:?}", other),
    };
    assert!(timer > manual);

    // Timer reply lands first, then the older manual reply
    update(&mut state, loaded(timer, &[push_event("new", "a/new")]));
    update(&mut state, loaded(manual, &[push_event("old", "a/old")]));

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "new");
    assert!(!state.refreshing);
}

#[test]
fn test_stale_failure_does_not_clobber_fresh_data() {
    let mut state = make_state();
    let old = start_fetch(&mut state, false);
    let new = start_fetch(&mut state, true);

    update(&mut state, loaded(new, &[push_event("1", "a/b")]));
    update(&mut state, failed(old, "timeout"));

    assert_eq!(state.status, ViewStatus::Populated);
}

// --- Navigation ---

#[test]
fn test_cursor_moves_within_bounds() {
    let mut state = make_state();
    let seq = start_fetch(&mut state, false);
    update(
        &mut state,
        loaded(seq, &[push_event("1", "a/b"), push_event("2", "a/c")]),
    );

    update(&mut state, Action::MoveUp);
    assert_eq!(state.cursor, 0);
    update(&mut state, Action::MoveDown);
    assert_eq!(state.cursor, 1);
    update(&mut state, Action::MoveDown);
    assert_eq!(state.cursor, 1);
}

#[test]
fn test_cursor_clamped_after_shorter_reload() {
    let mut state = make_state();
    let seq = start_fetch(&mut state, false);
    update(
        &mut state,
        loaded(seq, &[push_event("1", "a/b"), push_event("2", "a/c")]),
    );
    state.cursor = 1;

    let seq = start_fetch(&mut state, true);
    update(&mut state, loaded(seq, &[push_event("3", "a/d")]));
    assert_eq!(state.cursor, 0);
}

// --- Side effects ---

#[test]
fn test_open_selected_card() {
    let mut state = make_state();
    let seq = start_fetch(&mut state, false);
    update(&mut state, loaded(seq, &[push_event("1", "a/b")]));

    let effects = update(&mut state, Action::OpenSelected);
    assert_eq!(
        effects,
        vec![SideEffect::OpenUrl("https://github.com/a/b/commits/abc".into())]
    );
}

#[test]
fn test_open_selected_without_cards_does_nothing() {
    let mut state = make_state();
    assert!(update(&mut state, Action::OpenSelected).is_empty());
}

#[test]
fn test_open_profile() {
    let mut state = make_state();
    let effects = update(&mut state, Action::OpenProfile);
    assert_eq!(
        effects,
        vec![SideEffect::OpenUrl("https://github.com/testuser".into())]
    );
}

#[test]
fn test_tick_advances_spinner_only_while_busy() {
    let mut state = make_state();
    update(&mut state, Action::Tick);
    assert_eq!(state.spinner_frame, 1);

    state.status = ViewStatus::Populated;
    update(&mut state, Action::Tick);
    assert_eq!(state.spinner_frame, 1);
}

#[test]
fn test_quit() {
    let mut state = make_state();
    update(&mut state, Action::Quit);
    assert!(state.should_quit);
}
