use tracing::{debug, warn};

use crate::activity::normalize;
use crate::app::actions::{Action, SideEffect};
use crate::app::state::{AppState, ViewStatus};

pub fn update(state: &mut AppState, action: Action) -> Vec<SideEffect> {
    match action {
        Action::Quit => {
            state.should_quit = true;
            vec![]
        }
        Action::MoveUp => {
            if state.cursor > 0 {
                state.cursor -= 1;
            }
            vec![]
        }
        Action::MoveDown => {
            if state.cursor + 1 < state.items.len() {
                state.cursor += 1;
            }
            vec![]
        }
        Action::Refresh => {
            if state.is_busy() {
                return vec![];
            }
            fetch_activity(state, true)
        }
        Action::Retry => {
            if state.is_loading() {
                return vec![];
            }
            fetch_activity(state, false)
        }
        Action::AutoRefresh => fetch_activity(state, true),
        Action::OpenSelected => match state.selected_url() {
            Some(url) => vec![SideEffect::OpenUrl(url)],
            None => vec![],
        },
        Action::OpenProfile => vec![SideEffect::OpenUrl(state.profile_url())],
        Action::ActivityLoaded { seq, result } => {
            if seq != state.request_seq {
                debug!(seq, latest = state.request_seq, "Discarding stale activity reply");
                return vec![];
            }

            state.refreshing = false;
            match result {
                Ok(events) => {
                    state.items = normalize(&events, state.limit);
                    state.last_updated = Some(chrono::Utc::now());
                    state.status = if state.items.is_empty() {
                        ViewStatus::Empty
                    } else {
                        ViewStatus::Populated
                    };
                    state.clamp_cursor();
                }
                Err(msg) => {
                    warn!(error = %msg, "Activity fetch failed");
                    state.items.clear();
                    state.cursor = 0;
                    state.status = ViewStatus::Error(msg);
                }
            }
            vec![]
        }
        Action::Tick => {
            if state.is_busy() {
                state.spinner_frame = state.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
    }
}

/// Start a new fetch. A non-silent fetch drops back to the loading
/// placeholder; a silent one keeps whatever is on screen.
pub fn fetch_activity(state: &mut AppState, silent: bool) -> Vec<SideEffect> {
    state.request_seq += 1;
    if silent {
        state.refreshing = true;
    } else {
        state.status = ViewStatus::Loading;
        state.refreshing = false;
        state.items.clear();
        state.cursor = 0;
    }
    vec![SideEffect::FetchActivity {
        seq: state.request_seq,
    }]
}
