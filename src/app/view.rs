use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::{AppState, ViewStatus};
use crate::ui::widgets;

pub fn render(f: &mut Frame, state: &AppState) {
    // header + body + status bar
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    widgets::render_header(f, vertical[0], state);

    let body = vertical[1];
    match &state.status {
        ViewStatus::Loading => widgets::render_loading(f, body, state),
        ViewStatus::Error(msg) => widgets::render_error(f, body, msg),
        ViewStatus::Empty => widgets::render_empty(f, body, state),
        ViewStatus::Populated => widgets::render_cards(f, body, state),
    }

    widgets::render_status_bar(f, vertical[2], state);
}
