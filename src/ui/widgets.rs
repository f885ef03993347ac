use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::time::{relative_time, relative_time_str};

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

pub fn render_header(f: &mut Frame, area: Rect, state: &AppState) {
    let line = Line::from(vec![
        Span::styled(" GitHub activity ", theme::HEADER),
        Span::styled(format!("· {}", state.username), theme::DIM),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

pub fn render_loading(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).border_style(theme::BORDER);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(spinner_glyph(state.spinner_frame), theme::SPINNER)),
    ];
    let para = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(para, area);
}

pub fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(theme::ERROR);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::ERROR)),
        Line::from(""),
        Line::from(Span::styled("Press r to retry", theme::DIM)),
    ];

    let para = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(para, area);
}

pub fn empty_message(username: &str) -> String {
    format!("No recent GitHub activity found for {}.", username)
}

pub fn render_empty(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).border_style(theme::BORDER);

    let text = vec![
        Line::from(""),
        Line::from(empty_message(&state.username)),
        Line::from(""),
        Line::from(Span::styled("Press r to retry", theme::DIM)),
    ];

    let para = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(para, area);
}

pub fn render_cards(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" Recent activity ({}) ", state.items.len()))
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    let items: Vec<ListItem> = state
        .cards()
        .into_iter()
        .map(|card| {
            let lines = vec![
                Line::from(vec![
                    Span::styled(format!("{} ", card.icon.glyph()), theme::icon(card.icon)),
                    Span::styled(card.title, theme::CARD_TITLE),
                    Span::styled(
                        format!("  {}", relative_time_str(&card.created_at)),
                        theme::DIM,
                    ),
                ]),
                Line::from(Span::styled(format!("  {}", card.description), theme::DIM)),
                Line::from(Span::styled(format!("  {}", card.repo_name), theme::REPO_LINK)),
                Line::from(""),
            ];
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::HIGHLIGHT);

    let mut list_state = ListState::default().with_selected(Some(state.cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

pub fn status_text(state: &AppState) -> (String, String) {
    // Refresh is unavailable while a fetch is in flight.
    let key_hints = if state.can_retry() {
        "r: retry | g: view on GitHub | q: quit"
    } else if state.is_busy() {
        "j/k: move | Enter: open | g: view more on GitHub | q: quit"
    } else {
        "j/k: move | Enter: open | r: refresh | g: view more on GitHub | q: quit"
    };

    let refresh = if state.refreshing {
        format!("{} refreshing", spinner_glyph(state.spinner_frame))
    } else {
        String::new()
    };

    let updated = state
        .last_updated
        .as_ref()
        .map(|t| format!("updated {}", relative_time(t)))
        .unwrap_or_default();

    let right = match (refresh.is_empty(), updated.is_empty()) {
        (true, _) => updated,
        (false, true) => refresh,
        (false, false) => format!("{} | {}", refresh, updated),
    };

    (key_hints.to_string(), right)
}

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let (left, right) = status_text(state);

    let total_width = area.width as usize;
    let padding = total_width.saturating_sub(left.chars().count() + right.chars().count() + 2);

    let line = Line::from(vec![
        Span::styled(format!(" {}", left), theme::STATUS_BAR),
        Span::styled(" ".repeat(padding), theme::STATUS_BAR),
        Span::styled(format!("{} ", right), theme::STATUS_BAR),
    ]);

    let bar = Paragraph::new(line).style(theme::STATUS_BAR);
    f.render_widget(bar, area);
}
