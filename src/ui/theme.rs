use ratatui::style::{Color, Modifier, Style};

use crate::activity::CardIcon;

pub const HIGHLIGHT: Style = Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD);

pub const HEADER: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub const DIM: Style = Style::new().fg(Color::DarkGray);

pub const ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

pub const SPINNER: Style = Style::new().fg(Color::Cyan);

pub const BORDER: Style = Style::new().fg(Color::DarkGray);

pub const STATUS_BAR: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

pub const REPO_LINK: Style = Style::new().fg(Color::Cyan);

pub const CARD_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub fn icon(icon: CardIcon) -> Style {
    let color = match icon {
        CardIcon::Commit => Color::Green,
        CardIcon::PullRequestOpened => Color::Magenta,
        CardIcon::PullRequestMerged => Color::Blue,
        CardIcon::PullRequestClosed => Color::Red,
        CardIcon::PullRequestUpdated => Color::Yellow,
    };
    Style::new().fg(color)
}
