use chrono::{DateTime, Utc};

use crate::activity::{ActivityCard, ActivityItem, card_for};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Error(String),
    Empty,
    Populated,
}

#[derive(Debug)]
pub struct AppState {
    // Feed parameters
    pub username: String,
    pub limit: usize,

    // Data
    pub items: Vec<ActivityItem>,
    pub last_updated: Option<DateTime<Utc>>,

    // Status
    pub status: ViewStatus,
    pub refreshing: bool,
    /// Sequence number of the most recently issued fetch. Replies tagged
    /// with an older number are dropped.
    pub request_seq: u64,

    // UI
    pub cursor: usize,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(username: String, limit: usize) -> Self {
        Self {
            username,
            limit,
            items: Vec::new(),
            last_updated: None,
            status: ViewStatus::Loading,
            refreshing: false,
            request_seq: 0,
            cursor: 0,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    /// True while any fetch is outstanding; the refresh control is disabled.
    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.refreshing
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            ViewStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn can_retry(&self) -> bool {
        matches!(self.status, ViewStatus::Error(_) | ViewStatus::Empty)
    }

    pub fn cards(&self) -> Vec<ActivityCard> {
        self.items.iter().map(card_for).collect()
    }

    pub fn selected_url(&self) -> Option<String> {
        if self.status != ViewStatus::Populated {
            return None;
        }
        self.items.get(self.cursor).map(|item| card_for(item).link)
    }

    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.username)
    }

    pub fn clamp_cursor(&mut self) {
        if self.items.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.items.len() {
            self.cursor = self.items.len() - 1;
        }
    }
}
