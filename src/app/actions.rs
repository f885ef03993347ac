use crate::activity::RawEvent;

#[derive(Debug)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// User-triggered refresh that keeps the current cards on screen.
    Refresh,
    /// Retry from the error or empty state; shows the loading placeholder.
    Retry,
    /// Refresh timer fired.
    AutoRefresh,
    OpenSelected,
    OpenProfile,
    ActivityLoaded {
        seq: u64,
        result: Result<Vec<RawEvent>, String>,
    },
    Quit,
    Tick,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SideEffect {
    FetchActivity { seq: u64 },
    OpenUrl(String),
}
