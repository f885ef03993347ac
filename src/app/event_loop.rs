use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::activity::FeedClient;
use crate::app::actions::{Action, SideEffect};
use crate::app::state::AppState;
use crate::app::update::{fetch_activity, update};
use crate::app::view;

const SPINNER_TICK: Duration = Duration::from_millis(120);

pub struct WatchOptions {
    pub username: String,
    pub limit: usize,
    pub refresh_interval: Duration,
}

pub async fn run(client: FeedClient, options: WatchOptions) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal if anything panics
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_loop(&mut terminal, client, options).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: FeedClient,
    options: WatchOptions,
) -> Result<()> {
    let mut state = AppState::new(options.username, options.limit);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Mount: initial non-silent fetch
    for effect in fetch_activity(&mut state, false) {
        spawn_side_effect(effect, &state, &client, &action_tx);
    }

    let mut event_stream = crossterm::event::EventStream::new();

    let mut refresh_timer = tokio::time::interval(options.refresh_interval);
    // First tick fires immediately; the initial fetch above covers it
    refresh_timer.tick().await;

    let mut spinner = tokio::time::interval(SPINNER_TICK);

    info!(
        username = %state.username,
        interval_secs = options.refresh_interval.as_secs(),
        "Watching activity"
    );

    loop {
        terminal.draw(|f| view::render(f, &state))?;

        if state.should_quit {
            break;
        }

        let action = tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => map_event_to_action(&event, &state),
                    Some(Err(e)) => {
                        error!(error = %e, "Terminal event error");
                        None
                    }
                    None => Some(Action::Quit),
                }
            }
            Some(action) = action_rx.recv() => Some(action),
            _ = refresh_timer.tick() => {
                debug!("Refresh timer fired");
                Some(Action::AutoRefresh)
            }
            _ = spinner.tick() => Some(Action::Tick),
        };

        if let Some(action) = action {
            for effect in update(&mut state, action) {
                spawn_side_effect(effect, &state, &client, &action_tx);
            }
        }
    }

    // Unmount: the timers drop with this frame. Fetches still in flight
    // finish on their own and their replies go nowhere.
    Ok(())
}

fn map_event_to_action(event: &Event, state: &AppState) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: event::KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char('r') | KeyCode::Enter if state.can_retry() => Some(Action::Retry),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Enter | KeyCode::Char('o') => Some(Action::OpenSelected),
        KeyCode::Char('g') => Some(Action::OpenProfile),
        _ => None,
    }
}

fn spawn_side_effect(
    effect: SideEffect,
    state: &AppState,
    client: &FeedClient,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    match effect {
        SideEffect::FetchActivity { seq } => {
            let client = client.clone();
            let tx = action_tx.clone();
            let username = state.username.clone();
            let limit = state.limit;

            tokio::spawn(async move {
                debug!(seq, username = %username, "Fetching activity");
                let result = client
                    .fetch(&username, limit)
                    .await
                    .map_err(|e| e.to_string());
                if let Err(ref e) = result {
                    error!(seq, error = %e, "Failed to fetch activity");
                }
                let _ = tx.send(Action::ActivityLoaded { seq, result });
            });
        }
        SideEffect::OpenUrl(url) => {
            tokio::task::spawn_blocking(move || {
                if let Err(e) = crate::util::browser::open_link(&url) {
                    error!(error = %e, "Failed to open URL");
                }
            });
        }
    }
}
