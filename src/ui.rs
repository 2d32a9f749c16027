// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;
pub mod quit_confirm;
pub mod settings;

use crate::{
    app::{App, AppScreen},
    errors::{AssistantError, AssistantResult},
    key_handlers::{handle_key, KeyOutcome},
    resolver::{Exchange, Reply, ResponseResolver},
    session::RequestId,
};
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Clear,
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_millis(250);
const INPUT_POLL: Duration = Duration::from_millis(100);

type Settled = (RequestId, AssistantResult<Reply>);

/// Runs the terminal UI until the user quits.
pub async fn run_ui(mut app: App, resolver: Arc<ResponseResolver>) -> AssistantResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::channel::<CEvent>(100);
    spawn_input_reader(event_tx);

    let res = run_app(&mut terminal, &mut app, event_rx, resolver).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Forwards terminal events to `event_tx` until either side goes away.
fn spawn_input_reader(event_tx: mpsc::Sender<CEvent>) {
    // crossterm polling blocks, so it gets its own thread.
    tokio::task::spawn_blocking(move || loop {
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if event_tx.blocking_send(event).is_err() {
                        return;
                    }
                }
                Err(e) => log::error!("failed to read terminal event: {}", e),
            },
            Ok(false) => {
                if event_tx.is_closed() {
                    return;
                }
            }
            Err(e) => {
                log::error!("failed to poll terminal events: {}", e);
                return;
            }
        }
    });
}

/// Main loop of the application.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut event_rx: mpsc::Receiver<CEvent>,
    resolver: Arc<ResponseResolver>,
) -> AssistantResult<()> {
    let (reply_tx, mut reply_rx) = mpsc::channel::<Settled>(8);
    let mut ticker = tokio::time::interval(TICK_RATE);

    loop {
        terminal.draw(|f| draw(f, app))?;

        tokio::select! {
            event = event_rx.recv() => match event {
                Some(CEvent::Key(key)) => {
                    if let KeyOutcome::Dispatch(exchange) = handle_key(key, app) {
                        dispatch(exchange, resolver.clone(), reply_tx.clone());
                    }
                }
                Some(_) => {}
                None => {
                    return Err(AssistantError::Task(
                        "terminal input reader stopped".to_string(),
                    ));
                }
            },
            Some((request, outcome)) = reply_rx.recv() => {
                app.session.settle(request, outcome);
                app.on_settled();
            }
            _ = ticker.tick() => {
                app.typing.update_spinner();
            }
        }

        if app.screen == AppScreen::Quit {
            break;
        }
    }

    Ok(())
}

/// Resolves `exchange` in the background and reports back on `reply_tx`.
fn dispatch(exchange: Exchange, resolver: Arc<ResponseResolver>, reply_tx: mpsc::Sender<Settled>) {
    let request = exchange.request;
    let task = tokio::spawn(async move { resolver.resolve(&exchange).await });

    tokio::spawn(async move {
        let outcome = task
            .await
            .map_err(|e| AssistantError::Task(e.to_string()));
        if reply_tx.send((request, outcome)).await.is_err() {
            log::warn!("reply for {:?} arrived after shutdown", request);
        }
    });
}

/// Renders the whole screen.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::draw_header(f, chunks[0], app);
    chat::draw_chat(f, chunks[1], app);
    footer::draw_footer(f, chunks[2], app);

    match app.screen {
        AppScreen::Settings => {
            let area = centered_rect(70, 11, f.area());
            f.render_widget(Clear, area);
            settings::draw_settings(f, area, app);
        }
        AppScreen::QuitConfirm => {
            let area = centered_rect(50, 7, f.area());
            f.render_widget(Clear, area);
            quit_confirm::draw_quit_confirm(f, area);
        }
        AppScreen::Chat | AppScreen::Quit => {}
    }
}

/// A rectangle `percent_x` wide and `height` tall in the middle of `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
