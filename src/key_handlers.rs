use crate::app::{App, AppScreen, SettingsField};
use crate::resolver::Exchange;
use crate::settings::ResponseMode;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug)]
pub enum KeyOutcome {
    Continue,
    Dispatch(Exchange),
}

pub fn handle_key(key: KeyEvent, app: &mut App) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Continue;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.confirm_quit();
        return KeyOutcome::Continue;
    }
    if (ctrl && key.code == KeyCode::Char('s')) || key.code == KeyCode::F(2) {
        if app.screen != AppScreen::QuitConfirm {
            app.toggle_settings();
        }
        return KeyOutcome::Continue;
    }

    match app.screen {
        AppScreen::Chat => handle_chat_input(key, app),
        AppScreen::Settings => {
            handle_settings_input(key, app);
            KeyOutcome::Continue
        }
        AppScreen::QuitConfirm => {
            handle_quit_confirm_input(key, app);
            KeyOutcome::Continue
        }
        AppScreen::Quit => KeyOutcome::Continue,
    }
}

fn handle_chat_input(key: KeyEvent, app: &mut App) -> KeyOutcome {
    match key.code {
        KeyCode::Esc => app.confirm_quit(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        // The input line is locked while a reply is pending.
        _ if app.session.is_pending() => {}
        KeyCode::Enter => {
            if let Some(exchange) = app.send() {
                return KeyOutcome::Dispatch(exchange);
            }
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.push(c);
        }
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_settings_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.toggle_settings(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.settings_focus = match app.settings_focus {
                SettingsField::Mode => SettingsField::RemoteUrl,
                SettingsField::RemoteUrl => SettingsField::Mode,
            };
        }
        _ => match app.settings_focus {
            SettingsField::Mode => match key.code {
                KeyCode::Left => app.set_mode(ResponseMode::Mock),
                KeyCode::Right => app.set_mode(ResponseMode::Remote),
                KeyCode::Enter | KeyCode::Char(' ') => app.toggle_mode(),
                _ => {}
            },
            SettingsField::RemoteUrl => match key.code {
                KeyCode::Backspace => app.edit_remote_url(|url| {
                    url.pop();
                }),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.edit_remote_url(|url| url.push(c))
                }
                KeyCode::Enter => app.toggle_settings(),
                _ => {}
            },
        },
    }
}

fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.screen = AppScreen::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => app.cancel_quit(),
        _ => {}
    }
}
