use crate::{
    resolver::Exchange,
    session::ChatSession,
    settings::{ResponseMode, SettingsStore},
    status_indicator::StatusIndicator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Chat,
    Settings,
    QuitConfirm,
    Quit,
}

/// Which row of the settings panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Mode,
    RemoteUrl,
}

pub struct App {
    pub screen: AppScreen,
    pub session: ChatSession,
    pub settings: SettingsStore,
    pub input: String,
    /// Lines scrolled up from the newest message.
    pub scroll: u16,
    pub settings_focus: SettingsField,
    pub typing: StatusIndicator,
    /// Transient note shown in the footer, e.g. a failed settings write.
    pub notice: Option<String>,
    /// Set when settings live only in memory for this run.
    pub storage_warning: Option<String>,
    return_screen: AppScreen,
}

impl App {
    pub fn new(session: ChatSession, settings: SettingsStore) -> App {
        App {
            screen: AppScreen::Chat,
            session,
            settings,
            input: String::new(),
            scroll: 0,
            settings_focus: SettingsField::Mode,
            typing: StatusIndicator::new(),
            notice: None,
            storage_warning: None,
            return_screen: AppScreen::Chat,
        }
    }

    /// Submits the draft. Returns the exchange to resolve, or `None` when
    /// nothing was sent.
    pub fn send(&mut self) -> Option<Exchange> {
        let pending = self.session.submit(&mut self.input)?;
        self.typing.set_thinking(true);
        self.scroll = 0;

        Some(Exchange {
            request: pending.id,
            text: pending.text,
            settings: self.settings.settings().clone(),
            session_id: self.session.id().clone(),
        })
    }

    /// Called once the session has settled its pending request.
    pub fn on_settled(&mut self) {
        self.typing.set_thinking(self.session.is_pending());
        self.scroll = 0;
    }

    pub fn set_mode(&mut self, mode: ResponseMode) {
        let result = self.settings.set_mode(mode);
        self.report(result);
    }

    pub fn toggle_mode(&mut self) {
        let next = if self.settings.settings().mode.is_mock() {
            ResponseMode::Remote
        } else {
            ResponseMode::Mock
        };
        self.set_mode(next);
    }

    /// Edits the remote URL in place. Ignored while mock mode is on, the
    /// same way the web form disables the field.
    pub fn edit_remote_url(&mut self, edit: impl FnOnce(&mut String)) {
        if self.settings.settings().mode.is_mock() {
            return;
        }
        let mut url = self.settings.settings().remote_url.clone();
        edit(&mut url);
        if url != self.settings.settings().remote_url {
            let result = self.settings.set_remote_url(url);
            self.report(result);
        }
    }

    fn report(&mut self, result: crate::errors::AssistantResult<()>) {
        match result {
            Ok(()) => self.notice = None,
            Err(e) => {
                log::error!("failed to save settings: {}", e);
                self.notice = Some(format!("Settings not saved: {}", e));
            }
        }
    }

    pub fn toggle_settings(&mut self) {
        self.screen = match self.screen {
            AppScreen::Settings => AppScreen::Chat,
            _ => {
                self.settings_focus = SettingsField::Mode;
                AppScreen::Settings
            }
        };
    }

    pub fn confirm_quit(&mut self) {
        if self.screen != AppScreen::QuitConfirm {
            self.return_screen = self.screen;
            self.screen = AppScreen::QuitConfirm;
        }
    }

    pub fn cancel_quit(&mut self) {
        self.screen = self.return_screen;
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
