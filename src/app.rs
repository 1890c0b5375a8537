//! Application state and core logic

use crate::backend::{Backend, BackendClient};
use crate::config::AppConfig;
use crate::error::{BackendError, StorageError};
use crate::i18n::{Language, Text, Translations};
use crate::state::{AppState, Choice, FormSession, SessionError, View};
use crate::storage::{file_name_from_path, save_export, IconCache};
use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Result of a background icon download, delivered to the main loop
#[derive(Debug)]
pub struct IconLoaded {
    pub name: String,
    pub result: Result<PathBuf, StorageError>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Database and blob store access
    backend: Arc<dyn Backend>,
    icons: IconCache,
    pub config: AppConfig,
    pub i18n: Translations,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    icon_tx: UnboundedSender<IconLoaded>,
    icon_rx: UnboundedReceiver<IconLoaded>,
}

impl App {
    /// Create a new App instance and load the form list
    pub async fn new(config: AppConfig) -> Result<Self> {
        let backend: Arc<dyn Backend> = Arc::new(BackendClient::new(&config)?);
        let icons = IconCache::new(config.icon_cache_dir());
        let mut app = Self::with_backend(config, backend, icons, Local::now().date_naive());
        app.refresh_forms().await;
        Ok(app)
    }

    pub fn with_backend(
        config: AppConfig,
        backend: Arc<dyn Backend>,
        icons: IconCache,
        today: NaiveDate,
    ) -> Self {
        let i18n = Translations::new(Language::from_code(config.language.as_deref()));
        let (icon_tx, icon_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(today),
            backend,
            icons,
            config,
            i18n,
            quit: false,
            status_message: None,
            icon_tx,
            icon_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    pub fn text(&self, text: Text) -> &'static str {
        self.i18n.get(text)
    }

    /// Error message with a retry hint appended when retrying can help
    fn write_failure(&self, what: &str, err: &BackendError) -> String {
        if err.is_retryable() {
            format!("{what}: {err}. {}", self.text(Text::RetryHint))
        } else {
            format!("{what}: {err}")
        }
    }

    /// Reload the form list; an unreachable backend leaves it empty
    pub async fn refresh_forms(&mut self) {
        match self.backend.list_forms().await {
            Ok(forms) => {
                tracing::info!("Loaded {} forms", forms.len());
                self.state.forms = forms;
                self.state.backend_connected = true;
                self.prefetch_icons();
            }
            Err(e) => {
                tracing::warn!("Failed to load forms: {e}");
                self.state.forms.clear();
                self.state.backend_connected = false;
                self.status_message = Some(self.text(Text::Offline).to_string());
            }
        }
        if self.state.selected_index >= self.state.forms.len() {
            self.state.reset_selection();
        }
    }

    /// Download missing form icons in the background, at most one fetch per name
    fn prefetch_icons(&mut self) {
        let names: HashSet<String> = self
            .state
            .forms
            .iter()
            .filter_map(|f| f.icon.clone())
            .filter(|name| {
                !self.state.cached_icons.contains(name) && !self.state.pending_icons.contains(name)
            })
            .collect();

        for name in names {
            self.state.pending_icons.insert(name.clone());
            let backend = Arc::clone(&self.backend);
            let icons = self.icons.clone();
            let tx = self.icon_tx.clone();
            tokio::spawn(async move {
                let result = icons.get_or_fetch(&name, backend.as_ref()).await;
                // The receiver only goes away on shutdown
                let _ = tx.send(IconLoaded { name, result });
            });
        }
    }

    /// Apply results of finished background work; called once per tick
    pub fn drain_background_events(&mut self) {
        while let Ok(event) = self.icon_rx.try_recv() {
            self.state.pending_icons.remove(&event.name);
            match event.result {
                Ok(path) => {
                    tracing::debug!("Icon '{}' ready at {}", event.name, path.display());
                    self.state.cached_icons.insert(event.name);
                }
                Err(e) => tracing::warn!("Icon '{}' unavailable: {e}", event.name),
            }
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Forms => self.handle_forms_key(key).await?,
            View::FormFill => self.handle_form_fill_key(key).await?,
            View::Timesheet => self.handle_timesheet_key(key).await?,
            View::Submissions => self.handle_submissions_key(key).await?,
        }
        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
        self.state.reset_selection();
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        self.state.reset_selection();
        // Skip form views in history to go back to the last non-form view
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            return;
        }
        self.state.current_view = View::Forms;
    }

    /// Switch between the top-level sidebar sections
    async fn open_section(&mut self, view: View) {
        if self.state.current_view == view {
            return;
        }
        self.navigate(view);
        if view == View::Submissions {
            self.refresh_submissions().await;
        }
    }

    /// Number keys jump to sidebar sections from list views
    async fn handle_section_key(&mut self, key: KeyEvent) -> bool {
        let view = match key.code {
            KeyCode::Char('1') => View::Forms,
            KeyCode::Char('2') => View::Timesheet,
            KeyCode::Char('3') => View::Submissions,
            _ => return false,
        };
        self.open_section(view).await;
        true
    }

    /// Handle keys in the form list
    async fn handle_forms_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.handle_section_key(key).await {
            return Ok(());
        }
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.move_selection_down(self.state.forms.len());
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('r') => self.refresh_forms().await,
            KeyCode::Enter => self.start_session().await,
            _ => {}
        }
        Ok(())
    }

    /// Fetch the selected template and open it for filling
    async fn start_session(&mut self) {
        let Some(form_id) = self.state.selected_form().map(|f| f.id.clone()) else {
            return;
        };

        match self.backend.fetch_form(&form_id).await {
            Ok(template) => {
                let session = FormSession::start(
                    &template,
                    self.config.operator(),
                    self.text(Text::SignedBy),
                    self.config.comment_limit(),
                    Utc::now(),
                );
                self.state.session = Some(session);
                self.navigate(View::FormFill);
            }
            Err(e) => {
                tracing::warn!("Failed to load form '{form_id}': {e}");
                self.status_message = Some(format!("Could not open form: {e}"));
            }
        }
    }

    /// Handle keys while filling in a form
    async fn handle_form_fill_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit_session().await;
            return Ok(());
        }
        if key.code == KeyCode::Esc {
            self.discard_session();
            return Ok(());
        }

        let Some(session) = self.state.session.as_mut() else {
            self.go_back();
            return Ok(());
        };

        match key.code {
            KeyCode::Tab => session.next_field(),
            KeyCode::BackTab => session.prev_field(),
            KeyCode::Down => session.next_question(),
            KeyCode::Up => session.prev_question(),
            _ if session.active_accepts_text() => {
                let plain = !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
                match key.code {
                    KeyCode::Char(c) if plain => {
                        session.input_char(c);
                    }
                    KeyCode::Backspace => {
                        session.backspace();
                    }
                    KeyCode::Enter => {
                        // Single-line buffers treat Enter as "next"
                        if !session.newline() {
                            session.next_field();
                        }
                    }
                    _ => {}
                }
            }
            KeyCode::Left | KeyCode::Char('h') => session.move_choice_cursor(false),
            KeyCode::Right | KeyCode::Char('l') => session.move_choice_cursor(true),
            KeyCode::Char(' ') | KeyCode::Enter => {
                session.confirm_choice();
            }
            KeyCode::Char('1') | KeyCode::Char('o') => {
                session.select_choice(Choice::Ok);
            }
            KeyCode::Char('2') | KeyCode::Char('n') => {
                session.select_choice(Choice::NotOk);
            }
            KeyCode::Char('3') | KeyCode::Char('a') => {
                session.select_choice(Choice::Na);
            }
            _ => {}
        }
        Ok(())
    }

    /// Validate and submit the open session; failures keep it for a retry
    async fn submit_session(&mut self) {
        let built = match self.state.session.as_mut() {
            Some(session) => {
                let built = session.build_submission(Utc::now());
                match &built {
                    Err(SessionError::Unanswered(_)) => {
                        session.focus_first_missing();
                    }
                    Err(SessionError::MissingSignature) => {
                        session.focus_index(session.stop_count() - 1);
                    }
                    Ok(_) => {}
                }
                built
            }
            None => return,
        };

        let submission = match built {
            Ok(submission) => submission,
            Err(e) => {
                let message = match &e {
                    SessionError::Unanswered(ids) => format!("{e}: {}", ids.join(", ")),
                    SessionError::MissingSignature => e.to_string(),
                };
                self.push_error(message);
                return;
            }
        };

        match self.backend.submit_form(&submission).await {
            Ok(stored_id) => {
                tracing::info!("Form '{}' submitted as {stored_id}", submission.form_id);
                self.state.session = None;
                self.status_message = Some(self.text(Text::Submitted).to_string());
                self.go_back();
            }
            Err(e) => {
                let message = self.write_failure("Submission failed", &e);
                self.push_error(message);
            }
        }
    }

    fn discard_session(&mut self) {
        if let Some(session) = self.state.session.take() {
            tracing::info!("Discarded session for form '{}'", session.form_id);
            self.status_message = Some(self.text(Text::Discarded).to_string());
        }
        self.go_back();
    }

    /// Handle keys in the timesheet form
    async fn handle_timesheet_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_timesheet().await;
            }
            KeyCode::Char('e') if key.modifiers.contains(crate::platform::SHORTCUT_MODIFIER) => {
                self.export_timesheet().await;
            }
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab => self.state.timesheet.next_field(),
            KeyCode::BackTab => self.state.timesheet.prev_field(),
            KeyCode::Enter => {
                if self.state.timesheet.is_active_field_multiline() {
                    self.state.timesheet.get_active_field_mut().push_char('\n');
                } else {
                    self.state.timesheet.next_field();
                }
            }
            KeyCode::Backspace => self.state.timesheet.get_active_field_mut().pop_char(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.state.timesheet.get_active_field_mut().push_char(c);
            }
            _ => {}
        }
        Ok(())
    }

    async fn submit_timesheet(&mut self) {
        let entry = match self
            .state
            .timesheet
            .to_entry(self.config.operator(), Utc::now())
        {
            Ok(entry) => entry,
            Err(e) => {
                self.push_error(format!("Invalid timesheet entry: {e}"));
                return;
            }
        };

        match self.backend.submit_timesheet(&entry).await {
            Ok(stored_id) => {
                tracing::info!("Timesheet entry for {} stored as {stored_id}", entry.date);
                self.state.timesheet.reset_for_next_entry();
                self.status_message = Some(self.text(Text::TimesheetSaved).to_string());
            }
            Err(e) => {
                let message = self.write_failure("Saving timesheet failed", &e);
                self.push_error(message);
            }
        }
    }

    /// Ask the backend to render the operator's timesheet and download it
    async fn export_timesheet(&mut self) {
        let path = match self
            .backend
            .request_timesheet_export(self.config.operator())
            .await
        {
            Ok(path) => path,
            Err(e) => {
                let message = self.write_failure("Timesheet export failed", &e);
                self.push_error(message);
                return;
            }
        };
        self.download(&path).await;
    }

    /// Fetch a blob and save it into the export directory
    async fn download(&mut self, blob_path: &str) {
        let bytes = match self.backend.fetch_blob(blob_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let message = self.write_failure("Download failed", &e);
                self.push_error(message);
                return;
            }
        };

        let dir = self.config.export_dir();
        match save_export(&dir, file_name_from_path(blob_path), &bytes).await {
            Ok(path) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(e) => self.push_error(format!("Could not save export: {e}")),
        }
    }

    /// Handle keys in the submissions list
    async fn handle_submissions_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.handle_section_key(key).await {
            return Ok(());
        }
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc => self.go_back(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.move_selection_down(self.state.submissions.len());
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('r') => self.refresh_submissions().await,
            KeyCode::Enter | KeyCode::Char('e') => self.export_selected_report().await,
            _ => {}
        }
        Ok(())
    }

    pub async fn refresh_submissions(&mut self) {
        match self.backend.list_submissions(self.config.operator()).await {
            Ok(submissions) => {
                self.state.submissions = submissions;
                self.state.backend_connected = true;
            }
            Err(e) => {
                tracing::warn!("Failed to load submissions: {e}");
                self.state.submissions.clear();
                self.state.backend_connected = false;
                self.status_message = Some(self.text(Text::Offline).to_string());
            }
        }
        if self.state.selected_index >= self.state.submissions.len() {
            self.state.reset_selection();
        }
    }

    async fn export_selected_report(&mut self) {
        let Some(selected) = self.state.selected_submission() else {
            return;
        };
        match selected.report_path.clone() {
            Some(path) => self.download(&path).await,
            None => {
                self.status_message =
                    Some(format!("No report available yet for {}", selected.form_name));
            }
        }
    }
}
