use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::handlers;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::views::{render_page, PageView};
use std::time::Instant;

/// Top-level controller owning the session, the fetched activities, and the
/// API client. Actions take `&mut self`, so per controller instance the
/// "perform action, update state, re-render" sequence runs to completion
/// before the next action starts.
pub struct App {
    pub(crate) api: ApiClient,
    pub(crate) store: SessionStore,
    pub(crate) state: AppState,
}

impl App {
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        Self {
            api: ApiClient::new(base_url),
            store,
            state: AppState::default(),
        }
    }

    /// Page-load sequence: restore the saved session, then pull the activity
    /// list.
    pub async fn init(&mut self) {
        self.state.session = self.store.restore().await;
        handlers::refresh(self).await;
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn toggle_menu(&mut self) {
        self.state.menu_open = !self.state.menu_open;
    }

    pub fn page(&self, now: Instant) -> PageView {
        render_page(&self.state, now)
    }

    pub async fn refresh(&mut self) {
        handlers::refresh(self).await;
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        handlers::login(self, username, password).await
    }

    pub async fn logout(&mut self) {
        handlers::logout(self).await;
    }

    /// On success the embedder should reset its signup form.
    pub async fn signup(&mut self, activity: &str, email: &str) -> Result<(), ClientError> {
        handlers::signup(self, activity, email).await
    }

    pub async fn unregister(&mut self, activity: &str, email: &str) -> Result<(), ClientError> {
        handlers::unregister(self, activity, email).await
    }
}
