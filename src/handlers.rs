use crate::app::App;
use crate::errors::ClientError;
use crate::models::MessageKind;
use crate::session::Session;
use crate::state::ActivitiesState;
use tracing::{debug, warn};

const LOGIN_VALIDATION: &str = "Please enter both username and password.";
const LOGIN_FAILED: &str = "Login failed.";
const LOGIN_REQUEST_FAILED: &str = "Login request failed.";
const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";
const ACTION_ERROR: &str = "An error occurred";

/// Single-attempt re-fetch of the activity list. A failure swaps in the
/// "failed to load" placeholder instead of propagating.
pub async fn refresh(app: &mut App) {
    match app.api.fetch_activities().await {
        Ok(activities) => app.state.activities = ActivitiesState::Loaded(activities),
        Err(err) => {
            warn!("failed to fetch activities: {err}");
            app.state.activities = ActivitiesState::Failed;
        }
    }
}

/// Empty fields fail locally without touching the network; a granted login
/// persists the session, closes the auth menu, and re-fetches so the
/// authenticated controls appear.
pub async fn login(app: &mut App, username: &str, password: &str) -> Result<(), ClientError> {
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() || password.is_empty() {
        app.state.login_error = Some(LOGIN_VALIDATION.to_string());
        return Err(ClientError::Validation(LOGIN_VALIDATION.to_string()));
    }

    match app.api.login(username, password).await {
        Ok(granted) => {
            app.store.save(&granted.token, &granted.username).await;
            app.state.session = Session::new(granted.token, granted.username);
            app.state.login_error = None;
            app.state.menu_open = false;
            refresh(app).await;
            Ok(())
        }
        Err(err) => {
            let fallback = if err.is_server_rejection() {
                LOGIN_FAILED
            } else {
                LOGIN_REQUEST_FAILED
            };
            app.state.login_error = Some(err.user_message(fallback));
            Err(err)
        }
    }
}

/// Best-effort server-side invalidation; the local session is cleared no
/// matter what the network does.
pub async fn logout(app: &mut App) {
    if let Some(token) = app.state.session.token.clone() {
        if let Err(err) = app.api.logout(&token).await {
            debug!("ignoring logout failure: {err}");
        }
    }
    app.store.clear().await;
    app.state.session = Session::default();
    app.state.menu_open = false;
    refresh(app).await;
}

pub async fn signup(app: &mut App, activity: &str, email: &str) -> Result<(), ClientError> {
    let token = app.state.session.token.clone();
    match app.api.signup(activity, email, token.as_deref()).await {
        Ok(done) => {
            app.state.show_notice(done.message, MessageKind::Success);
            refresh(app).await;
            Ok(())
        }
        Err(err) => {
            // A server rejection without a detail body gets the generic
            // server-side text; the "try again" wording is for requests that
            // never completed.
            let fallback = if err.is_server_rejection() {
                ACTION_ERROR
            } else {
                SIGNUP_FAILED
            };
            app.state
                .show_notice(err.user_message(fallback), MessageKind::Error);
            Err(err)
        }
    }
}

pub async fn unregister(app: &mut App, activity: &str, email: &str) -> Result<(), ClientError> {
    let token = app.state.session.token.clone();
    match app.api.unregister(activity, email, token.as_deref()).await {
        Ok(done) => {
            app.state.show_notice(done.message, MessageKind::Success);
            refresh(app).await;
            Ok(())
        }
        Err(err) => {
            let fallback = if err.is_server_rejection() {
                ACTION_ERROR
            } else {
                UNREGISTER_FAILED
            };
            app.state
                .show_notice(err.user_message(fallback), MessageKind::Error);
            Err(err)
        }
    }
}
