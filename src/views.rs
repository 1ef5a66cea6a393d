use crate::models::{Activity, Notice};
use crate::session::Session;
use crate::state::{ActivitiesState, AppState};
use std::fmt::Write as _;
use std::time::Instant;

/// The rendered page sections an embedder swaps into its document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub auth: String,
    pub activities: String,
    pub signup: String,
    pub notice: String,
}

pub fn render_page(state: &AppState, now: Instant) -> PageView {
    let logged_in = state.session.is_authenticated();
    PageView {
        auth: render_auth_panel(&state.session, state.menu_open, state.login_error.as_deref()),
        activities: render_activities(&state.activities, logged_in),
        signup: render_signup_section(&state.activities, logged_in),
        notice: render_notice(state.visible_notice(now)),
    }
}

/// Activity cards in response order; delete buttons appear only for an
/// authenticated viewer.
pub fn render_activities(state: &ActivitiesState, logged_in: bool) -> String {
    let activities = match state {
        ActivitiesState::Loading => return "<p>Loading activities...</p>".to_string(),
        ActivitiesState::Failed => {
            return "<p>Failed to load activities. Please try again later.</p>".to_string()
        }
        ActivitiesState::Loaded(activities) => activities,
    };

    let mut html = String::new();
    for (name, activity) in activities.iter() {
        html.push_str(&render_card(name, activity, logged_in));
    }
    html
}

fn render_card(name: &str, activity: &Activity, logged_in: bool) -> String {
    let participants = if activity.participants.is_empty() {
        "<p><em>No participants yet</em></p>".to_string()
    } else {
        let mut items = String::new();
        for email in &activity.participants {
            let delete_button = if logged_in {
                format!(
                    r#"<button class="delete-btn" data-activity="{}" data-email="{}">❌</button>"#,
                    escape_html(name),
                    escape_html(email)
                )
            } else {
                String::new()
            };
            let _ = write!(
                items,
                r#"<li><span class="participant-email">{}</span>{delete_button}</li>"#,
                escape_html(email)
            );
        }
        format!(
            r#"<div class="participants-section"><h5>Participants:</h5><ul class="participants-list">{items}</ul></div>"#
        )
    };

    format!(
        r#"<div class="activity-card">
  <h4>{name}</h4>
  <p>{description}</p>
  <p><strong>Schedule:</strong> {schedule}</p>
  <p><strong>Availability:</strong> {spots} spots left</p>
  <div class="participants-container">{participants}</div>
</div>
"#,
        name = escape_html(name),
        description = escape_html(&activity.description),
        schedule = escape_html(&activity.schedule),
        spots = activity.spots_left(),
    )
}

/// The signup form, hidden entirely for a logged-out viewer.
pub fn render_signup_section(state: &ActivitiesState, logged_in: bool) -> String {
    let container_class = if logged_in { "" } else { " hidden" };
    format!(
        r#"<div id="signup-container" class="{container_class}">
  <form id="signup-form">
    <input id="email" type="email" placeholder="Your email" required>
    <select id="activity" required>{options}</select>
    <button type="submit">Sign up</button>
  </form>
</div>
"#,
        options = render_activity_options(state),
    )
}

/// Option list for the signup select: a leading placeholder, then one option
/// per activity in the same order as the cards.
pub fn render_activity_options(state: &ActivitiesState) -> String {
    let mut html = String::from(r#"<option value="">-- Select an activity --</option>"#);
    if let ActivitiesState::Loaded(activities) = state {
        for (name, _) in activities.iter() {
            let _ = write!(html, r#"<option value="{0}">{0}</option>"#, escape_html(name));
        }
    }
    html
}

/// Auth panel: login form vs greeting, dropdown visibility, and the inline
/// login error area.
pub fn render_auth_panel(session: &Session, menu_open: bool, login_error: Option<&str>) -> String {
    let dropdown_class = if menu_open { "" } else { " hidden" };
    let (login_class, logged_in_class) = if session.is_authenticated() {
        (" hidden", "")
    } else {
        ("", " hidden")
    };
    let username = session.username.as_deref().unwrap_or("");
    let (error_class, error_text) = match login_error {
        Some(text) => ("", escape_html(text)),
        None => (" hidden", String::new()),
    };

    format!(
        r#"<div id="user-dropdown" class="dropdown{dropdown_class}">
  <div id="login-section" class="{login_class}">
    <input id="login-username" type="text" placeholder="Username">
    <input id="login-password" type="password" placeholder="Password">
    <button id="login-btn">Log in</button>
    <p id="login-error" class="error{error_class}">{error_text}</p>
  </div>
  <div id="logged-in-section" class="{logged_in_class}">
    <p>Logged in as <span id="logged-in-user">{username}</span></p>
    <button id="logout-btn">Log out</button>
  </div>
</div>
"#,
        username = escape_html(username),
    )
}

pub fn render_notice(notice: Option<&Notice>) -> String {
    match notice {
        Some(notice) => format!(
            r#"<div id="message" class="{}">{}</div>"#,
            notice.kind.css_class(),
            escape_html(&notice.text)
        ),
        None => r#"<div id="message" class="hidden"></div>"#.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
