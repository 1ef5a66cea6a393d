use crate::models::{Activities, MessageKind, Notice};
use crate::session::Session;
use std::time::{Duration, Instant};

pub const NOTICE_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ActivitiesState {
    #[default]
    Loading,
    Loaded(Activities),
    Failed,
}

#[derive(Debug, Clone)]
struct PostedNotice {
    notice: Notice,
    shown_at: Instant,
}

/// Everything the renderer needs: session, fetched activities, the transient
/// message, and the bits of auth-panel state (open dropdown, inline login
/// error).
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub activities: ActivitiesState,
    pub menu_open: bool,
    pub login_error: Option<String>,
    notice: Option<PostedNotice>,
}

impl AppState {
    pub fn show_notice(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.show_notice_at(text, kind, Instant::now());
    }

    /// A new notice replaces any pending one and restarts the 5s window, so
    /// an older notice's deadline can never hide a newer message.
    pub fn show_notice_at(&mut self, text: impl Into<String>, kind: MessageKind, now: Instant) {
        self.notice = Some(PostedNotice {
            notice: Notice {
                text: text.into(),
                kind,
            },
            shown_at: now,
        });
    }

    pub fn visible_notice(&self, now: Instant) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|posted| now.saturating_duration_since(posted.shown_at) < NOTICE_TTL)
            .map(|posted| &posted.notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_is_visible_within_ttl() {
        let mut state = AppState::default();
        let t0 = Instant::now();
        state.show_notice_at("Signed up", MessageKind::Success, t0);

        let notice = state.visible_notice(t0 + Duration::from_secs(4)).unwrap();
        assert_eq!(notice.text, "Signed up");
        assert_eq!(notice.kind, MessageKind::Success);
    }

    #[test]
    fn notice_expires_after_ttl() {
        let mut state = AppState::default();
        let t0 = Instant::now();
        state.show_notice_at("Signed up", MessageKind::Success, t0);

        assert!(state.visible_notice(t0 + NOTICE_TTL).is_none());
    }

    #[test]
    fn newer_notice_outlives_the_older_ones_deadline() {
        let mut state = AppState::default();
        let t0 = Instant::now();
        state.show_notice_at("first", MessageKind::Success, t0);
        state.show_notice_at("second", MessageKind::Error, t0 + Duration::from_secs(4));

        // Past the first notice's deadline the replacement must still show.
        let at = t0 + Duration::from_secs(6);
        let notice = state.visible_notice(at).unwrap();
        assert_eq!(notice.text, "second");
        assert_eq!(notice.kind, MessageKind::Error);
    }

    #[test]
    fn no_notice_by_default() {
        let state = AppState::default();
        assert!(state.visible_notice(Instant::now()).is_none());
    }
}
