pub mod api;
pub mod app;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod views;

pub use api::ApiClient;
pub use app::App;
pub use errors::ClientError;
pub use models::{Activities, Activity, MessageKind, Notice};
pub use session::{resolve_session_path, Session, SessionStore};
pub use state::{ActivitiesState, AppState};
pub use views::PageView;
