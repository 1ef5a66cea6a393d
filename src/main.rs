use activities_client::{resolve_session_path, ActivitiesState, App, SessionStore};
use std::{env, time::Instant};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let base_url =
        env::var("ACTIVITIES_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let session_path = resolve_session_path();
    if let Some(parent) = session_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut app = App::new(base_url.clone(), SessionStore::new(session_path));
    app.init().await;

    if app.state().session.is_authenticated() {
        info!(
            "restored session for {}",
            app.state().session.username.as_deref().unwrap_or_default()
        );
    }
    match &app.state().activities {
        ActivitiesState::Loaded(activities) => {
            info!("loaded {} activities from {base_url}", activities.len())
        }
        _ => info!("could not load activities from {base_url}"),
    }

    let page = app.page(Instant::now());
    println!("{}", page.auth);
    println!("{}", page.activities);
    println!("{}", page.signup);
    println!("{}", page.notice);

    Ok(())
}
