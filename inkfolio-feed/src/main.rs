mod application;

use application::{ApplicationEnv, ApplicationState};
use inkfolio_feed::dto::output::FeedView;
use time::OffsetDateTime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    {
        // Ignore error because .env file is not required
        // as long as env variables are set
        let _ = dotenvy::dotenv();
    }

    let env = ApplicationEnv::parse()?;

    application::setup_tracing(&env)?;

    let ApplicationState { auth_context, feed } = application::create_state(env)?;

    let mut changes = feed.subscribe();
    let outcome = feed.mount().await?;
    tracing::info!(?outcome, user_type = %auth_context.user_type, "watching feed");
    log_view(&feed.view().await);

    tokio::select! {
        _ = application::shutdown_signal() => {},
        _ = async {
            while changes.changed().await.is_ok() {
                log_view(&feed.view().await);
            }
        } => {},
    }

    tracing::info!("unmounting feed");
    feed.unmount().await;

    Ok(())
}

fn log_view(view: &FeedView) {
    let now = OffsetDateTime::now_utc();

    tracing::info!(
        total_items = view.total_items,
        unread_count = view.unread_count,
        page = view.current_page,
        total_pages = view.total_pages,
        loading = view.loading,
        error = ?view.error,
        "feed updated"
    );

    for item in &view.items {
        tracing::info!(
            id = %item.id,
            title = item.display_title(),
            time = %item.relative_time(now),
            read = item.read,
            "{}",
            item.message
        );
    }
}
