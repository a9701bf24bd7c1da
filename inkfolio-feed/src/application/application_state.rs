use super::ApplicationEnv;
use inkfolio_feed::{
    api::{HttpNotificationsApi, HttpNotificationsApiConfig},
    notification_feed::{FeedConfig, NotificationFeed},
    service::read_state_controller::LogNavigator,
    AuthContext,
};
use std::sync::Arc;

pub struct ApplicationState {
    pub auth_context: AuthContext,
    pub feed: NotificationFeed,
}

pub fn create_state(env: ApplicationEnv) -> anyhow::Result<ApplicationState> {
    tracing::info!("decoding session");
    let auth_context = env.session_decoder.decode(&env.session_token)?;
    tracing::info!(user_id = %auth_context.user_id, user_type = %auth_context.user_type, "session decoded");

    tracing::info!("creating notifications api");
    let api = HttpNotificationsApi::new(HttpNotificationsApiConfig {
        base_url: env.api_base_url,
        session_token: env.session_token,
        request_timeout: env.api_request_timeout,
    })?;

    let feed_config = FeedConfig {
        page_size: env.page_size,
        refresh_interval: env.refresh_interval,
        optimistic_policy: env.optimistic_policy,
        ..FeedConfig::for_auth_context(&auth_context)
    };
    tracing::info!(?feed_config, "creating feed");
    let feed = NotificationFeed::new(feed_config, Arc::new(api), Arc::new(LogNavigator))?;

    Ok(ApplicationState { auth_context, feed })
}
