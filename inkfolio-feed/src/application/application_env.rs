use anyhow::anyhow;
use inkfolio_feed::service::notification_store::OptimisticPolicy;
use session_auth::{util::create_session_decoder, SessionDecoder};
use std::{str::FromStr, time::Duration};

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub api_base_url: String,
    pub api_request_timeout: Duration,

    pub session_token: String,
    /// Algorithms must belong to the same family
    pub session_decoder: SessionDecoder,

    pub refresh_interval: Duration,
    pub page_size: usize,
    pub optimistic_policy: OptimisticPolicy,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("INKFOLIO_FEED_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("INKFOLIO_FEED_LOG_FILENAME")?;
        let api_base_url = Self::env_var("INKFOLIO_FEED_API_BASE_URL")?;
        let api_request_timeout = Self::env_var("INKFOLIO_FEED_API_REQUEST_TIMEOUT")?.parse()?;
        let api_request_timeout = Duration::from_secs(api_request_timeout);
        let session_token = Self::env_var("INKFOLIO_FEED_SESSION_TOKEN")?;
        let session_decoder = create_session_decoder(
            &Self::env_var("INKFOLIO_FEED_JWT_ALGORITHMS")?,
            &Self::env_var("INKFOLIO_FEED_JWT_KEY")?,
        )?;
        let refresh_interval = Self::env_var("INKFOLIO_FEED_REFRESH_INTERVAL")?.parse()?;
        let refresh_interval = Duration::from_secs(refresh_interval);
        let page_size = Self::env_var("INKFOLIO_FEED_PAGE_SIZE")?.parse()?;
        let optimistic_policy =
            OptimisticPolicy::from_str(&Self::env_var("INKFOLIO_FEED_OPTIMISTIC_POLICY")?)
                .map_err(|err| anyhow!("INKFOLIO_FEED_OPTIMISTIC_POLICY: {err}"))?;

        Ok(Self {
            log_directory,
            log_filename,
            api_base_url,
            api_request_timeout,
            session_token,
            session_decoder,
            refresh_interval,
            page_size,
            optimistic_policy,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }
}
