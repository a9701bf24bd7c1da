use super::ApplicationEnv;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Targets of the feed engine, the watcher binary and session decoding
const FEED_TARGETS: [&str; 3] = ["inkfolio_feed", "feed_watcher", "session_auth"];

///
/// Console shows feed events at info and dependencies (reqwest, hyper)
/// only from warn up, unless `RUST_LOG` says otherwise.
/// Log file keeps feed events at debug.
///
pub fn setup_tracing(env: &ApplicationEnv) -> anyhow::Result<()> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(console_filter()?);

    let file_appender = tracing_appender::rolling::daily(&env.log_directory, &env.log_filename);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(file_filter()?);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(())
}

fn console_filter() -> anyhow::Result<EnvFilter> {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());

    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => builder.parse(directives)?,
        Err(_) => builder.parse(feed_directives("info"))?,
    };

    Ok(filter)
}

fn file_filter() -> anyhow::Result<EnvFilter> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(feed_directives("debug"))?;

    Ok(filter)
}

fn feed_directives(level: &str) -> String {
    FEED_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
