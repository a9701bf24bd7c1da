///
/// Client side navigation of the host application
///
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, link: &str);
}

///
/// [Navigator] for hosts without a router, only records the request
///
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, link: &str) {
        tracing::info!(link, "navigation requested");
    }
}
