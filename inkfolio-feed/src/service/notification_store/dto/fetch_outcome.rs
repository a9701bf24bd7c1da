#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Response replaced the store content
    Applied {
        notifications: usize,
        activities: usize,
    },
    /// Newer fetch was started or local state changed while waiting for the response
    Superseded,
    /// Request failed, previous content is kept and error is exposed
    Failed,
    /// Store was closed before or during the request
    Closed,
}
