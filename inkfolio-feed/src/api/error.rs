#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response status: {0}")]
    UnexpectedStatus(u16),
}
