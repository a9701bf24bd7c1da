use super::{Error, NotificationsApi};
use crate::dto::{
    input::{ActivityLogEntry, Notification, NotificationsEnvelope},
    ItemId,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use session_auth::UserType;
use std::time::Duration;

pub struct HttpNotificationsApiConfig {
    /// e.g. `https://api.inkfolio.example/api/v1`
    pub base_url: String,
    pub session_token: String,
    pub request_timeout: Duration,
}

///
/// [NotificationsApi] talking to the platform REST API
///
pub struct HttpNotificationsApi {
    client: Client,
    base_url: String,
    session_token: String,
}

impl HttpNotificationsApi {
    pub fn new(config: HttpNotificationsApiConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_token: config.session_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request.bearer_auth(&self.session_token).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, url = %response.url(), "unexpected response status");
            return Err(Error::UnexpectedStatus(status.as_u16()));
        }

        Ok(response)
    }
}

#[async_trait]
impl NotificationsApi for HttpNotificationsApi {
    async fn fetch_notifications(
        &self,
        scope: Option<UserType>,
    ) -> Result<Vec<Notification>, Error> {
        let mut request = self.client.get(self.url("notifications"));
        if let Some(scope) = scope {
            request = request.query(&[("scope", scope.as_ref())]);
        }

        let envelope = self
            .send(request)
            .await?
            .json::<NotificationsEnvelope>()
            .await?;
        tracing::trace!(count = envelope.data.len(), "received notifications");

        Ok(envelope.data)
    }

    async fn mark_read(&self, id: &ItemId) -> Result<(), Error> {
        let request = self.client.post(self.url(&format!("notifications/{id}/read")));
        self.send(request).await?;

        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), Error> {
        let request = self.client.post(self.url("notifications/read-all"));
        self.send(request).await?;

        Ok(())
    }

    async fn fetch_activity_log(&self, scope: UserType) -> Result<Vec<ActivityLogEntry>, Error> {
        let request = self
            .client
            .get(self.url("activity-log"))
            .query(&[("scope", scope.as_ref())]);

        let entries = self
            .send(request)
            .await?
            .json::<Vec<ActivityLogEntry>>()
            .await?;
        tracing::trace!(count = entries.len(), "received activity log");

        Ok(entries)
    }
}
